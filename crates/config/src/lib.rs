pub mod error;
pub mod provider;
pub mod record;
pub mod store;

pub use error::{PersistError, PersistResult, ValidationError};
pub use provider::{ProviderOption, PROVIDERS};
pub use record::ConfigRecord;
pub use store::{persist, EnvFileStore};
