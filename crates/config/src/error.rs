use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("model name required")]
    ModelRequired,

    #[error("API key required")]
    ApiKeyRequired,

    #[error("API key too short")]
    ApiKeyTooShort,
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("could not determine the home directory")]
    HomeDirUnavailable,

    #[error("failed to create config directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write config file {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read config file {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },
}

impl PersistError {
    pub fn user_message(&self) -> &'static str {
        match self {
            PersistError::HomeDirUnavailable => "Set HOME to your home directory and try again.",
            PersistError::DirectoryCreateFailed { .. } => {
                "Check that ~/.config is writable and is not a regular file."
            }
            PersistError::WriteFailed { .. } => {
                "Check disk space and permissions on ~/.config/sassyshell."
            }
            PersistError::ReadFailed { .. } => {
                "The existing .env could not be parsed. It will be replaced on save."
            }
        }
    }
}

pub type PersistResult<T> = Result<T, PersistError>;
