use crate::error::{PersistError, PersistResult};
use crate::record::{ConfigRecord, API_KEY_KEY, MODEL_KEY, PROVIDER_KEY};
use directories::BaseDirs;
use std::fs::{self, DirBuilder, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const APP_NAMESPACE: &str = "sassyshell";
pub const ENV_FILE_NAME: &str = ".env";

/// Location of the persisted `.env` under a home directory.
///
/// There is no locking: two wizards saving at once race on the file and
/// the last writer wins.
#[derive(Debug, Clone)]
pub struct EnvFileStore {
    dir: PathBuf,
}

impl EnvFileStore {
    pub fn for_current_user() -> PersistResult<Self> {
        let base_dirs = BaseDirs::new();
        Self::from_home_dir(base_dirs.as_ref().map(BaseDirs::home_dir))
    }

    fn from_home_dir(home: Option<&Path>) -> PersistResult<Self> {
        home.map(|home| Self::with_home(home))
            .ok_or(PersistError::HomeDirUnavailable)
    }

    pub fn with_home(home: impl AsRef<Path>) -> Self {
        Self {
            dir: home.as_ref().join(".config").join(APP_NAMESPACE),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(ENV_FILE_NAME)
    }

    /// Writes the record, replacing any previous file entirely.
    pub fn persist(&self, record: &ConfigRecord) -> PersistResult<PathBuf> {
        self.ensure_dir()?;

        let path = self.path();
        write_owner_only(&path, record.to_env_string().as_bytes()).map_err(|source| {
            PersistError::WriteFailed {
                path: path.clone(),
                source,
            }
        })?;

        info!(path = %path.display(), provider = %record.provider, "saved configuration");
        Ok(path)
    }

    pub fn load(&self) -> PersistResult<Option<ConfigRecord>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }

        let read_failed = |source| PersistError::ReadFailed {
            path: path.clone(),
            source,
        };

        let (mut provider, mut model, mut api_key) = (None, None, None);
        for item in dotenvy::from_path_iter(&path).map_err(read_failed)? {
            let (key, value) = item.map_err(read_failed)?;
            match key.as_str() {
                PROVIDER_KEY => provider = Some(value),
                MODEL_KEY => model = Some(value),
                API_KEY_KEY => api_key = Some(value),
                _ => debug!(key = %key, "ignoring unknown key in config file"),
            }
        }

        Ok(match (provider, model, api_key) {
            (Some(provider), Some(model), Some(api_key)) => {
                Some(ConfigRecord::new(provider, model, api_key))
            }
            _ => None,
        })
    }

    fn ensure_dir(&self) -> PersistResult<()> {
        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o755);
        }
        builder
            .create(&self.dir)
            .map_err(|source| PersistError::DirectoryCreateFailed {
                path: self.dir.clone(),
                source,
            })
    }
}

fn write_owner_only(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut file = open_owner_only(path)?;
    file.write_all(contents)?;
    file.flush()
}

/// Opens `path` truncated and restricted to 0600 before any bytes are
/// written, including when a stale file with looser bits already exists.
fn open_owner_only(path: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let file = options.open(path)?;

    // mode() only applies on creation
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    Ok(file)
}

/// Saves the triple under the invoking user's home directory.
pub fn persist(provider: &str, model: &str, api_key: &str) -> PersistResult<PathBuf> {
    EnvFileStore::for_current_user()?.persist(&ConfigRecord::new(provider, model, api_key))
}
