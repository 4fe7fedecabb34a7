//! Save/load plumbing shared by the high score and settings files
//!
//! Features:
//! - Config directory resolved from the environment
//! - Atomic writes (tmp → rename) so a crash never leaves a torn file
//! - One error type for everything that touches the disk

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "BALLOON_POPPER_CONFIG_DIR";
/// Config directory used when the environment does not name one
pub const DEFAULT_CONFIG_DIR: &str = "config";

pub const HIGH_SCORE_FILE: &str = ".highscore";
pub const SETTINGS_FILE: &str = "settings.json";
pub const TUNING_FILE: &str = "tuning.json";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("could not write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Location of every persisted file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDir {
    root: PathBuf,
}

impl ConfigDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve from `BALLOON_POPPER_CONFIG_DIR`, else `./config`
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var_os(CONFIG_DIR_ENV))
    }

    fn from_env_value(value: Option<OsString>) -> Self {
        match value {
            Some(explicit) if !explicit.is_empty() => Self::new(explicit),
            _ => Self::new(DEFAULT_CONFIG_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.root.join(HIGH_SCORE_FILE)
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_FILE)
    }

    pub fn tuning_path(&self) -> PathBuf {
        self.root.join(TUNING_FILE)
    }
}

/// Write `contents` to `path` via a sibling temp file and rename
pub fn atomic_write(path: &Path, contents: &[u8]) -> Result<(), PersistenceError> {
    let io_err = |source: io::Error| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Err(e) = fs::write(&tmp, contents).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicU32 = AtomicU32::new(0);

    /// A fresh, not-yet-created directory under the system temp dir
    pub fn unique_temp_dir(tag: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!("balloon_popper_{tag}_{nanos}_{n}"))
    }
}
