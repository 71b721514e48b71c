//! Persisted brightness
//!
//! The last level set is kept in `<state root>/brightctl/last_brightness`
//! so a startup script can bring it back after the panel loses power.

use crate::util::parse_int;
use crate::{BacklightError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory under the state root owned by brightctl
pub const STATE_NAMESPACE: &str = "brightctl";

/// File holding the last brightness level
pub const LAST_BRIGHTNESS_FILE: &str = "last_brightness";

/// Last-brightness state file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateStore {
    dir: PathBuf,
}

impl StateStore {
    /// State store under a state root such as `$XDG_STATE_HOME`
    pub fn new(state_root: impl AsRef<Path>) -> Self {
        Self {
            dir: state_root.as_ref().join(STATE_NAMESPACE),
        }
    }

    /// Directory holding the state file
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the state file
    pub fn path(&self) -> PathBuf {
        self.dir.join(LAST_BRIGHTNESS_FILE)
    }

    /// Overwrite the saved level
    pub fn save(&self, value: u32) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            BacklightError::io(
                format!("couldn't create state directory {}", self.dir.display()),
                e,
            )
        })?;

        let path = self.path();
        fs::write(&path, value.to_string()).map_err(|e| {
            BacklightError::io(format!("couldn't write state file {}", path.display()), e)
        })?;

        tracing::debug!("Saved brightness {} to {}", value, path.display());
        Ok(())
    }

    /// Read the saved level
    pub fn load(&self) -> Result<u32> {
        let path = self.path();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(BacklightError::NoSavedState { path });
            }
            Err(e) => {
                return Err(BacklightError::io("can't read saved brightness", e));
            }
        };

        parse_int(&path, &contents)
    }
}
