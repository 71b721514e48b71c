//! Backlight device discovery
//!
//! Linux exposes each backlight controller as a directory under
//! `/sys/class/backlight` holding plain-text integer attributes.

use crate::backlight::Backlight;
use crate::store::FileStore;
use crate::util::read_int_from_file;
use crate::{BacklightError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default base directory for backlight devices
pub const BACKLIGHT_CLASS_DIR: &str = "/sys/class/backlight";

/// Attribute holding the current level
pub const BRIGHTNESS_FILE: &str = "brightness";

/// Attribute holding the maximum level
pub const MAX_BRIGHTNESS_FILE: &str = "max_brightness";

/// A backlight device directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsDevice {
    name: String,
    path: PathBuf,
}

impl SysfsDevice {
    /// Find the first device directory under `base_dir`
    ///
    /// Entries are visited in name order. Class entries are usually symlinks,
    /// so the target is checked rather than the link itself.
    pub fn discover(base_dir: &Path) -> Result<Self> {
        let entries = fs::read_dir(base_dir).map_err(|source| BacklightError::ListFailed {
            dir: base_dir.to_path_buf(),
            source,
        })?;

        let mut names: Vec<_> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name())
            .collect();
        names.sort();

        for name in names {
            let path = base_dir.join(&name);
            let is_dir = fs::metadata(&path).map(|m| m.is_dir()).unwrap_or(false);

            if is_dir {
                let device = Self {
                    name: name.to_string_lossy().into_owned(),
                    path,
                };
                tracing::debug!("Found backlight at {}", device.path.display());
                return Ok(device);
            }
        }

        Err(BacklightError::DeviceNotFound {
            dir: base_dir.to_path_buf(),
        })
    }

    /// Device name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Device directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn brightness_path(&self) -> PathBuf {
        self.path.join(BRIGHTNESS_FILE)
    }

    pub fn max_brightness_path(&self) -> PathBuf {
        self.path.join(MAX_BRIGHTNESS_FILE)
    }

    /// Store writing to this device's brightness attribute
    pub fn store(&self) -> FileStore {
        FileStore::new(self.brightness_path())
    }

    /// Read both attributes into a brightness record
    pub fn load(&self) -> Result<Backlight> {
        let current = read_int_from_file(&self.brightness_path())?;
        let max = read_int_from_file(&self.max_brightness_path())?;
        tracing::debug!("{}: current {}, max {}", self.name, current, max);

        Backlight::new(self.name.clone(), current, max)
    }
}
