//! Where the current brightness level lives
//!
//! The real backend is the device's `brightness` sysfs attribute. The memory
//! backend lets tests and dry runs drive the same controller code without
//! touching the filesystem.
//!
//! # Usage
//!
//! ```
//! use brightctl_hal::{BrightnessStore, MemoryStore};
//!
//! let mut store = MemoryStore::new(20);
//! let observer = store.clone();
//!
//! store.write(45).unwrap();
//! assert_eq!(observer.value(), 45);
//! ```

use crate::util::{read_int_from_file, write_int_to_file};
use crate::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Read/write access to a device's current brightness level
pub trait BrightnessStore {
    /// Read the level currently in effect
    fn read(&self) -> Result<u32>;

    /// Replace the level currently in effect
    fn write(&mut self, value: u32) -> Result<()>;
}

/// Store backed by a sysfs `brightness` attribute
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BrightnessStore for FileStore {
    fn read(&self) -> Result<u32> {
        read_int_from_file(&self.path)
    }

    fn write(&mut self, value: u32) -> Result<()> {
        write_int_to_file(&self.path, value)?;
        tracing::info!("Brightness set to {} ({})", value, self.path.display());
        Ok(())
    }
}

/// Store backed by shared memory
///
/// Clones share the same cell, so a test can keep one handle to observe
/// what the controller wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Arc<RwLock<u32>>,
}

impl MemoryStore {
    pub fn new(value: u32) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
        }
    }

    /// Last written value
    pub fn value(&self) -> u32 {
        self.value.read().map(|v| *v).unwrap_or_else(|e| *e.into_inner())
    }
}

impl BrightnessStore for MemoryStore {
    fn read(&self) -> Result<u32> {
        Ok(self.value())
    }

    fn write(&mut self, value: u32) -> Result<()> {
        match self.value.write() {
            Ok(mut cell) => *cell = value,
            Err(poisoned) => *poisoned.into_inner() = value,
        }
        tracing::debug!("[MEMORY] Brightness set to {}", value);
        Ok(())
    }
}
