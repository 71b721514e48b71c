//! Brightness controller
//!
//! Ties the brightness engine to a store and the persisted state. One
//! controller is built per invocation and owned by the caller.

use crate::backlight::Backlight;
use crate::state::{LAST_BRIGHTNESS_FILE, StateStore};
use crate::store::{BrightnessStore, FileStore};
use crate::sysfs::SysfsDevice;
use crate::{BacklightError, Result};
use std::path::{Path, PathBuf};

pub struct BacklightControl<S> {
    backlight: Backlight,
    store: S,
    state: Option<StateStore>,
}

impl BacklightControl<FileStore> {
    /// Discover the device under `base_dir` and load its brightness
    ///
    /// `state_root` is `None` when no state directory could be resolved; the
    /// controller then works but never persists anything.
    pub fn open(base_dir: &Path, state_root: Option<&Path>) -> Result<Self> {
        let device = SysfsDevice::discover(base_dir)?;
        let backlight = device.load()?;

        Ok(Self::new(backlight, device.store(), state_root.map(StateStore::new)))
    }
}

impl<S: BrightnessStore> BacklightControl<S> {
    pub fn new(backlight: Backlight, store: S, state: Option<StateStore>) -> Self {
        Self {
            backlight,
            store,
            state,
        }
    }

    /// Brightness record as last read or written
    pub fn backlight(&self) -> &Backlight {
        &self.backlight
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn state(&self) -> Option<&StateStore> {
        self.state.as_ref()
    }

    /// Current brightness as a truncated fraction of the maximum
    pub fn get(&mut self) -> Result<f64> {
        self.refresh()?;
        Ok(self.backlight.percentage())
    }

    /// Apply a brightness expression, write it out and remember it
    pub fn set(&mut self, expr: &str) -> Result<u32> {
        self.refresh()?;

        let mut next = self.backlight.clone();
        let value = next.set(expr)?;

        self.store.write(value)?;
        self.backlight = next;
        self.save_state();

        Ok(value)
    }

    /// Reapply the saved brightness
    pub fn restore(&mut self) -> Result<u32> {
        let state = self.state.as_ref().ok_or_else(|| {
            tracing::warn!("No state directory available, nothing to restore");
            BacklightError::NoSavedState {
                path: PathBuf::from(LAST_BRIGHTNESS_FILE),
            }
        })?;

        let saved = state.load()?;
        let mut next = self.backlight.clone();
        let value = next.set_level(saved);
        if value != saved {
            tracing::warn!(
                "Saved brightness {} exceeds maximum {}, using {}",
                saved,
                next.max(),
                value
            );
        }

        self.store.write(value)?;
        self.backlight = next;
        self.save_state();

        Ok(value)
    }

    /// Pick up changes made to the device since it was loaded
    fn refresh(&mut self) -> Result<()> {
        let current = self.store.read()?;
        self.backlight.set_level(current);
        Ok(())
    }

    fn save_state(&self) {
        let Some(state) = &self.state else {
            tracing::warn!("can't save current brightness: state path not set");
            return;
        };

        if let Err(e) = state.save(self.backlight.current()) {
            tracing::warn!("can't save current brightness: {}", e);
        }
    }
}
