//! Backlight brightness control
//!
//! This crate provides the brightness model used by `brightctl` together with the
//! sysfs plumbing needed to drive a real backlight device.
//!
//! # Layout
//!
//! - [`Backlight`]: the pure brightness engine (expression parsing, clamping, fractions)
//! - [`BrightnessStore`]: where the current brightness lives (sysfs file or memory)
//! - [`SysfsDevice`]: discovery of the backlight device under `/sys/class/backlight`
//! - [`StateStore`]: the persisted "last brightness" used by `restore`
//! - [`BacklightControl`]: wires the above together for the CLI
//!
//! # Example
//!
//! ```no_run
//! use brightctl_hal::{BacklightControl, BACKLIGHT_CLASS_DIR};
//! use std::path::Path;
//!
//! fn main() -> brightctl_hal::Result<()> {
//!     let mut control = BacklightControl::open(Path::new(BACKLIGHT_CLASS_DIR), None)?;
//!     control.set("+5%")?;
//!     println!("{}", control.get()?);
//!     Ok(())
//! }
//! ```

pub mod backlight;
pub mod control;
pub mod state;
pub mod store;
pub mod sysfs;
mod util;

pub use backlight::{Backlight, BrightnessExpression};
pub use control::BacklightControl;
pub use state::{LAST_BRIGHTNESS_FILE, STATE_NAMESPACE, StateStore};
pub use store::{BrightnessStore, FileStore, MemoryStore};
pub use sysfs::{BACKLIGHT_CLASS_DIR, BRIGHTNESS_FILE, MAX_BRIGHTNESS_FILE, SysfsDevice};
pub use util::{read_int_from_file, write_int_to_file};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BacklightError {
    #[error("{0}")]
    InvalidArgument(&'static str),

    #[error("value must be between +/- 100% or +/- 1.0")]
    OutOfRange,

    #[error("no backlight device found in {}", dir.display())]
    DeviceNotFound { dir: PathBuf },

    #[error("failed to list {}: {source}", dir.display())]
    ListFailed {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("expected number from {}, but got {content}", path.display())]
    CorruptValue { path: PathBuf, content: String },

    #[error("device {device} reports a maximum brightness of 0")]
    ZeroMaximum { device: String },

    #[error("no saved brightness found")]
    NoSavedState { path: PathBuf },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl BacklightError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        BacklightError::Io {
            context: context.into(),
            source,
        }
    }
}

/// Backlight result type
pub type Result<T> = std::result::Result<T, BacklightError>;
