//! Whole-number text files
//!
//! sysfs attributes and the state file both hold a single decimal integer,
//! optionally surrounded by whitespace.

use crate::{BacklightError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Read a non-negative integer from a text file
pub fn read_int_from_file(path: &Path) -> Result<u32> {
    let contents = fs::read_to_string(path)
        .map_err(|e| BacklightError::io(format!("failed to read file {}", path.display()), e))?;

    parse_int(path, &contents)
}

/// Parse trimmed file contents, naming the file on failure
pub(crate) fn parse_int(path: &Path, contents: &str) -> Result<u32> {
    let trimmed = contents.trim();
    trimmed
        .parse::<u32>()
        .map_err(|_| BacklightError::CorruptValue {
            path: path.to_path_buf(),
            content: trimmed.to_string(),
        })
}

/// Overwrite an existing file with the decimal text of `value`
///
/// The file is never created: sysfs attributes always exist, and a missing
/// one means the device path is wrong.
pub fn write_int_to_file(path: &Path, value: u32) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| BacklightError::io(format!("failed to open {}", path.display()), e))?;

    write!(file, "{}", value)
        .map_err(|e| BacklightError::io(format!("failed to write {}", path.display()), e))?;

    Ok(())
}
