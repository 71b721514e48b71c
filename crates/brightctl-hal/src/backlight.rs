//! Brightness engine
//!
//! Holds the current and maximum brightness of a device and turns user
//! expressions such as `50%`, `+5%`, `-0.05` or `0.5` into a device level.
//! No I/O happens here; callers load and store the values.

use crate::{BacklightError, Result};
use std::str::FromStr;

/// Products within this many ULPs of an integer are snapped to it before
/// truncation, so that `0.29 * 100` yields 29 rather than 28.
const SNAP_ULPS: f64 = 4.0;

const NOT_A_NUMBER: &str = "invalid argument, expected a number";

/// A parsed brightness expression
///
/// The value is normalized to a fraction of the maximum in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessExpression {
    fraction: f64,
    relative: bool,
}

impl BrightnessExpression {
    /// Fraction of the maximum brightness, sign included
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    /// Whether the expression adjusts the current value instead of replacing it
    pub fn is_relative(&self) -> bool {
        self.relative
    }

    /// Compute the new brightness for a device at `current` out of `max`
    pub fn resolve(&self, current: u32, max: u32) -> u32 {
        let delta = scale(self.fraction, max);

        let target = if self.relative {
            i64::from(current) + delta
        } else {
            delta
        };

        clamp(target, max)
    }
}

impl FromStr for BrightnessExpression {
    type Err = BacklightError;

    fn from_str(s: &str) -> Result<Self> {
        let expr = s.trim();

        let percent = expr.ends_with('%');
        let relative = expr.starts_with('+') || expr.starts_with('-');

        // The float parser consumes the sign itself
        let number = expr.strip_suffix('%').unwrap_or(expr);
        let mut value: f64 = number
            .parse()
            .map_err(|_| BacklightError::InvalidArgument(NOT_A_NUMBER))?;

        // Overflowing literals like `1e400` are parse errors; only a spelled
        // out infinity reaches the range check.
        if value.is_nan() || (value.is_infinite() && !is_infinity_literal(number)) {
            return Err(BacklightError::InvalidArgument(NOT_A_NUMBER));
        }

        if percent {
            value /= 100.0;
        }

        if !relative && value < 0.0 {
            return Err(BacklightError::InvalidArgument(
                "absolute value cannot be negative",
            ));
        }

        if !(-1.0..=1.0).contains(&value) {
            return Err(BacklightError::OutOfRange);
        }

        Ok(Self {
            fraction: value,
            relative,
        })
    }
}

fn is_infinity_literal(number: &str) -> bool {
    let unsigned = number.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Scale a fraction to device units, truncating toward zero
fn scale(fraction: f64, max: u32) -> i64 {
    let product = fraction * f64::from(max);
    let nearest = product.round();
    let tolerance = SNAP_ULPS * f64::EPSILON * nearest.abs().max(1.0);

    if (product - nearest).abs() <= tolerance {
        nearest as i64
    } else {
        product.trunc() as i64
    }
}

fn clamp(value: i64, max: u32) -> u32 {
    value.clamp(0, i64::from(max)) as u32
}

/// Brightness state of a single backlight device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backlight {
    name: String,
    current: u32,
    max: u32,
}

impl Backlight {
    /// Create a device record; `current` is clamped into `[0, max]`
    pub fn new(name: impl Into<String>, current: u32, max: u32) -> Result<Self> {
        let name = name.into();
        if max == 0 {
            return Err(BacklightError::ZeroMaximum { device: name });
        }

        Ok(Self {
            name,
            current: current.min(max),
            max,
        })
    }

    /// Device name (the sysfs directory name)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current brightness level
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Maximum brightness level
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Current brightness as a fraction of the maximum, truncated to two decimals
    pub fn percentage(&self) -> f64 {
        let hundredths = u64::from(self.current) * 100 / u64::from(self.max);
        hundredths as f64 / 100.0
    }

    /// Apply a textual brightness expression and return the new level
    ///
    /// On error the current level is left untouched.
    pub fn set(&mut self, expr: &str) -> Result<u32> {
        let expr: BrightnessExpression = expr.parse()?;
        Ok(self.apply(expr))
    }

    /// Apply an already parsed expression
    pub fn apply(&mut self, expr: BrightnessExpression) -> u32 {
        self.current = expr.resolve(self.current, self.max);
        tracing::debug!(
            "{}: brightness {}/{} after {:?}",
            self.name,
            self.current,
            self.max,
            expr
        );
        self.current
    }

    /// Set a raw device level, clamped to the maximum
    pub fn set_level(&mut self, level: u32) -> u32 {
        self.current = clamp(i64::from(level), self.max);
        self.current
    }
}
