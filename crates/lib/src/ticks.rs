use std::fmt;
use thiserror::Error;

/// Integer number of ticks, one tick being `10^-precision` units of the instrument.
pub type Quantity = i64;

/// Largest precision whose scale factor `10^precision` still fits in an `i64`.
pub const MAX_PRECISION: u32 = 18;
pub const DEFAULT_PRECISION: i64 = 8;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConversionError {
    #[error("Invalid precision `{0}`, expected an integer between 0 and {MAX_PRECISION}")]
    InvalidPrecision(i64),
    #[error("Value `{0}` cannot be represented as ticks")]
    OutOfRange(f64),
}

/// Number of decimal places a [`Quantity`] carries, fixed for an entire run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precision(u32);

impl Precision {
    pub fn new(digits: i64) -> Result<Self, ConversionError> {
        u32::try_from(digits)
            .ok()
            .filter(|digits| *digits <= MAX_PRECISION)
            .map(Self)
            .ok_or(ConversionError::InvalidPrecision(digits))
    }

    pub fn digits(self) -> u32 {
        self.0
    }

    // exact for every power of ten up to 10^22, which covers MAX_PRECISION
    fn scale(self) -> f64 {
        10f64.powi(self.0 as i32)
    }

    /// Scales `value` by `10^precision` and rounds half to even.
    pub fn to_ticks(self, value: f64) -> Result<Quantity, ConversionError> {
        let scaled = (value * self.scale()).round_ties_even();

        // `i64::MAX as f64` rounds up to 2^63, so it is itself out of range
        if !scaled.is_finite() || scaled >= i64::MAX as f64 || scaled < i64::MIN as f64 {
            return Err(ConversionError::OutOfRange(value));
        }

        Ok(scaled as Quantity)
    }

    pub fn to_units(self, ticks: Quantity) -> f64 {
        ticks as f64 / self.scale()
    }
}

impl Default for Precision {
    fn default() -> Self {
        Self(DEFAULT_PRECISION as u32)
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Converts a real valued quantity into ticks, validating `precision` first.
pub fn to_ticks(value: f64, precision: i64) -> Result<Quantity, ConversionError> {
    Precision::new(precision)?.to_ticks(value)
}

/// Inverse of [`to_ticks`]. `ticks` must have been produced at the same precision.
pub fn to_units(ticks: Quantity, precision: Precision) -> f64 {
    precision.to_units(ticks)
}
