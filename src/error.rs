//! Error types shared by every picker in the crate.

use thiserror::Error;

/// Errors returned by wheel, group and date picker operations.
///
/// Every variant is a local precondition violation: the call that produced it
/// left all state exactly as it was before.
#[derive(Debug, Error)]
pub enum WheelError {
    /// An index argument fell outside the data it refers to.
    #[error("{argument} ({index}) must be in range 0..{len}")]
    IndexOutOfRange {
        /// Name of the offending argument.
        argument: &'static str,
        /// The rejected index.
        index: usize,
        /// Length of the data the index was checked against.
        len: usize,
    },

    /// A selection vector did not have one entry per wheel.
    #[error("expected {expected} positions, got {actual}")]
    LengthMismatch {
        /// Number of wheels in the group.
        expected: usize,
        /// Number of positions supplied.
        actual: usize,
    },

    /// The visible item count must be odd so a single centre slot exists.
    #[error("visible item count must be odd, got {0}")]
    EvenVisibleCount(usize),

    /// The visible item count must be at least one.
    #[error("visible item count must be at least 1")]
    ZeroVisibleCount,

    /// A date range whose lower bound is after its upper bound.
    #[error("invalid date range: {min} is after {max}")]
    InvalidDateRange {
        /// Requested lower bound.
        min: chrono::NaiveDateTime,
        /// Requested upper bound.
        max: chrono::NaiveDateTime,
    },

    /// Terminal host I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WheelError>;

impl WheelError {
    /// Check `index` against `len`, naming the argument on failure.
    pub(crate) fn check_index(argument: &'static str, index: usize, len: usize) -> Result<()> {
        if index < len {
            Ok(())
        } else {
            Err(Self::IndexOutOfRange {
                argument,
                index,
                len,
            })
        }
    }

    /// Whether this error is a rejected argument (as opposed to bad configuration or I/O).
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. } | Self::LengthMismatch { .. })
    }
}
