//! Work shift error types.

use atelier_shared::types::WorkShiftId;
use thiserror::Error;

use super::types::ShiftTime;

/// Work-shift validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShiftError {
    /// Time text is not `HH:MM`.
    #[error("Invalid time '{0}', expected HH:MM")]
    InvalidTime(String),

    /// Shift name is blank.
    #[error("Shift name is required")]
    EmptyName,

    /// Start is not before end.
    #[error("Start time {start} must be before end time {end}")]
    StartNotBeforeEnd {
        /// Start of the shift.
        start: ShiftTime,
        /// End of the shift.
        end: ShiftTime,
    },

    /// The shift overlaps an existing one.
    #[error("Overlaps shift '{name}' ({start}-{end})")]
    Overlaps {
        /// Conflicting shift id.
        id: WorkShiftId,
        /// Conflicting shift name.
        name: String,
        /// Conflicting shift start.
        start: ShiftTime,
        /// Conflicting shift end.
        end: ShiftTime,
    },
}

impl ShiftError {
    /// Returns the HTTP status code equivalent for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Overlaps { .. } => 409,
            Self::InvalidTime(_) | Self::EmptyName | Self::StartNotBeforeEnd { .. } => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTime(_) => "INVALID_TIME",
            Self::EmptyName => "EMPTY_NAME",
            Self::StartNotBeforeEnd { .. } => "START_NOT_BEFORE_END",
            Self::Overlaps { .. } => "SHIFT_OVERLAP",
        }
    }
}
