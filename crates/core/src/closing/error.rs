//! Shift closing error types.

use atelier_shared::types::{EmployeeId, ShiftCloseId};
use chrono::NaiveDate;
use thiserror::Error;

use crate::workflow::WorkflowError;

/// Shift-closing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClosingError {
    /// The workflow does not allow the change.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    /// A live report already exists for the employee and day.
    #[error("Employee #{employee_id} already closed {date} (report #{existing})")]
    AlreadyClosed {
        /// Employee closing the shift.
        employee_id: EmployeeId,
        /// Calendar day.
        date: NaiveDate,
        /// The existing report.
        existing: ShiftCloseId,
    },

    /// Declared expense is negative.
    #[error("Cash expense cannot be negative")]
    NegativeExpense,

    /// Counted cash is negative.
    #[error("Actual cash cannot be negative")]
    NegativeActualCash,
}

impl ClosingError {
    /// Returns the HTTP status code equivalent for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Workflow(inner) => inner.status_code(),
            Self::AlreadyClosed { .. } => 409,
            Self::NegativeExpense | Self::NegativeActualCash => 400,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Workflow(inner) => inner.error_code(),
            Self::AlreadyClosed { .. } => "ALREADY_CLOSED",
            Self::NegativeExpense => "NEGATIVE_EXPENSE",
            Self::NegativeActualCash => "NEGATIVE_ACTUAL_CASH",
        }
    }
}
