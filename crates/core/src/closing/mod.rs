//! Shift closing (chốt ca).
//!
//! At the end of a shift an employee closes their day: the system sums the
//! revenue of that employee's orders for the day, split by payment method,
//! the employee declares cash expenses and the cash actually counted, and
//! a manager approves or rejects the report.

pub mod error;
pub mod snapshot;
pub mod types;

#[cfg(test)]
mod snapshot_props;

pub use error::ClosingError;
pub use snapshot::{ShiftCloseSnapshot, draft_report, ensure_no_duplicate};
pub use types::{
    CustomerOrder, OrderStatus, PaymentMethod, ShiftCloseDraft, ShiftCloseReport,
};
