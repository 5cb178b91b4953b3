//! Work shifts (ca làm việc) and the overlap validator.

pub mod error;
pub mod overlap;
pub mod types;

#[cfg(test)]
mod overlap_props;

pub use error::ShiftError;
pub use overlap::{find_conflict, has_conflict, validate_shift};
pub use types::{ShiftTime, ShiftWindow, WorkShift};
