//! Work shift overlap validation.
//!
//! Shifts are half-open `[start, end)` intervals; two shifts conflict iff
//! `a.start < b.end && a.end > b.start`. Back-to-back shifts (one ending
//! at 12:00, the next starting at 12:00) do not conflict.

use atelier_shared::types::WorkShiftId;

use super::error::ShiftError;
use super::types::{ShiftWindow, WorkShift};

/// Returns the first existing shift overlapping `candidate`, skipping
/// `exclude_id` (the shift being edited).
#[must_use]
pub fn find_conflict<'a>(
    candidate: &ShiftWindow,
    existing: &'a [WorkShift],
    exclude_id: Option<WorkShiftId>,
) -> Option<&'a WorkShift> {
    existing
        .iter()
        .filter(|shift| Some(shift.id) != exclude_id)
        .find(|shift| candidate.overlaps(&shift.window()))
}

/// Returns true if `candidate` overlaps any shift other than `exclude_id`.
#[must_use]
pub fn has_conflict(
    candidate: &ShiftWindow,
    existing: &[WorkShift],
    exclude_id: Option<WorkShiftId>,
) -> bool {
    find_conflict(candidate, existing, exclude_id).is_some()
}

/// Validates a shift before create or update.
///
/// # Arguments
/// * `name` - Display name, must not be blank
/// * `candidate` - The new time window
/// * `existing` - All saved shifts
/// * `exclude_id` - The shift being edited, if any
///
/// # Errors
/// * `EmptyName` - blank name
/// * `StartNotBeforeEnd` - checked before the overlap scan
/// * `Overlaps` - names the first conflicting shift
pub fn validate_shift(
    name: &str,
    candidate: &ShiftWindow,
    existing: &[WorkShift],
    exclude_id: Option<WorkShiftId>,
) -> Result<(), ShiftError> {
    if name.trim().is_empty() {
        return Err(ShiftError::EmptyName);
    }
    if candidate.start >= candidate.end {
        return Err(ShiftError::StartNotBeforeEnd {
            start: candidate.start,
            end: candidate.end,
        });
    }
    if let Some(shift) = find_conflict(candidate, existing, exclude_id) {
        return Err(ShiftError::Overlaps {
            id: shift.id,
            name: shift.name.clone(),
            start: shift.start,
            end: shift.end,
        });
    }
    Ok(())
}
