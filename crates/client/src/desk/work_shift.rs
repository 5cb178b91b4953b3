//! Work shift desk (ca làm việc).

use atelier_core::shift::{ShiftWindow, WorkShift, validate_shift};
use atelier_shared::types::WorkShiftId;

use super::{DeskContext, domains, reloaded};
use crate::fetch::SubmitGuard;
use crate::wire::{Loaded, WireRecord, WorkShiftRecord};
use crate::ClientResult;

/// Lists and edits work shifts, keeping them free of overlaps.
#[derive(Debug)]
pub struct WorkShiftDesk {
    ctx: DeskContext,
    submit: SubmitGuard,
}

impl WorkShiftDesk {
    /// Creates the desk.
    #[must_use]
    pub fn new(ctx: DeskContext) -> Self {
        Self {
            ctx,
            submit: SubmitGuard::new(),
        }
    }

    /// All shifts, earliest first.
    pub async fn list(&self) -> ClientResult<Vec<Loaded<WorkShiftRecord>>> {
        let mut shifts = self.ctx.load_all::<WorkShiftRecord>().await?;
        shifts.sort_by_key(|s| (s.domain.start, s.domain.end));
        Ok(shifts)
    }

    /// Checks a shift against the saved ones without writing anything.
    pub async fn check(
        &self,
        name: &str,
        window: &ShiftWindow,
        exclude: Option<WorkShiftId>,
    ) -> ClientResult<()> {
        let existing = domains(&self.ctx.load_all::<WorkShiftRecord>().await?);
        validate_shift(name, window, &existing, exclude)?;
        Ok(())
    }

    /// Creates a shift.
    pub async fn create(
        &self,
        name: &str,
        window: ShiftWindow,
        description: Option<&str>,
    ) -> ClientResult<Option<WorkShiftId>> {
        let _ticket = self.submit.acquire()?;
        self.check(name, &window, None).await?;
        let id = self
            .ctx
            .create(&WorkShiftRecord::from_parts(name, window, description))
            .await?
            .map(WorkShiftId);
        tracing::info!(
            shift_id = ?id,
            name = %name.trim(),
            start = %window.start,
            end = %window.end,
            "Work shift created"
        );
        Ok(id)
    }

    /// Replaces a shift's name, window and description.
    pub async fn update(
        &self,
        shift: &Loaded<WorkShiftRecord>,
        name: &str,
        window: ShiftWindow,
        description: Option<&str>,
    ) -> ClientResult<Loaded<WorkShiftRecord>> {
        let _ticket = self.submit.acquire()?;
        let current = &shift.domain;
        self.check(name, &window, Some(current.id)).await?;

        let next = WorkShift {
            id: current.id,
            name: name.trim().to_string(),
            start: window.start,
            end: window.end,
            description: description.map(str::to_string),
        };
        self.ctx.save(shift, &next).await?;
        tracing::info!(shift_id = %current.id, "Work shift updated");
        reloaded(self.ctx.load(current.id.0)).await
    }

    /// Deletes a shift.
    pub async fn delete(&self, shift: &Loaded<WorkShiftRecord>) -> ClientResult<()> {
        let _ticket = self.submit.acquire()?;
        self.ctx
            .http
            .delete(WorkShiftRecord::ENDPOINT, shift.domain.id.0)
            .await?;
        tracing::info!(shift_id = %shift.domain.id, "Work shift deleted");
        Ok(())
    }
}
