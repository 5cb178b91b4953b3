//! Shift-close desk (chốt ca).

use atelier_core::closing::{
    ClosingError, CustomerOrder, ShiftCloseReport, ShiftCloseSnapshot, draft_report,
    ensure_no_duplicate,
};
use atelier_core::view::{ListQuery, ShiftCloseRow};
use atelier_core::workflow::{Action, DocumentKind, DocumentStatus, WorkflowService};
use atelier_shared::types::{EmployeeId, PageRequest, ShiftCloseId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{DeskContext, Listing, domains, load_lookups, reloaded};
use crate::fetch::{LatestFetch, SubmitGuard};
use crate::wire::{CustomerOrderRecord, Loaded, ShiftCloseRecord};
use crate::{ClientError, ClientResult, Endpoint};

/// What closing a shift now would record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftClosePreview {
    /// Revenue figures for the day.
    pub snapshot: ShiftCloseSnapshot,
    /// A live report already covering the day, if any.
    pub existing: Option<ShiftCloseId>,
}

/// Derives, creates and reviews shift-closing reports.
#[derive(Debug)]
pub struct ShiftCloseDesk {
    ctx: DeskContext,
    fetch: LatestFetch,
    submit: SubmitGuard,
}

impl ShiftCloseDesk {
    /// Creates the desk.
    #[must_use]
    pub fn new(ctx: DeskContext) -> Self {
        Self {
            ctx,
            fetch: LatestFetch::new(),
            submit: SubmitGuard::new(),
        }
    }

    /// One page of the filtered list; `Ok(None)` when superseded.
    pub async fn list(
        &self,
        query: &ListQuery<DocumentStatus>,
        page: PageRequest,
    ) -> ClientResult<Option<Listing<ShiftCloseRow>>> {
        let load = async {
            let (reports, lookups) = tokio::try_join!(
                self.ctx.load_all::<ShiftCloseRecord>(),
                load_lookups(&self.ctx.http),
            )?;
            let rows: Vec<_> = reports
                .iter()
                .map(|r| ShiftCloseRow::build(&r.domain, &lookups, &self.ctx.actor))
                .collect();
            Ok::<_, ClientError>(Listing::of(&query.apply(&rows), page))
        };
        self.fetch
            .run(async { Listing::or_banner(load.await, page) })
            .await
    }

    /// Loads one report.
    pub async fn show(&self, id: ShiftCloseId) -> ClientResult<Loaded<ShiftCloseRecord>> {
        self.ctx.load(id.0).await
    }

    async fn customer_orders(&self) -> ClientResult<Vec<CustomerOrder>> {
        let tz = self.ctx.config.timezone;
        let records: Vec<CustomerOrderRecord> =
            self.ctx.http.list(Endpoint::CustomerOrders).await?;
        Ok(records
            .iter()
            .filter_map(|record| match record.to_domain(tz) {
                Ok(order) => Some(order),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unreadable customer order");
                    None
                }
            })
            .collect())
    }

    /// The figures `employee_id` would close `date` with.
    pub async fn preview(
        &self,
        employee_id: EmployeeId,
        date: NaiveDate,
    ) -> ClientResult<ShiftClosePreview> {
        let (reports, orders) = tokio::try_join!(
            self.ctx.load_all::<ShiftCloseRecord>(),
            self.customer_orders(),
        )?;
        let existing = match ensure_no_duplicate(&domains(&reports), employee_id, date) {
            Ok(()) => None,
            Err(ClosingError::AlreadyClosed { existing, .. }) => Some(existing),
            Err(e) => return Err(e.into()),
        };
        Ok(ShiftClosePreview {
            snapshot: ShiftCloseSnapshot::from_orders(employee_id, date, &orders),
            existing,
        })
    }

    /// Closes the acting employee's shift for `date`.
    ///
    /// A second live report for the same day is refused before anything
    /// is written.
    pub async fn create(
        &self,
        date: NaiveDate,
        cash_expense: Decimal,
        actual_cash: Decimal,
        note: Option<String>,
    ) -> ClientResult<Option<ShiftCloseId>> {
        let _ticket = self.submit.acquire()?;
        let employee_id = self.ctx.actor.id;

        let reports = domains(&self.ctx.load_all::<ShiftCloseRecord>().await?);
        ensure_no_duplicate(&reports, employee_id, date)?;

        let orders = self.customer_orders().await?;
        let snapshot = ShiftCloseSnapshot::from_orders(employee_id, date, &orders);
        let draft = draft_report(&snapshot, cash_expense, actual_cash, note)?;

        let id = self
            .ctx
            .create(&ShiftCloseRecord::from_draft(&draft))
            .await?
            .map(ShiftCloseId);
        tracing::info!(
            report_id = ?id,
            %employee_id,
            %date,
            revenue = %draft.total_revenue,
            variance = %draft.cash_variance,
            "Shift closed"
        );
        Ok(id)
    }

    /// `PendingReview` -> `Approved`, stamping the reviewer.
    pub async fn approve(
        &self,
        report: &Loaded<ShiftCloseRecord>,
    ) -> ClientResult<Loaded<ShiftCloseRecord>> {
        self.review(report, Action::Approve, None).await
    }

    /// `PendingReview` -> `Rejected`, keeping the reason in the note.
    pub async fn reject(
        &self,
        report: &Loaded<ShiftCloseRecord>,
        reason: &str,
    ) -> ClientResult<Loaded<ShiftCloseRecord>> {
        self.review(report, Action::Reject, Some(reason)).await
    }

    async fn review(
        &self,
        report: &Loaded<ShiftCloseRecord>,
        action: Action,
        reason: Option<&str>,
    ) -> ClientResult<Loaded<ShiftCloseRecord>> {
        let _ticket = self.submit.acquire()?;
        let current: &ShiftCloseReport = &report.domain;
        let transition = WorkflowService::apply(
            DocumentKind::ShiftClose,
            current.status,
            action,
            &self.ctx.actor,
            reason,
        )?;

        let next = current.with_transition(&transition);
        self.ctx.save(report, &next).await?;
        tracing::info!(
            report_id = %current.id,
            from = %current.status,
            to = %next.status,
            reviewer = %self.ctx.actor.id,
            "Shift close reviewed"
        );
        reloaded(self.show(current.id)).await
    }
}
