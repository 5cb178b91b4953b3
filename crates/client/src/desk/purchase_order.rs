//! Purchase order desk (phiếu đặt hàng).

use atelier_core::purchasing::{
    LineChange, LineInput, LineWrite, NewPurchaseOrder, PurchaseOrder, PurchaseOrderLine,
    PurchasingService, TotalsDivergence,
};
use atelier_core::view::{ListQuery, PurchaseOrderDetailView, PurchaseOrderRow, ReferenceLookups};
use atelier_core::workflow::{Action, DocumentKind, DocumentStatus, WorkflowService};
use atelier_shared::types::{PageRequest, PurchaseOrderId, PurchaseOrderLineId};
use rust_decimal::Decimal;

use super::{DeskContext, Listing, domains, load_lookups, reloaded};
use crate::fetch::{LatestFetch, SubmitGuard};
use crate::wire::{Loaded, PurchaseOrderLineRecord, PurchaseOrderRecord, WireRecord};
use crate::{ClientError, ClientResult, Endpoint};

/// A purchase order as loaded for its detail screen.
#[derive(Debug, Clone)]
pub struct PurchaseOrderDocument {
    /// The header.
    pub order: Loaded<PurchaseOrderRecord>,
    /// Its lines.
    pub lines: Vec<Loaded<PurchaseOrderLineRecord>>,
    /// Display view.
    pub view: PurchaseOrderDetailView,
}

impl PurchaseOrderDocument {
    fn assemble(
        order: Loaded<PurchaseOrderRecord>,
        lines: Vec<Loaded<PurchaseOrderLineRecord>>,
        lookups: &ReferenceLookups,
        ctx: &DeskContext,
    ) -> Self {
        let view =
            PurchaseOrderDetailView::build(&order.domain, &domains(&lines), lookups, &ctx.actor);
        Self { order, lines, view }
    }

    /// Domain lines.
    #[must_use]
    pub fn line_domains(&self) -> Vec<PurchaseOrderLine> {
        domains(&self.lines)
    }

    fn loaded_line(&self, id: Option<PurchaseOrderLineId>) -> ClientResult<&Loaded<PurchaseOrderLineRecord>> {
        id.and_then(|id| self.lines.iter().find(|l| l.domain.id == Some(id)))
            .ok_or_else(|| ClientError::InvalidResponse("line not part of the loaded order".to_string()))
    }
}

/// Lists, shows and edits purchase orders.
#[derive(Debug)]
pub struct PurchaseOrderDesk {
    ctx: DeskContext,
    fetch: LatestFetch,
    submit: SubmitGuard,
}

impl PurchaseOrderDesk {
    /// Creates the desk.
    #[must_use]
    pub fn new(ctx: DeskContext) -> Self {
        Self {
            ctx,
            fetch: LatestFetch::new(),
            submit: SubmitGuard::new(),
        }
    }

    /// One page of the filtered list.
    ///
    /// Returns `Ok(None)` when a newer `list` call superseded this one.
    pub async fn list(
        &self,
        query: &ListQuery<DocumentStatus>,
        page: PageRequest,
    ) -> ClientResult<Option<Listing<PurchaseOrderRow>>> {
        let load = async {
            let (orders, lookups) = tokio::try_join!(
                self.ctx.load_all::<PurchaseOrderRecord>(),
                load_lookups(&self.ctx.http),
            )?;
            let rows: Vec<_> = orders
                .iter()
                .map(|o| PurchaseOrderRow::build(&o.domain, &lookups, &self.ctx.actor))
                .collect();
            Ok::<_, ClientError>(Listing::of(&query.apply(&rows), page))
        };
        self.fetch
            .run(async { Listing::or_banner(load.await, page) })
            .await
    }

    /// Loads an order with its lines.
    ///
    /// When the stored totals disagree with the lines and the order is
    /// still `New`, the recomputed totals are written back (unless
    /// `sync_totals_on_read` is off). A failed sync is logged, not raised.
    pub async fn show(&self, id: PurchaseOrderId) -> ClientResult<PurchaseOrderDocument> {
        let (order, lines, lookups) = tokio::try_join!(
            self.ctx.load::<PurchaseOrderRecord>(id.0),
            self.ctx.load_all::<PurchaseOrderLineRecord>(),
            load_lookups(&self.ctx.http),
        )?;
        let lines: Vec<_> = lines
            .into_iter()
            .filter(|l| l.domain.order_id == id)
            .collect();

        let mut doc = PurchaseOrderDocument::assemble(order, lines, &lookups, &self.ctx);
        if let Some(divergence) = doc.view.divergence() {
            self.sync_totals(&mut doc, &divergence, &lookups).await;
        }
        Ok(doc)
    }

    async fn sync_totals(
        &self,
        doc: &mut PurchaseOrderDocument,
        divergence: &TotalsDivergence,
        lookups: &ReferenceLookups,
    ) {
        let order = &doc.order.domain;
        if !self.ctx.config.sync_totals_on_read || order.status != DocumentStatus::New {
            tracing::debug!(order_id = %order.id, status = %order.status, "Stored totals diverge, not syncing");
            return;
        }

        tracing::warn!(
            order_id = %order.id,
            stored_total = %divergence.stored.total_amount,
            computed_total = %divergence.computed.total_amount,
            stored_remaining = %divergence.stored.remaining,
            computed_remaining = %divergence.computed.remaining,
            "Stored totals diverge from lines, writing recomputed totals"
        );
        let next = PurchasingService::with_totals(order, divergence.computed);
        match self.ctx.save(&doc.order, &next).await {
            Ok(()) => {
                doc.order = Loaded {
                    record: doc.order.updated(&next),
                    domain: next,
                };
                doc.view = PurchaseOrderDetailView::build(
                    &doc.order.domain,
                    &doc.line_domains(),
                    lookups,
                    &self.ctx.actor,
                );
            }
            Err(e) => tracing::warn!(order_id = %doc.order.domain.id, error = %e, "Totals sync failed"),
        }
    }

    /// Creates a `New` order; returns its id when the backend echoes it.
    pub async fn create(&self, input: &NewPurchaseOrder) -> ClientResult<Option<PurchaseOrderId>> {
        let _ticket = self.submit.acquire()?;
        PurchasingService::validate_new_order(input)?;

        let id = self
            .ctx
            .create(&PurchaseOrderRecord::from_new(input))
            .await?
            .map(PurchaseOrderId);
        tracing::info!(order_id = ?id, supplier_id = ?input.supplier_id, "Purchase order created");
        Ok(id)
    }

    /// Adds a line, then rewrites the header totals.
    pub async fn add_line(
        &self,
        doc: &PurchaseOrderDocument,
        input: LineInput,
    ) -> ClientResult<PurchaseOrderDocument> {
        let _ticket = self.submit.acquire()?;
        let change = PurchasingService::add_line(
            &doc.order.domain,
            &doc.line_domains(),
            input,
            &self.ctx.actor,
        )?;
        self.persist(doc, &change).await?;
        reloaded(self.show(doc.order.domain.id)).await
    }

    /// Changes a line, then rewrites the header totals.
    pub async fn update_line(
        &self,
        doc: &PurchaseOrderDocument,
        line_id: PurchaseOrderLineId,
        input: LineInput,
    ) -> ClientResult<PurchaseOrderDocument> {
        let _ticket = self.submit.acquire()?;
        let change = PurchasingService::update_line(
            &doc.order.domain,
            &doc.line_domains(),
            line_id,
            input,
            &self.ctx.actor,
        )?;
        self.persist(doc, &change).await?;
        reloaded(self.show(doc.order.domain.id)).await
    }

    /// Removes a line, then rewrites the header totals.
    pub async fn remove_line(
        &self,
        doc: &PurchaseOrderDocument,
        line_id: PurchaseOrderLineId,
    ) -> ClientResult<PurchaseOrderDocument> {
        let _ticket = self.submit.acquire()?;
        let change = PurchasingService::remove_line(
            &doc.order.domain,
            &doc.line_domains(),
            line_id,
            &self.ctx.actor,
        )?;
        self.persist(doc, &change).await?;
        reloaded(self.show(doc.order.domain.id)).await
    }

    /// Line write first, header second. A failed header write after a
    /// saved line is reported as `PartialWrite`.
    async fn persist(&self, doc: &PurchaseOrderDocument, change: &LineChange) -> ClientResult<()> {
        match &change.write {
            LineWrite::Create(line) => {
                self.ctx
                    .create(&PurchaseOrderLineRecord::from_domain(line))
                    .await?;
            }
            LineWrite::Update(line) => {
                self.ctx.save(doc.loaded_line(line.id)?, line).await?;
            }
            LineWrite::Delete(id) => {
                self.ctx.http.delete(Endpoint::PurchaseOrderLines, id.0).await?;
            }
        }

        let header = PurchasingService::with_totals(&doc.order.domain, change.totals);
        self.ctx.save(&doc.order, &header).await.map_err(|e| {
            tracing::warn!(order_id = %header.id, error = %e, "Line saved but header update failed");
            ClientError::PartialWrite {
                step: "header update",
                source: Box::new(e),
            }
        })?;
        tracing::info!(
            order_id = %header.id,
            total = %header.total_amount,
            remaining = %header.remaining,
            "Purchase order lines saved"
        );
        Ok(())
    }

    /// Changes the deposit and the remaining balance.
    pub async fn set_deposit(
        &self,
        doc: &PurchaseOrderDocument,
        deposit: Decimal,
    ) -> ClientResult<PurchaseOrderDocument> {
        let _ticket = self.submit.acquire()?;
        let next = PurchasingService::set_deposit(
            &doc.order.domain,
            &doc.line_domains(),
            deposit,
            &self.ctx.actor,
        )?;
        self.ctx.save(&doc.order, &next).await?;
        reloaded(self.show(next.id)).await
    }

    /// `New` -> `PendingReview`.
    pub async fn send(&self, doc: &PurchaseOrderDocument) -> ClientResult<PurchaseOrderDocument> {
        self.transition(doc, Action::Send, None).await
    }

    /// `PendingReview` -> `Approved`. Managers and admins only.
    pub async fn approve(&self, doc: &PurchaseOrderDocument) -> ClientResult<PurchaseOrderDocument> {
        self.transition(doc, Action::Approve, None).await
    }

    /// `PendingReview` -> `Cancelled`, keeping the reason in the note.
    pub async fn reject(
        &self,
        doc: &PurchaseOrderDocument,
        reason: &str,
    ) -> ClientResult<PurchaseOrderDocument> {
        self.transition(doc, Action::Reject, Some(reason)).await
    }

    async fn transition(
        &self,
        doc: &PurchaseOrderDocument,
        action: Action,
        reason: Option<&str>,
    ) -> ClientResult<PurchaseOrderDocument> {
        let _ticket = self.submit.acquire()?;
        let order = &doc.order.domain;
        let transition = WorkflowService::apply(
            DocumentKind::PurchaseOrder,
            order.status,
            action,
            &self.ctx.actor,
            reason,
        )?;

        let next = PurchaseOrder {
            status: transition.new_status(),
            note: transition.next_note(order.note.as_deref()),
            ..order.clone()
        };
        self.ctx.save(&doc.order, &next).await?;
        tracing::info!(
            order_id = %order.id,
            from = %order.status,
            to = %next.status,
            actor = %self.ctx.actor.id,
            "Purchase order status changed"
        );
        reloaded(self.show(order.id)).await
    }

    /// Deletes a `New` order: its lines first, then the header.
    pub async fn delete(&self, doc: &PurchaseOrderDocument) -> ClientResult<()> {
        let _ticket = self.submit.acquire()?;
        let order = &doc.order.domain;
        WorkflowService::ensure_allowed(
            DocumentKind::PurchaseOrder,
            order.status,
            &self.ctx.actor,
            self.ctx.actor.owns(Some(order.employee_id)),
            Action::Delete,
        )?;

        let line_ids = doc.lines.iter().filter_map(|l| l.record.key()).collect();
        self.ctx
            .delete_document(
                (Endpoint::PurchaseOrderLines, line_ids),
                (Endpoint::PurchaseOrders, order.id.0),
                "order delete",
            )
            .await?;
        tracing::info!(order_id = %order.id, "Purchase order deleted");
        Ok(())
    }
}
