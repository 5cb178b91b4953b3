//! Warehouse receipt desk (phiếu nhập kho).

use atelier_core::purchasing::{PurchaseOrder, PurchaseOrderLine};
use atelier_core::receiving::{
    NewReceipt, QuantityCap, ReceiptLineInput, ReceivingBook, ReceivingError, ReceivingService,
    WarehouseReceipt, WarehouseReceiptLine,
};
use atelier_core::view::{ListQuery, ReceiptDetailView, ReceiptRow};
use atelier_core::workflow::{Action, DocumentKind, DocumentStatus, WorkflowService};
use atelier_shared::types::{PageRequest, ReceiptId, ReceiptLineId, VariantId};

use super::{DeskContext, Listing, domains, load_lookups, reloaded};
use crate::fetch::{LatestFetch, SubmitGuard};
use crate::wire::{
    Loaded, PurchaseOrderLineRecord, PurchaseOrderRecord, ReceiptLineRecord, ReceiptRecord,
    WireRecord,
};
use crate::{ClientError, ClientResult, Endpoint};

/// A receipt as loaded for its detail screen.
#[derive(Debug, Clone)]
pub struct ReceiptDocument {
    /// The header.
    pub receipt: Loaded<ReceiptRecord>,
    /// Its lines.
    pub lines: Vec<Loaded<ReceiptLineRecord>>,
    /// Display view.
    pub view: ReceiptDetailView,
}

/// Orders and receipts loaded together for the quantity cap.
#[derive(Debug, Clone, Default)]
pub struct ReceivingLedger {
    /// Purchase orders.
    pub orders: Vec<PurchaseOrder>,
    /// Purchase order lines.
    pub order_lines: Vec<PurchaseOrderLine>,
    /// Receipts.
    pub receipts: Vec<WarehouseReceipt>,
    /// Receipt lines.
    pub receipt_lines: Vec<WarehouseReceiptLine>,
}

impl ReceivingLedger {
    /// Borrowed view for the cap checks.
    #[must_use]
    pub fn book(&self) -> ReceivingBook<'_> {
        ReceivingBook {
            orders: &self.orders,
            order_lines: &self.order_lines,
            receipts: &self.receipts,
            receipt_lines: &self.receipt_lines,
        }
    }
}

/// Lists, shows and edits warehouse receipts.
#[derive(Debug)]
pub struct ReceiptDesk {
    ctx: DeskContext,
    fetch: LatestFetch,
    submit: SubmitGuard,
}

impl ReceiptDesk {
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
    ) -> ClientResult<Option<Listing<ReceiptRow>>> {
        let load = async {
            let (receipts, orders, lookups) = tokio::try_join!(
                self.ctx.load_all::<ReceiptRecord>(),
                self.ctx.load_all::<PurchaseOrderRecord>(),
                load_lookups(&self.ctx.http),
            )?;
            let orders = domains(&orders);
            let rows: Vec<_> = receipts
                .iter()
                .map(|r| ReceiptRow::build(&r.domain, &orders, &lookups, &self.ctx.actor))
                .collect();
            Ok::<_, ClientError>(Listing::of(&query.apply(&rows), page))
        };
        self.fetch
            .run(async { Listing::or_banner(load.await, page) })
            .await
    }

    /// Loads a receipt with its lines.
    pub async fn show(&self, id: ReceiptId) -> ClientResult<ReceiptDocument> {
        let (receipt, lines, orders, lookups) = tokio::try_join!(
            self.ctx.load::<ReceiptRecord>(id.0),
            self.ctx.load_all::<ReceiptLineRecord>(),
            self.ctx.load_all::<PurchaseOrderRecord>(),
            load_lookups(&self.ctx.http),
        )?;
        let lines: Vec<_> = lines
            .into_iter()
            .filter(|l| l.domain.receipt_id == id)
            .collect();
        let view = ReceiptDetailView::build(
            &receipt.domain,
            &domains(&lines),
            &domains(&orders),
            &lookups,
            &self.ctx.actor,
        );
        Ok(ReceiptDocument {
            receipt,
            lines,
            view,
        })
    }

    /// Loads everything the quantity cap reads.
    ///
    /// Any unreadable row fails the load: a skipped line would undercount
    /// what was ordered or received.
    pub async fn ledger(&self) -> ClientResult<ReceivingLedger> {
        let (orders, order_lines, receipts, receipt_lines) = tokio::try_join!(
            self.ctx.load_all_strict::<PurchaseOrderRecord>(),
            self.ctx.load_all_strict::<PurchaseOrderLineRecord>(),
            self.ctx.load_all_strict::<ReceiptRecord>(),
            self.ctx.load_all_strict::<ReceiptLineRecord>(),
        )?;
        Ok(ReceivingLedger {
            orders: domains(&orders),
            order_lines: domains(&order_lines),
            receipts: domains(&receipts),
            receipt_lines: domains(&receipt_lines),
        })
    }

    /// Ordered and already-received quantities of `variant_id` for the
    /// receipt's supplier.
    pub async fn cap(&self, doc: &ReceiptDocument, variant_id: VariantId) -> ClientResult<QuantityCap> {
        let ledger = self.ledger().await?;
        let supplier = doc
            .receipt
            .domain
            .resolve_supplier(&ledger.orders)
            .ok_or(ReceivingError::MissingSupplier)?;
        Ok(ledger.book().cap(supplier, variant_id, None))
    }

    /// Creates a `New` receipt; returns its id when the backend echoes it.
    pub async fn create(&self, input: &NewReceipt) -> ClientResult<Option<ReceiptId>> {
        let _ticket = self.submit.acquire()?;
        let orders = domains(&self.ctx.load_all::<PurchaseOrderRecord>().await?);
        ReceivingService::validate_new_receipt(input, &orders)?;

        let supplier = input.resolve_supplier(&orders);
        let id = self
            .ctx
            .create(&ReceiptRecord::from_new(input, supplier))
            .await?
            .map(ReceiptId);
        tracing::info!(receipt_id = ?id, source = ?input.purchase_order_id, "Receipt created");
        Ok(id)
    }

    /// Adds a line within the quantity cap.
    pub async fn add_line(
        &self,
        doc: &ReceiptDocument,
        input: ReceiptLineInput,
    ) -> ClientResult<ReceiptDocument> {
        let _ticket = self.submit.acquire()?;
        let ledger = self.ledger().await?;
        let line =
            ReceivingService::add_line(&ledger.book(), &doc.receipt.domain, input, &self.ctx.actor)?;
        self.ctx.create(&ReceiptLineRecord::from_domain(&line)).await?;
        tracing::info!(
            receipt_id = %line.receipt_id,
            variant_id = %line.variant_id,
            quantity = line.quantity,
            "Receipt line added"
        );
        reloaded(self.show(doc.receipt.domain.id)).await
    }

    /// Changes a line within the quantity cap; the line's previous quantity
    /// does not count against it.
    pub async fn update_line(
        &self,
        doc: &ReceiptDocument,
        line_id: ReceiptLineId,
        input: ReceiptLineInput,
    ) -> ClientResult<ReceiptDocument> {
        let _ticket = self.submit.acquire()?;
        let ledger = self.ledger().await?;
        let line = ReceivingService::update_line(
            &ledger.book(),
            &doc.receipt.domain,
            line_id,
            input,
            &self.ctx.actor,
        )?;
        let loaded = doc
            .lines
            .iter()
            .find(|l| l.domain.id == Some(line_id))
            .ok_or(ReceivingError::LineNotFound(line_id))?;
        self.ctx.save(loaded, &line).await?;
        tracing::info!(%line_id, quantity = line.quantity, "Receipt line updated");
        reloaded(self.show(doc.receipt.domain.id)).await
    }

    /// Removes a line.
    pub async fn remove_line(
        &self,
        doc: &ReceiptDocument,
        line_id: ReceiptLineId,
    ) -> ClientResult<ReceiptDocument> {
        let _ticket = self.submit.acquire()?;
        ReceivingService::remove_line(
            &doc.receipt.domain,
            &domains(&doc.lines),
            line_id,
            &self.ctx.actor,
        )?;
        self.ctx.http.delete(Endpoint::ReceiptLines, line_id.0).await?;
        tracing::info!(%line_id, "Receipt line removed");
        reloaded(self.show(doc.receipt.domain.id)).await
    }

    /// `New` -> `PendingReview`.
    pub async fn send(&self, doc: &ReceiptDocument) -> ClientResult<ReceiptDocument> {
        self.transition(doc, Action::Send, None).await
    }

    /// `PendingReview` -> `Approved`. Managers and admins only.
    pub async fn approve(&self, doc: &ReceiptDocument) -> ClientResult<ReceiptDocument> {
        self.transition(doc, Action::Approve, None).await
    }

    /// `PendingReview` -> `Cancelled`, keeping the reason in the note.
    pub async fn reject(&self, doc: &ReceiptDocument, reason: &str) -> ClientResult<ReceiptDocument> {
        self.transition(doc, Action::Reject, Some(reason)).await
    }

    async fn transition(
        &self,
        doc: &ReceiptDocument,
        action: Action,
        reason: Option<&str>,
    ) -> ClientResult<ReceiptDocument> {
        let _ticket = self.submit.acquire()?;
        let receipt = &doc.receipt.domain;
        let transition = WorkflowService::apply(
            DocumentKind::WarehouseReceipt,
            receipt.status,
            action,
            &self.ctx.actor,
            reason,
        )?;

        let next = WarehouseReceipt {
            status: transition.new_status(),
            note: transition.next_note(receipt.note.as_deref()),
            ..receipt.clone()
        };
        self.ctx.save(&doc.receipt, &next).await?;
        tracing::info!(
            receipt_id = %receipt.id,
            from = %receipt.status,
            to = %next.status,
            actor = %self.ctx.actor.id,
            "Receipt status changed"
        );
        reloaded(self.show(receipt.id)).await
    }

    /// Deletes a `New` receipt and its lines.
    pub async fn delete(&self, doc: &ReceiptDocument) -> ClientResult<()> {
        let _ticket = self.submit.acquire()?;
        let receipt = &doc.receipt.domain;
        WorkflowService::ensure_allowed(
            DocumentKind::WarehouseReceipt,
            receipt.status,
            &self.ctx.actor,
            self.ctx.actor.owns(Some(receipt.employee_id)),
            Action::Delete,
        )?;
        let line_ids = doc.lines.iter().filter_map(|l| l.record.key()).collect();
        self.ctx
            .delete_document(
                (Endpoint::ReceiptLines, line_ids),
                (Endpoint::WarehouseReceipts, receipt.id.0),
                "receipt delete",
            )
            .await?;
        tracing::info!(receipt_id = %receipt.id, "Receipt deleted");
        Ok(())
    }
}
