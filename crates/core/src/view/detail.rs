//! Detail views.

use atelier_shared::types::{PurchaseOrderLineId, ReceiptLineId, VariantId};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::purchasing::{
    OrderTotals, PurchaseOrder, PurchaseOrderLine, TotalsDivergence, compute_totals, line_total,
};
use crate::receiving::{WarehouseReceipt, WarehouseReceiptLine};
use crate::workflow::Actor;

use super::lookup::ReferenceLookups;
use super::rows::{PurchaseOrderRow, ReceiptRow};

/// A purchase order line for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineRow {
    /// Line id.
    pub id: Option<PurchaseOrderLineId>,
    /// Variant id.
    pub variant_id: VariantId,
    /// Variant label.
    pub variant: String,
    /// Quantity.
    pub quantity: u32,
    /// Unit price.
    pub unit_price: Decimal,
    /// `quantity * unit_price`, recomputed.
    pub line_total: Decimal,
}

/// A purchase order with its lines and recomputed totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseOrderDetailView {
    /// Header row.
    pub header: PurchaseOrderRow,
    /// Note.
    pub note: Option<String>,
    /// Lines.
    pub lines: Vec<LineRow>,
    /// Totals recomputed from the lines.
    pub computed: OrderTotals,
    /// Totals as stored on the header.
    pub stored: OrderTotals,
}

impl PurchaseOrderDetailView {
    /// Builds the view from an order and its lines.
    #[must_use]
    pub fn build(
        order: &PurchaseOrder,
        lines: &[PurchaseOrderLine],
        lookups: &ReferenceLookups,
        viewer: &Actor,
    ) -> Self {
        Self {
            header: PurchaseOrderRow::build(order, lookups, viewer),
            note: order.note.clone(),
            lines: lines
                .iter()
                .map(|line| LineRow {
                    id: line.id,
                    variant_id: line.variant_id,
                    variant: lookups.variants.label(line.variant_id),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: line_total(line.quantity, line.unit_price),
                })
                .collect(),
            computed: compute_totals(lines, order.deposit),
            stored: OrderTotals {
                total_amount: order.total_amount,
                remaining: order.remaining,
            },
        }
    }

    /// Returns the stored/computed mismatch, if any.
    #[must_use]
    pub fn divergence(&self) -> Option<TotalsDivergence> {
        (self.stored != self.computed).then_some(TotalsDivergence {
            stored: self.stored,
            computed: self.computed,
        })
    }
}

/// A receipt line for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLineRow {
    /// Line id.
    pub id: Option<ReceiptLineId>,
    /// Variant id.
    pub variant_id: VariantId,
    /// Variant label.
    pub variant: String,
    /// Received quantity.
    pub quantity: u32,
    /// Note.
    pub note: String,
}

/// A warehouse receipt with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptDetailView {
    /// Header row.
    pub header: ReceiptRow,
    /// Note.
    pub note: Option<String>,
    /// Lines.
    pub lines: Vec<ReceiptLineRow>,
    /// Total received units.
    pub total_quantity: u64,
}

impl ReceiptDetailView {
    /// Builds the view from a receipt and its lines.
    #[must_use]
    pub fn build(
        receipt: &WarehouseReceipt,
        lines: &[WarehouseReceiptLine],
        orders: &[PurchaseOrder],
        lookups: &ReferenceLookups,
        viewer: &Actor,
    ) -> Self {
        Self {
            header: ReceiptRow::build(receipt, orders, lookups, viewer),
            note: receipt.note.clone(),
            lines: lines
                .iter()
                .map(|line| ReceiptLineRow {
                    id: line.id,
                    variant_id: line.variant_id,
                    variant: lookups.variants.label(line.variant_id),
                    quantity: line.quantity,
                    note: line.note.clone().unwrap_or_default(),
                })
                .collect(),
            total_quantity: lines.iter().map(|l| u64::from(l.quantity)).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::{ActorRole, DocumentStatus};
    use atelier_shared::types::{EmployeeId, PurchaseOrderId, SupplierId};
    use rust_decimal_macros::dec;

    fn order(total: Decimal, remaining: Decimal) -> PurchaseOrder {
        PurchaseOrder {
            id: PurchaseOrderId(1),
            supplier_id: SupplierId(1),
            employee_id: EmployeeId(1),
            ordered_at: None,
            expected_at: None,
            total_amount: total,
            deposit: dec!(50000),
            remaining,
            payment_method: None,
            status: DocumentStatus::New,
            note: None,
        }
    }

    fn lines() -> Vec<PurchaseOrderLine> {
        vec![
            PurchaseOrderLine::new(PurchaseOrderId(1), VariantId(1), 3, dec!(100000)),
            PurchaseOrderLine::new(PurchaseOrderId(1), VariantId(2), 1, dec!(40000)),
        ]
    }

    fn viewer() -> Actor {
        Actor::new(EmployeeId(1), ActorRole::Staff)
    }

    #[test]
    fn test_in_sync_has_no_divergence() {
        let view = PurchaseOrderDetailView::build(
            &order(dec!(340000), dec!(290000)),
            &lines(),
            &ReferenceLookups::default(),
            &viewer(),
        );
        assert_eq!(view.divergence(), None);
        assert_eq!(view.lines[1].variant, "#2");
    }

    #[test]
    fn test_stale_header_reports_divergence() {
        let view = PurchaseOrderDetailView::build(
            &order(dec!(300000), dec!(250000)),
            &lines(),
            &ReferenceLookups::default(),
            &viewer(),
        );
        let divergence = view.divergence().unwrap();
        assert_eq!(divergence.stored.total_amount, dec!(300000));
        assert_eq!(divergence.computed.total_amount, dec!(340000));
        assert_eq!(divergence.computed.remaining, dec!(290000));
    }
}
