//! Received-quantity cap.
//!
//! A supplier cannot deliver more of a variant than was ordered from them:
//!
//! ```text
//! ordered(variant)  = Σ line quantity over Approved POs of the supplier
//! received(variant) = Σ line quantity over other live receipts of the supplier
//! reject if received + requested > ordered
//! ```

use atelier_shared::types::{ReceiptLineId, SupplierId, VariantId};
use serde::Serialize;

use crate::purchasing::{PurchaseOrder, PurchaseOrderLine};
use crate::workflow::DocumentStatus;

use super::error::ReceivingError;
use super::types::{WarehouseReceipt, WarehouseReceiptLine};

/// Everything the cap needs, bulk-loaded once.
#[derive(Debug, Clone, Copy)]
pub struct ReceivingBook<'a> {
    /// All purchase orders.
    pub orders: &'a [PurchaseOrder],
    /// All purchase order lines.
    pub order_lines: &'a [PurchaseOrderLine],
    /// All warehouse receipts.
    pub receipts: &'a [WarehouseReceipt],
    /// All warehouse receipt lines.
    pub receipt_lines: &'a [WarehouseReceiptLine],
}

/// How much of a variant is ordered and received for a supplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuantityCap {
    /// Ordered on approved purchase orders.
    pub ordered: u64,
    /// Received on other live receipts.
    pub received: u64,
}

impl QuantityCap {
    /// Quantity still receivable.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.ordered.saturating_sub(self.received)
    }

    /// Returns true if `requested` more units fit under the cap.
    #[must_use]
    pub fn admits(&self, requested: u32) -> bool {
        self.received + u64::from(requested) <= self.ordered
    }
}

impl ReceivingBook<'_> {
    /// Sum of line quantities for `variant_id` across the supplier's
    /// approved purchase orders.
    #[must_use]
    pub fn ordered(&self, supplier_id: SupplierId, variant_id: VariantId) -> u64 {
        self.order_lines
            .iter()
            .filter(|line| line.variant_id == variant_id)
            .filter(|line| {
                self.orders.iter().any(|o| {
                    o.id == line.order_id
                        && o.supplier_id == supplier_id
                        && o.status == DocumentStatus::Approved
                })
            })
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Sum of received quantities for `variant_id` from the supplier on live
    /// receipts, leaving out `exclude` (the line being edited).
    #[must_use]
    pub fn received(
        &self,
        supplier_id: SupplierId,
        variant_id: VariantId,
        exclude: Option<ReceiptLineId>,
    ) -> u64 {
        self.receipt_lines
            .iter()
            .filter(|line| line.variant_id == variant_id)
            .filter(|line| exclude.is_none() || line.id != exclude)
            .filter(|line| {
                self.receipts.iter().any(|r| {
                    r.id == line.receipt_id
                        && r.status.is_live()
                        && r.resolve_supplier(self.orders) == Some(supplier_id)
                })
            })
            .map(|line| u64::from(line.quantity))
            .sum()
    }

    /// Ordered and received quantities for the supplier and variant.
    #[must_use]
    pub fn cap(
        &self,
        supplier_id: SupplierId,
        variant_id: VariantId,
        exclude: Option<ReceiptLineId>,
    ) -> QuantityCap {
        QuantityCap {
            ordered: self.ordered(supplier_id, variant_id),
            received: self.received(supplier_id, variant_id, exclude),
        }
    }
}

/// Checks that receiving `quantity` of `variant_id` on `receipt` stays
/// within what was ordered from the receipt's supplier.
///
/// # Arguments
/// * `book` - Bulk-loaded orders and receipts
/// * `receipt` - The receipt being edited
/// * `variant_id` - Variant being received
/// * `quantity` - New quantity for the line
/// * `editing` - The line being replaced, excluded from the received sum
///
/// # Returns
/// * `Ok(QuantityCap)` with the quantities used for the decision
/// * `Err(ReceivingError::ExceedsOrdered)` if the cap would be exceeded
pub fn check_receipt_quantity(
    book: &ReceivingBook<'_>,
    receipt: &WarehouseReceipt,
    variant_id: VariantId,
    quantity: u32,
    editing: Option<ReceiptLineId>,
) -> Result<QuantityCap, ReceivingError> {
    if quantity == 0 {
        return Err(ReceivingError::InvalidQuantity);
    }
    let supplier_id = receipt
        .resolve_supplier(book.orders)
        .ok_or(ReceivingError::MissingSupplier)?;

    let cap = book.cap(supplier_id, variant_id, editing);
    if !cap.admits(quantity) {
        tracing::debug!(
            %supplier_id,
            %variant_id,
            ordered = cap.ordered,
            received = cap.received,
            requested = quantity,
            "Receipt quantity over cap"
        );
        return Err(ReceivingError::ExceedsOrdered {
            variant_id,
            ordered: cap.ordered,
            received: cap.received,
            requested: quantity,
        });
    }
    Ok(cap)
}
