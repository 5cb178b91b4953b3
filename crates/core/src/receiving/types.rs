//! Warehouse receipt domain types.

use atelier_shared::types::{EmployeeId, PurchaseOrderId, ReceiptId, ReceiptLineId, SupplierId, VariantId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::purchasing::PurchaseOrder;
use crate::workflow::DocumentStatus;

/// A warehouse receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseReceipt {
    /// Backend id.
    pub id: ReceiptId,
    /// Purchase order the goods were delivered against, if any.
    pub purchase_order_id: Option<PurchaseOrderId>,
    /// Supplier recorded directly on the receipt.
    pub supplier_id: Option<SupplierId>,
    /// Employee who received the goods.
    pub employee_id: EmployeeId,
    /// Receiving date.
    pub received_at: Option<NaiveDate>,
    /// Normalized status. Receipts never reach `Completed`.
    pub status: DocumentStatus,
    /// Free-text note.
    pub note: Option<String>,
}

impl WarehouseReceipt {
    /// Resolves the receipt's supplier.
    ///
    /// A supplier set on the receipt wins; otherwise it is taken from the
    /// source purchase order.
    #[must_use]
    pub fn resolve_supplier(&self, orders: &[PurchaseOrder]) -> Option<SupplierId> {
        resolve_supplier(self.supplier_id, self.purchase_order_id, orders)
    }
}

/// Header input for a receipt about to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReceipt {
    /// Source purchase order, if any.
    pub purchase_order_id: Option<PurchaseOrderId>,
    /// Supplier, when not taken from the source order.
    pub supplier_id: Option<SupplierId>,
    /// Receiving employee.
    pub employee_id: EmployeeId,
    /// Receiving date.
    pub received_at: NaiveDate,
    /// Free-text note.
    pub note: Option<String>,
}

impl NewReceipt {
    /// Resolves the supplier the same way a saved receipt does.
    #[must_use]
    pub fn resolve_supplier(&self, orders: &[PurchaseOrder]) -> Option<SupplierId> {
        resolve_supplier(self.supplier_id, self.purchase_order_id, orders)
    }
}

fn resolve_supplier(
    direct: Option<SupplierId>,
    source: Option<PurchaseOrderId>,
    orders: &[PurchaseOrder],
) -> Option<SupplierId> {
    direct.or_else(|| {
        let source = source?;
        orders.iter().find(|o| o.id == source).map(|o| o.supplier_id)
    })
}

/// One received line: a variant and a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WarehouseReceiptLine {
    /// Backend id; `None` until saved.
    pub id: Option<ReceiptLineId>,
    /// Owning receipt.
    pub receipt_id: ReceiptId,
    /// Product variant.
    pub variant_id: VariantId,
    /// Received quantity.
    pub quantity: u32,
    /// Line note (damaged items, substitutions).
    pub note: Option<String>,
}

/// Operator input for a new or edited receipt line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptLineInput {
    /// Product variant.
    pub variant_id: VariantId,
    /// Quantity, must be positive.
    pub quantity: u32,
    /// Optional note.
    pub note: Option<String>,
}
