//! Purchase order domain types.

use atelier_shared::types::{
    EmployeeId, PurchaseOrderId, PurchaseOrderLineId, SupplierId, VariantId,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::workflow::DocumentStatus;

/// A purchase order sent to a supplier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// Backend id.
    pub id: PurchaseOrderId,
    /// Supplier the goods are ordered from.
    pub supplier_id: SupplierId,
    /// Employee who created the order.
    pub employee_id: EmployeeId,
    /// Order date.
    pub ordered_at: Option<NaiveDate>,
    /// Expected delivery date.
    pub expected_at: Option<NaiveDate>,
    /// Stored header total (sum of line totals when in sync).
    pub total_amount: Decimal,
    /// Deposit paid to the supplier.
    pub deposit: Decimal,
    /// Stored remaining balance, `max(0, total - deposit)` when in sync.
    pub remaining: Decimal,
    /// Payment method text ("Tiền mặt", "Chuyển khoản").
    pub payment_method: Option<String>,
    /// Normalized status.
    pub status: DocumentStatus,
    /// Free-text note; rejection reasons are appended here.
    pub note: Option<String>,
}

/// One line of a purchase order: a product variant at a unit price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    /// Backend id; `None` until the line is saved.
    pub id: Option<PurchaseOrderLineId>,
    /// Owning purchase order.
    pub order_id: PurchaseOrderId,
    /// Product variant (size x color x material).
    pub variant_id: VariantId,
    /// Ordered quantity.
    pub quantity: u32,
    /// Unit price.
    pub unit_price: Decimal,
    /// Stored line total, `quantity * unit_price` when in sync.
    pub line_total: Decimal,
}

impl PurchaseOrderLine {
    /// Builds an unsaved line with its total computed.
    #[must_use]
    pub fn new(
        order_id: PurchaseOrderId,
        variant_id: VariantId,
        quantity: u32,
        unit_price: Decimal,
    ) -> Self {
        Self {
            id: None,
            order_id,
            variant_id,
            quantity,
            unit_price,
            line_total: super::totals::line_total(quantity, unit_price),
        }
    }
}

/// Operator input for a new or edited line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineInput {
    /// Product variant.
    pub variant_id: VariantId,
    /// Quantity, must be positive.
    pub quantity: u32,
    /// Unit price, must not be negative.
    pub unit_price: Decimal,
}

/// Header input for creating a purchase order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPurchaseOrder {
    /// Supplier.
    pub supplier_id: Option<SupplierId>,
    /// Creating employee.
    pub employee_id: EmployeeId,
    /// Order date.
    pub ordered_at: NaiveDate,
    /// Expected delivery date.
    pub expected_at: Option<NaiveDate>,
    /// Deposit.
    pub deposit: Decimal,
    /// Payment method.
    pub payment_method: Option<String>,
    /// Note.
    pub note: Option<String>,
}
