//! Header total recomputation.
//!
//! The header's `total_amount` and `remaining` are derived from the lines.
//! They are recomputed whenever the line set changes, and a loaded order
//! whose stored header disagrees is reported as a divergence.

use rust_decimal::Decimal;
use serde::Serialize;

use atelier_shared::types::money::non_negative;

use super::types::{PurchaseOrder, PurchaseOrderLine};

/// Derived header amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    /// Sum of line totals.
    pub total_amount: Decimal,
    /// `max(0, total_amount - deposit)`.
    pub remaining: Decimal,
}

/// Stored header amounts that disagree with the lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TotalsDivergence {
    /// What the backend has.
    pub stored: OrderTotals,
    /// What the lines add up to.
    pub computed: OrderTotals,
}

/// `quantity * unit_price`.
#[must_use]
pub fn line_total(quantity: u32, unit_price: Decimal) -> Decimal {
    Decimal::from(quantity) * unit_price
}

/// Recomputes header totals from `lines` and `deposit`.
///
/// Line totals are recomputed from quantity and price rather than trusted
/// from the stored `line_total`.
#[must_use]
pub fn compute_totals(lines: &[PurchaseOrderLine], deposit: Decimal) -> OrderTotals {
    let total_amount: Decimal = lines
        .iter()
        .map(|line| line_total(line.quantity, line.unit_price))
        .sum();

    OrderTotals {
        total_amount,
        remaining: non_negative(total_amount - deposit),
    }
}

/// Compares the order's stored header with its lines.
///
/// Returns `None` when they agree.
#[must_use]
pub fn detect_divergence(
    order: &PurchaseOrder,
    lines: &[PurchaseOrderLine],
) -> Option<TotalsDivergence> {
    let computed = compute_totals(lines, order.deposit);
    let stored = OrderTotals {
        total_amount: order.total_amount,
        remaining: order.remaining,
    };

    (stored != computed).then_some(TotalsDivergence { stored, computed })
}
