//! Purchase orders (phiếu đặt hàng), their line items and header totals.

pub mod error;
pub mod service;
pub mod totals;
pub mod types;

#[cfg(test)]
mod totals_props;

pub use error::PurchasingError;
pub use service::{LineChange, LineWrite, PurchasingService};
pub use totals::{OrderTotals, TotalsDivergence, compute_totals, detect_divergence, line_total};
pub use types::{LineInput, NewPurchaseOrder, PurchaseOrder, PurchaseOrderLine};
