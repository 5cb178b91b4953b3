//! Discount vouchers (mã giảm giá).
//!
//! A voucher's status is never stored: it is derived from today's date in
//! the business timezone and the remaining quantity. The status decides
//! which edits are still allowed and whether the voucher applies to an
//! order.
//!
//! # Modules
//!
//! - `types` - Voucher, DiscountKind, VoucherForm
//! - `status` - Status derivation and edit scope
//! - `discount` - Discount computation for an order
//! - `validation` - Form validation
//! - `error` - Voucher-specific error types

pub mod discount;
pub mod error;
pub mod status;
pub mod types;
pub mod validation;

#[cfg(test)]
mod status_props;

pub use discount::compute_discount;
pub use error::VoucherError;
pub use status::{VoucherEditScope, VoucherStatus, derive_status};
pub use types::{DiscountKind, Voucher, VoucherForm};
pub use validation::validate_voucher;
