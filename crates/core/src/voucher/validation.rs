//! Voucher form validation.

use atelier_shared::text::fold;
use atelier_shared::types::VoucherId;
use rust_decimal::Decimal;

use super::error::VoucherError;
use super::types::{DiscountKind, Voucher, VoucherForm};

/// Validates a voucher form before create or update.
///
/// Codes are compared case- and accent-insensitively against every other
/// voucher; `editing` is the voucher being updated, if any.
pub fn validate_voucher(
    form: &VoucherForm,
    existing: &[Voucher],
    editing: Option<VoucherId>,
) -> Result<(), VoucherError> {
    let code = form.code.trim();
    if code.is_empty() {
        return Err(VoucherError::EmptyCode);
    }
    let folded = fold(code);
    if existing
        .iter()
        .filter(|v| Some(v.id) != editing)
        .any(|v| fold(&v.form.code) == folded)
    {
        return Err(VoucherError::DuplicateCode(code.to_string()));
    }
    if form.name.trim().is_empty() {
        return Err(VoucherError::EmptyName);
    }
    if form.start_date > form.end_date {
        return Err(VoucherError::InvalidDateRange {
            start: form.start_date,
            end: form.end_date,
        });
    }
    if form.quantity_total == 0 {
        return Err(VoucherError::InvalidQuantity);
    }
    if form.min_order_value < Decimal::ZERO {
        return Err(VoucherError::NegativeMinimum);
    }

    match form.discount {
        DiscountKind::FixedAmount { amount } if amount <= Decimal::ZERO => {
            Err(VoucherError::InvalidAmount)
        }
        DiscountKind::Percent { percent, .. }
            if percent <= Decimal::ZERO || percent > Decimal::ONE_HUNDRED =>
        {
            Err(VoucherError::InvalidPercent)
        }
        DiscountKind::Percent {
            max_discount: Some(max),
            ..
        }
        | DiscountKind::FreeShipping {
            max_discount: Some(max),
        } if max <= Decimal::ZERO => Err(VoucherError::InvalidAmount),
        _ => Ok(()),
    }
}
