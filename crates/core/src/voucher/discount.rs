//! Discount computation.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::VoucherError;
use super::status::VoucherStatus;
use super::types::{DiscountKind, Voucher};

/// Computes the discount `voucher` gives an order on `today`.
///
/// # Arguments
/// * `voucher` - The voucher applied
/// * `order_value` - Order subtotal before shipping
/// * `shipping_fee` - Shipping fee, used by free-shipping vouchers
/// * `is_birthday` - Whether today is the customer's birthday
/// * `today` - Date in the business timezone
///
/// # Returns
/// The discount in whole VND, never more than what it discounts:
/// - fixed amount: capped at the order value
/// - percent: rounded half-up to whole VND, capped by `max_discount`
/// - free shipping: the shipping fee, capped by `max_discount`
///
/// # Errors
/// * `NotActive` - the voucher is not `Ongoing`
/// * `BirthdayOnly` - birthday voucher for a non-birthday customer
/// * `BelowMinimum` - order value below the voucher minimum
pub fn compute_discount(
    voucher: &Voucher,
    order_value: Decimal,
    shipping_fee: Decimal,
    is_birthday: bool,
    today: NaiveDate,
) -> Result<Decimal, VoucherError> {
    let status = voucher.status(today);
    if status != VoucherStatus::Ongoing {
        return Err(VoucherError::NotActive(status));
    }
    if voucher.form.birthday_only && !is_birthday {
        return Err(VoucherError::BirthdayOnly);
    }
    if order_value < voucher.form.min_order_value {
        return Err(VoucherError::BelowMinimum {
            minimum: voucher.form.min_order_value,
        });
    }

    let discount = match voucher.form.discount {
        DiscountKind::FixedAmount { amount } => amount.min(order_value),
        DiscountKind::Percent {
            percent,
            max_discount,
        } => {
            let raw = (order_value * percent / Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
            cap(raw, max_discount)
        }
        DiscountKind::FreeShipping { max_discount } => cap(shipping_fee, max_discount),
    };

    Ok(discount.max(Decimal::ZERO))
}

fn cap(amount: Decimal, max_discount: Option<Decimal>) -> Decimal {
    max_discount.map_or(amount, |max| amount.min(max))
}
