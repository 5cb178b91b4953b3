//! VND amounts with decimal precision.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal`; the dong has no minor unit, so
//! display rounds to whole dong.

use rust_decimal::Decimal;
use rust_decimal::prelude::RoundingStrategy;

/// Alias documenting that a `Decimal` holds Vietnamese dong.
pub type Vnd = Decimal;

/// Formats an amount as `1.250.000 ₫` (dot thousands separator).
#[must_use]
pub fn format_vnd(amount: Vnd) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped} ₫")
    } else {
        format!("{grouped} ₫")
    }
}

/// Clamps an amount at zero.
#[must_use]
pub fn non_negative(amount: Vnd) -> Vnd {
    amount.max(Decimal::ZERO)
}
