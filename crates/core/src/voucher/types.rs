//! Voucher domain types.

use atelier_shared::types::{EmployeeId, VoucherId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a voucher discounts an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountKind {
    /// A flat amount off the order.
    FixedAmount {
        /// Amount in VND.
        amount: Decimal,
    },
    /// A percentage of the order value, optionally capped.
    Percent {
        /// Percent in (0, 100].
        percent: Decimal,
        /// Cap in VND.
        max_discount: Option<Decimal>,
    },
    /// Shipping fee waived, optionally capped.
    FreeShipping {
        /// Cap in VND.
        max_discount: Option<Decimal>,
    },
}

/// The editable fields of a voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherForm {
    /// Unique code customers type in.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Discount rule.
    pub discount: DiscountKind,
    /// Minimum order value for the voucher to apply.
    pub min_order_value: Decimal,
    /// Number of uses issued.
    pub quantity_total: u32,
    /// First valid day.
    pub start_date: NaiveDate,
    /// Last valid day.
    pub end_date: NaiveDate,
    /// Only valid on the customer's birthday.
    pub birthday_only: bool,
}

/// A saved voucher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    /// Backend id.
    pub id: VoucherId,
    /// Editable fields.
    #[serde(flatten)]
    pub form: VoucherForm,
    /// Number of uses consumed.
    pub quantity_used: u32,
    /// Employee who created the voucher.
    pub creator_employee_id: Option<EmployeeId>,
}

impl Voucher {
    /// `quantity_total - quantity_used`; negative when over-redeemed.
    #[must_use]
    pub fn quantity_remaining(&self) -> i64 {
        i64::from(self.form.quantity_total) - i64::from(self.quantity_used)
    }
}
