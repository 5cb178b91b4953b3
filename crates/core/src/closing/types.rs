//! Shift closing domain types.

use atelier_shared::text::fold;
use atelier_shared::types::{EmployeeId, OrderId, ShiftCloseId};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::workflow::{DocumentStatus, Transition};

/// Customer order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Chờ xác nhận.
    Pending,
    /// Đã duyệt / đã xác nhận.
    Approved,
    /// Đang giao.
    Shipping,
    /// Đã giao.
    Delivered,
    /// Đã hủy.
    Cancelled,
    /// Anything else.
    Unknown,
}

impl OrderStatus {
    /// Normalizes backend free text.
    ///
    /// Checked in order: cancelled, shipping, delivered, pending, approved.
    /// "Đang giao" is matched before "Đã giao", and "Chờ xác nhận" before
    /// the approved keywords.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let folded = fold(raw);
        let has = |needle: &str| folded.contains(needle);

        if folded.is_empty() {
            Self::Unknown
        } else if has("huy") || has("cancel") {
            Self::Cancelled
        } else if has("dang giao") || has("shipping") {
            Self::Shipping
        } else if has("da giao") || has("giao thanh cong") || has("hoan thanh") || has("delivered")
        {
            Self::Delivered
        } else if has("cho") || has("pending") {
            Self::Pending
        } else if has("duyet") || has("xac nhan") || has("approved") {
            Self::Approved
        } else {
            Self::Unknown
        }
    }

    /// Returns true if the order counts toward shift revenue.
    #[must_use]
    pub const fn is_revenue_bearing(self) -> bool {
        matches!(self, Self::Approved | Self::Shipping | Self::Delivered)
    }
}

/// How a customer paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Tiền mặt, including cash on delivery.
    Cash,
    /// Chuyển khoản.
    BankTransfer,
    /// Anything else (cards, wallets).
    Other,
}

impl PaymentMethod {
    /// Classifies backend free text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let folded = fold(raw);
        let has = |needle: &str| folded.contains(needle);

        if has("tien mat") || has("cash") || has("cod") {
            Self::Cash
        } else if has("chuyen khoan") || has("bank") || has("transfer") {
            Self::BankTransfer
        } else {
            Self::Other
        }
    }
}

/// The parts of a customer order shift closing needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrder {
    /// Backend id.
    pub id: OrderId,
    /// Employee who handled the order.
    pub employee_id: Option<EmployeeId>,
    /// Order day in the business timezone.
    pub ordered_on: Option<NaiveDate>,
    /// Order total.
    pub total_amount: Decimal,
    /// Payment method.
    pub payment_method: PaymentMethod,
    /// Order status.
    pub status: OrderStatus,
}

/// A saved shift-closing report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftCloseReport {
    /// Backend id.
    pub id: ShiftCloseId,
    /// Employee closing the shift.
    pub employee_id: EmployeeId,
    /// Day closed.
    pub closed_date: NaiveDate,
    /// Revenue from all counted orders.
    pub total_revenue: Decimal,
    /// Revenue paid in cash.
    pub cash_amount: Decimal,
    /// Cash paid out during the shift.
    pub cash_expense: Decimal,
    /// Revenue paid by bank transfer.
    pub bank_transfer_amount: Decimal,
    /// Number of counted orders.
    pub order_count: u32,
    /// Cash counted in the drawer.
    pub actual_cash: Decimal,
    /// `actual_cash - system_cash`.
    pub cash_variance: Decimal,
    /// Reviewer.
    pub approver_id: Option<EmployeeId>,
    /// Review time.
    pub approved_at: Option<DateTime<Utc>>,
    /// Normalized status.
    pub status: DocumentStatus,
    /// Free-text note.
    pub note: Option<String>,
}

impl ShiftCloseReport {
    /// Cash the drawer should hold: cash revenue less expenses.
    #[must_use]
    pub fn system_cash(&self) -> Decimal {
        self.cash_amount - self.cash_expense
    }

    /// Returns the report with a review transition applied.
    ///
    /// Approve and reject both stamp the reviewer; reject also appends the
    /// reason to the note.
    #[must_use]
    pub fn with_transition(&self, transition: &Transition) -> Self {
        let mut next = self.clone();
        next.status = transition.new_status();
        next.note = transition.next_note(self.note.as_deref());
        match *transition {
            Transition::Approve {
                approved_by,
                approved_at,
                ..
            } => {
                next.approver_id = Some(approved_by);
                next.approved_at = Some(approved_at);
            }
            Transition::Reject {
                rejected_by,
                rejected_at,
                ..
            } => {
                next.approver_id = Some(rejected_by);
                next.approved_at = Some(rejected_at);
            }
            Transition::Send { .. } => {}
        }
        next
    }
}

/// A report ready to be created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftCloseDraft {
    /// Employee closing the shift.
    pub employee_id: EmployeeId,
    /// Day closed.
    pub closed_date: NaiveDate,
    /// Revenue from all counted orders.
    pub total_revenue: Decimal,
    /// Revenue paid in cash.
    pub cash_amount: Decimal,
    /// Cash paid out during the shift.
    pub cash_expense: Decimal,
    /// Revenue paid by bank transfer.
    pub bank_transfer_amount: Decimal,
    /// Number of counted orders.
    pub order_count: u32,
    /// Cash counted in the drawer.
    pub actual_cash: Decimal,
    /// `actual_cash - (cash_amount - cash_expense)`.
    pub cash_variance: Decimal,
    /// Always the initial status of a shift close.
    pub status: DocumentStatus,
    /// Free-text note.
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Chờ xác nhận", OrderStatus::Pending)]
    #[case("Đã xác nhận", OrderStatus::Approved)]
    #[case("Đã duyệt", OrderStatus::Approved)]
    #[case("Đang giao", OrderStatus::Shipping)]
    #[case("Đang giao hàng", OrderStatus::Shipping)]
    #[case("Đã giao", OrderStatus::Delivered)]
    #[case("Giao thành công", OrderStatus::Delivered)]
    #[case("Hoàn thành", OrderStatus::Delivered)]
    #[case("Đã hủy", OrderStatus::Cancelled)]
    #[case("", OrderStatus::Unknown)]
    #[case("???", OrderStatus::Unknown)]
    fn test_order_status_parse(#[case] raw: &str, #[case] expected: OrderStatus) {
        assert_eq!(OrderStatus::parse(raw), expected);
    }

    #[rstest]
    #[case("Tiền mặt", PaymentMethod::Cash)]
    #[case("COD", PaymentMethod::Cash)]
    #[case("cash", PaymentMethod::Cash)]
    #[case("Chuyển khoản", PaymentMethod::BankTransfer)]
    #[case("Bank transfer", PaymentMethod::BankTransfer)]
    #[case("Ví MoMo", PaymentMethod::Other)]
    fn test_payment_method_parse(#[case] raw: &str, #[case] expected: PaymentMethod) {
        assert_eq!(PaymentMethod::parse(raw), expected);
    }

    #[test]
    fn test_revenue_bearing() {
        assert!(OrderStatus::Shipping.is_revenue_bearing());
        assert!(!OrderStatus::Pending.is_revenue_bearing());
        assert!(!OrderStatus::Cancelled.is_revenue_bearing());
    }
}
