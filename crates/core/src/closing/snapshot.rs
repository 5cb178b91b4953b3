//! Shift-close derivation from the day's orders.

use atelier_shared::types::EmployeeId;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::workflow::DocumentKind;

use super::error::ClosingError;
use super::types::{CustomerOrder, PaymentMethod, ShiftCloseDraft, ShiftCloseReport};

/// Revenue figures for one employee and day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftCloseSnapshot {
    /// Employee closing the shift.
    pub employee_id: EmployeeId,
    /// Day closed.
    pub date: NaiveDate,
    /// Revenue from all counted orders.
    pub total_revenue: Decimal,
    /// Revenue paid in cash.
    pub cash_amount: Decimal,
    /// Revenue paid by bank transfer.
    pub bank_transfer_amount: Decimal,
    /// Revenue paid any other way.
    pub other_amount: Decimal,
    /// Number of counted orders.
    pub order_count: u32,
}

impl ShiftCloseSnapshot {
    /// Sums the orders `employee_id` handled on `date` whose status bears
    /// revenue (approved, shipping or delivered).
    #[must_use]
    pub fn from_orders(employee_id: EmployeeId, date: NaiveDate, orders: &[CustomerOrder]) -> Self {
        let mut snapshot = Self {
            employee_id,
            date,
            total_revenue: Decimal::ZERO,
            cash_amount: Decimal::ZERO,
            bank_transfer_amount: Decimal::ZERO,
            other_amount: Decimal::ZERO,
            order_count: 0,
        };

        for order in orders.iter().filter(|o| {
            o.employee_id == Some(employee_id)
                && o.ordered_on == Some(date)
                && o.status.is_revenue_bearing()
        }) {
            snapshot.total_revenue += order.total_amount;
            snapshot.order_count += 1;
            match order.payment_method {
                PaymentMethod::Cash => snapshot.cash_amount += order.total_amount,
                PaymentMethod::BankTransfer => snapshot.bank_transfer_amount += order.total_amount,
                PaymentMethod::Other => snapshot.other_amount += order.total_amount,
            }
        }

        snapshot
    }
}

/// Builds the report to create from a snapshot and the employee's
/// declared figures.
///
/// # Errors
/// * `NegativeExpense` / `NegativeActualCash` - declared figures below zero
pub fn draft_report(
    snapshot: &ShiftCloseSnapshot,
    cash_expense: Decimal,
    actual_cash: Decimal,
    note: Option<String>,
) -> Result<ShiftCloseDraft, ClosingError> {
    if cash_expense < Decimal::ZERO {
        return Err(ClosingError::NegativeExpense);
    }
    if actual_cash < Decimal::ZERO {
        return Err(ClosingError::NegativeActualCash);
    }

    let system_cash = snapshot.cash_amount - cash_expense;
    Ok(ShiftCloseDraft {
        employee_id: snapshot.employee_id,
        closed_date: snapshot.date,
        total_revenue: snapshot.total_revenue,
        cash_amount: snapshot.cash_amount,
        cash_expense,
        bank_transfer_amount: snapshot.bank_transfer_amount,
        order_count: snapshot.order_count,
        actual_cash,
        cash_variance: actual_cash - system_cash,
        status: DocumentKind::ShiftClose.initial_status(),
        note: note.filter(|n| !n.trim().is_empty()),
    })
}

/// Blocks a second live report for the same employee and day.
///
/// Rejected and cancelled reports do not count, so a rejected day can be
/// closed again.
///
/// # Errors
/// * `AlreadyClosed` - names the existing report
pub fn ensure_no_duplicate(
    existing: &[ShiftCloseReport],
    employee_id: EmployeeId,
    date: NaiveDate,
) -> Result<(), ClosingError> {
    match existing.iter().find(|r| {
        r.employee_id == employee_id && r.closed_date == date && r.status.is_live()
    }) {
        Some(report) => Err(ClosingError::AlreadyClosed {
            employee_id,
            date,
            existing: report.id,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use crate::closing::types::OrderStatus;
    use atelier_shared::types::OrderId;

    pub fn order(
        id: i64,
        employee: i64,
        on: NaiveDate,
        amount: Decimal,
        method: PaymentMethod,
        status: OrderStatus,
    ) -> CustomerOrder {
        CustomerOrder {
            id: OrderId(id),
            employee_id: Some(EmployeeId(employee)),
            ordered_on: Some(on),
            total_amount: amount,
            payment_method: method,
            status,
        }
    }
}
