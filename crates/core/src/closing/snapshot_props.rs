//! Property-based tests for shift-close derivation.

use atelier_shared::types::EmployeeId;
use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::closing::snapshot::fixtures::order;
use crate::closing::snapshot::{ShiftCloseSnapshot, draft_report};
use crate::closing::types::{OrderStatus, PaymentMethod};

fn arb_method() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::Cash),
        Just(PaymentMethod::BankTransfer),
        Just(PaymentMethod::Other),
    ]
}

fn arb_status() -> impl Strategy<Value = OrderStatus> {
    prop_oneof![
        Just(OrderStatus::Pending),
        Just(OrderStatus::Approved),
        Just(OrderStatus::Shipping),
        Just(OrderStatus::Delivered),
        Just(OrderStatus::Cancelled),
        Just(OrderStatus::Unknown),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// The payment-method split always adds up to the total.
    #[test]
    fn prop_split_sums_to_total(
        rows in proptest::collection::vec(
            (1i64..4, 1u32..4, 0i64..10_000_000, arb_method(), arb_status()),
            0..30,
        ),
    ) {
        let orders: Vec<_> = rows
            .iter()
            .zip(1i64..)
            .map(|(&(employee, d, amount, method, status), id)| {
                order(
                    id,
                    employee,
                    NaiveDate::from_ymd_opt(2026, 10, d).unwrap(),
                    Decimal::from(amount),
                    method,
                    status,
                )
            })
            .collect();

        let date = NaiveDate::from_ymd_opt(2026, 10, 1).unwrap();
        let snapshot = ShiftCloseSnapshot::from_orders(EmployeeId(1), date, &orders);
        prop_assert_eq!(
            snapshot.cash_amount + snapshot.bank_transfer_amount + snapshot.other_amount,
            snapshot.total_revenue
        );

        let counted = rows
            .iter()
            .filter(|(e, d, _, _, s)| *e == 1 && *d == 1 && s.is_revenue_bearing())
            .count();
        prop_assert_eq!(snapshot.order_count as usize, counted);
    }

    /// Variance is zero exactly when counted cash equals system cash.
    #[test]
    fn prop_variance(cash in 0i64..10_000_000, expense in 0i64..1_000_000, counted in 0i64..10_000_000) {
        let snapshot = ShiftCloseSnapshot {
            employee_id: EmployeeId(1),
            date: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            total_revenue: Decimal::from(cash),
            cash_amount: Decimal::from(cash),
            bank_transfer_amount: Decimal::ZERO,
            other_amount: Decimal::ZERO,
            order_count: 1,
        };
        let draft = draft_report(&snapshot, Decimal::from(expense), Decimal::from(counted), None).unwrap();
        prop_assert_eq!(draft.cash_variance, Decimal::from(counted - (cash - expense)));
    }
}
