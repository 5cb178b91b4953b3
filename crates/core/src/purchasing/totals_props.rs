//! Property-based tests for purchase order totals.

use proptest::prelude::*;
use rust_decimal::Decimal;

use atelier_shared::types::{PurchaseOrderId, VariantId};

use super::totals::compute_totals;
use super::types::PurchaseOrderLine;

fn arb_line() -> impl Strategy<Value = PurchaseOrderLine> {
    (1i64..500, 1u32..1_000, 0i64..10_000_000).prop_map(|(variant, quantity, price)| {
        PurchaseOrderLine::new(
            PurchaseOrderId(1),
            VariantId(variant),
            quantity,
            Decimal::from(price),
        )
    })
}

proptest! {
    /// totalAmount == sum(quantity * unitPrice)
    #[test]
    fn prop_total_is_sum_of_lines(
        lines in proptest::collection::vec(arb_line(), 0..20),
        deposit in 0i64..1_000_000_000,
    ) {
        let totals = compute_totals(&lines, Decimal::from(deposit));
        let expected: Decimal = lines
            .iter()
            .map(|l| Decimal::from(l.quantity) * l.unit_price)
            .sum();
        prop_assert_eq!(totals.total_amount, expected);
    }

    /// remaining == max(0, totalAmount - deposit)
    #[test]
    fn prop_remaining_is_clamped_difference(
        lines in proptest::collection::vec(arb_line(), 0..20),
        deposit in 0i64..1_000_000_000,
    ) {
        let deposit = Decimal::from(deposit);
        let totals = compute_totals(&lines, deposit);
        prop_assert!(totals.remaining >= Decimal::ZERO);
        prop_assert_eq!(totals.remaining, (totals.total_amount - deposit).max(Decimal::ZERO));
    }

    /// Line order does not matter.
    #[test]
    fn prop_total_is_order_independent(lines in proptest::collection::vec(arb_line(), 0..20)) {
        let mut reversed = lines.clone();
        reversed.reverse();
        prop_assert_eq!(
            compute_totals(&lines, Decimal::ZERO),
            compute_totals(&reversed, Decimal::ZERO)
        );
    }
}
