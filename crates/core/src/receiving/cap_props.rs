//! Property-based tests for the received-quantity cap.

use proptest::prelude::*;

use atelier_shared::types::{SupplierId, VariantId};

use crate::receiving::cap::fixtures::{po, po_line, receipt, receipt_line};
use crate::receiving::cap::{ReceivingBook, check_receipt_quantity};
use crate::workflow::DocumentStatus;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Accepted iff received + requested <= ordered.
    #[test]
    fn prop_cap_boundary(
        ordered in proptest::collection::vec(1u32..200, 1..5),
        received in proptest::collection::vec(1u32..100, 0..5),
        requested in 1u32..500,
    ) {
        let orders: Vec<_> = (1i64..)
            .take(ordered.len())
            .map(|id| po(id, 1, DocumentStatus::Approved))
            .collect();
        let order_lines: Vec<_> = ordered
            .iter()
            .zip(1i64..)
            .map(|(&q, id)| po_line(id, 7, q))
            .collect();
        let receipts = vec![receipt(50, Some(1), DocumentStatus::Approved)];
        let receipt_lines: Vec<_> = received
            .iter()
            .zip(500i64..)
            .map(|(&q, id)| receipt_line(id, 50, 7, q))
            .collect();

        let book = ReceivingBook {
            orders: &orders,
            order_lines: &order_lines,
            receipts: &receipts,
            receipt_lines: &receipt_lines,
        };
        let total_ordered: u64 = ordered.iter().map(|&q| u64::from(q)).sum();
        let total_received: u64 = received.iter().map(|&q| u64::from(q)).sum();

        let target = receipt(60, Some(1), DocumentStatus::New);
        let result = check_receipt_quantity(&book, &target, VariantId(7), requested, None);
        prop_assert_eq!(result.is_ok(), total_received + u64::from(requested) <= total_ordered);
    }

    /// Cancelled receipts never count toward the received total.
    #[test]
    fn prop_cancelled_receipts_ignored(quantity in 1u32..1_000) {
        let orders = vec![po(1, 3, DocumentStatus::Approved)];
        let receipts = vec![receipt(2, Some(1), DocumentStatus::Cancelled)];
        let receipt_lines = vec![receipt_line(1, 2, 5, quantity)];
        let book = ReceivingBook {
            orders: &orders,
            order_lines: &[],
            receipts: &receipts,
            receipt_lines: &receipt_lines,
        };
        prop_assert_eq!(book.received(SupplierId(3), VariantId(5), None), 0);
    }
}
