//! Property-based tests for the status normalizer.

use proptest::prelude::*;

use crate::workflow::status::normalize_status;
use crate::workflow::types::{DocumentKind, DocumentStatus};

/// Known backend vocabulary.
const VOCABULARY: &[&str] = &[
    "Tạo mới",
    "Chờ xác nhận",
    "Chờ duyệt",
    "Đã duyệt",
    "Từ chối",
    "Đã hủy",
    "Hoàn thành",
];

fn arb_kind() -> impl Strategy<Value = DocumentKind> {
    prop_oneof![
        Just(DocumentKind::PurchaseOrder),
        Just(DocumentKind::WarehouseReceipt),
        Just(DocumentKind::ShiftClose),
    ]
}

/// Randomly upper-cases characters of a vocabulary word.
fn arb_cased_word() -> impl Strategy<Value = String> {
    (
        proptest::sample::select(VOCABULARY.to_vec()),
        proptest::collection::vec(any::<bool>(), 32),
    )
        .prop_map(|(word, flips)| {
            word.chars()
                .zip(flips.into_iter().cycle())
                .map(|(c, up)| {
                    if up {
                        c.to_uppercase().collect::<String>()
                    } else {
                        c.to_string()
                    }
                })
                .collect()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Case does not change the result.
    #[test]
    fn prop_case_insensitive(kind in arb_kind(), word in arb_cased_word()) {
        prop_assert_eq!(
            normalize_status(kind, &word),
            normalize_status(kind, &word.to_lowercase())
        );
    }

    /// Diacritics do not change the result.
    #[test]
    fn prop_diacritics_insensitive(kind in arb_kind(), word in arb_cased_word()) {
        let stripped = atelier_shared::text::fold(&word);
        prop_assert_eq!(normalize_status(kind, &word), normalize_status(kind, &stripped));
    }

    /// Normalizing the label of a normalized status gives the same status.
    #[test]
    fn prop_idempotent(kind in arb_kind(), raw in ".{0,24}") {
        let once = normalize_status(kind, &raw);
        prop_assert_eq!(normalize_status(kind, once.label()), once);
        prop_assert_eq!(normalize_status(kind, once.as_str()), once);
    }

    /// Arbitrary text never silently becomes New unless it says so.
    #[test]
    fn prop_new_requires_keyword(kind in arb_kind(), raw in "[0-9 .,!?-]{0,16}") {
        prop_assert_eq!(normalize_status(kind, &raw), DocumentStatus::Unknown);
    }
}

#[test]
fn test_known_pair_from_contract() {
    assert_eq!(
        normalize_status(DocumentKind::PurchaseOrder, "Đã Duyệt"),
        normalize_status(DocumentKind::PurchaseOrder, "da duyet")
    );
    assert_eq!(
        normalize_status(DocumentKind::PurchaseOrder, "da duyet"),
        DocumentStatus::Approved
    );
}
