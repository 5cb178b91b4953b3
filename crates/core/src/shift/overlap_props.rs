//! Property-based tests for shift overlap detection.

use proptest::prelude::*;

use atelier_shared::types::WorkShiftId;

use crate::shift::overlap::has_conflict;
use crate::shift::types::{ShiftTime, ShiftWindow, WorkShift};

/// Strategy for a non-empty window within the day.
fn arb_window() -> impl Strategy<Value = ShiftWindow> {
    (0u16..1439)
        .prop_flat_map(|start| (Just(start), (start + 1)..=1440))
        .prop_map(|(start, end)| {
            ShiftWindow::new(
                ShiftTime::from_hm(start / 60, start % 60).unwrap(),
                ShiftTime::from_hm(end / 60, end % 60).unwrap(),
            )
        })
}

fn as_shift(id: i64, window: ShiftWindow) -> WorkShift {
    WorkShift {
        id: WorkShiftId(id),
        name: format!("Ca {id}"),
        start: window.start,
        end: window.end,
        description: None,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// A conflicts with B iff B conflicts with A.
    #[test]
    fn prop_overlap_symmetric(a in arb_window(), b in arb_window()) {
        prop_assert_eq!(
            has_conflict(&a, &[as_shift(1, b)], None),
            has_conflict(&b, &[as_shift(1, a)], None)
        );
    }

    /// Conflict matches a minute-by-minute intersection.
    #[test]
    fn prop_overlap_matches_brute_force(a in arb_window(), b in arb_window()) {
        let shared = (a.start.minutes()..a.end.minutes())
            .any(|m| m >= b.start.minutes() && m < b.end.minutes());
        prop_assert_eq!(has_conflict(&a, &[as_shift(1, b)], None), shared);
    }

    /// A shift never conflicts with itself when excluded.
    #[test]
    fn prop_excluded_never_conflicts(a in arb_window()) {
        prop_assert!(!has_conflict(&a, &[as_shift(9, a)], Some(WorkShiftId(9))));
        prop_assert!(has_conflict(&a, &[as_shift(9, a)], None));
    }
}
