//! Property-based tests for voucher status derivation.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use crate::voucher::status::{VoucherStatus, derive_status};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0i64..3_650).prop_map(|offset| {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Duration::days(offset)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// No remaining uses means OutOfStock whatever the dates.
    #[test]
    fn prop_out_of_stock_wins(
        today in arb_date(),
        start in arb_date(),
        end in arb_date(),
        remaining in -100i64..=0,
    ) {
        prop_assert_eq!(derive_status(today, start, end, remaining), VoucherStatus::OutOfStock);
    }

    /// With uses left, the status only moves forward as days pass.
    #[test]
    fn prop_status_progresses_forward(
        today in arb_date(),
        step in 0i64..90,
        start in arb_date(),
        length in 0i64..60,
        remaining in 1i64..1_000,
    ) {
        let rank = |status: VoucherStatus| match status {
            VoucherStatus::Upcoming => 0,
            VoucherStatus::Ongoing => 1,
            VoucherStatus::Ended => 2,
            VoucherStatus::OutOfStock => 3,
        };
        let end = start + Duration::days(length);
        let earlier = derive_status(today, start, end, remaining);
        let later = derive_status(today + Duration::days(step), start, end, remaining);
        prop_assert!(rank(earlier) <= rank(later));
        prop_assert_ne!(later, VoucherStatus::OutOfStock);
    }

    /// The start and end days themselves are inside the range.
    #[test]
    fn prop_range_is_inclusive(start in arb_date(), length in 0i64..60, remaining in 1i64..10) {
        let end = start + Duration::days(length);
        prop_assert_eq!(derive_status(start, start, end, remaining), VoucherStatus::Ongoing);
        prop_assert_eq!(derive_status(end, start, end, remaining), VoucherStatus::Ongoing);
    }
}
