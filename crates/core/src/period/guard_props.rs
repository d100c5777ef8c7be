//! Property-based tests for the period guard.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use super::guard::{check, is_permitted};

/// Strategy to generate dates between 2000-01-01 and roughly 2054.
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (0i64..20_000i64).prop_map(|days| {
        NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() + Duration::days(days)
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* competence `c` and period `p`, `is_permitted(c, p) == (c >= p)`.
    #[test]
    fn prop_guard_matches_date_order(c in date_strategy(), p in date_strategy()) {
        prop_assert_eq!(is_permitted(c, Some(p)), c >= p);
    }

    /// The boundary date itself is always permitted.
    #[test]
    fn prop_boundary_inclusive(p in date_strategy()) {
        prop_assert!(is_permitted(p, Some(p)));
    }

    /// No configured period means no constraint.
    #[test]
    fn prop_unset_period_permits(c in date_strategy()) {
        prop_assert!(is_permitted(c, None));
    }

    /// `check` agrees with `is_permitted` and reports the exact dates.
    #[test]
    fn prop_check_agrees_with_predicate(c in date_strategy(), p in date_strategy()) {
        match check(c, Some(p)) {
            Ok(()) => prop_assert!(is_permitted(c, Some(p))),
            Err(violation) => {
                prop_assert!(!is_permitted(c, Some(p)));
                prop_assert_eq!(violation.competence_date, c);
                prop_assert_eq!(violation.accounting_period, p);
            }
        }
    }
}
