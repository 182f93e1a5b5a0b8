//! Leave duration calculation over a calendar date range.

use chrono::{Datelike, NaiveDate, Weekday};

/// Counts the leave days in `[start, end]` inclusive.
///
/// With `exclude_weekends` set, Saturdays and Sundays in the range are not
/// counted. Returns 0 when `start` is after `end`; range validation is the
/// caller's concern and happens before any state is touched.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::leave_duration;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
///
/// // Jan 1 2024 is a Monday; the range holds one Saturday and one Sunday.
/// assert_eq!(leave_duration(start, end, false), 7);
/// assert_eq!(leave_duration(start, end, true), 5);
///
/// // A single day counts as one.
/// assert_eq!(leave_duration(start, start, true), 1);
/// ```
pub fn leave_duration(start: NaiveDate, end: NaiveDate, exclude_weekends: bool) -> u32 {
    if start > end {
        return 0;
    }

    if !exclude_weekends {
        return ((end - start).num_days() + 1) as u32;
    }

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| !matches!(day.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_including_weekend() {
        assert_eq!(leave_duration(date(2024, 1, 1), date(2024, 1, 7), false), 7);
    }

    #[test]
    fn test_week_excluding_weekend() {
        // 2024-01-06 is a Saturday, 2024-01-07 a Sunday.
        assert_eq!(leave_duration(date(2024, 1, 1), date(2024, 1, 7), true), 5);
    }

    #[test]
    fn test_single_day() {
        assert_eq!(leave_duration(date(2024, 1, 1), date(2024, 1, 1), true), 1);
        assert_eq!(leave_duration(date(2024, 1, 1), date(2024, 1, 1), false), 1);
    }

    #[test]
    fn test_single_weekend_day_excluded() {
        // 2024-01-06 is a Saturday.
        assert_eq!(leave_duration(date(2024, 1, 6), date(2024, 1, 6), true), 0);
        assert_eq!(leave_duration(date(2024, 1, 6), date(2024, 1, 6), false), 1);
    }

    #[test]
    fn test_inverted_range_is_zero() {
        assert_eq!(leave_duration(date(2024, 1, 7), date(2024, 1, 1), false), 0);
        assert_eq!(leave_duration(date(2024, 1, 7), date(2024, 1, 1), true), 0);
    }

    #[test]
    fn test_two_full_weeks_excluding_weekends() {
        assert_eq!(
            leave_duration(date(2024, 1, 1), date(2024, 1, 14), true),
            10
        );
    }

    #[test]
    fn test_range_spanning_month_boundary() {
        assert_eq!(
            leave_duration(date(2024, 1, 29), date(2024, 2, 2), false),
            5
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Excluding weekends never counts more days than including them,
            /// and both stay within the raw calendar span.
            #[test]
            fn excluded_count_is_bounded(offset in 0i64..3650, span in 0i64..120) {
                let start = date(2020, 1, 1) + chrono::Duration::days(offset);
                let end = start + chrono::Duration::days(span);
                let all = leave_duration(start, end, false);
                let weekdays = leave_duration(start, end, true);
                prop_assert_eq!(all as i64, span + 1);
                prop_assert!(weekdays <= all);
                // At most 2 weekend days per started week.
                prop_assert!((all - weekdays) as i64 <= 2 * (span / 7 + 1));
            }
        }
    }
}
