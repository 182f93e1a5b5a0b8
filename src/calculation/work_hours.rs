//! Work-hour and overtime calculation from attendance timestamps.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

/// Default length of a standard working day in hours.
///
/// Hours beyond this threshold count as overtime. Overridable per deployment
/// via `engine.yaml`.
pub const STANDARD_DAILY_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Calculates hours worked between a check-in and a check-out.
///
/// Returns zero when either endpoint is absent (an open attendance record
/// has no measurable span yet). The result is never negative and is rounded
/// to 2 decimal places.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::work_hours;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
/// let hours = work_hours(
///     Some(day.and_hms_opt(9, 0, 0).unwrap()),
///     Some(day.and_hms_opt(17, 30, 0).unwrap()),
/// );
/// assert_eq!(hours, Decimal::from_str("8.5").unwrap());
///
/// // Open record: no check-out yet.
/// assert_eq!(work_hours(Some(day.and_hms_opt(9, 0, 0).unwrap()), None), Decimal::ZERO);
/// ```
pub fn work_hours(check_in: Option<NaiveDateTime>, check_out: Option<NaiveDateTime>) -> Decimal {
    let (Some(check_in), Some(check_out)) = (check_in, check_out) else {
        return Decimal::ZERO;
    };

    let seconds = (check_out - check_in).num_seconds();
    if seconds <= 0 {
        return Decimal::ZERO;
    }

    (Decimal::from(seconds) / Decimal::from(3600)).round_dp(2)
}

/// Calculates overtime hours: the portion of `work_hours` beyond the
/// standard working day.
///
/// Returns zero when the worked hours are at or under the threshold. The
/// result is rounded to 2 decimal places.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::{overtime_hours, STANDARD_DAILY_HOURS};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let worked = Decimal::from_str("8.5").unwrap();
/// assert_eq!(
///     overtime_hours(worked, STANDARD_DAILY_HOURS),
///     Decimal::from_str("0.5").unwrap()
/// );
/// ```
pub fn overtime_hours(work_hours: Decimal, standard: Decimal) -> Decimal {
    if work_hours > standard {
        (work_hours - standard).round_dp(2)
    } else {
        Decimal::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(h: u32, m: u32) -> Option<NaiveDateTime> {
        Some(
            NaiveDate::from_ymd_opt(2024, 3, 4)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_standard_day_09_to_1730_is_8_5() {
        assert_eq!(work_hours(at(9, 0), at(17, 30)), dec("8.5"));
    }

    #[test]
    fn test_missing_check_out_is_zero() {
        assert_eq!(work_hours(at(9, 0), None), Decimal::ZERO);
    }

    #[test]
    fn test_missing_check_in_is_zero() {
        assert_eq!(work_hours(None, at(17, 0)), Decimal::ZERO);
    }

    #[test]
    fn test_both_missing_is_zero() {
        assert_eq!(work_hours(None, None), Decimal::ZERO);
    }

    #[test]
    fn test_checkout_before_checkin_clamps_to_zero() {
        assert_eq!(work_hours(at(17, 0), at(9, 0)), Decimal::ZERO);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        // 9:00:00 to 17:10:00 is 8h10m = 8.1666... hours
        let day = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let hours = work_hours(
            Some(day.and_hms_opt(9, 0, 0).unwrap()),
            Some(day.and_hms_opt(17, 10, 0).unwrap()),
        );
        assert_eq!(hours, dec("8.17"));
    }

    #[test]
    fn test_overnight_span() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 4)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        assert_eq!(work_hours(Some(start), Some(end)), dec("8"));
    }

    #[test]
    fn test_overtime_above_threshold() {
        assert_eq!(overtime_hours(dec("8.5"), dec("8")), dec("0.5"));
        assert_eq!(overtime_hours(dec("12"), dec("8")), dec("4"));
    }

    #[test]
    fn test_overtime_at_threshold_is_zero() {
        assert_eq!(overtime_hours(dec("8"), dec("8")), Decimal::ZERO);
    }

    #[test]
    fn test_overtime_under_threshold_is_zero() {
        assert_eq!(overtime_hours(dec("6"), dec("8")), Decimal::ZERO);
    }

    #[test]
    fn test_standard_daily_hours_constant() {
        assert_eq!(STANDARD_DAILY_HOURS, dec("8"));
    }
}
