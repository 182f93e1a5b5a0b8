//! Criteria-weighted score calculation for performance reviews.

use rust_decimal::Decimal;

/// Calculates a weighted average: `sum(value * weight_percent) / 100`.
///
/// Weights are percentages and are expected to sum to 100 across the active
/// criteria; that total is enforced when criteria are configured, not here.
/// The formula is computed literally with no normalization, so a caller that
/// passes weights totalling something other than 100 gets exactly the
/// literal result. The result is rounded to 2 decimal places; an empty
/// score list yields zero.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::weighted_score;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
/// let scores = [
///     (dec("4"), dec("60")),
///     (dec("3"), dec("40")),
/// ];
/// assert_eq!(weighted_score(&scores), dec("3.6"));
/// ```
pub fn weighted_score(scores: &[(Decimal, Decimal)]) -> Decimal {
    let total: Decimal = scores
        .iter()
        .map(|(value, weight)| *value * *weight)
        .sum();
    (total / Decimal::from(100)).round_dp(2)
}
