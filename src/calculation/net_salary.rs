//! Net salary calculation with negative-result clamping.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The outcome of a net salary calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetSalaryOutcome {
    /// The net amount to pay. Never negative.
    pub amount: Decimal,
    /// True when the raw formula produced a negative value and the amount
    /// was clamped to zero. Such records need manual review.
    pub flagged_for_review: bool,
}

/// Calculates net salary:
/// `basic + overtime_amount + allowances - deductions - tax`.
///
/// When deductions and tax exceed earnings the raw result would be negative;
/// a pay run must never emit a negative amount, so the value is clamped to
/// zero and the outcome flagged for manual review.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::net_salary;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s: &str| Decimal::from_str(s).unwrap();
///
/// let outcome = net_salary(dec("5000"), dec("250"), dec("300"), dec("150"), dec("800"));
/// assert_eq!(outcome.amount, dec("4600"));
/// assert!(!outcome.flagged_for_review);
///
/// let clamped = net_salary(dec("100"), dec("0"), dec("0"), dec("80"), dec("90"));
/// assert_eq!(clamped.amount, Decimal::ZERO);
/// assert!(clamped.flagged_for_review);
/// ```
pub fn net_salary(
    basic: Decimal,
    overtime_amount: Decimal,
    allowances: Decimal,
    deductions: Decimal,
    tax: Decimal,
) -> NetSalaryOutcome {
    let raw = basic + overtime_amount + allowances - deductions - tax;
    if raw < Decimal::ZERO {
        NetSalaryOutcome {
            amount: Decimal::ZERO,
            flagged_for_review: true,
        }
    } else {
        NetSalaryOutcome {
            amount: raw.round_dp(2),
            flagged_for_review: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_positive_net() {
        let outcome = net_salary(dec("5000"), dec("250"), dec("300"), dec("150"), dec("800"));
        assert_eq!(outcome.amount, dec("4600"));
        assert!(!outcome.flagged_for_review);
    }

    #[test]
    fn test_zero_net_is_not_flagged() {
        let outcome = net_salary(dec("100"), dec("0"), dec("0"), dec("60"), dec("40"));
        assert_eq!(outcome.amount, Decimal::ZERO);
        assert!(!outcome.flagged_for_review);
    }

    #[test]
    fn test_negative_net_clamped_and_flagged() {
        let outcome = net_salary(dec("100"), dec("0"), dec("0"), dec("80"), dec("90"));
        assert_eq!(outcome.amount, Decimal::ZERO);
        assert!(outcome.flagged_for_review);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let outcome = net_salary(dec("1000.005"), dec("0"), dec("0"), dec("0"), dec("0"));
        assert_eq!(outcome.amount, dec("1000.00"));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn money() -> impl Strategy<Value = Decimal> {
            (0i64..10_000_000).prop_map(|cents| Decimal::new(cents, 2))
        }

        proptest! {
            /// The paid amount is never negative, whatever the inputs.
            #[test]
            fn amount_is_never_negative(
                basic in money(),
                overtime in money(),
                allowances in money(),
                deductions in money(),
                tax in money(),
            ) {
                let outcome = net_salary(basic, overtime, allowances, deductions, tax);
                prop_assert!(outcome.amount >= Decimal::ZERO);
                // Flag is set exactly when the raw formula went negative.
                let raw = basic + overtime + allowances - deductions - tax;
                prop_assert_eq!(outcome.flagged_for_review, raw < Decimal::ZERO);
            }
        }
    }
}
