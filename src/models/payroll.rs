//! Payroll models: periods and per-employee records.
//!
//! A [`PayrollPeriod`] is the lifecycle entity (draft → processing →
//! completed, cancellable while not completed). Each period owns a set of
//! [`PayrollRecord`]s, one per employee; a record's `overtime_amount` and
//! `net_salary` are derived and recomputed whenever any input changes.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::net_salary;

/// The cadence a payroll period covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// Calendar month.
    Monthly,
    /// Two-week period.
    BiWeekly,
    /// One-week period.
    Weekly,
}

/// Lifecycle states of a payroll period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodStatus {
    /// Being assembled; records may still be added or edited.
    Draft,
    /// Net salaries recomputed; awaiting completion.
    Processing,
    /// Finalized. Terminal.
    Completed,
    /// Abandoned. Terminal.
    Cancelled,
}

impl PeriodStatus {
    /// Returns the canonical lowercase name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodStatus::Draft => "draft",
            PeriodStatus::Processing => "processing",
            PeriodStatus::Completed => "completed",
            PeriodStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PeriodStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payroll run covering a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Unique identifier.
    pub id: Uuid,
    /// The cadence this period covers.
    pub period_type: PeriodType,
    /// First day of the period (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the period (inclusive).
    pub end_date: NaiveDate,
    /// Current lifecycle status.
    pub status: PeriodStatus,
    /// The identity that moved the period into processing.
    #[serde(default)]
    pub processed_by: Option<Uuid>,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

/// Lifecycle states of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollRecordStatus {
    /// Awaiting approval.
    Pending,
    /// Approved for payment.
    Approved,
    /// Paid out. Terminal.
    Paid,
    /// Abandoned. Terminal.
    Cancelled,
}

impl PayrollRecordStatus {
    /// Returns the canonical lowercase name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayrollRecordStatus::Pending => "pending",
            PayrollRecordStatus::Approved => "approved",
            PayrollRecordStatus::Paid => "paid",
            PayrollRecordStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for PayrollRecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One employee's pay for one period. Unique per (payroll_period, employee).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// The period this record belongs to.
    pub payroll_period: Uuid,
    /// The employee being paid.
    pub employee: Uuid,
    /// Base salary for the period.
    pub basic_salary: Decimal,
    /// Overtime hours worked in the period.
    pub overtime_hours: Decimal,
    /// Hourly rate applied to overtime.
    pub overtime_rate: Decimal,
    /// Derived: `overtime_hours * overtime_rate`.
    pub overtime_amount: Decimal,
    /// Total allowances.
    pub allowances: Decimal,
    /// Total deductions.
    pub deductions: Decimal,
    /// Tax withheld.
    pub tax: Decimal,
    /// Derived: clamped net pay. See [`net_salary`].
    pub net_salary: Decimal,
    /// Set when the raw net-salary formula produced a negative value and the
    /// stored amount was clamped to zero; such records need manual review.
    pub flagged_for_review: bool,
    /// Current lifecycle status.
    pub status: PayrollRecordStatus,
    /// When the record was paid.
    #[serde(default)]
    pub payment_date: Option<NaiveDate>,
    /// Payment method description.
    #[serde(default)]
    pub payment_method: String,
    /// Payment reference number.
    #[serde(default)]
    pub payment_reference: String,
}

impl PayrollRecord {
    /// Recomputes `overtime_amount`, `net_salary` and the review flag from
    /// the record's inputs. Called on every save that touches an input.
    pub fn recompute(&mut self) {
        self.overtime_amount = (self.overtime_hours * self.overtime_rate).round_dp(2);
        let outcome = net_salary(
            self.basic_salary,
            self.overtime_amount,
            self.allowances,
            self.deductions,
            self.tax,
        );
        self.net_salary = outcome.amount;
        self.flagged_for_review = outcome.flagged_for_review;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn record() -> PayrollRecord {
        PayrollRecord {
            id: Uuid::new_v4(),
            payroll_period: Uuid::new_v4(),
            employee: Uuid::new_v4(),
            basic_salary: dec("5000"),
            overtime_hours: dec("10"),
            overtime_rate: dec("25"),
            overtime_amount: Decimal::ZERO,
            allowances: dec("300"),
            deductions: dec("150"),
            tax: dec("800"),
            net_salary: Decimal::ZERO,
            flagged_for_review: false,
            status: PayrollRecordStatus::Pending,
            payment_date: None,
            payment_method: String::new(),
            payment_reference: String::new(),
        }
    }

    #[test]
    fn test_recompute_derives_overtime_and_net() {
        let mut rec = record();
        rec.recompute();
        assert_eq!(rec.overtime_amount, dec("250"));
        // 5000 + 250 + 300 - 150 - 800
        assert_eq!(rec.net_salary, dec("4600"));
        assert!(!rec.flagged_for_review);
    }

    #[test]
    fn test_recompute_clamps_negative_net_and_flags() {
        let mut rec = record();
        rec.basic_salary = dec("100");
        rec.overtime_hours = Decimal::ZERO;
        rec.allowances = Decimal::ZERO;
        rec.deductions = dec("80");
        rec.tax = dec("90");
        rec.recompute();
        assert_eq!(rec.net_salary, Decimal::ZERO);
        assert!(rec.flagged_for_review);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PeriodStatus::Processing).unwrap(),
            "\"processing\""
        );
        assert_eq!(
            serde_json::to_string(&PayrollRecordStatus::Paid).unwrap(),
            "\"paid\""
        );
        assert_eq!(
            serde_json::to_string(&PeriodType::BiWeekly).unwrap(),
            "\"bi_weekly\""
        );
    }
}
