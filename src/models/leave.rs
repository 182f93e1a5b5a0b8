//! Leave models: types, per-year balances and requests.
//!
//! A [`LeaveBalance`] is the per-employee, per-leave-type, per-year ledger;
//! its `remaining_days` field is derived and recomputed on every mutation.
//! A [`LeaveRequest`] is the lifecycle entity that moves through
//! pending/approved/rejected/cancelled and, on approval, consumes balance.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A category of leave (annual, sick, unpaid, ...) with its yearly allowance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveType {
    /// Unique identifier.
    pub id: Uuid,
    /// Leave type name (e.g. "annual").
    pub name: String,
    /// Days allowed per year for this type.
    pub days_allowed: u32,
    /// Whether leave of this type is paid.
    pub is_paid: bool,
    /// Whether requests of this type need an approval step.
    pub requires_approval: bool,
    /// Whether Saturdays and Sundays are excluded when counting duration.
    pub exclude_weekends: bool,
}

/// Per-employee, per-leave-type, per-year allowance and consumption ledger.
///
/// The (employee, leave_type, year) triple is unique in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee this balance belongs to.
    pub employee: Uuid,
    /// The leave type this balance covers.
    pub leave_type: Uuid,
    /// The calendar year this balance covers.
    pub year: i32,
    /// Total days allowed for the year.
    pub total_days: u32,
    /// Days consumed so far.
    pub used_days: u32,
    /// Derived: `total_days - used_days`. Recomputed on every mutation.
    pub remaining_days: u32,
    /// Last mutation timestamp.
    pub updated_at: NaiveDateTime,
}

impl LeaveBalance {
    /// Recomputes `remaining_days` from the stored totals.
    ///
    /// Saturating so that a balance read mid-validation can never show a
    /// negative remainder; the workflow rejects any transition that would
    /// push `used_days` past `total_days` before this is reached.
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::models::LeaveBalance;
    /// use chrono::NaiveDate;
    /// use uuid::Uuid;
    ///
    /// let mut balance = LeaveBalance {
    ///     id: Uuid::new_v4(),
    ///     employee: Uuid::new_v4(),
    ///     leave_type: Uuid::new_v4(),
    ///     year: 2024,
    ///     total_days: 20,
    ///     used_days: 6,
    ///     remaining_days: 0,
    ///     updated_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap(),
    /// };
    /// balance.recompute();
    /// assert_eq!(balance.remaining_days, 14);
    /// ```
    pub fn recompute(&mut self) {
        self.remaining_days = self.total_days.saturating_sub(self.used_days);
    }
}

/// Lifecycle states of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveStatus {
    /// Awaiting a decision.
    Pending,
    /// Approved; the balance has been decremented. Terminal.
    Approved,
    /// Rejected with a reason. Terminal.
    Rejected,
    /// Withdrawn by the requester. Terminal.
    Cancelled,
}

impl LeaveStatus {
    /// Returns the canonical lowercase name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "pending",
            LeaveStatus::Approved => "approved",
            LeaveStatus::Rejected => "rejected",
            LeaveStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for LeaveStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request for a span of leave, created in `Pending`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRequest {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee requesting leave.
    pub employee: Uuid,
    /// The leave type requested.
    pub leave_type: Uuid,
    /// First day of leave (inclusive).
    pub start_date: NaiveDate,
    /// Last day of leave (inclusive). Never precedes `start_date`.
    pub end_date: NaiveDate,
    /// Derived: countable days in the range, per the leave type's
    /// weekend policy.
    pub duration: u32,
    /// Free-text reason supplied by the requester.
    pub reason: String,
    /// Current lifecycle status.
    pub status: LeaveStatus,
    /// The identity that approved or rejected the request.
    #[serde(default)]
    pub decided_by: Option<Uuid>,
    /// When the decision was made.
    #[serde(default)]
    pub decided_at: Option<NaiveDateTime>,
    /// Required when the request is rejected.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}
