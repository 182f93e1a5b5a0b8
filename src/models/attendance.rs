//! Attendance model.
//!
//! One [`AttendanceRecord`] exists per (employee, date) pair. It is created
//! by the first check-in of the day; check-out is a second, one-time
//! mutation. A record missing check-out is "open". Work hours and overtime
//! hours are derived from the check-in/check-out pair and recomputed on
//! every save where both endpoints are present.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::{overtime_hours, work_hours};

/// A single day's attendance for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee this record belongs to.
    pub employee: Uuid,
    /// The attendance date. Unique together with `employee`.
    pub date: NaiveDate,
    /// When the employee checked in.
    #[serde(default)]
    pub check_in: Option<NaiveDateTime>,
    /// When the employee checked out. Never precedes `check_in`.
    #[serde(default)]
    pub check_out: Option<NaiveDateTime>,
    /// Derived: hours between check-in and check-out, rounded to 2 decimals.
    pub work_hours: Decimal,
    /// Derived: hours worked beyond the standard day, rounded to 2 decimals.
    pub overtime_hours: Decimal,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

impl AttendanceRecord {
    /// Returns true if the record has a check-in but no check-out yet.
    pub fn is_open(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_none()
    }

    /// Recomputes the derived hour fields from the check-in/check-out pair.
    ///
    /// `standard_daily_hours` is the overtime threshold (typically 8). When
    /// either endpoint is absent both derived fields are zero.
    pub fn recompute_hours(&mut self, standard_daily_hours: Decimal) {
        self.work_hours = work_hours(self.check_in, self.check_out);
        self.overtime_hours = overtime_hours(self.work_hours, standard_daily_hours);
    }
}
