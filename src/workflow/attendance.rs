//! Daily attendance capture.
//!
//! One record per employee per day. Check-in creates the record, check-out
//! closes it, and the derived hour fields are recomputed whenever both
//! endpoints are present.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::config::HrConfig;
use crate::error::{HrError, HrResult};
use crate::models::AttendanceRecord;
use crate::policy::Actor;
use crate::store::MemoryStore;

/// Records the actor's check-in for the day of `now`.
///
/// A second check-in on the same day is rejected without touching the
/// existing record.
pub fn check_in(
    store: &MemoryStore,
    config: &HrConfig,
    actor: &Actor,
    now: NaiveDateTime,
    notes: String,
) -> HrResult<AttendanceRecord> {
    let date = now.date();
    store.transaction(|tables| {
        tables.identity(actor.id)?;
        if tables.attendance_for(actor.id, date).is_some() {
            return Err(HrError::AlreadyRecorded {
                event: "check_in",
                employee: actor.id,
                date,
            });
        }

        let mut record = AttendanceRecord {
            id: Uuid::new_v4(),
            employee: actor.id,
            date,
            check_in: Some(now),
            check_out: None,
            work_hours: rust_decimal::Decimal::ZERO,
            overtime_hours: rust_decimal::Decimal::ZERO,
            notes,
        };
        record.recompute_hours(config.standard_daily_hours());
        tables.insert_attendance(record.clone())?;
        Ok(record)
    })
}

/// Records the actor's check-out for the day of `now`.
///
/// Requires an open record for that day; a second check-out is rejected
/// and the recorded endpoints are never overwritten.
pub fn check_out(
    store: &MemoryStore,
    config: &HrConfig,
    actor: &Actor,
    now: NaiveDateTime,
) -> HrResult<AttendanceRecord> {
    let date = now.date();
    store.transaction(|tables| {
        let record = tables
            .attendance_for_mut(actor.id, date)
            .ok_or(HrError::NotFound {
                entity: "attendance_record",
                id: format!("{}/{date}", actor.id),
            })?;

        if record.check_out.is_some() {
            return Err(HrError::AlreadyRecorded {
                event: "check_out",
                employee: actor.id,
                date,
            });
        }

        record.check_out = Some(now);
        record.recompute_hours(config.standard_daily_hours());
        Ok(record.clone())
    })
}
