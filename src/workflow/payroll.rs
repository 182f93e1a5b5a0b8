//! Payroll lifecycles: periods and the records inside them.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{HrError, HrResult};
use crate::models::{
    PayrollPeriod, PayrollRecord, PayrollRecordStatus, PeriodStatus, PeriodType,
};
use crate::policy::{Action, Actor, ResourceKind, ResourceRef, evaluate};
use crate::store::MemoryStore;
use crate::workflow::employee_resource;
use crate::workflow::engine::{Hooks, Lifecycle, Transition, WorkflowEvent, plan_transition};

impl Lifecycle for PayrollPeriod {
    type Status = PeriodStatus;
    const ENTITY: &'static str = "payroll_period";

    fn can_transition(from: PeriodStatus, to: PeriodStatus) -> bool {
        matches!(
            (from, to),
            (PeriodStatus::Draft, PeriodStatus::Processing)
                | (PeriodStatus::Draft, PeriodStatus::Cancelled)
                | (PeriodStatus::Processing, PeriodStatus::Completed)
                | (PeriodStatus::Processing, PeriodStatus::Cancelled)
        )
    }
}

impl Lifecycle for PayrollRecord {
    type Status = PayrollRecordStatus;
    const ENTITY: &'static str = "payroll_record";

    fn can_transition(from: PayrollRecordStatus, to: PayrollRecordStatus) -> bool {
        matches!(
            (from, to),
            (PayrollRecordStatus::Pending, PayrollRecordStatus::Approved)
                | (PayrollRecordStatus::Pending, PayrollRecordStatus::Cancelled)
                | (PayrollRecordStatus::Approved, PayrollRecordStatus::Paid)
                | (PayrollRecordStatus::Approved, PayrollRecordStatus::Cancelled)
        )
    }
}

/// Input for opening a payroll period.
#[derive(Debug, Clone)]
pub struct NewPayrollPeriod {
    /// The cadence the period covers.
    pub period_type: PeriodType,
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Free-text notes.
    pub notes: String,
}

/// Input for adding an employee's record to a period.
#[derive(Debug, Clone)]
pub struct NewPayrollRecord {
    /// The period the record belongs to.
    pub payroll_period: Uuid,
    /// The employee being paid.
    pub employee: Uuid,
    /// Base salary for the period.
    pub basic_salary: Decimal,
    /// Overtime hours worked.
    pub overtime_hours: Decimal,
    /// Hourly overtime rate.
    pub overtime_rate: Decimal,
    /// Total allowances.
    pub allowances: Decimal,
    /// Total deductions.
    pub deductions: Decimal,
    /// Tax withheld.
    pub tax: Decimal,
    /// Payment method description.
    pub payment_method: String,
}

/// Opens a payroll period in the draft state.
pub fn create_period(
    store: &MemoryStore,
    actor: &Actor,
    input: NewPayrollPeriod,
    now: NaiveDateTime,
) -> HrResult<PayrollPeriod> {
    let resource = ResourceRef::new(ResourceKind::PayrollPeriod);
    evaluate(Some(actor), Action::Write, &resource).require()?;

    if input.start_date > input.end_date {
        return Err(HrError::Validation {
            field: "end_date",
            message: "must not precede start_date".to_string(),
        });
    }

    let period = PayrollPeriod {
        id: Uuid::new_v4(),
        period_type: input.period_type,
        start_date: input.start_date,
        end_date: input.end_date,
        status: PeriodStatus::Draft,
        processed_by: None,
        notes: input.notes,
        created_at: now,
    };
    store.transaction(|tables| {
        tables.insert_payroll_period(period.clone());
        Ok(period.clone())
    })
}

/// Moves a payroll period through its lifecycle.
///
/// Entry into processing stamps `processed_by` and recomputes every record
/// in the period inside the same transaction, so a completed period never
/// carries stale derived amounts.
pub fn move_period(
    store: &MemoryStore,
    hooks: &Hooks,
    actor: &Actor,
    period_id: Uuid,
    requested: PeriodStatus,
) -> HrResult<PayrollPeriod> {
    let resource = ResourceRef::new(ResourceKind::PayrollPeriod);
    evaluate(Some(actor), Action::Approve, &resource).require()?;

    let mut applied = false;
    let moved = store.transaction(|tables| {
        let period = tables.payroll_period(period_id)?.clone();
        let to = match plan_transition::<PayrollPeriod>(period.status, requested)? {
            Transition::NoOp(_) => return Ok(period),
            Transition::Applied { to, .. } => to,
        };

        if to == PeriodStatus::Processing {
            for record_id in tables.record_ids_for_period(period_id) {
                tables.payroll_record_mut(record_id)?.recompute();
            }
        }

        let stored = tables.payroll_period_mut(period_id)?;
        stored.status = to;
        if to == PeriodStatus::Processing {
            stored.processed_by = Some(actor.id);
        }
        applied = true;
        Ok(stored.clone())
    })?;

    if applied {
        hooks.run(
            store,
            &WorkflowEvent::PeriodMoved {
                period: moved.id,
                status: moved.status,
            },
        );
    }
    Ok(moved)
}

/// Adds an employee's record to a period. One record per (period, employee);
/// the period must still be draft or processing.
pub fn create_record(
    store: &MemoryStore,
    actor: &Actor,
    input: NewPayrollRecord,
) -> HrResult<PayrollRecord> {
    store.transaction(|tables| {
        let resource = employee_resource(tables, ResourceKind::PayrollRecord, input.employee)?;
        evaluate(Some(actor), Action::Write, &resource).require()?;

        let period = tables.payroll_period(input.payroll_period)?;
        if !matches!(period.status, PeriodStatus::Draft | PeriodStatus::Processing) {
            return Err(HrError::Validation {
                field: "payroll_period",
                message: format!("period is {}, records may no longer be added", period.status),
            });
        }

        let mut record = PayrollRecord {
            id: Uuid::new_v4(),
            payroll_period: input.payroll_period,
            employee: input.employee,
            basic_salary: input.basic_salary,
            overtime_hours: input.overtime_hours,
            overtime_rate: input.overtime_rate,
            overtime_amount: Decimal::ZERO,
            allowances: input.allowances,
            deductions: input.deductions,
            tax: input.tax,
            net_salary: Decimal::ZERO,
            flagged_for_review: false,
            status: PayrollRecordStatus::Pending,
            payment_date: None,
            payment_method: input.payment_method.clone(),
            payment_reference: String::new(),
        };
        record.recompute();
        tables.insert_payroll_record(record.clone())?;
        Ok(record)
    })
}

/// Moves a payroll record through its lifecycle. Entry into paid stamps the
/// payment date.
pub fn move_record(
    store: &MemoryStore,
    hooks: &Hooks,
    actor: &Actor,
    record_id: Uuid,
    requested: PayrollRecordStatus,
    now: NaiveDateTime,
) -> HrResult<PayrollRecord> {
    let mut applied = false;
    let moved = store.transaction(|tables| {
        let record = tables.payroll_record(record_id)?.clone();
        let resource = employee_resource(tables, ResourceKind::PayrollRecord, record.employee)?;
        evaluate(Some(actor), Action::Approve, &resource).require()?;

        let to = match plan_transition::<PayrollRecord>(record.status, requested)? {
            Transition::NoOp(_) => return Ok(record),
            Transition::Applied { to, .. } => to,
        };

        let stored = tables.payroll_record_mut(record_id)?;
        stored.status = to;
        if to == PayrollRecordStatus::Paid {
            stored.payment_date = Some(now.date());
        }
        applied = true;
        Ok(stored.clone())
    })?;

    if applied {
        hooks.run(
            store,
            &WorkflowEvent::RecordMoved {
                record: moved.id,
                employee: moved.employee,
                status: moved.status,
            },
        );
    }
    Ok(moved)
}
