//! Leave request lifecycle.
//!
//! pending → approved | rejected | cancelled; the three decided states are
//! terminal. Approval debits the employee's balance for the request's
//! start year in the same transaction that flips the status, so the
//! decrement happens exactly once even under retries.

use chrono::{Datelike, NaiveDateTime};
use uuid::Uuid;

use crate::calculation::leave_duration;
use crate::error::{HrError, HrResult};
use crate::models::{LeaveRequest, LeaveStatus};
use crate::policy::{Action, Actor, ResourceKind, evaluate};
use crate::store::MemoryStore;
use crate::workflow::employee_resource;
use crate::workflow::engine::{Hooks, Lifecycle, Transition, WorkflowEvent, plan_transition};

impl Lifecycle for LeaveRequest {
    type Status = LeaveStatus;
    const ENTITY: &'static str = "leave_request";

    fn can_transition(from: LeaveStatus, to: LeaveStatus) -> bool {
        matches!(
            (from, to),
            (
                LeaveStatus::Pending,
                LeaveStatus::Approved | LeaveStatus::Rejected | LeaveStatus::Cancelled
            )
        )
    }
}

/// Input for submitting a leave request.
#[derive(Debug, Clone)]
pub struct NewLeaveRequest {
    /// The employee the request is for; defaults to the actor.
    pub employee: Option<Uuid>,
    /// The requested leave type.
    pub leave_type: Uuid,
    /// First day of leave, inclusive.
    pub start_date: chrono::NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: chrono::NaiveDate,
    /// Free-form reason.
    pub reason: String,
}

/// The requested decision on a pending leave request.
#[derive(Debug, Clone)]
pub struct LeaveDecision {
    /// `Approved` or `Rejected`.
    pub status: LeaveStatus,
    /// Required when rejecting.
    pub rejection_reason: Option<String>,
}

/// Submits a leave request in the pending state.
///
/// An actor submits for themself; submitting on another employee's behalf
/// requires write access to that employee's leave requests. The duration is
/// derived from the leave type's weekend policy at submission time.
pub fn create_request(
    store: &MemoryStore,
    hooks: &Hooks,
    actor: &Actor,
    input: NewLeaveRequest,
    now: NaiveDateTime,
) -> HrResult<LeaveRequest> {
    if input.start_date > input.end_date {
        return Err(HrError::Validation {
            field: "end_date",
            message: "must not precede start_date".to_string(),
        });
    }

    let employee = input.employee.unwrap_or(actor.id);
    let created = store.transaction(|tables| {
        if employee != actor.id {
            let resource = employee_resource(tables, ResourceKind::LeaveRequest, employee)?;
            evaluate(Some(actor), Action::Write, &resource).require()?;
        } else {
            tables.identity(employee)?;
        }

        let leave_type = tables.leave_type(input.leave_type)?;
        let duration = leave_duration(input.start_date, input.end_date, leave_type.exclude_weekends);

        let request = LeaveRequest {
            id: Uuid::new_v4(),
            employee,
            leave_type: leave_type.id,
            start_date: input.start_date,
            end_date: input.end_date,
            duration,
            reason: input.reason.clone(),
            status: LeaveStatus::Pending,
            decided_by: None,
            decided_at: None,
            rejection_reason: None,
            created_at: now,
        };
        tables.insert_leave_request(request.clone());
        Ok(request)
    })?;

    hooks.run(
        store,
        &WorkflowEvent::LeaveRequested {
            request: created.id,
            employee: created.employee,
        },
    );
    Ok(created)
}

/// Approves or rejects a pending leave request.
///
/// Approval recomputes the duration, checks the balance for the request's
/// start year and debits `used_days`; when the balance is short, the
/// request and the balance are both left untouched. Rejection requires a
/// reason. Requesting the status the request already holds is an
/// idempotent no-op.
pub fn decide_request(
    store: &MemoryStore,
    hooks: &Hooks,
    actor: &Actor,
    request_id: Uuid,
    decision: LeaveDecision,
    now: NaiveDateTime,
) -> HrResult<LeaveRequest> {
    if !matches!(
        decision.status,
        LeaveStatus::Approved | LeaveStatus::Rejected
    ) {
        return Err(HrError::Validation {
            field: "status",
            message: "decision must be approved or rejected".to_string(),
        });
    }

    let mut applied = false;
    let decided = store.transaction(|tables| {
        let request = tables.leave_request(request_id)?.clone();
        let resource = employee_resource(tables, ResourceKind::LeaveRequest, request.employee)?;
        evaluate(Some(actor), Action::Approve, &resource).require()?;

        let to = match plan_transition::<LeaveRequest>(request.status, decision.status)? {
            Transition::NoOp(_) => return Ok(request),
            Transition::Applied { to, .. } => to,
        };

        if to == LeaveStatus::Approved {
            let leave_type = tables.leave_type(request.leave_type)?.clone();
            let duration =
                leave_duration(request.start_date, request.end_date, leave_type.exclude_weekends);
            let year = request.start_date.year();

            let balance = tables.leave_balance_mut(request.employee, leave_type.id, year)?;
            if balance.remaining_days < duration {
                return Err(HrError::InsufficientBalance {
                    requested: duration,
                    remaining: balance.remaining_days,
                });
            }
            balance.used_days += duration;
            balance.recompute();
            balance.updated_at = now;
        } else if decision
            .rejection_reason
            .as_deref()
            .is_none_or(|reason| reason.trim().is_empty())
        {
            return Err(HrError::Validation {
                field: "rejection_reason",
                message: "required when rejecting".to_string(),
            });
        }

        let stored = tables.leave_request_mut(request_id)?;
        stored.status = to;
        stored.decided_by = Some(actor.id);
        stored.decided_at = Some(now);
        if to == LeaveStatus::Rejected {
            stored.rejection_reason = decision.rejection_reason.clone();
        }
        applied = true;
        Ok(stored.clone())
    })?;

    if applied {
        hooks.run(
            store,
            &WorkflowEvent::LeaveResolved {
                request: decided.id,
                employee: decided.employee,
                status: decided.status,
            },
        );
    }
    Ok(decided)
}

/// Withdraws a pending leave request. Only the owner may cancel.
pub fn cancel_request(
    store: &MemoryStore,
    hooks: &Hooks,
    actor: &Actor,
    request_id: Uuid,
    now: NaiveDateTime,
) -> HrResult<LeaveRequest> {
    let mut applied = false;
    let cancelled = store.transaction(|tables| {
        let request = tables.leave_request(request_id)?.clone();
        if request.employee != actor.id {
            return Err(HrError::PermissionDenied);
        }

        match plan_transition::<LeaveRequest>(request.status, LeaveStatus::Cancelled)? {
            Transition::NoOp(_) => Ok(request),
            Transition::Applied { to, .. } => {
                let stored = tables.leave_request_mut(request_id)?;
                stored.status = to;
                stored.decided_by = Some(actor.id);
                stored.decided_at = Some(now);
                applied = true;
                Ok(stored.clone())
            }
        }
    })?;

    if applied {
        hooks.run(
            store,
            &WorkflowEvent::LeaveResolved {
                request: cancelled.id,
                employee: cancelled.employee,
                status: cancelled.status,
            },
        );
    }
    Ok(cancelled)
}
