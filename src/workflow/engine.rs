//! Generic transition planning and post-commit hooks.

use std::fmt;
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{HrError, HrResult};
use crate::models::{LeaveBalance, LeaveStatus, PayrollRecordStatus, PeriodStatus, ReviewStatus};
use crate::notify::{Notifier, dispatch};
use crate::store::MemoryStore;

/// A resource whose status field follows a fixed state machine.
pub trait Lifecycle {
    /// The status enum of the resource.
    type Status: Copy + PartialEq + fmt::Display;

    /// Entity name used in transition errors.
    const ENTITY: &'static str;

    /// Whether the machine permits moving from `from` to `to`.
    fn can_transition(from: Self::Status, to: Self::Status) -> bool;
}

/// The planner's verdict on a requested transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<S> {
    /// The transition is legal and should be applied.
    Applied {
        /// The status being left.
        from: S,
        /// The status being entered.
        to: S,
    },
    /// The resource is already in the requested status; apply nothing.
    NoOp(S),
}

/// Plans a transition for a lifecycle resource.
///
/// Requesting the status the resource is already in is an idempotent no-op,
/// so a retried decision never fires its side effects twice. Any other
/// pairing outside the machine is rejected.
pub fn plan_transition<L: Lifecycle>(
    current: L::Status,
    requested: L::Status,
) -> HrResult<Transition<L::Status>> {
    if current == requested {
        return Ok(Transition::NoOp(current));
    }
    if L::can_transition(current, requested) {
        return Ok(Transition::Applied {
            from: current,
            to: requested,
        });
    }
    Err(HrError::InvalidTransition {
        entity: L::ENTITY,
        from: current.to_string(),
        to: requested.to_string(),
    })
}

/// A domain event raised by a committed workflow operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// A new identity was created.
    IdentityCreated {
        /// The new identity.
        identity: Uuid,
        /// The calendar year to provision balances for.
        year: i32,
    },
    /// A leave request was submitted.
    LeaveRequested {
        /// The request.
        request: Uuid,
        /// The requesting employee.
        employee: Uuid,
    },
    /// A leave request reached a decision or was cancelled.
    LeaveResolved {
        /// The request.
        request: Uuid,
        /// The owning employee.
        employee: Uuid,
        /// The status the request entered.
        status: LeaveStatus,
    },
    /// A payroll period changed status.
    PeriodMoved {
        /// The period.
        period: Uuid,
        /// The status the period entered.
        status: PeriodStatus,
    },
    /// A payroll record changed status.
    RecordMoved {
        /// The record.
        record: Uuid,
        /// The paid employee.
        employee: Uuid,
        /// The status the record entered.
        status: PayrollRecordStatus,
    },
    /// A performance review changed status.
    ReviewMoved {
        /// The review.
        review: Uuid,
        /// The reviewed employee.
        employee: Uuid,
        /// The status the review entered.
        status: ReviewStatus,
    },
}

/// The ordered post-commit hook list.
///
/// Hooks observe events raised by committed transactions. They run in
/// registration order, and a failing hook is logged and skipped; nothing a
/// hook does can unwind the transaction that raised the event.
pub struct Hooks {
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks").finish_non_exhaustive()
    }
}

impl Hooks {
    /// Creates the standard hook list: balance provisioning on identity
    /// creation, then notification dispatch.
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self { notifier }
    }

    /// Runs every hook for `event`. Failures are logged, never propagated.
    pub fn run(&self, store: &MemoryStore, event: &WorkflowEvent) {
        if let Err(error) = self.provision_balances(store, event) {
            tracing::warn!(%error, ?event, "balance provisioning hook failed");
        }
        self.notify(event);
    }

    /// Provisions one leave balance per catalog leave type for a freshly
    /// created identity.
    fn provision_balances(&self, store: &MemoryStore, event: &WorkflowEvent) -> HrResult<()> {
        let &WorkflowEvent::IdentityCreated { identity, year } = event else {
            return Ok(());
        };
        store.transaction(|tables| {
            let types: Vec<(Uuid, u32)> = tables
                .leave_types()
                .map(|leave_type| (leave_type.id, leave_type.days_allowed))
                .collect();
            for (leave_type, days_allowed) in types {
                let mut balance = LeaveBalance {
                    id: Uuid::new_v4(),
                    employee: identity,
                    leave_type,
                    year,
                    total_days: days_allowed,
                    used_days: 0,
                    remaining_days: 0,
                    updated_at: Utc::now().naive_utc(),
                };
                balance.recompute();
                tables.insert_leave_balance(balance)?;
            }
            Ok(())
        })
    }

    fn notify(&self, event: &WorkflowEvent) {
        match event {
            WorkflowEvent::IdentityCreated { identity, .. } => {
                dispatch(
                    self.notifier.as_ref(),
                    *identity,
                    "Welcome",
                    "Your employee account has been created.",
                );
            }
            WorkflowEvent::LeaveRequested { employee, request } => {
                dispatch(
                    self.notifier.as_ref(),
                    *employee,
                    "Leave request submitted",
                    &format!("Leave request {request} is awaiting a decision."),
                );
            }
            WorkflowEvent::LeaveResolved {
                employee,
                request,
                status,
            } => {
                dispatch(
                    self.notifier.as_ref(),
                    *employee,
                    &format!("Leave request {status}"),
                    &format!("Leave request {request} is now {status}."),
                );
            }
            WorkflowEvent::PeriodMoved { period, status } => {
                tracing::info!(%period, %status, "payroll period moved");
            }
            WorkflowEvent::RecordMoved {
                record,
                employee,
                status,
            } => {
                dispatch(
                    self.notifier.as_ref(),
                    *employee,
                    &format!("Payroll record {status}"),
                    &format!("Payroll record {record} is now {status}."),
                );
            }
            WorkflowEvent::ReviewMoved {
                review,
                employee,
                status,
            } => {
                dispatch(
                    self.notifier.as_ref(),
                    *employee,
                    &format!("Performance review {status}"),
                    &format!("Performance review {review} is now {status}."),
                );
            }
        }
    }
}
