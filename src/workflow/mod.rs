//! Resource lifecycle workflows.
//!
//! Every managed resource moves through a fixed state machine. The generic
//! planner in [`engine`] decides whether a requested transition applies, is
//! an idempotent repeat, or is invalid; the domain modules wrap that
//! decision in a store transaction together with the side effects the
//! transition carries (balance decrements, derived-value recomputes).
//! Post-commit hooks run after the transaction and never roll it back.

mod attendance;
mod engine;
mod identity;
mod leave;
mod payroll;
mod performance;

pub use attendance::{check_in, check_out};
pub use engine::{Hooks, Lifecycle, Transition, WorkflowEvent, plan_transition};
pub use identity::{NewIdentity, change_role, create_identity, subordinates};
pub use leave::{LeaveDecision, NewLeaveRequest, cancel_request, create_request, decide_request};
pub use payroll::{
    NewPayrollPeriod, NewPayrollRecord, create_period, create_record, move_period, move_record,
};
pub use performance::{
    NewReview, NewScore, create_review, move_review, record_score,
};

use uuid::Uuid;

use crate::error::HrResult;
use crate::policy::{ResourceKind, ResourceRef};
use crate::store::Tables;

/// Builds the policy view of an employee-scoped resource: owned by the
/// employee, scoped to the employee's department.
pub(crate) fn employee_resource(
    tables: &Tables,
    kind: ResourceKind,
    employee: Uuid,
) -> HrResult<ResourceRef> {
    let identity = tables.identity(employee)?;
    Ok(ResourceRef::new(kind)
        .owned_by(employee)
        .in_department(identity.department))
}
