//! The access policy decision function.

use uuid::Uuid;

use crate::error::{HrError, HrResult};
use crate::models::Role;

/// The action an actor wants to perform on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// View the resource.
    Read,
    /// Create or mutate the resource.
    Write,
    /// Decide a lifecycle transition on the resource.
    Approve,
}

/// The requesting actor, as supplied by the identity/session context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The actor's identity id.
    pub id: Uuid,
    /// The actor's role.
    pub role: Role,
    /// The actor's department, if any.
    pub department: Option<Uuid>,
}

/// The kinds of resource the policy knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    /// An employee account.
    Identity,
    /// The leave-type catalog.
    LeaveTypeCatalog,
    /// A per-employee leave balance.
    LeaveBalance,
    /// A leave request.
    LeaveRequest,
    /// A daily attendance record.
    AttendanceRecord,
    /// A payroll period.
    PayrollPeriod,
    /// A per-employee payroll record.
    PayrollRecord,
    /// A performance review.
    PerformanceReview,
    /// Engine-level configuration, reserved for admin.
    EngineConfiguration,
}

/// Resources readable without authentication.
const PUBLIC_READ: &[ResourceKind] = &[ResourceKind::LeaveTypeCatalog];

/// A policy-relevant description of a target resource.
///
/// The shape is fully typed, so the "malformed resource" failure mode of a
/// dynamic attribute lookup cannot occur here; a resource without an owner
/// or department simply carries `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceRef {
    /// What kind of resource this is.
    pub kind: ResourceKind,
    /// The identity that owns the resource, if it is employee-scoped.
    pub owner: Option<Uuid>,
    /// The department the resource belongs to, if any.
    pub department: Option<Uuid>,
    /// Reserved for admin: system configuration outside HR's remit.
    pub admin_only: bool,
}

impl ResourceRef {
    /// Creates a resource reference with no owner or department.
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            owner: None,
            department: None,
            admin_only: matches!(kind, ResourceKind::EngineConfiguration),
        }
    }

    /// Sets the owning identity.
    pub fn owned_by(mut self, owner: Uuid) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the department scope.
    pub fn in_department(mut self, department: Option<Uuid>) -> Self {
        self.department = department;
        self
    }
}

/// Machine-readable reasons for a deny decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// No authenticated actor and the resource is not public.
    Unauthenticated,
    /// The resource is reserved for admin.
    AdminOnly,
    /// The resource belongs to a different department than the manager's.
    DepartmentMismatch,
    /// The resource is not owned by the requesting employee.
    NotOwner,
    /// The actor's role never permits this action.
    RoleForbidden,
}

/// The outcome of a policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The action is permitted.
    Allow,
    /// The action is denied for the given reason.
    Deny(DenyReason),
}

impl Decision {
    /// Returns true for [`Decision::Allow`].
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    /// Converts a deny into [`HrError::PermissionDenied`], discarding the
    /// reason so that nothing about the resource leaks to the caller.
    pub fn require(self) -> HrResult<()> {
        match self {
            Decision::Allow => Ok(()),
            Decision::Deny(_) => Err(HrError::PermissionDenied),
        }
    }
}

/// Decides whether `actor` may perform `action` on `resource`.
///
/// Rules are evaluated in order, first match wins:
///
/// 1. No actor: deny, unless the resource is on the public read allowlist.
/// 2. Admin: allow everything.
/// 3. HR: allow everything except admin-reserved resources.
/// 4. Manager: allow only when the resource's department matches the
///    manager's own; a resource without a department is denied.
/// 5. Employee: read own resources only; write and approve are always
///    denied (an employee can never approve their own request). Self-service
///    mutations such as check-in are owner-scoped operations and do not
///    route through `Write`.
///
/// Pure and total: every well-formed input maps to a decision.
///
/// # Examples
///
/// ```
/// use hr_engine::models::Role;
/// use hr_engine::policy::{evaluate, Action, Actor, Decision, ResourceKind, ResourceRef};
/// use uuid::Uuid;
///
/// let me = Uuid::new_v4();
/// let actor = Actor { id: me, role: Role::Employee, department: None };
/// let own_request = ResourceRef::new(ResourceKind::LeaveRequest).owned_by(me);
///
/// assert_eq!(evaluate(Some(&actor), Action::Read, &own_request), Decision::Allow);
/// assert!(!evaluate(Some(&actor), Action::Approve, &own_request).is_allow());
/// ```
pub fn evaluate(actor: Option<&Actor>, action: Action, resource: &ResourceRef) -> Decision {
    let Some(actor) = actor else {
        if action == Action::Read && PUBLIC_READ.contains(&resource.kind) {
            return Decision::Allow;
        }
        return Decision::Deny(DenyReason::Unauthenticated);
    };

    match actor.role {
        Role::Admin => Decision::Allow,
        Role::Hr => {
            if resource.admin_only {
                Decision::Deny(DenyReason::AdminOnly)
            } else {
                Decision::Allow
            }
        }
        Role::Manager => {
            if resource.admin_only {
                return Decision::Deny(DenyReason::AdminOnly);
            }
            match (resource.department, actor.department) {
                (Some(res), Some(own)) if res == own => Decision::Allow,
                _ => Decision::Deny(DenyReason::DepartmentMismatch),
            }
        }
        Role::Employee => {
            if resource.admin_only {
                return Decision::Deny(DenyReason::AdminOnly);
            }
            match action {
                Action::Read => {
                    if resource.owner == Some(actor.id) {
                        Decision::Allow
                    } else {
                        Decision::Deny(DenyReason::NotOwner)
                    }
                }
                Action::Write | Action::Approve => Decision::Deny(DenyReason::RoleForbidden),
            }
        }
    }
}
