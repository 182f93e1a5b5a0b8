//! Identity management: account creation, role changes, reporting lines.

use chrono::{Datelike, NaiveDate};
use uuid::Uuid;

use crate::error::{HrError, HrResult};
use crate::models::{Identity, Role};
use crate::policy::{Action, Actor, ResourceKind, ResourceRef, evaluate};
use crate::store::MemoryStore;
use crate::workflow::employee_resource;
use crate::workflow::engine::{Hooks, WorkflowEvent};

/// Input for creating an identity.
#[derive(Debug, Clone)]
pub struct NewIdentity {
    /// Display name.
    pub name: String,
    /// Email address, unique across the store.
    pub email: String,
    /// Initial role.
    pub role: Role,
    /// Department assignment, if any.
    pub department: Option<Uuid>,
    /// Reporting manager, if any.
    pub manager: Option<Uuid>,
}

/// Creates an identity and provisions its leave balances for the current
/// year through the post-commit hook.
pub fn create_identity(
    store: &MemoryStore,
    hooks: &Hooks,
    actor: Option<&Actor>,
    input: NewIdentity,
    today: NaiveDate,
) -> HrResult<Identity> {
    let resource = ResourceRef::new(ResourceKind::Identity).in_department(input.department);
    evaluate(actor, Action::Write, &resource).require()?;

    if input.name.trim().is_empty() {
        return Err(HrError::Validation {
            field: "name",
            message: "must not be empty".to_string(),
        });
    }
    if !input.email.contains('@') {
        return Err(HrError::Validation {
            field: "email",
            message: "must be a valid address".to_string(),
        });
    }

    let identity = Identity {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        role: input.role,
        department: input.department,
        manager: input.manager,
        active: true,
    };

    let created = store.transaction(|tables| {
        if let Some(department) = identity.department {
            tables.department(department)?;
        }
        if let Some(manager) = identity.manager {
            tables.identity(manager)?;
        }
        tables.insert_identity(identity.clone())?;
        Ok(identity.clone())
    })?;

    hooks.run(
        store,
        &WorkflowEvent::IdentityCreated {
            identity: created.id,
            year: today.year(),
        },
    );
    Ok(created)
}

/// Changes an identity's role.
///
/// Only admin and HR may change roles, and never their own: a privileged
/// actor cannot escalate or demote themself.
pub fn change_role(
    store: &MemoryStore,
    actor: &Actor,
    employee: Uuid,
    role: Role,
) -> HrResult<Identity> {
    if !matches!(actor.role, Role::Admin | Role::Hr) {
        return Err(HrError::PermissionDenied);
    }
    if actor.id == employee {
        return Err(HrError::PermissionDenied);
    }
    store.transaction(|tables| {
        let identity = tables.identity_mut(employee)?;
        identity.role = role;
        Ok(identity.clone())
    })
}

/// Every direct and transitive report of `manager`, in traversal order.
pub fn subordinates(
    store: &MemoryStore,
    actor: Option<&Actor>,
    manager: Uuid,
) -> HrResult<Vec<Identity>> {
    store.read(|tables| {
        let resource = employee_resource(tables, ResourceKind::Identity, manager)?;
        evaluate(actor, Action::Read, &resource).require()?;

        tables
            .subordinates_of(manager)
            .into_iter()
            .map(|id| tables.identity(id).cloned())
            .collect()
    })
}
