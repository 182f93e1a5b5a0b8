//! Identity model and the canonical role set.
//!
//! Every authenticated actor in the system is an [`Identity`] carrying one
//! [`Role`]. The role set is a single closed enumeration shared by the
//! access policy and every domain module; there are no free-form role
//! strings anywhere in the engine.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The canonical set of roles recognized by the access policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full administrative access to every resource.
    Admin,
    /// HR manager: full access to employee-scoped resources.
    Hr,
    /// Department manager: access scoped to the manager's own department.
    Manager,
    /// Regular employee: read access to their own records only.
    Employee,
}

impl Role {
    /// Returns the canonical lowercase name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "hr",
            Role::Manager => "manager",
            Role::Employee => "employee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An actor known to the system: an employee account with a role and an
/// optional department scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Work email address, used as the notification recipient.
    pub email: String,
    /// The actor's role.
    pub role: Role,
    /// The department the actor belongs to, if any.
    #[serde(default)]
    pub department: Option<Uuid>,
    /// The actor's direct manager, if any.
    #[serde(default)]
    pub manager: Option<Uuid>,
    /// Whether the account is active. Inactive identities cannot act.
    pub active: bool,
}

impl Identity {
    /// Returns true if the identity holds HR-level access (admin or hr).
    ///
    /// # Examples
    ///
    /// ```
    /// use hr_engine::models::{Identity, Role};
    /// use uuid::Uuid;
    ///
    /// let hr = Identity {
    ///     id: Uuid::new_v4(),
    ///     name: "Dana".to_string(),
    ///     email: "dana@example.com".to_string(),
    ///     role: Role::Hr,
    ///     department: None,
    ///     manager: None,
    ///     active: true,
    /// };
    /// assert!(hr.is_hr());
    /// ```
    pub fn is_hr(&self) -> bool {
        matches!(self.role, Role::Admin | Role::Hr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity {
            id: Uuid::new_v4(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            role,
            department: None,
            manager: None,
            active: true,
        }
    }

    #[test]
    fn test_role_serialization_uses_canonical_names() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::Hr).unwrap(), "\"hr\"");
        assert_eq!(serde_json::to_string(&Role::Manager).unwrap(), "\"manager\"");
        assert_eq!(serde_json::to_string(&Role::Employee).unwrap(), "\"employee\"");
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Admin, Role::Hr, Role::Manager, Role::Employee] {
            let json = serde_json::to_string(&role).unwrap();
            let back: Role = serde_json::from_str(&json).unwrap();
            assert_eq!(role, back);
        }
    }

    #[test]
    fn test_legacy_role_literals_are_rejected() {
        // The source system compared against 'HR_MANAGER' in some places and
        // 'hr' in others. Only the canonical lowercase set deserializes.
        assert!(serde_json::from_str::<Role>("\"HR_MANAGER\"").is_err());
        assert!(serde_json::from_str::<Role>("\"DEPARTMENT_MANAGER\"").is_err());
    }

    #[test]
    fn test_is_hr_for_each_role() {
        assert!(identity(Role::Admin).is_hr());
        assert!(identity(Role::Hr).is_hr());
        assert!(!identity(Role::Manager).is_hr());
        assert!(!identity(Role::Employee).is_hr());
    }

    #[test]
    fn test_identity_round_trip() {
        let original = identity(Role::Manager);
        let json = serde_json::to_string(&original).unwrap();
        let back: Identity = serde_json::from_str(&json).unwrap();
        assert_eq!(original, back);
    }
}
