//! Admin identity domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use angadi_core::{AdminId, Capability, PermissionSet, Role, Username, is_granted};

/// An admin identity as exposed to handlers and API responses.
///
/// The password hash never leaves the repository layer; this type is what the
/// authorization gate attaches to a request after re-resolving the identity,
/// so `role` and `permissions` are always the *current* values, not the
/// snapshot embedded in the bearer token.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    /// Unique admin ID.
    pub id: AdminId,
    /// Login name.
    pub username: Username,
    /// Current role.
    pub role: Role,
    /// Current capability toggles.
    pub permissions: PermissionSet,
    /// When the admin was created.
    pub created_at: DateTime<Utc>,
}

impl Admin {
    /// Whether this admin may access the given management area.
    #[must_use]
    pub fn can(&self, capability: Capability) -> bool {
        is_granted(self.role, &self.permissions, capability)
    }

    /// Whether this admin holds the superadmin role.
    #[must_use]
    pub const fn is_superadmin(&self) -> bool {
        self.role.is_superadmin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin_with(role: Role, permissions: PermissionSet) -> Admin {
        Admin {
            id: AdminId::new(1),
            username: Username::parse("alice").expect("valid"),
            role,
            permissions,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_can_uses_default_allow() {
        let admin = admin_with(Role::Admin, PermissionSet::new());
        assert!(admin.can(Capability::Announcements));
    }

    #[test]
    fn test_can_respects_explicit_deny() {
        let mut permissions = PermissionSet::new();
        permissions.set(Capability::Announcements, false);
        let admin = admin_with(Role::Admin, permissions.clone());
        assert!(!admin.can(Capability::Announcements));

        let superadmin = admin_with(Role::Superadmin, permissions);
        assert!(superadmin.can(Capability::Announcements));
    }

    #[test]
    fn test_serializes_without_secret_material() {
        let admin = admin_with(Role::Admin, PermissionSet::new());
        let json = serde_json::to_value(&admin).expect("serialize");
        let object = json.as_object().expect("object");
        assert!(object.contains_key("username"));
        assert!(object.contains_key("createdAt"));
        assert!(!object.contains_key("password"));
        assert!(!object.contains_key("passwordHash"));
    }
}
