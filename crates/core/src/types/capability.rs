//! Capabilities and the permission decision.
//!
//! A capability is a named admin management area whose access can be toggled
//! per admin. Capabilities are a closed enum rather than free-form strings so
//! a typo'd key is a deserialization error instead of a silent grant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::role::Role;

/// A named admin management area.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Product catalog management.
    Products,
    /// Customer interest (lead) management.
    Interests,
    /// Traffic counter reporting.
    Traffic,
    /// Announcement management and push delivery.
    Announcements,
}

impl Capability {
    /// All capabilities, in a stable order.
    pub const ALL: [Self; 4] = [
        Self::Products,
        Self::Interests,
        Self::Traffic,
        Self::Announcements,
    ];
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Products => write!(f, "products"),
            Self::Interests => write!(f, "interests"),
            Self::Traffic => write!(f, "traffic"),
            Self::Announcements => write!(f, "announcements"),
        }
    }
}

/// Per-admin capability toggles.
///
/// The map is a deny-list: a capability that is not present is GRANTED. This
/// polarity is deliberate (a newly introduced capability is available to
/// existing admins until a superadmin switches it off) and callers must not
/// "fix" it to default-deny - the admin UI and the seeded accounts rely on
/// absence meaning allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeMap<Capability, bool>);

impl PermissionSet {
    /// An empty permission set: every capability granted.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Whether `capability` is allowed by this set alone (role not considered).
    ///
    /// Absent keys default to allowed.
    #[must_use]
    pub fn allows(&self, capability: Capability) -> bool {
        self.0.get(&capability).copied().unwrap_or(true)
    }

    /// Set an explicit toggle for `capability`.
    pub fn set(&mut self, capability: Capability, allowed: bool) {
        self.0.insert(capability, allowed);
    }

    /// Number of explicit toggles in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set carries no explicit toggles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Capability, bool)> for PermissionSet {
    fn from_iter<T: IntoIterator<Item = (Capability, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The permission decision: is `capability` granted to an admin with `role`
/// and `permissions`?
///
/// Superadmin bypasses the map entirely; everyone else gets the map's
/// default-allow lookup.
#[must_use]
pub fn is_granted(role: Role, permissions: &PermissionSet, capability: Capability) -> bool {
    role.is_superadmin() || permissions.allows(capability)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_capability_defaults_to_allowed() {
        let permissions = PermissionSet::new();
        for capability in Capability::ALL {
            assert!(is_granted(Role::Admin, &permissions, capability));
        }
    }

    #[test]
    fn test_explicit_deny_blocks_admin_but_not_superadmin() {
        let mut permissions = PermissionSet::new();
        permissions.set(Capability::Announcements, false);

        assert!(!is_granted(
            Role::Admin,
            &permissions,
            Capability::Announcements
        ));
        assert!(is_granted(
            Role::Superadmin,
            &permissions,
            Capability::Announcements
        ));
        // Other areas untouched by the toggle stay granted.
        assert!(is_granted(Role::Admin, &permissions, Capability::Products));
    }

    #[test]
    fn test_explicit_allow_is_allowed() {
        let mut permissions = PermissionSet::new();
        permissions.set(Capability::Traffic, true);
        assert!(is_granted(Role::Admin, &permissions, Capability::Traffic));
    }

    #[test]
    fn test_serde_map_round_trip() {
        let permissions: PermissionSet = serde_json::from_str(
            r#"{"announcements": false, "traffic": true}"#,
        )
        .expect("deserialize");
        assert!(!permissions.allows(Capability::Announcements));
        assert!(permissions.allows(Capability::Traffic));
        assert!(permissions.allows(Capability::Products));

        let json = serde_json::to_value(&permissions).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"announcements": false, "traffic": true})
        );
    }

    #[test]
    fn test_unknown_capability_key_is_rejected() {
        let result: Result<PermissionSet, _> =
            serde_json::from_str(r#"{"announcments": false}"#);
        assert!(result.is_err());
    }
}
