//! Admin roles.

use serde::{Deserialize, Serialize};

/// Error returned when parsing a [`Role`] from its storage form.
#[derive(thiserror::Error, Debug, Clone)]
#[error("invalid admin role: {0}")]
pub struct RoleParseError(pub String);

/// Role of an admin identity.
///
/// Stored as lowercase text in the database and serialized the same way in
/// API responses and token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Capability-gated access to the management areas.
    Admin,
    /// Full access, including admin account and permission management.
    Superadmin,
}

impl Role {
    /// Whether this role bypasses all capability checks.
    #[must_use]
    pub const fn is_superadmin(self) -> bool {
        matches!(self, Self::Superadmin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Superadmin => write!(f, "superadmin"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::Superadmin),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_display_from_str_round_trip() {
        for role in [Role::Admin, Role::Superadmin] {
            let parsed: Role = role.to_string().parse().expect("round trip");
            assert_eq!(parsed, role);
        }
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&Role::Superadmin).expect("serialize"),
            "\"superadmin\""
        );
        let role: Role = serde_json::from_str("\"admin\"").expect("deserialize");
        assert_eq!(role, Role::Admin);
    }
}
