//! Viewer roles and the capabilities they grant.

use super::ParseRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role held by the authenticated viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Works tasks assigned to them and claims from their locations' pools.
    Employee,
    /// Manages tasks across the locations they administer.
    Admin,
    /// Manages every company and location.
    SuperAdmin,
}

impl Role {
    /// Returns the canonical role name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Returns `true` when the role may create, assign and remove tasks.
    #[must_use]
    pub const fn can_manage_tasks(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }

    /// Returns `true` when the role may manage tenant companies.
    #[must_use]
    pub const fn can_manage_companies(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }

    /// Returns `true` when the role is not limited to its own location ids.
    #[must_use]
    pub const fn spans_all_locations(self) -> bool {
        matches!(self, Self::SuperAdmin)
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "employee" | "user" => Ok(Self::Employee),
            "admin" => Ok(Self::Admin),
            "super_admin" | "superadmin" => Ok(Self::SuperAdmin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
