//! The authenticated actor whose role and locations gate visible data.

use super::{CompanyId, LocationId, Role, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Display name of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    first: String,
    last: String,
}

impl PersonName {
    /// Creates a name from its parts, trimming surrounding whitespace.
    #[must_use]
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into().trim().to_owned(),
            last: last.into().trim().to_owned(),
        }
    }

    /// Returns the first name.
    #[must_use]
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Returns the last name.
    #[must_use]
    pub fn last(&self) -> &str {
        &self.last
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.first.is_empty(), self.last.is_empty()) {
            (false, false) => write!(f, "{} {}", self.first, self.last),
            (false, true) => f.write_str(&self.first),
            _ => f.write_str(&self.last),
        }
    }
}

/// Authenticated viewer: employee, admin or super admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
    user_id: UserId,
    role: Role,
    company_id: Option<CompanyId>,
    location_ids: BTreeSet<LocationId>,
    name: PersonName,
}

impl Viewer {
    /// Creates a viewer with no company, locations or name.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            company_id: None,
            location_ids: BTreeSet::new(),
            name: PersonName {
                first: String::new(),
                last: String::new(),
            },
        }
    }

    /// Sets the company the viewer belongs to.
    #[must_use]
    pub const fn with_company(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }

    /// Sets the locations the viewer works at or administers.
    #[must_use]
    pub fn with_locations(mut self, location_ids: impl IntoIterator<Item = LocationId>) -> Self {
        self.location_ids = location_ids.into_iter().collect();
        self
    }

    /// Sets the viewer's display name.
    #[must_use]
    pub fn with_name(mut self, name: PersonName) -> Self {
        self.name = name;
        self
    }

    /// Returns the viewer's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the viewer's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the viewer's company, if any.
    #[must_use]
    pub const fn company_id(&self) -> Option<CompanyId> {
        self.company_id
    }

    /// Returns the location identifiers attached to the viewer.
    #[must_use]
    pub const fn location_ids(&self) -> &BTreeSet<LocationId> {
        &self.location_ids
    }

    /// Returns the viewer's display name.
    #[must_use]
    pub const fn name(&self) -> &PersonName {
        &self.name
    }

    /// Returns `true` when the viewer may operate against `location_id`.
    ///
    /// Super admins reach every location; everyone else only the locations
    /// attached to their account.
    #[must_use]
    pub fn can_access_location(&self, location_id: LocationId) -> bool {
        self.role.spans_all_locations() || self.location_ids.contains(&location_id)
    }

    /// Returns `true` when the viewer may create, assign and remove tasks.
    #[must_use]
    pub const fn can_manage_tasks(&self) -> bool {
        self.role.can_manage_tasks()
    }

    /// Returns `true` when the viewer may manage tenant companies.
    #[must_use]
    pub const fn can_manage_companies(&self) -> bool {
        self.role.can_manage_companies()
    }

    /// Returns the location selected when the viewer expresses no preference.
    #[must_use]
    pub fn default_location(&self) -> Option<LocationId> {
        self.location_ids.first().copied()
    }
}
