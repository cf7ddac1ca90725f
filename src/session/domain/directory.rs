//! Company and location records read from the remote API.

use super::{CompanyId, LocationId};
use serde::{Deserialize, Serialize};

/// Tenant company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company identifier.
    pub id: CompanyId,
    /// Company display name.
    pub name: String,
}

/// Facility location owned by a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Location identifier.
    pub id: LocationId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Location display name.
    pub name: String,
}
