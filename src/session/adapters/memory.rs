//! In-memory identity gateway for tests and offline flows.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::session::{
    domain::{Company, CompanyId, Location, LocationId, SessionToken, Viewer},
    ports::{IdentityGateway, IdentityGatewayError, IdentityGatewayResult},
};

/// Thread-safe in-memory identity directory keyed by session token.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityGateway {
    state: Arc<RwLock<InMemoryIdentityState>>,
}

#[derive(Debug, Default)]
struct InMemoryIdentityState {
    users: HashMap<String, Viewer>,
    companies: HashMap<CompanyId, Company>,
    locations: HashMap<LocationId, Location>,
}

fn lock_error(err: impl ToString) -> IdentityGatewayError {
    IdentityGatewayError::transport(std::io::Error::other(err.to_string()))
}

impl InMemoryIdentityGateway {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues `token` to `viewer`. Existing tokens are replaced.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn register_user(&self, token: &SessionToken, viewer: Viewer) -> IdentityGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.users.insert(token.expose().to_owned(), viewer);
        Ok(())
    }

    /// Invalidates `token`, as an expired session would.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn revoke(&self, token: &SessionToken) -> IdentityGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.users.remove(token.expose());
        Ok(())
    }

    /// Adds or replaces a company record.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn insert_company(&self, company: Company) -> IdentityGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.companies.insert(company.id, company);
        Ok(())
    }

    /// Adds or replaces a location record.
    ///
    /// # Errors
    ///
    /// Returns a transport error when lock acquisition fails.
    pub fn insert_location(&self, location: Location) -> IdentityGatewayResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.locations.insert(location.id, location);
        Ok(())
    }

    fn authorize(state: &InMemoryIdentityState, token: &SessionToken) -> IdentityGatewayResult<()> {
        if state.users.contains_key(token.expose()) {
            Ok(())
        } else {
            Err(IdentityGatewayError::Unauthorized)
        }
    }
}

#[async_trait]
impl IdentityGateway for InMemoryIdentityGateway {
    async fn fetch_user(&self, token: &SessionToken) -> IdentityGatewayResult<Viewer> {
        let state = self.state.read().map_err(lock_error)?;
        state
            .users
            .get(token.expose())
            .cloned()
            .ok_or(IdentityGatewayError::Unauthorized)
    }

    async fn fetch_company(
        &self,
        token: &SessionToken,
        company_id: CompanyId,
    ) -> IdentityGatewayResult<Company> {
        let state = self.state.read().map_err(lock_error)?;
        Self::authorize(&state, token)?;
        state
            .companies
            .get(&company_id)
            .cloned()
            .ok_or_else(|| IdentityGatewayError::NotFound(format!("company {company_id}")))
    }

    async fn fetch_location(
        &self,
        token: &SessionToken,
        location_id: LocationId,
    ) -> IdentityGatewayResult<Location> {
        let state = self.state.read().map_err(lock_error)?;
        Self::authorize(&state, token)?;
        state
            .locations
            .get(&location_id)
            .cloned()
            .ok_or_else(|| IdentityGatewayError::NotFound(format!("location {location_id}")))
    }
}
