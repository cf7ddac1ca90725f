//! Identity port: the current user and the organisation around them.

use crate::session::domain::{Company, CompanyId, Location, LocationId, SessionToken, Viewer};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity gateway operations.
pub type IdentityGatewayResult<T> = Result<T, IdentityGatewayError>;

/// Authenticated lookups of the viewer, their company and locations.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Fetches the user the token was issued to.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityGatewayError::Unauthorized`] when the token is
    /// missing, expired or revoked.
    async fn fetch_user(&self, token: &SessionToken) -> IdentityGatewayResult<Viewer>;

    /// Fetches a company record.
    async fn fetch_company(
        &self,
        token: &SessionToken,
        company_id: CompanyId,
    ) -> IdentityGatewayResult<Company>;

    /// Fetches a location record.
    async fn fetch_location(
        &self,
        token: &SessionToken,
        location_id: LocationId,
    ) -> IdentityGatewayResult<Location>;
}

/// Errors returned by identity gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityGatewayError {
    /// The session is missing or expired.
    #[error("session is not authorized")]
    Unauthorized,

    /// The requested record does not exist.
    #[error("{0} not found")]
    NotFound(String),

    /// The request was refused and retrying it unchanged will not help.
    #[error("identity request rejected: {0}")]
    Rejected(String),

    /// The remote API could not be reached or failed temporarily.
    #[error("identity transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),

    /// The remote API answered with a record that failed validation.
    #[error("invalid identity response: {0}")]
    InvalidResponse(String),
}

impl IdentityGatewayError {
    /// Wraps a transport failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }

    /// Returns `true` for failures a manual retry may resolve.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}
