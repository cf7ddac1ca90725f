//! Sign-in, location selection and sign-out.

use crate::session::{
    domain::{Company, Location, LocationId, Session, SessionDomainError, SessionToken},
    ports::{IdentityGateway, IdentityGatewayError},
};
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] SessionDomainError),
    /// Identity lookup failed.
    #[error(transparent)]
    Gateway(#[from] IdentityGatewayError),
    /// The viewer has no location to operate against.
    #[error("viewer has no selectable location")]
    NoLocation,
}

impl SessionError {
    /// Returns `true` when the caller must send the user back to login.
    #[must_use]
    pub const fn requires_reauthentication(&self) -> bool {
        matches!(self, Self::Gateway(IdentityGatewayError::Unauthorized))
    }
}

/// Result type for session service operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Session lifecycle orchestration service.
#[derive(Clone)]
pub struct SessionService<I>
where
    I: IdentityGateway,
{
    identity: Arc<I>,
}

impl<I> SessionService<I>
where
    I: IdentityGateway,
{
    /// Creates a new session service.
    #[must_use]
    pub const fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }

    /// Opens a session for the holder of `token`.
    ///
    /// The preferred location is selected when the viewer may access it;
    /// otherwise the viewer's lowest location id is used. A super admin
    /// without attached locations must name a preferred location that the
    /// API confirms exists.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Gateway`] when the token is rejected or the
    /// API fails, and [`SessionError::NoLocation`] when no location can be
    /// selected.
    pub async fn sign_in(
        &self,
        token: SessionToken,
        preferred_location: Option<LocationId>,
    ) -> SessionResult<Session> {
        let viewer = self.identity.fetch_user(&token).await.inspect_err(|error| {
            tracing::warn!(%error, "sign-in failed");
        })?;

        let permitted_preference =
            preferred_location.filter(|location_id| viewer.can_access_location(*location_id));
        let selected = match (permitted_preference, viewer.default_location()) {
            (Some(location_id), _) if viewer.location_ids().contains(&location_id) => location_id,
            (Some(location_id), _) => {
                self.identity.fetch_location(&token, location_id).await?;
                location_id
            }
            (None, Some(location_id)) => location_id,
            (None, None) => return Err(SessionError::NoLocation),
        };

        let session = Session::open(token, viewer, selected)?;
        tracing::info!(
            user_id = %session.viewer().user_id(),
            role = %session.viewer().role(),
            location_id = %selected,
            "session opened"
        );
        Ok(session)
    }

    /// Switches the session's active location.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::LocationNotPermitted`] when the viewer
    /// may not operate there, or a gateway error when a super admin selects
    /// a location the API does not know.
    pub async fn select_location(
        &self,
        session: &mut Session,
        location_id: LocationId,
    ) -> SessionResult<()> {
        if !session.viewer().can_access_location(location_id) {
            tracing::warn!(location_id = %location_id, "location switch refused");
            return Err(SessionDomainError::LocationNotPermitted(location_id).into());
        }
        if !session.viewer().location_ids().contains(&location_id) {
            self.identity
                .fetch_location(session.token(), location_id)
                .await?;
        }
        session.select_location(location_id)?;
        tracing::info!(location_id = %location_id, "location selected");
        Ok(())
    }

    /// Fetches the viewer's company, if they belong to one.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Gateway`] when the lookup fails.
    pub async fn company(&self, session: &Session) -> SessionResult<Option<Company>> {
        let Some(company_id) = session.viewer().company_id() else {
            return Ok(None);
        };
        let company = self
            .identity
            .fetch_company(session.token(), company_id)
            .await?;
        Ok(Some(company))
    }

    /// Fetches a location record the viewer may access.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::LocationNotPermitted`] for locations
    /// outside the viewer's reach, or [`SessionError::Gateway`] when the
    /// lookup fails.
    pub async fn location(
        &self,
        session: &Session,
        location_id: LocationId,
    ) -> SessionResult<Location> {
        if !session.viewer().can_access_location(location_id) {
            return Err(SessionDomainError::LocationNotPermitted(location_id).into());
        }
        Ok(self
            .identity
            .fetch_location(session.token(), location_id)
            .await?)
    }

    /// Ends the session. The token is dropped with it.
    pub fn sign_out(&self, session: Session) {
        tracing::info!(user_id = %session.viewer().user_id(), "session closed");
        drop(session);
    }
}
