//! Explicit session context replacing ad hoc token and location lookups.

use super::{LocationId, SessionDomainError, Viewer};
use std::fmt;

/// Opaque bearer token issued by the remote API at login.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a token string.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyToken`] when the token is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, SessionDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionDomainError::EmptyToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Authenticated session: who is acting and against which location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: SessionToken,
    viewer: Viewer,
    selected_location: LocationId,
}

impl Session {
    /// Opens a session for `viewer` operating against `selected_location`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::LocationNotPermitted`] when the viewer
    /// may not operate against the location.
    pub fn open(
        token: SessionToken,
        viewer: Viewer,
        selected_location: LocationId,
    ) -> Result<Self, SessionDomainError> {
        if !viewer.can_access_location(selected_location) {
            return Err(SessionDomainError::LocationNotPermitted(selected_location));
        }
        Ok(Self {
            token,
            viewer,
            selected_location,
        })
    }

    /// Returns the session token.
    #[must_use]
    pub const fn token(&self) -> &SessionToken {
        &self.token
    }

    /// Returns the authenticated viewer.
    #[must_use]
    pub const fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    /// Returns the location the viewer is operating against.
    #[must_use]
    pub const fn selected_location(&self) -> LocationId {
        self.selected_location
    }

    /// Switches the active location.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::LocationNotPermitted`] when the viewer
    /// may not operate against the location; the selection is unchanged.
    pub fn select_location(&mut self, location_id: LocationId) -> Result<(), SessionDomainError> {
        if !self.viewer.can_access_location(location_id) {
            return Err(SessionDomainError::LocationNotPermitted(location_id));
        }
        self.selected_location = location_id;
        Ok(())
    }
}
