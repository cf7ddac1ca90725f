//! HTTP identity gateway backed by [`ApiClient`].

use crate::{
    api::{ApiClient, ApiError},
    session::{
        domain::{Company, CompanyId, Location, LocationId, PersonName, Role, SessionToken, Viewer},
        ports::{IdentityGateway, IdentityGatewayError, IdentityGatewayResult},
    },
};
use async_trait::async_trait;
use serde::Deserialize;

/// Wire shape of `GET users/me`.
///
/// Both `first_name` and the legacy `fname` spelling are accepted.
#[derive(Debug, Deserialize)]
pub(crate) struct UserRecord {
    pub(crate) user_id: i64,
    pub(crate) role: String,
    #[serde(default)]
    pub(crate) company_id: Option<i64>,
    #[serde(default)]
    pub(crate) location_ids: Vec<i64>,
    #[serde(default, alias = "fname")]
    pub(crate) first_name: String,
    #[serde(default, alias = "lname")]
    pub(crate) last_name: String,
}

impl TryFrom<UserRecord> for Viewer {
    type Error = IdentityGatewayError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        let role = Role::try_from(record.role.as_str())
            .map_err(|err| IdentityGatewayError::InvalidResponse(err.to_string()))?;
        let mut viewer = Self::new(record.user_id.into(), role)
            .with_locations(record.location_ids.into_iter().map(LocationId::new))
            .with_name(PersonName::new(record.first_name, record.last_name));
        if let Some(company_id) = record.company_id {
            viewer = viewer.with_company(CompanyId::new(company_id));
        }
        Ok(viewer)
    }
}

/// Wire shape of `GET companies/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct CompanyRecord {
    #[serde(alias = "id")]
    pub(crate) company_id: i64,
    pub(crate) name: String,
}

impl From<CompanyRecord> for Company {
    fn from(record: CompanyRecord) -> Self {
        Self {
            id: CompanyId::new(record.company_id),
            name: record.name,
        }
    }
}

/// Wire shape of `GET locations/{id}`.
#[derive(Debug, Deserialize)]
pub(crate) struct LocationRecord {
    #[serde(alias = "id")]
    pub(crate) location_id: i64,
    pub(crate) company_id: i64,
    pub(crate) name: String,
}

impl From<LocationRecord> for Location {
    fn from(record: LocationRecord) -> Self {
        Self {
            id: LocationId::new(record.location_id),
            company_id: CompanyId::new(record.company_id),
            name: record.name,
        }
    }
}

fn map_api_error(err: ApiError, record: impl FnOnce() -> String) -> IdentityGatewayError {
    match err {
        ApiError::Unauthorized { .. } => IdentityGatewayError::Unauthorized,
        ApiError::NotFound { .. } => IdentityGatewayError::NotFound(record()),
        ApiError::Rejected { message, .. } => IdentityGatewayError::Rejected(message),
        ApiError::InvalidBaseUrl { .. } | ApiError::InvalidEndpoint { .. } => {
            IdentityGatewayError::Rejected(err.to_string())
        }
        ApiError::Decode(message) => IdentityGatewayError::InvalidResponse(message),
        ApiError::Unavailable { .. } | ApiError::Transport(_) => {
            IdentityGatewayError::transport(err)
        }
    }
}

/// Identity gateway calling the remote API.
#[derive(Debug, Clone)]
pub struct HttpIdentityGateway {
    api: ApiClient,
}

impl HttpIdentityGateway {
    /// Creates a gateway; the token is supplied per call.
    #[must_use]
    pub const fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl IdentityGateway for HttpIdentityGateway {
    async fn fetch_user(&self, token: &SessionToken) -> IdentityGatewayResult<Viewer> {
        let record: UserRecord = self
            .api
            .with_token(token)
            .get_json("users/me")
            .await
            .map_err(|err| map_api_error(err, || "current user".to_owned()))?;
        Viewer::try_from(record)
    }

    async fn fetch_company(
        &self,
        token: &SessionToken,
        company_id: CompanyId,
    ) -> IdentityGatewayResult<Company> {
        let record: CompanyRecord = self
            .api
            .with_token(token)
            .get_json(&format!("companies/{company_id}"))
            .await
            .map_err(|err| map_api_error(err, || format!("company {company_id}")))?;
        Ok(record.into())
    }

    async fn fetch_location(
        &self,
        token: &SessionToken,
        location_id: LocationId,
    ) -> IdentityGatewayResult<Location> {
        let record: LocationRecord = self
            .api
            .with_token(token)
            .get_json(&format!("locations/{location_id}"))
            .await
            .map_err(|err| map_api_error(err, || format!("location {location_id}")))?;
        Ok(record.into())
    }
}
