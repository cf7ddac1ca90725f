//! Thin JSON client over `reqwest` bound to one API base URL.

use super::{ApiError, response::check_response};
use crate::{config::ApiConfig, session::domain::SessionToken};
use reqwest::{Method, RequestBuilder, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

/// HTTP client for the facility management API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Option<SessionToken>,
}

impl ApiClient {
    /// Builds an unauthenticated client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidBaseUrl`] when the base URL cannot be
    /// parsed, or [`ApiError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url,
            token: None,
        })
    }

    /// Returns a client that authenticates every request with `token`.
    #[must_use]
    pub fn with_token(&self, token: &SessionToken) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.clone()),
        }
    }

    /// Returns the base URL all endpoint paths are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves a relative endpoint path.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidEndpoint`] when the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|err| ApiError::InvalidEndpoint {
                path: path.to_owned(),
                reason: err.to_string(),
            })
    }

    /// Sends a `GET` and decodes the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the API answers with a
    /// non-success status, or the body cannot be decoded.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = check_response(self.request(Method::GET, path)?.send().await?).await?;
        decode(response).await
    }

    /// Sends a JSON body and decodes the JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails, the API answers with a
    /// non-success status, or the body cannot be decoded.
    pub async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let response =
            check_response(self.request(method, path)?.json(body).send().await?).await?;
        decode(response).await
    }

    /// Sends a JSON body and discards the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the API answers with a
    /// non-success status.
    pub async fn send_body<B>(&self, method: Method, path: &str, body: &B) -> Result<(), ApiError>
    where
        B: Serialize + ?Sized + Sync,
    {
        check_response(self.request(method, path)?.json(body).send().await?).await?;
        Ok(())
    }

    /// Sends a request without a body and discards the response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the request fails or the API answers with a
    /// non-success status.
    pub async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        check_response(self.request(method, path)?.send().await?).await?;
        Ok(())
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let builder = self.http.request(method, self.endpoint(path)?);
        Ok(match &self.token {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        })
    }
}

/// Parses the base URL, forcing a trailing slash so relative joins append.
fn parse_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    };
    Url::parse(&normalized).map_err(|err| ApiError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: err.to_string(),
    })
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|err| ApiError::Decode(err.to_string()))
}
