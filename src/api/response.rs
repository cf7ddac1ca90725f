//! Shared HTTP response classification.
//!
//! Every adapter funnels responses through [`check_response`] so the
//! authorization / rejection / transient split is decided in one place.

use super::ApiError;
use serde::Deserialize;

/// Error body shapes the API is known to return.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error", alias = "detail")]
    message: String,
}

/// Checks an HTTP response for error statuses.
///
/// Returns the response unchanged on success.
pub(crate) async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(classify_status(status.as_u16(), &body))
}

/// Maps a non-success status and its body onto an [`ApiError`].
pub(crate) fn classify_status(status: u16, body: &str) -> ApiError {
    let message = extract_message(body);
    match status {
        401 | 403 => ApiError::Unauthorized { status },
        404 => ApiError::NotFound { message },
        408 | 429 => ApiError::Unavailable { status, message },
        400..=499 => ApiError::Rejected { status, message },
        _ => ApiError::Unavailable { status, message },
    }
}

/// Pulls a human-readable message out of an error body.
fn extract_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(
        |_| body.trim().to_owned(),
        |parsed| parsed.message.trim().to_owned(),
    )
}
