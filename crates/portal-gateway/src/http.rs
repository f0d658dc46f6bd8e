//! Response screening for portal replies.
//!
//! The portal signals an expired session in two ways: an explicit 401/403,
//! or a redirect to its HTML login page that reqwest follows and reports
//! as 200. Both become [`GatewayError::SessionExpired`] here so the sync
//! pipeline never tries to decode a login form as JSON.

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

use crate::error::GatewayError;

/// Longest error body kept in [`GatewayError::Api`].
const MAX_ERROR_BODY: usize = 200;

/// Pass a portal response through, or turn it into a [`GatewayError`].
pub async fn screen_response(resp: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
    let status = resp.status();
    if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(GatewayError::SessionExpired {
            url: resp.url().to_string(),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(GatewayError::Api {
            status: status.as_u16(),
            message: truncate(body.trim()),
        });
    }
    if is_html(&resp) {
        return Err(GatewayError::SessionExpired {
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

/// Map a reqwest failure, separating timeouts from other transport errors.
pub fn classify(error: reqwest::Error, url: &str) -> GatewayError {
    if error.is_timeout() {
        GatewayError::Timeout {
            url: url.to_string(),
        }
    } else {
        GatewayError::Http(error)
    }
}

fn is_html(resp: &reqwest::Response) -> bool {
    resp.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.trim_start().to_ascii_lowercase().starts_with("text/html"))
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
