//! Gateway error types.

use thiserror::Error;

/// Transport-level failures while talking to the portal.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// HTTP transport error (connection refused, DNS, TLS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out")]
    Timeout {
        /// URL that timed out.
        url: String,
    },

    /// The portal returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the portal.
        status: u16,
        /// Response body, trimmed and truncated.
        message: String,
    },

    /// The session cookie was refused: a 401/403, or the HTML login page
    /// where JSON was expected.
    #[error("portal session expired while fetching {url}")]
    SessionExpired {
        /// Final URL of the rejected request.
        url: String,
    },

    /// A configured header value is not valid HTTP.
    #[error("invalid header value for {name}")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
    },
}
