use serde::Deserialize;
use thiserror::Error;

/// Result type alias for Grafana operations
pub type Result<T> = std::result::Result<T, GrafanaError>;

/// Well-known error messages returned by the Grafana API
pub mod messages {
    pub const NOT_FOUND: &str = "Not Found";
    pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
    pub const PERMISSION_DENIED: &str = "Permission denied";
    pub const INVALID_API_KEY: &str = "Invalid API key";
    pub const AUTHENTICATION_ERROR: &str = "Authentication error";
    pub const INVALID_USERNAME_OR_PASSWORD: &str = "Invalid username or password";
    pub const BASIC_AUTH_FAILED: &str = "Basic auth failed";
    pub const INVALID_BASIC_AUTH_HEADER: &str = "Invalid Basic Auth Header";
}

/// Errors that can occur when interacting with Grafana
#[derive(Debug, Error)]
pub enum GrafanaError {
    /// Failed to build HTTP client
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// Base address or endpoint path is not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[source] url::ParseError),

    /// Failed to serialize the request body
    #[error("Failed to serialize request: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Input cannot be expressed as URL query parameters
    #[error("Unsupported query input: {0}")]
    UnsupportedQuery(String),

    /// Failed to assemble the outbound request
    #[error("Failed to build request: {0}")]
    BuildRequest(#[source] reqwest::Error),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest_middleware::Error),

    /// Response body could not be read to the end
    #[error("Failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// Grafana returned `{"message": ..., "error": ...}` with an error status
    #[error("{message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// `error` field when non-empty, `message` otherwise
        message: String,
    },

    /// Grafana rejected the input with a list of field validation failures (HTTP 422)
    #[error("{}", summarize(.errors))]
    Validation {
        /// Individual field failures, in server order
        errors: Vec<FieldError>,
    },

    /// Error status whose body matches neither known error shape
    #[error("Unexpected response: HTTP {status} - {body}")]
    UnexpectedResponse {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Response body does not match the expected output shape
    #[error("Failed to deserialize response: {0}")]
    Deserialize(#[source] serde_json::Error),
}

impl GrafanaError {
    /// HTTP status of a server-reported error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::UnexpectedResponse { status, .. } => Some(*status),
            Self::Validation { .. } => Some(422),
            _ => None,
        }
    }

    /// Check if the server reported the resource as missing
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

/// Single field validation failure from a 422 response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    #[serde(default)]
    pub field_names: Vec<String>,
    #[serde(default)]
    pub classification: String,
    #[serde(default)]
    pub message: String,
}

/// Generic error body: `{"message": "...", "error": "..."}`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    /// Parse an error body, rejecting objects that carry neither field
    pub(crate) fn parse(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .filter(|b| b.message.is_some() || b.error.is_some())
    }

    pub(crate) fn into_error(self, status: u16) -> GrafanaError {
        let message = match self.error {
            Some(error) if !error.is_empty() => error,
            _ => self.message.unwrap_or_default(),
        };
        GrafanaError::Api { status, message }
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{} {}", e.field_names.join(", "), e.message))
        .collect::<Vec<_>>()
        .join(". ")
}
