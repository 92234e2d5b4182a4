//! Error types for shipkit.

use derive_more::{Display, Error, From};
use serde::Deserialize;

/// Code used when an error response body cannot be parsed.
pub const RESPONSE_PARSE_ERROR: &str = "RESPONSE.PARSE_ERROR";

// ============================================================================
// API error envelope
// ============================================================================

/// A field-level error reported by the API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldError {
    /// Machine readable code.
    pub code: Option<String>,
    /// Name of the offending field.
    pub field: Option<String>,
    /// Human readable message.
    pub message: Option<String>,
    /// Suggested fix, when the API offers one.
    pub suggestion: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
    #[serde(default)]
    errors: Vec<FieldError>,
}

// ============================================================================
// Error Type
// ============================================================================

/// Main error type for shipkit operations.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// The API answered with a non-2xx status code.
    #[display("API error {status} ({code}): {message}")]
    #[from(skip)]
    Api {
        /// HTTP status code.
        status: u16,
        /// API error code, e.g. `ADDRESS.VERIFY.FAILURE`.
        code: String,
        /// Error message.
        message: String,
        /// Field-level details.
        #[error(not(source))]
        errors: Vec<FieldError>,
        /// Raw response body.
        #[error(not(source))]
        body: bytes::Bytes,
    },

    /// Network/connection errors.
    #[display("connection error: {_0}")]
    #[from(skip)]
    Connection(#[error(not(source))] String),

    /// TLS/SSL errors.
    #[display("TLS error: {_0}")]
    #[from(skip)]
    Tls(#[error(not(source))] String),

    /// Request timeout.
    #[display("request timeout")]
    #[from(skip)]
    Timeout,

    /// Invalid request configuration.
    #[display("invalid request: {_0}")]
    #[from(skip)]
    InvalidRequest(#[error(not(source))] String),

    /// URL parsing error.
    #[display("invalid URL: {_0}")]
    #[from]
    InvalidUrl(url::ParseError),

    /// The response body is not valid JSON.
    #[display("JSON parse error: {_0}")]
    #[from]
    JsonParse(serde_json::Error),

    /// JSON deserialization error with path context.
    #[display("JSON deserialization error at '{path}': {message}")]
    #[from(skip)]
    JsonDeserialization {
        /// JSON path to the error (e.g., "shipment.rates[0].rate").
        path: String,
        /// Error message.
        message: String,
    },

    /// A create call got an object that already has an id.
    #[display("{resource} has already been created")]
    #[from(skip)]
    ResourceAlreadyCreated {
        /// Resource type name.
        #[error(not(source))]
        resource: &'static str,
    },

    /// An operation needs a field the object does not carry.
    #[display("{resource} is missing `{field}`")]
    #[from(skip)]
    MissingField {
        /// Resource type name.
        resource: &'static str,
        /// Wire name of the missing field.
        field: &'static str,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build an [`Error::Api`] from an error response.
    ///
    /// The body is expected to carry `{"error": {"code", "message", "errors"}}`;
    /// anything else yields [`RESPONSE_PARSE_ERROR`] with the raw body as message.
    #[must_use]
    pub fn from_response(status: u16, body: bytes::Bytes) -> Self {
        match serde_json::from_slice::<ErrorEnvelope>(&body) {
            Ok(ErrorEnvelope { error }) => Self::Api {
                status,
                code: error.code,
                message: error.message,
                errors: error.errors,
                body,
            },
            Err(_) => Self::Api {
                status,
                code: RESPONSE_PARSE_ERROR.to_string(),
                message: String::from_utf8_lossy(&body).into_owned(),
                errors: Vec::new(),
                body,
            },
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(message: impl Into<String>) -> Self {
        Self::Tls(message.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a JSON deserialization error with path context.
    #[must_use]
    pub fn json_deserialization(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonDeserialization {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a missing field error.
    #[must_use]
    pub const fn missing_field(resource: &'static str, field: &'static str) -> Self {
        Self::MissingField { resource, field }
    }

    /// Returns `true` if this is a timeout error.
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// Returns `true` if this is a connection error.
    #[must_use]
    pub const fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Returns the HTTP status code if this is an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the API error code if this is an API error.
    #[must_use]
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Field-level details of an API error, empty otherwise.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Api { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Returns `true` if this is a client error (4xx).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        self.status().is_some_and(|s| (400..500).contains(&s))
    }

    /// Returns `true` if this is a server error (5xx).
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|s| (500..600).contains(&s))
    }

    /// Returns `true` if this is a 404 Not Found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
