//!
//! # Error Handling
//!
//! Two error types live here.
//!
//! `ApiError` is the normalized shape every failed API call is reduced to before it
//! reaches UI code: `{ message, status, data }`. The `status` field tells the three
//! failure kinds apart: the HTTP status when the server answered, `0` when no response
//! arrived, `-1` when the failure happened locally.
//!
//! `AppError` is the crate-wide error used by everything that is not a single API call
//! (configuration, storage, validation, navigation). It provides `From` implementations
//! for the error types it wraps so the `?` operator can be used throughout.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use validator::ValidationErrors;

/// Message used when the server answered without a usable `message` field.
pub const UNEXPECTED_ERROR_MESSAGE: &str = "Unexpected error.";
/// Message used when a request was sent but no response arrived.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Connection error. Please check your internet connection.";
/// Message used for local failures that carry no message of their own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error occurred.";

/// Status reported when no response was received.
pub const STATUS_NO_RESPONSE: i32 = 0;
/// Status reported for failures raised outside the request lifecycle.
pub const STATUS_LOCAL: i32 = -1;

/// The three ways an API call can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The server responded with a non-2xx status.
    Server,
    /// The request went out but nothing came back (timeout, offline, refused).
    Network,
    /// The error was raised before or outside the request.
    Local,
}

/// Normalized failure of an API call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
    pub status: i32,
    pub data: Value,
}

impl ApiError {
    /// Builds a server error from the response status and its (possibly non-JSON) body.
    ///
    /// The message is taken from the body's `message` field when it is a non-empty
    /// string, otherwise a generic fallback is used.
    pub fn from_response(status: u16, data: Value) -> Self {
        let message = data
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(UNEXPECTED_ERROR_MESSAGE)
            .to_string();

        Self {
            message,
            status: i32::from(status),
            data,
        }
    }

    pub fn network() -> Self {
        Self {
            message: CONNECTION_ERROR_MESSAGE.to_string(),
            status: STATUS_NO_RESPONSE,
            data: Value::Null,
        }
    }

    pub fn local(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        };

        Self {
            message,
            status: STATUS_LOCAL,
            data: Value::Null,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self.status {
            STATUS_NO_RESPONSE => ErrorKind::Network,
            s if s < 0 => ErrorKind::Local,
            _ => ErrorKind::Server,
        }
    }

    /// True for 401 responses, which invalidate the locally stored session.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            ErrorKind::Server => write!(f, "{} (HTTP {})", self.message, self.status),
            ErrorKind::Network | ErrorKind::Local => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

/// Maps transport failures from `reqwest` onto the normalized shape.
///
/// Timeouts and connection failures mean the request left but no response came back.
/// Anything else (building the request, decoding a body) is a local failure.
impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> ApiError {
        if error.is_timeout() || error.is_connect() || error.is_request() {
            ApiError::network()
        } else {
            ApiError::local(error.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(error: serde_json::Error) -> ApiError {
        ApiError::local(error.to_string())
    }
}

/// Represents all errors surfaced by the client outside a single API call.
#[derive(Debug)]
pub enum AppError {
    /// A failed API call, already normalized.
    Api(ApiError),
    /// Form input rejected before anything was sent.
    Validation(ValidationErrors),
    /// Missing or malformed configuration.
    Config(String),
    /// Reading or writing persisted client state failed.
    Storage(String),
    /// Route resolution did not settle on a view.
    Navigation(String),
    /// The guard sent the user somewhere else. The notice has already been shown.
    Denied(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Api(err) => write!(f, "API Error: {}", err),
            AppError::Validation(err) => write!(f, "Validation Error: {}", err),
            AppError::Config(msg) => write!(f, "Configuration Error: {}", msg),
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
            AppError::Navigation(msg) => write!(f, "Navigation Error: {}", msg),
            AppError::Denied(msg) => write!(f, "Access Denied: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ApiError> for AppError {
    fn from(error: ApiError) -> AppError {
        AppError::Api(error)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error)
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> AppError {
        AppError::Storage(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> AppError {
        AppError::Storage(error.to_string())
    }
}
