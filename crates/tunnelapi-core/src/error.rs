//! Shared error type across tunnelapi crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
///
/// Parameter failures deliberately share one code so the client never learns
/// which check rejected the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientCode {
    /// Malformed request body or configuration.
    BadRequest,
    /// Request name is not part of the API.
    UnknownRequest,
    /// A parameter was missing, of the wrong type, or failed validation.
    InvalidParams,
    /// Request body exceeds the transport ceiling.
    PayloadTooLarge,
    /// Unsupported configuration version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in response bodies and metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnknownRequest => "UNKNOWN_REQUEST",
            ClientCode::InvalidParams => "INVALID_PARAMS",
            ClientCode::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Unified error type used by core and gateway.
///
/// The param variants keep the offending field name for diagnostics only;
/// transports must surface [`ApiError::client_code`] instead of the message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("decode failed: {0}")]
    Decode(String),
    #[error("invalid request name: {0}")]
    UnknownRequest(String),
    #[error("missing required param: {0}")]
    MissingParam(String),
    #[error("unexpected param type: {0}")]
    TypeMismatch(String),
    #[error("invalid param: {0}")]
    InvalidParam(String),
    #[error("payload too large")]
    PayloadTooLarge,
    #[error("invalid config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl ApiError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            ApiError::Decode(_) | ApiError::Config(_) => ClientCode::BadRequest,
            ApiError::UnknownRequest(_) => ClientCode::UnknownRequest,
            ApiError::MissingParam(_) | ApiError::TypeMismatch(_) | ApiError::InvalidParam(_) => {
                ClientCode::InvalidParams
            }
            ApiError::PayloadTooLarge => ClientCode::PayloadTooLarge,
            ApiError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            ApiError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Name of the offending parameter, if this is a param failure.
    pub fn param_name(&self) -> Option<&str> {
        match self {
            ApiError::MissingParam(name)
            | ApiError::TypeMismatch(name)
            | ApiError::InvalidParam(name) => Some(name),
            _ => None,
        }
    }
}
