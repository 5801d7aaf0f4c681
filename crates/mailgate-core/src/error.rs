//! Shared error type across mailgate crates.

use thiserror::Error;

/// Fixed client message for addresses without a usable domain.
pub const MALFORMED_EMAIL_MESSAGE: &str = "Invalid email address format.";

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input or a policy denial.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MailgateError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum MailgateError {
    /// No domain could be extracted from the submitted address.
    #[error("invalid email address format")]
    MalformedEmail,
    /// A policy rule rejected the domain. Carries the configured deny message.
    #[error("policy denied: {0}")]
    PolicyDenied(String),
    /// The custom validator failed (or timed out) instead of answering.
    #[error("validator failure: {0}")]
    ValidatorFailure(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl MailgateError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MailgateError::MalformedEmail => ClientCode::BadRequest,
            MailgateError::PolicyDenied(_) => ClientCode::BadRequest,
            MailgateError::ValidatorFailure(_) => ClientCode::Internal,
            MailgateError::BadRequest(_) => ClientCode::BadRequest,
            MailgateError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            MailgateError::Internal(_) => ClientCode::Internal,
        }
    }

    /// Message that is safe to show to the caller.
    ///
    /// Internal failures are collapsed to a generic message; the detail stays
    /// in the logs.
    pub fn client_message(&self) -> String {
        match self {
            MailgateError::MalformedEmail => MALFORMED_EMAIL_MESSAGE.to_string(),
            MailgateError::PolicyDenied(msg) => msg.clone(),
            MailgateError::BadRequest(msg) => msg.clone(),
            MailgateError::UnsupportedVersion => "unsupported config version".to_string(),
            MailgateError::ValidatorFailure(_) | MailgateError::Internal(_) => {
                "internal error".to_string()
            }
        }
    }
}
