//! Unified application error types for Bazaar.
//!
//! Every crate maps its failures into [`AppError`] so they propagate through
//! the `?` operator. The [`ErrorKind`] is the contract between the core and
//! the HTTP gateway; the message is context for logs and clients.

use std::fmt;
use thiserror::Error;

/// Error categories shared by the whole workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// Caller-supplied data is malformed or out of range.
    InvalidInput,
    /// A new password does not satisfy the strength policy.
    WeakCredential,
    /// A uniqueness rule was violated.
    Conflict,
    /// A referenced entity does not exist.
    NotFound,
    /// The request carries no usable credential.
    Unauthenticated,
    /// The credential is valid but does not grant the operation.
    Unauthorized,
    /// The caller is not the owner of the targeted resource.
    Forbidden,
    /// A request parameter could not be interpreted at all.
    BadRequest,
    /// A password did not match the stored hash.
    CredentialMismatch,
    /// A stored password hash is not in a recognized format.
    CredentialMalformed,
    /// A token could not be parsed.
    TokenMalformed,
    /// A token MAC does not verify or uses an unexpected algorithm.
    TokenSignatureInvalid,
    /// A token is past its embedded expiry.
    TokenExpired,
    /// A token's identity claim is missing or not an identifier.
    TokenClaimInvalid,
    /// A backing store failed.
    Store,
    /// Configuration could not be loaded or is invalid.
    Configuration,
    /// JSON (de)serialization failed.
    Serialization,
    /// Anything else that should never happen.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::InvalidInput => "INVALID_INPUT",
            Self::WeakCredential => "WEAK_CREDENTIAL",
            Self::Conflict => "CONFLICT",
            Self::NotFound => "NOT_FOUND",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::BadRequest => "BAD_REQUEST",
            Self::CredentialMismatch => "CREDENTIAL_MISMATCH",
            Self::CredentialMalformed => "CREDENTIAL_MALFORMED",
            Self::TokenMalformed => "TOKEN_MALFORMED",
            Self::TokenSignatureInvalid => "TOKEN_SIGNATURE_INVALID",
            Self::TokenExpired => "TOKEN_EXPIRED",
            Self::TokenClaimInvalid => "TOKEN_CLAIM_INVALID",
            Self::Store => "STORE",
            Self::Configuration => "CONFIGURATION",
            Self::Serialization => "SERIALIZATION",
            Self::Internal => "INTERNAL",
        };
        f.write_str(code)
    }
}

/// The unified application error used throughout Bazaar.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Re-label this error with another kind, keeping the original as the source.
    pub fn wrap(self, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(self)),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub fn weak_credential(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::WeakCredential, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthenticated, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message)
    }

    /// Create a store failure wrapping the collaborator's error.
    pub fn store(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::with_source(ErrorKind::Store, message, source)
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::with_source(ErrorKind::Internal, format!("I/O error: {err}"), err)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}
