// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::auth::AuthError;
use carsale_domain::FieldErrors;
use carsale_storage::StorageError;

/// API-level errors.
///
/// These are distinct from domain/storage errors and represent the
/// API contract; internals are never leaked through them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The draft payload failed full validation before finalize.
    ValidationFailed {
        /// Field-keyed machine-readable error codes.
        errors: FieldErrors,
    },
    /// A requested resource was not found for this caller.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An upload exceeded the size bound.
    PayloadTooLarge {
        /// The enforced bound in bytes.
        limit_bytes: usize,
    },
    /// An upload had a MIME type outside the allow-list.
    UnsupportedMediaType {
        /// The rejected content type.
        content_type: String,
    },
    /// A downstream collaborator failed; nothing was recorded.
    UpstreamFailed {
        /// A human-readable description of the failure.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ValidationFailed { errors } => {
                write!(f, "Draft validation failed on {} field(s)", errors.len())
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::PayloadTooLarge { limit_bytes } => {
                write!(f, "Payload exceeds the {limit_bytes}-byte limit")
            }
            Self::UnsupportedMediaType { content_type } => {
                write!(f, "Unsupported media type '{content_type}'")
            }
            Self::UpstreamFailed { message } => {
                write!(f, "Upstream failure: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
        }
    }
}

/// Translates a storage error into an API error.
///
/// This translation is explicit and ensures storage internals are not
/// leaked directly.
#[must_use]
pub fn translate_storage_error(err: StorageError) -> ApiError {
    match err {
        StorageError::DraftNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Draft"),
            message: format!("Draft '{id}' does not exist"),
        },
        StorageError::FileNotFound(key) => ApiError::ResourceNotFound {
            resource_type: String::from("Document"),
            message: format!("Document '{key}' does not exist"),
        },
    }
}
