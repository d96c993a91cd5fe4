// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Caller identity resolution.
//!
//! Every boundary operation is scoped to an authenticated caller.
//! The caller id arrives in a trusted header set by the fronting
//! session middleware; a request without a resolvable identity is
//! rejected before it touches storage.

/// The trusted header carrying the authenticated caller id.
pub const CALLER_HEADER: &str = "x-carsale-user";

/// An authenticated caller.
///
/// Callers own their drafts, buyers, uploads, and idempotency
/// records; no operation crosses owners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedCaller {
    /// The caller's unique identifier.
    pub id: String,
}

impl AuthenticatedCaller {
    /// Creates an authenticated caller.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self { id }
    }
}

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No resolvable caller identity on the request.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Resolves the caller from the trusted header value.
///
/// # Errors
///
/// Returns an error when the header is absent or blank.
pub fn authenticate(header_value: Option<&str>) -> Result<AuthenticatedCaller, AuthError> {
    match header_value.map(str::trim) {
        Some(id) if !id.is_empty() => Ok(AuthenticatedCaller::new(id.to_string())),
        _ => Err(AuthError::AuthenticationFailed {
            reason: format!("missing or empty {CALLER_HEADER} header"),
        }),
    }
}
