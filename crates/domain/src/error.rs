// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::meta::DraftStatus;

/// Errors that can occur on domain-level invariants.
///
/// Field-level validation failures are not errors in this sense; they
/// are data (`FieldErrors`) surfaced back to the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A status string could not be parsed.
    InvalidStatus(String),
    /// A status transition violated the forward-only lifecycle.
    InvalidStatusTransition {
        /// The current status.
        from: DraftStatus,
        /// The requested status.
        to: DraftStatus,
    },
    /// An idempotency key was shorter than the enforced minimum.
    IdempotencyKeyTooShort {
        /// The rejected key's length.
        length: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStatus(value) => write!(f, "Unknown draft status '{value}'"),
            Self::InvalidStatusTransition { from, to } => {
                write!(f, "Draft status cannot move from '{from}' to '{to}'")
            }
            Self::IdempotencyKeyTooShort { length } => {
                write!(
                    f,
                    "Idempotency key too short: {length} characters, minimum is {}",
                    crate::meta::IdempotencyKey::MIN_LENGTH
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
