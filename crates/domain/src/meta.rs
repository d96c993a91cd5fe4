// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle state of a contract draft.
///
/// The status only moves forward: draft → submitted → completed.
/// A recoverable finalize failure leaves the status at `Submitted`
/// (the draft stays retryable under the same idempotency key); it
/// never returns to `Draft` under a new key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    /// Editable draft, no finalize attempt yet.
    #[default]
    Draft,
    /// A finalize call has been issued at least once.
    Submitted,
    /// The irreversible action has run. Terminal.
    Completed,
}

impl DraftStatus {
    /// Converts this status to its wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Submitted => "submitted",
            Self::Completed => "completed",
        }
    }

    /// Checks whether a transition from this status to another is valid.
    ///
    /// Valid transitions are draft → submitted and submitted → completed.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Submitted) | (Self::Submitted, Self::Completed)
        )
    }

    /// Returns whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

impl FromStr for DraftStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "submitted" => Ok(Self::Submitted),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifier of a remotely persisted draft row.
///
/// Assigned by the draft persistence endpoint on the first successful
/// save; absent until then.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraftId(String);

impl DraftId {
    /// Wraps a server-assigned draft identifier.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DraftId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A client-generated token that makes the finalize action safe to
/// retry.
///
/// Invariant: the key is minted once per draft lifetime and never
/// regenerated while the draft is open. Regenerating it would break
/// the at-most-once guarantee of the finalize gateway.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Minimum key length the finalize endpoint accepts.
    pub const MIN_LENGTH: usize = 8;

    /// Mints a fresh key for a brand-new draft.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps an existing key value (e.g. restored from persistence).
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the key value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Draft lifecycle metadata, disjoint from the editable fields.
///
/// Used for persistence, idempotency, and safe retry. Never holds
/// form data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDraftMeta {
    /// Remote draft row id, once the first autosave succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft_id: Option<DraftId>,
    /// Lifecycle status of the draft.
    pub status: DraftStatus,
    /// Stable per-draft finalize token.
    pub idempotency_key: IdempotencyKey,
    /// Identifier of the finalized contract, once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finalized_contract_id: Option<i64>,
    /// URL of the generated contract PDF, once completed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    /// Server timestamp of the last acknowledged save.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl ContractDraftMeta {
    /// Creates metadata for a brand-new draft with a fresh idempotency
    /// key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft_id: None,
            status: DraftStatus::Draft,
            idempotency_key: IdempotencyKey::generate(),
            finalized_contract_id: None,
            pdf_url: None,
            updated_at: None,
        }
    }
}

impl Default for ContractDraftMeta {
    fn default() -> Self {
        Self::new()
    }
}
