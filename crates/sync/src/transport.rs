// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use carsale_domain::{ContractDraft, DraftId};
use serde::Serialize;

/// The body of one draft save.
///
/// A `None` id means "create"; a present id means "update this
/// draft, scoped to the owning user".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveRequest {
    /// Remote draft id, once one was assigned.
    pub id: Option<DraftId>,
    /// The full draft payload.
    pub payload: ContractDraft,
}

/// A successful save acknowledgement from the draft endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDraft {
    /// The (possibly newly assigned) remote draft id.
    pub id: DraftId,
    /// Server timestamp of the save, when provided.
    pub updated_at: Option<String>,
}

/// Failures of a draft save attempt.
///
/// All of these are swallowed by the coordinator: autosave never
/// surfaces a blocking error, because the next edit naturally
/// retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("network failure: {0}")]
    Network(String),
    /// The endpoint rejected the save.
    #[error("save rejected with status {status}")]
    Rejected {
        /// HTTP-level status of the rejection.
        status: u16,
    },
    /// The referenced draft does not exist for this caller.
    #[error("draft not found")]
    NotFound,
}

/// The remote draft endpoint, as seen by the autosave coordinator.
///
/// This is the non-idempotency-keyed upsert path; it is never the
/// irreversible action.
pub trait DraftTransport: Send + Sync {
    /// Persists one draft snapshot.
    fn save(
        &self,
        request: SaveRequest,
    ) -> impl Future<Output = Result<SavedDraft, TransportError>> + Send;
}
