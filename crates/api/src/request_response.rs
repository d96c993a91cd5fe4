// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use carsale_domain::ContractDraft;
use carsale_storage::BuyerRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request body of the draft upsert endpoint.
///
/// The payload is stored opaquely: the autosave path never validates
/// draft content, because it is not the irreversible action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftUpsertRequest {
    /// Remote draft id; `null` means "create".
    pub id: Option<String>,
    /// The draft payload.
    pub payload: Value,
}

/// Response body of the draft upsert endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftUpsertResponse {
    /// The (possibly newly assigned) draft id.
    pub id: String,
    /// Server timestamp of this save.
    pub updated_at: String,
}

/// Response body of the draft load endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftLoadResponse {
    /// The draft id.
    pub id: String,
    /// The stored payload, as last saved.
    pub payload: Value,
    /// The stored row status.
    pub status: String,
    /// Timestamp of the last save.
    pub updated_at: String,
}

/// Request body of the finalize endpoint.
///
/// The draft travels inline at the top level, plus the client's
/// stable idempotency key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizeRequest {
    /// The full structured draft.
    #[serde(flatten)]
    pub draft: ContractDraft,
    /// The per-draft finalize token (minimum length enforced).
    pub idempotency_key: String,
}

/// Response body of a successful finalize.
///
/// Stored verbatim per `(caller, idempotency_key)` and replayed for
/// duplicate submissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalizeResponse {
    /// Always true for a stored response.
    pub success: bool,
    /// Identifier of the finalized contract.
    pub contract_id: i64,
    /// URL of the generated contract PDF.
    pub pdf_url: String,
}

/// Response body of the buyer search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerSearchResponse {
    /// Candidate buyers, ordered by name, capped.
    pub buyers: Vec<BuyerRecord>,
}

/// Request body of the document extraction endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractRequest {
    /// URL of the uploaded document to extract from.
    pub file_url: String,
}

/// One uploaded document as received by the upload handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    /// Original filename, as provided by the client.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: String,
    /// Document bytes.
    pub bytes: Vec<u8>,
}

/// Response body of the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Always true on success.
    pub success: bool,
    /// Retrievable URL of the stored document.
    pub file_url: String,
}
