// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler functions for the boundary endpoints.
//!
//! Handlers are transport-agnostic: the HTTP server resolves the
//! caller, decodes the body, and maps `ApiError` to status codes.

use crate::auth::AuthenticatedCaller;
use crate::engine::ContractEngine;
use crate::error::{ApiError, translate_storage_error};
use crate::extraction::{DocumentExtractor, ExtractionResult, normalize_extraction};
use crate::request_response::{
    BuyerSearchResponse, DocumentUpload, DraftLoadResponse, DraftUpsertRequest,
    DraftUpsertResponse, ExtractRequest, FinalizeRequest, FinalizeResponse, UploadResponse,
};
use carsale_domain::{IdempotencyKey, validate_full_draft};
use carsale_storage::MemoryStorage;
use serde_json::Value;
use tracing::{debug, info};

/// Size bound for uploaded documents.
pub const MAX_UPLOAD_BYTES: usize = 15 * 1024 * 1024;

/// MIME types accepted by the upload endpoint.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] = [
    "application/pdf",
    "image/png",
    "image/jpeg",
    "image/webp",
];

/// Creates or updates a caller's draft row.
///
/// # Errors
///
/// Returns not-found for an unknown or foreign draft id; an update
/// never silently succeeds against another owner's row.
pub fn upsert_draft(
    storage: &mut MemoryStorage,
    caller: &AuthenticatedCaller,
    request: DraftUpsertRequest,
) -> Result<DraftUpsertResponse, ApiError> {
    let saved = storage
        .upsert_draft(&caller.id, request.id.as_deref(), request.payload)
        .map_err(translate_storage_error)?;
    debug!(draft_id = %saved.id, "draft saved");
    Ok(DraftUpsertResponse {
        id: saved.id,
        updated_at: saved.updated_at,
    })
}

/// Loads a caller's draft row for resume.
///
/// # Errors
///
/// Returns not-found for an unknown or foreign draft id.
pub fn load_draft(
    storage: &MemoryStorage,
    caller: &AuthenticatedCaller,
    draft_id: &str,
) -> Result<DraftLoadResponse, ApiError> {
    let record = storage
        .load_draft(&caller.id, draft_id)
        .map_err(translate_storage_error)?;
    Ok(DraftLoadResponse {
        id: record.id,
        payload: record.payload,
        status: record.status,
        updated_at: record.updated_at,
    })
}

/// Finalizes a draft through the workflow engine, at most once per
/// `(caller, idempotency_key)`.
///
/// A stored response for the pair is returned verbatim without
/// re-executing the irreversible action. The response is stored only
/// after the engine succeeded; a failed engine call leaves the key
/// unused so a retry can execute.
///
/// # Errors
///
/// Returns invalid-input for a short idempotency key, the field
/// errors for a draft that fails full validation, or an upstream
/// failure when the engine call does.
pub async fn finalize_contract<E: ContractEngine>(
    storage: &mut MemoryStorage,
    engine: &E,
    caller: &AuthenticatedCaller,
    request: FinalizeRequest,
) -> Result<Value, ApiError> {
    if request.idempotency_key.len() < IdempotencyKey::MIN_LENGTH {
        return Err(ApiError::InvalidInput {
            field: String::from("idempotency_key"),
            message: format!(
                "key must be at least {} characters",
                IdempotencyKey::MIN_LENGTH
            ),
        });
    }

    if let Some(stored) = storage.stored_response(&caller.id, &request.idempotency_key) {
        info!(key = %request.idempotency_key, "replaying stored finalize response");
        return Ok(stored.clone());
    }

    if let Err(errors) = validate_full_draft(&request.draft) {
        return Err(ApiError::ValidationFailed { errors });
    }

    let receipt = engine
        .execute(&caller.id, &request.draft)
        .await
        .map_err(|err| ApiError::UpstreamFailed {
            message: err.to_string(),
        })?;

    info!(contract_id = receipt.contract_id, "contract finalized");
    let response = serde_json::to_value(FinalizeResponse {
        success: true,
        contract_id: receipt.contract_id,
        pdf_url: receipt.pdf_url,
    })
    .map_err(|err| ApiError::Internal {
        message: format!("failed to encode finalize response: {err}"),
    })?;

    storage.store_response(&caller.id, &request.idempotency_key, response.clone());
    Ok(response)
}

/// Searches a caller's buyers with free text.
#[must_use]
pub fn search_buyers(
    storage: &MemoryStorage,
    caller: &AuthenticatedCaller,
    query: &str,
) -> BuyerSearchResponse {
    BuyerSearchResponse {
        buyers: storage.search_buyers(&caller.id, query),
    }
}

/// Extracts vehicle fields from an uploaded document, best-effort.
///
/// # Errors
///
/// Returns invalid-input for a malformed file URL or an upstream
/// failure when the extractor call does. Malformed extractor output
/// is not an error; it degrades to nulls with low confidence.
pub async fn extract_document<X: DocumentExtractor>(
    extractor: &X,
    caller: &AuthenticatedCaller,
    request: ExtractRequest,
) -> Result<ExtractionResult, ApiError> {
    if !request.file_url.starts_with("http://") && !request.file_url.starts_with("https://") {
        return Err(ApiError::InvalidInput {
            field: String::from("file_url"),
            message: String::from("must be an http(s) URL"),
        });
    }

    let raw = extractor
        .extract(&caller.id, &request.file_url)
        .await
        .map_err(|err| ApiError::UpstreamFailed {
            message: err.to_string(),
        })?;

    Ok(normalize_extraction(&raw))
}

/// Stores an uploaded document under a per-caller key.
///
/// # Errors
///
/// Returns unsupported-media-type outside the allow-list and
/// payload-too-large beyond the size bound.
pub fn upload_document(
    storage: &mut MemoryStorage,
    caller: &AuthenticatedCaller,
    upload: DocumentUpload,
) -> Result<UploadResponse, ApiError> {
    if !ALLOWED_CONTENT_TYPES.contains(&upload.content_type.as_str()) {
        return Err(ApiError::UnsupportedMediaType {
            content_type: upload.content_type,
        });
    }
    if upload.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::PayloadTooLarge {
            limit_bytes: MAX_UPLOAD_BYTES,
        });
    }

    let filename = if upload.filename.is_empty() {
        String::from("document")
    } else {
        upload.filename
    };
    let key = storage.store_file(&caller.id, &filename, &upload.content_type, upload.bytes);
    debug!(%key, "document stored");
    Ok(UploadResponse {
        success: true,
        file_url: format!("/api/documents/{key}"),
    })
}
