// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod engine;
mod error;
mod extraction;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, AuthenticatedCaller, CALLER_HEADER, authenticate};
pub use engine::{ContractEngine, EngineError, EngineReceipt, StubEngine};
pub use error::{ApiError, translate_storage_error};
pub use extraction::{
    Confidence, DocumentExtractor, ExtractedFields, ExtractionResult, ExtractorError,
    FieldConfidence, StubExtractor, normalize_extraction,
};
pub use handlers::{
    ALLOWED_CONTENT_TYPES, MAX_UPLOAD_BYTES, extract_document, finalize_contract, load_draft,
    search_buyers, upload_document, upsert_draft,
};
pub use request_response::{
    BuyerSearchResponse, DocumentUpload, DraftLoadResponse, DraftUpsertRequest,
    DraftUpsertResponse, ExtractRequest, FinalizeRequest, FinalizeResponse, UploadResponse,
};
