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
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use carsale_api::{
    ApiError, AuthenticatedCaller, CALLER_HEADER, DocumentUpload, DraftUpsertRequest,
    ExtractRequest, FinalizeRequest, MAX_UPLOAD_BYTES, StubEngine, StubExtractor, authenticate,
    extract_document, finalize_contract, load_draft, search_buyers, upload_document, upsert_draft,
};
use carsale_domain::FieldErrors;
use carsale_storage::{MemoryStorage, NewBuyer};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Carsale Server - HTTP boundary for the contract draft system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Seed a demo caller with a few buyers for manual testing
    #[arg(long)]
    seed_demo_buyers: bool,
}

/// Application state shared across handlers.
///
/// The storage lock is held across the engine call in the finalize
/// handler, which serializes executions per process and keeps the
/// at-most-once guarantee airtight for duplicate submits.
#[derive(Clone)]
struct AppState {
    storage: Arc<Mutex<MemoryStorage>>,
    engine: Arc<StubEngine>,
    extractor: Arc<StubExtractor>,
}

/// Error body returned for every failed request.
#[derive(Debug, Clone, Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

fn error_response(err: ApiError) -> Response {
    let status = match err {
        ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
        ApiError::InvalidInput { .. } | ApiError::ValidationFailed { .. } => {
            StatusCode::BAD_REQUEST
        }
        ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        ApiError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        ApiError::UpstreamFailed { .. } => StatusCode::BAD_GATEWAY,
        ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let errors = match &err {
        ApiError::ValidationFailed { errors } => Some(errors.clone()),
        _ => None,
    };

    let body = ErrorBody {
        success: false,
        error: err.to_string(),
        errors,
    };
    (status, Json(body)).into_response()
}

fn resolve_caller(headers: &HeaderMap) -> Result<AuthenticatedCaller, Response> {
    let header_value = headers
        .get(CALLER_HEADER)
        .and_then(|value| value.to_str().ok());
    authenticate(header_value).map_err(|err| error_response(ApiError::from(err)))
}

/// POST /api/contracts/draft
///
/// The body is read as text and parsed manually: the unload path
/// sends beacons with a text/plain content type, which the `Json`
/// extractor would reject.
async fn upsert_draft_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Response {
    let caller = match resolve_caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };
    let request: DraftUpsertRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(err) => {
            return error_response(ApiError::InvalidInput {
                field: String::from("body"),
                message: format!("invalid request body: {err}"),
            });
        }
    };

    let mut storage = state.storage.lock().await;
    match upsert_draft(&mut storage, &caller, request) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(err),
    }
}

/// GET /api/contracts/draft/{id}
async fn load_draft_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    let caller = match resolve_caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    let storage = state.storage.lock().await;
    match load_draft(&storage, &caller, &id) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /api/contracts/finalize
async fn finalize_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<FinalizeRequest>,
) -> Response {
    let caller = match resolve_caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    // Lock held across the engine call: duplicate submits wait here
    // and then observe the stored response.
    let mut storage = state.storage.lock().await;
    match finalize_contract(&mut storage, state.engine.as_ref(), &caller, request).await {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(err),
    }
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

/// GET /api/buyers/search?q=
async fn search_buyers_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> Response {
    let caller = match resolve_caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    let storage = state.storage.lock().await;
    Json(search_buyers(&storage, &caller, &params.q)).into_response()
}

/// POST /api/documents/extract
async fn extract_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ExtractRequest>,
) -> Response {
    let caller = match resolve_caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    match extract_document(state.extractor.as_ref(), &caller, request).await {
        Ok(result) => Json(result).into_response(),
        Err(err) => error_response(err),
    }
}

/// POST /api/documents/upload (multipart, `file` field)
async fn upload_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let caller = match resolve_caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = match field.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(err) => {
                return error_response(ApiError::InvalidInput {
                    field: String::from("file"),
                    message: format!("could not read file field: {err}"),
                });
            }
        };

        let mut storage = state.storage.lock().await;
        return match upload_document(
            &mut storage,
            &caller,
            DocumentUpload {
                filename,
                content_type,
                bytes,
            },
        ) {
            Ok(response) => Json(response).into_response(),
            Err(err) => error_response(err),
        };
    }

    error_response(ApiError::InvalidInput {
        field: String::from("file"),
        message: String::from("missing file field"),
    })
}

/// GET /api/documents/{owner}/{file}
async fn document_route(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((owner, file)): Path<(String, String)>,
) -> Response {
    let caller = match resolve_caller(&headers) {
        Ok(caller) => caller,
        Err(response) => return response,
    };

    let key = format!("{owner}/{file}");
    let storage = state.storage.lock().await;
    if !storage.file_owner_is(&key, &caller.id) {
        return error_response(ApiError::ResourceNotFound {
            resource_type: String::from("Document"),
            message: format!("Document '{key}' does not exist"),
        });
    }
    match storage.load_file(&key) {
        Ok(stored) => {
            ([(header::CONTENT_TYPE, stored.content_type)], stored.bytes).into_response()
        }
        Err(err) => error_response(carsale_api::translate_storage_error(err)),
    }
}

fn seed_demo_buyers(storage: &mut MemoryStorage) {
    let demo = "demo";
    storage.add_buyer(
        demo,
        NewBuyer {
            full_name: String::from("Maria Ionescu"),
            street: String::from("Strada Lunga"),
            street_no: Some(String::from("14A")),
            zip: String::from("400100"),
            city: String::from("Cluj-Napoca"),
            phone: String::from("+40 712 345 678"),
            email: Some(String::from("maria@example.com")),
            document_number: Some(String::from("RX123456")),
            document_authority: Some(String::from("SPCLEP Cluj")),
        },
    );
    storage.add_buyer(
        demo,
        NewBuyer {
            full_name: String::from("Andrei Popescu"),
            street: String::from("Bulevardul Unirii"),
            zip: String::from("030833"),
            city: String::from("Bucuresti"),
            phone: String::from("+40 722 000 111"),
            ..NewBuyer::default()
        },
    );
    info!("seeded demo buyers for caller 'demo'");
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/contracts/draft", post(upsert_draft_route))
        .route("/api/contracts/draft/{id}", get(load_draft_route))
        .route("/api/contracts/finalize", post(finalize_route))
        .route("/api/buyers/search", get(search_buyers_route))
        .route("/api/documents/extract", post(extract_route))
        .route("/api/documents/upload", post(upload_route))
        .route("/api/documents/{owner}/{file}", get(document_route))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut storage = MemoryStorage::new();
    if args.seed_demo_buyers {
        seed_demo_buyers(&mut storage);
    }

    let state = AppState {
        storage: Arc::new(Mutex::new(storage)),
        engine: Arc::new(StubEngine::new()),
        extractor: Arc::new(StubExtractor::default()),
    };

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind((args.bind, args.port)).await?;
    info!("carsale server listening on {}:{}", args.bind, args.port);
    axum::serve(listener, app).await?;

    Ok(())
}
