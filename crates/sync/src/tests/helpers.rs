// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fake transports and store fixtures for coordinator tests.

use crate::{DraftTransport, SaveRequest, SavedDraft, TransportError};
use carsale_domain::DraftId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Records every save request and answers with a fixed draft id.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    requests: Arc<Mutex<Vec<SaveRequest>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<SaveRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl DraftTransport for RecordingTransport {
    async fn save(&self, request: SaveRequest) -> Result<SavedDraft, TransportError> {
        self.requests.lock().unwrap().push(request);
        Ok(SavedDraft {
            id: DraftId::new(String::from("draft-remote-1")),
            updated_at: Some(String::from("2026-03-14T10:00:00Z")),
        })
    }
}

/// Fails every save with a network error.
#[derive(Debug, Clone, Default)]
pub struct FailingTransport {
    calls: Arc<AtomicUsize>,
}

impl FailingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DraftTransport for FailingTransport {
    async fn save(&self, _request: SaveRequest) -> Result<SavedDraft, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::Network(String::from("connection refused")))
    }
}

/// Holds each save until the test releases it.
#[derive(Debug, Clone, Default)]
pub struct GatedTransport {
    release: Arc<Notify>,
    calls: Arc<AtomicUsize>,
}

impl GatedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn release_one(&self) {
        self.release.notify_one();
    }
}

impl DraftTransport for GatedTransport {
    async fn save(&self, _request: SaveRequest) -> Result<SavedDraft, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release.notified().await;
        Ok(SavedDraft {
            id: DraftId::new(String::from("draft-remote-1")),
            updated_at: None,
        })
    }
}
