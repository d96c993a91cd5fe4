// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Virtual-time tests for the autosave debounce, flush, and
//! stale-write behavior.

use super::helpers::{FailingTransport, GatedTransport, RecordingTransport};
use crate::{AutosaveCoordinator, EditSignal, SharedDraftStore};
use std::time::Duration;

fn edit_price(store: &SharedDraftStore, price: f64) {
    store.with(|s| s.update_price(price)).unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_one_save_fires_after_the_quiet_period() {
    let (signal, edits) = EditSignal::channel();
    let store = SharedDraftStore::default();
    let transport = RecordingTransport::new();
    let mut coordinator = AutosaveCoordinator::new(store.clone(), transport.clone(), edits);

    edit_price(&store, 100.0);
    signal.notify();

    tokio::select! {
        () = coordinator.run() => {}
        () = tokio::time::sleep(Duration::from_secs(10)) => {}
    }

    assert_eq!(transport.calls(), 1);
    store.with(|s| {
        assert!(!s.session().is_dirty);
        assert!(!s.session().is_saving);
        assert_eq!(s.meta().draft_id.as_ref().unwrap().value(), "draft-remote-1");
        assert_eq!(
            s.meta().updated_at.as_deref(),
            Some("2026-03-14T10:00:00Z")
        );
    });
}

#[tokio::test(start_paused = true)]
async fn test_an_edit_inside_the_window_resets_the_timer() {
    let (signal, edits) = EditSignal::channel();
    let store = SharedDraftStore::default();
    let transport = RecordingTransport::new();
    let mut coordinator = AutosaveCoordinator::new(store.clone(), transport.clone(), edits);

    edit_price(&store, 100.0);
    signal.notify();

    // Two seconds in, another edit lands: the window restarts.
    let driver = async {
        tokio::time::sleep(Duration::from_secs(2)).await;
        edit_price(&store, 200.0);
        signal.notify();
        // Two more seconds: four since the first edit, two since the
        // second. Nothing may have fired yet.
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(transport.calls(), 0);
        // Let the restarted window elapse.
        tokio::time::sleep(Duration::from_secs(2)).await;
    };

    tokio::select! {
        () = coordinator.run() => {}
        () = driver => {}
    }

    assert_eq!(transport.calls(), 1);
    let request = transport.last_request().unwrap();
    assert!((request.payload.price - 200.0).abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn test_no_save_fires_while_the_draft_is_clean() {
    let (signal, edits) = EditSignal::channel();
    let store = SharedDraftStore::default();
    let transport = RecordingTransport::new();
    let mut coordinator = AutosaveCoordinator::new(store.clone(), transport.clone(), edits);

    // Signal without an actual edit: the store never became dirty.
    signal.notify();

    tokio::select! {
        () = coordinator.run() => {}
        () = tokio::time::sleep(Duration::from_secs(10)) => {}
    }

    assert_eq!(transport.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_flush_delivers_before_the_window_elapses() {
    let (signal, edits) = EditSignal::channel();
    let store = SharedDraftStore::default();
    let transport = RecordingTransport::new();
    let mut coordinator = AutosaveCoordinator::new(store.clone(), transport.clone(), edits);

    edit_price(&store, 100.0);
    signal.notify();

    // Teardown one second after the edit, before the debounce fires:
    // the scheduled save is cancelled with the run future.
    tokio::select! {
        () = coordinator.run() => {}
        () = tokio::time::sleep(Duration::from_secs(1)) => {}
    }
    assert_eq!(transport.calls(), 0);

    // The unload path still delivers the latest payload.
    coordinator.flush().await;

    assert_eq!(transport.calls(), 1);
    let request = transport.last_request().unwrap();
    assert!((request.payload.price - 100.0).abs() < f64::EPSILON);
}

#[tokio::test(start_paused = true)]
async fn test_flush_skips_a_clean_draft() {
    let (_signal, edits) = EditSignal::channel();
    let store = SharedDraftStore::default();
    let transport = RecordingTransport::new();
    let coordinator = AutosaveCoordinator::new(store, transport.clone(), edits);

    coordinator.flush().await;

    assert_eq!(transport.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_save_failure_is_silent_and_the_next_edit_retries() {
    let (signal, edits) = EditSignal::channel();
    let store = SharedDraftStore::default();
    let transport = FailingTransport::new();
    let mut coordinator = AutosaveCoordinator::new(store.clone(), transport.clone(), edits);

    let driver = async {
        edit_price(&store, 100.0);
        signal.notify();
        tokio::time::sleep(Duration::from_secs(5)).await;

        // First attempt failed; the draft must still be dirty and
        // unlocked so the next edit can retry.
        assert_eq!(transport.calls(), 1);
        store.with(|s| {
            assert!(s.session().is_dirty);
            assert!(!s.session().is_saving);
            assert!(s.meta().draft_id.is_none());
        });

        edit_price(&store, 200.0);
        signal.notify();
        tokio::time::sleep(Duration::from_secs(5)).await;
    };

    tokio::select! {
        () = coordinator.run() => {}
        () = driver => {}
    }

    assert_eq!(transport.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_a_save_for_a_superseded_draft_is_discarded() {
    let (signal, edits) = EditSignal::channel();
    let store = SharedDraftStore::default();
    let transport = GatedTransport::new();
    let mut coordinator = AutosaveCoordinator::new(store.clone(), transport.clone(), edits);

    let driver = async {
        edit_price(&store, 100.0);
        signal.notify();

        // Let the debounce elapse so the save goes in flight (the
        // gated transport holds it open).
        tokio::time::sleep(Duration::from_secs(4)).await;
        assert_eq!(transport.calls(), 1);

        // The user starts over while the save is still in flight.
        store.with(carsale::DraftStore::reset);

        // The late response must not write into the new draft.
        transport.release_one();
        tokio::time::sleep(Duration::from_secs(1)).await;

        store.with(|s| {
            assert!(s.meta().draft_id.is_none());
            assert!(!s.session().is_dirty);
        });
    };

    tokio::select! {
        () = coordinator.run() => {}
        () = driver => {}
    }
}
