// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the persisted-vs-ephemeral serialization boundary.

use super::helpers::fill_valid_draft;
use crate::{DraftStore, WizardStep};
use carsale_domain::DraftId;

#[test]
fn test_round_trip_preserves_draft_and_meta() {
    let mut store = DraftStore::new();
    fill_valid_draft(&mut store);
    store.mark_saved(
        DraftId::new(String::from("draft-1")),
        Some(String::from("2026-03-14T10:00:00Z")),
    );

    let restored = DraftStore::restore(store.to_persisted());

    assert_eq!(restored.draft(), store.draft());
    assert_eq!(restored.meta(), store.meta());
}

#[test]
fn test_restore_resets_session_flags() {
    let mut store = DraftStore::new();
    fill_valid_draft(&mut store);
    store.set_step(WizardStep::Price);
    store.mark_saving();
    assert!(store.session().is_dirty);

    let restored = DraftStore::restore(store.to_persisted());

    assert_eq!(restored.session().current_step, WizardStep::ContractInfo);
    assert!(!restored.session().is_dirty);
    assert!(!restored.session().is_saving);
    assert!(!restored.session().is_submitting);
}

#[test]
fn test_persisted_json_contains_no_session_state() {
    let mut store = DraftStore::new();
    fill_valid_draft(&mut store);
    store.set_step(WizardStep::Review);

    let json = serde_json::to_value(store.to_persisted()).unwrap();

    let top_level: Vec<&str> = json
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(top_level, vec!["draft", "meta"]);
}

#[test]
fn test_idempotency_key_survives_a_reload() {
    let mut store = DraftStore::new();
    fill_valid_draft(&mut store);
    let key = store.meta().idempotency_key.clone();

    let json = serde_json::to_string(&store.to_persisted()).unwrap();
    let restored = DraftStore::restore(serde_json::from_str(&json).unwrap());

    assert_eq!(restored.meta().idempotency_key, key);
}
