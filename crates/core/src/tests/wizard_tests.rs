// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for wizard step gating and the finalize flow.

use super::helpers::{create_store_on_review, fill_valid_draft};
use crate::{
    CoreError, DraftStore, FinalizeReceipt, GatewayError, NextOutcome, Screen, WizardController,
    WizardStep,
};
use carsale_domain::{DraftStatus, codes};

fn receipt() -> FinalizeReceipt {
    FinalizeReceipt {
        contract_id: 77,
        pdf_url: String::from("https://contracts.example/pdf/77.pdf"),
    }
}

// ============================================================================
// Step Navigation Tests
// ============================================================================

#[test]
fn test_next_rejects_an_invalid_step_and_stays() {
    let mut store = DraftStore::new();
    let mut wizard = WizardController::new();

    let outcome = wizard.next(&mut store).unwrap();

    assert_eq!(outcome, NextOutcome::Invalid);
    assert_eq!(store.session().current_step, WizardStep::ContractInfo);
    assert_eq!(
        wizard.errors().get("contract.number"),
        Some(codes::REQUIRED)
    );
}

#[test]
fn test_next_advances_through_all_steps_when_valid() {
    let mut store = DraftStore::new();
    fill_valid_draft(&mut store);
    let mut wizard = WizardController::new();

    for expected in [
        WizardStep::Vehicle,
        WizardStep::Buyer,
        WizardStep::Price,
        WizardStep::Review,
    ] {
        let outcome = wizard.next(&mut store).unwrap();
        assert_eq!(outcome, NextOutcome::Advanced(expected));
        assert!(wizard.errors().is_empty());
    }
    assert_eq!(store.session().current_step, WizardStep::Review);
}

#[test]
fn test_back_clears_errors_and_steps_back() {
    let mut store = DraftStore::new();
    fill_valid_draft(&mut store);
    store.update_price(0.0).unwrap();
    store.set_step(WizardStep::Price);
    let mut wizard = WizardController::new();
    assert_eq!(wizard.next(&mut store).unwrap(), NextOutcome::Invalid);
    assert!(!wizard.errors().is_empty());

    wizard.back(&mut store);

    assert!(wizard.errors().is_empty());
    assert_eq!(store.session().current_step, WizardStep::Buyer);
}

#[test]
fn test_back_is_clamped_at_the_first_step() {
    let mut store = DraftStore::new();
    let mut wizard = WizardController::new();

    wizard.back(&mut store);

    assert_eq!(store.session().current_step, WizardStep::ContractInfo);
}

#[test]
fn test_edit_section_jumps_from_review_without_validation() {
    let mut store = create_store_on_review();
    // Make the draft invalid; the jump must still succeed.
    store.update_price(0.0).unwrap();
    let mut wizard = WizardController::new();

    wizard.edit_section(&mut store, WizardStep::Vehicle).unwrap();

    assert_eq!(store.session().current_step, WizardStep::Vehicle);
}

#[test]
fn test_edit_section_is_rejected_outside_review() {
    let mut store = DraftStore::new();
    let mut wizard = WizardController::new();

    let result = wizard.edit_section(&mut store, WizardStep::Buyer);

    assert_eq!(result.unwrap_err(), CoreError::SectionEditOutsideReview);
}

// ============================================================================
// Finalize Flow Tests
// ============================================================================

#[test]
fn test_finalize_with_invalid_draft_makes_no_payload() {
    let mut store = create_store_on_review();
    store.update_price(0.0).unwrap();
    let mut wizard = WizardController::new();

    let outcome = wizard.next(&mut store).unwrap();

    assert_eq!(outcome, NextOutcome::Invalid);
    assert_eq!(wizard.errors().get("price"), Some(codes::MUST_BE_POSITIVE));
    // No submitting state was entered, so editing is still open.
    assert!(!store.session().is_submitting);
    assert_eq!(store.meta().status, DraftStatus::Draft);
}

#[test]
fn test_finalize_payload_snapshots_draft_and_key() {
    let mut store = create_store_on_review();
    let mut wizard = WizardController::new();

    let NextOutcome::FinalizeStarted(payload) = wizard.next(&mut store).unwrap() else {
        panic!("expected finalize to start");
    };

    assert_eq!(&payload.draft, store.draft());
    assert_eq!(payload.idempotency_key, store.meta().idempotency_key);
    assert!(store.session().is_submitting);
    assert_eq!(store.meta().status, DraftStatus::Submitted);
}

#[test]
fn test_finalize_success_reaches_the_terminal_screen() {
    let mut store = create_store_on_review();
    let mut wizard = WizardController::new();
    let _payload = wizard.begin_finalize(&mut store).unwrap();

    wizard.complete_finalize(&mut store, Ok(receipt()));

    assert_eq!(store.meta().status, DraftStatus::Completed);
    assert_eq!(
        wizard.screen(&store),
        Screen::Completed {
            pdf_url: Some(String::from("https://contracts.example/pdf/77.pdf")),
        }
    );
}

#[test]
fn test_terminal_screen_wins_regardless_of_step_index() {
    let mut store = create_store_on_review();
    let mut wizard = WizardController::new();
    let _payload = wizard.begin_finalize(&mut store).unwrap();
    wizard.complete_finalize(&mut store, Ok(receipt()));

    store.set_step(WizardStep::Buyer);

    assert!(matches!(wizard.screen(&store), Screen::Completed { .. }));
    assert_eq!(wizard.next(&mut store).unwrap_err(), CoreError::DraftCompleted);
}

#[test]
fn test_recoverable_failure_keeps_key_and_allows_retry() {
    let mut store = create_store_on_review();
    let mut wizard = WizardController::new();
    let first = wizard.begin_finalize(&mut store).unwrap();

    wizard.complete_finalize(
        &mut store,
        Err(GatewayError::Network(String::from("timeout"))),
    );

    assert_eq!(wizard.fatal_error(), Some("errors.network"));
    assert_eq!(store.meta().status, DraftStatus::Submitted);
    assert!(!store.session().is_submitting);

    let second = wizard.begin_finalize(&mut store).unwrap();
    assert_eq!(second.idempotency_key, first.idempotency_key);
    // Starting a retry clears the banner.
    assert!(wizard.fatal_error().is_none());
}

#[test]
fn test_rejection_code_is_surfaced_and_dismissible() {
    let mut store = create_store_on_review();
    let mut wizard = WizardController::new();
    let _payload = wizard.begin_finalize(&mut store).unwrap();

    wizard.complete_finalize(
        &mut store,
        Err(GatewayError::Rejected {
            error: Some(String::from("errors.engineDown")),
        }),
    );
    assert_eq!(wizard.fatal_error(), Some("errors.engineDown"));

    wizard.dismiss_fatal_error();
    assert!(wizard.fatal_error().is_none());
}

#[test]
fn test_rejection_without_code_falls_back_to_unknown() {
    let mut store = create_store_on_review();
    let mut wizard = WizardController::new();
    let _payload = wizard.begin_finalize(&mut store).unwrap();

    wizard.complete_finalize(&mut store, Err(GatewayError::Rejected { error: None }));

    assert_eq!(wizard.fatal_error(), Some("errors.unknown"));
}

#[test]
fn test_double_click_finalize_reuses_the_same_key() {
    let mut store = create_store_on_review();
    let mut wizard = WizardController::new();

    // Two begin calls before any response arrives (double click).
    let first = wizard.begin_finalize(&mut store).unwrap();
    let second = wizard.begin_finalize(&mut store).unwrap();
    assert_eq!(first.idempotency_key, second.idempotency_key);

    // The gateway deduplicates and answers both with the same receipt.
    wizard.complete_finalize(&mut store, Ok(receipt()));
    wizard.complete_finalize(&mut store, Ok(receipt()));

    assert_eq!(store.meta().status, DraftStatus::Completed);
    assert_eq!(store.meta().finalized_contract_id, Some(77));
}

#[test]
fn test_finalize_after_completion_is_rejected() {
    let mut store = create_store_on_review();
    let mut wizard = WizardController::new();
    let _payload = wizard.begin_finalize(&mut store).unwrap();
    wizard.complete_finalize(&mut store, Ok(receipt()));

    assert_eq!(
        wizard.begin_finalize(&mut store).unwrap_err(),
        CoreError::DraftCompleted
    );
}

#[test]
fn test_reset_after_completion_starts_a_fresh_draft() {
    let mut store = create_store_on_review();
    let mut wizard = WizardController::new();
    let payload = wizard.begin_finalize(&mut store).unwrap();
    wizard.complete_finalize(&mut store, Ok(receipt()));

    wizard.reset(&mut store);

    assert_eq!(wizard.screen(&store), Screen::Step(WizardStep::ContractInfo));
    assert_ne!(store.meta().idempotency_key, payload.idempotency_key);
    assert!(store.meta().finalized_contract_id.is_none());
}
