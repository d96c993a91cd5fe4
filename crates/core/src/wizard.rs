// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::step::WizardStep;
use crate::store::DraftStore;
use carsale_domain::{ContractDraft, FieldErrors, IdempotencyKey, validate_full_draft};

/// Fallback fatal-error code for a finalize network failure.
pub const NETWORK_ERROR_CODE: &str = "errors.network";
/// Fallback fatal-error code for a rejection without a message.
pub const UNKNOWN_ERROR_CODE: &str = "errors.unknown";

/// What the wizard should render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// A form step.
    Step(WizardStep),
    /// The terminal success screen. Shown whenever the draft is
    /// completed, regardless of the step index.
    Completed {
        /// URL of the generated contract PDF, when known.
        pdf_url: Option<String>,
    },
}

/// Result of a `next` action.
#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    /// The step validated; the wizard moved forward.
    Advanced(WizardStep),
    /// Validation failed; errors are surfaced and the step stays.
    Invalid,
    /// The review step validated; the caller must now execute the
    /// finalize call with this payload and report back through
    /// `complete_finalize`.
    FinalizeStarted(FinalizePayload),
}

/// Snapshot handed to the finalize gateway.
///
/// Taken synchronously before any await: the draft clone and the
/// immutable idempotency key cannot tear across suspension points.
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizePayload {
    /// The full draft at the moment finalize was confirmed.
    pub draft: ContractDraft,
    /// The draft's stable finalize token.
    pub idempotency_key: IdempotencyKey,
}

/// A successful finalize result from the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeReceipt {
    /// Identifier of the finalized contract.
    pub contract_id: i64,
    /// URL of the generated contract PDF.
    pub pdf_url: String,
}

/// A recoverable finalize failure.
///
/// The draft stays submitted and editable-from-review; a retry
/// reuses the same idempotency key, so the gateway treats it as a
/// duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The call never produced a usable response.
    Network(String),
    /// The gateway answered with a failure.
    Rejected {
        /// Machine-readable error code from the gateway, if any.
        error: Option<String>,
    },
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "Finalize call failed: {msg}"),
            Self::Rejected { error } => match error {
                Some(code) => write!(f, "Finalize rejected: {code}"),
                None => write!(f, "Finalize rejected"),
            },
        }
    }
}

impl std::error::Error for GatewayError {}

/// Sequences the wizard steps, gates transitions through validation,
/// and owns the single finalize flow.
///
/// The controller holds only session-level presentation state (step
/// errors and the fatal banner); the draft store is threaded into
/// each operation, so one store can be shared with the autosave
/// coordinator. The finalize call itself is split in two so the
/// controller stays free of I/O: `begin_finalize` produces the
/// payload snapshot, the caller performs the network call, and
/// `complete_finalize` applies the outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WizardController {
    errors: FieldErrors,
    fatal_error: Option<String>,
}

impl WizardController {
    /// Creates a controller with no surfaced errors.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: FieldErrors::new(),
            fatal_error: None,
        }
    }

    /// Field errors surfaced by the last gated action.
    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The fatal finalize error, if one is showing.
    #[must_use]
    pub fn fatal_error(&self) -> Option<&str> {
        self.fatal_error.as_deref()
    }

    /// Dismisses the fatal finalize banner.
    pub fn dismiss_fatal_error(&mut self) {
        self.fatal_error = None;
    }

    /// What to render right now.
    #[must_use]
    pub fn screen(&self, store: &DraftStore) -> Screen {
        if store.meta().status.is_terminal() {
            Screen::Completed {
                pdf_url: store.meta().pdf_url.clone(),
            }
        } else {
            Screen::Step(store.session().current_step)
        }
    }

    /// Runs the active step's validator and advances on success.
    ///
    /// On the review step this starts the finalize flow instead of
    /// advancing further.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is already completed.
    pub fn next(&mut self, store: &mut DraftStore) -> Result<NextOutcome, CoreError> {
        if store.meta().status.is_terminal() {
            return Err(CoreError::DraftCompleted);
        }

        let step = store.session().current_step;
        if step.is_review() {
            return match self.begin_finalize(store) {
                Ok(payload) => Ok(NextOutcome::FinalizeStarted(payload)),
                Err(CoreError::ValidationFailed) => Ok(NextOutcome::Invalid),
                Err(err) => Err(err),
            };
        }

        match step.validate(store.draft()) {
            Ok(()) => {
                self.errors = FieldErrors::new();
                let next = step.next().unwrap_or(step);
                store.set_step(next);
                Ok(NextOutcome::Advanced(next))
            }
            Err(errors) => {
                self.errors = errors;
                Ok(NextOutcome::Invalid)
            }
        }
    }

    /// Clears errors and steps back, clamped at the first step.
    pub fn back(&mut self, store: &mut DraftStore) {
        self.errors = FieldErrors::new();
        if let Some(prev) = store.session().current_step.prev() {
            store.set_step(prev);
        }
    }

    /// Jumps directly to a section from the review step.
    ///
    /// Review is allowed to send the user backward without
    /// re-validating already-passed steps.
    ///
    /// # Errors
    ///
    /// Returns an error when the wizard is not on the review step.
    pub fn edit_section(
        &mut self,
        store: &mut DraftStore,
        section: WizardStep,
    ) -> Result<(), CoreError> {
        if !store.session().current_step.is_review() {
            return Err(CoreError::SectionEditOutsideReview);
        }
        self.errors = FieldErrors::new();
        store.set_step(section);
        Ok(())
    }

    /// Validates the full draft and, on success, enters the
    /// submitting state and returns the payload snapshot for the
    /// gateway call.
    ///
    /// Calling again while a response is outstanding is permitted and
    /// returns a payload with the same idempotency key: a duplicate
    /// send during a slow response is safe for the gateway to
    /// deduplicate.
    ///
    /// # Errors
    ///
    /// Returns `DraftCompleted` once the draft is terminal, or
    /// `ValidationFailed` with the field errors recorded on the
    /// controller.
    pub fn begin_finalize(&mut self, store: &mut DraftStore) -> Result<FinalizePayload, CoreError> {
        if store.meta().status.is_terminal() {
            return Err(CoreError::DraftCompleted);
        }

        if let Err(errors) = validate_full_draft(store.draft()) {
            self.errors = errors;
            return Err(CoreError::ValidationFailed);
        }

        self.errors = FieldErrors::new();
        self.fatal_error = None;
        store.mark_submitting()?;

        Ok(FinalizePayload {
            draft: store.draft().clone(),
            idempotency_key: store.meta().idempotency_key.clone(),
        })
    }

    /// Applies the outcome of a finalize call.
    ///
    /// Success is terminal; a failure leaves the draft submitted and
    /// retryable under the same key, with a dismissible fatal error
    /// code for the review step.
    pub fn complete_finalize(
        &mut self,
        store: &mut DraftStore,
        outcome: Result<FinalizeReceipt, GatewayError>,
    ) {
        match outcome {
            Ok(receipt) => {
                store.mark_submitted(receipt.contract_id, receipt.pdf_url);
                self.fatal_error = None;
            }
            Err(err) => {
                self.fatal_error = Some(match err {
                    GatewayError::Network(_) => String::from(NETWORK_ERROR_CODE),
                    GatewayError::Rejected { error } => {
                        error.unwrap_or_else(|| String::from(UNKNOWN_ERROR_CODE))
                    }
                });
                store.clear_submitting();
            }
        }
    }

    /// Discards everything and starts a brand-new draft with a
    /// brand-new idempotency key.
    pub fn reset(&mut self, store: &mut DraftStore) {
        store.reset();
        self.errors = FieldErrors::new();
        self.fatal_error = None;
    }
}
