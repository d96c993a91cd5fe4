// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::step::WizardStep;
use carsale_domain::{
    BuyerPatch, ContractDraft, ContractDraftMeta, ContractInfoPatch, DraftId, DraftStatus,
    VehiclePatch,
};
use serde::{Deserialize, Serialize};

/// Session-transient wizard state.
///
/// Reconstructible from nothing and never persisted: losing these
/// flags on reload must not corrupt the draft or cause duplicate
/// finalization, so they are a separate structure from the persisted
/// subset rather than a filter applied at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFlags {
    /// The step the wizard is currently showing.
    pub current_step: WizardStep,
    /// Local edits exist that have not been acknowledged by a save.
    pub is_dirty: bool,
    /// An autosave request is in flight.
    pub is_saving: bool,
    /// A finalize call is in flight.
    pub is_submitting: bool,
}

impl Default for SessionFlags {
    fn default() -> Self {
        Self {
            current_step: WizardStep::first(),
            is_dirty: false,
            is_saving: false,
            is_submitting: false,
        }
    }
}

/// The subset of store state that may touch a storage medium.
///
/// Only draft data and lifecycle metadata cross the serialization
/// boundary; session flags never do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedDraft {
    /// The editable document.
    pub draft: ContractDraft,
    /// Lifecycle metadata.
    pub meta: ContractDraftMeta,
}

/// Single source of truth for the in-progress contract draft.
///
/// All mutation flows through the operations below; no other
/// component holds a separate copy of the draft.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftStore {
    draft: ContractDraft,
    meta: ContractDraftMeta,
    session: SessionFlags,
}

impl DraftStore {
    /// Creates a store holding a fresh empty draft with a new
    /// idempotency key.
    #[must_use]
    pub fn new() -> Self {
        Self {
            draft: ContractDraft::empty(),
            meta: ContractDraftMeta::new(),
            session: SessionFlags::default(),
        }
    }

    /// Rebuilds a store from a persisted subset.
    ///
    /// Session flags start at their defaults; a reload never implies
    /// any change to draft content.
    #[must_use]
    pub fn restore(persisted: PersistedDraft) -> Self {
        Self {
            draft: persisted.draft,
            meta: persisted.meta,
            session: SessionFlags::default(),
        }
    }

    /// Returns the persisted subset of the current state.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedDraft {
        PersistedDraft {
            draft: self.draft.clone(),
            meta: self.meta.clone(),
        }
    }

    /// The editable document.
    #[must_use]
    pub const fn draft(&self) -> &ContractDraft {
        &self.draft
    }

    /// Lifecycle metadata.
    #[must_use]
    pub const fn meta(&self) -> &ContractDraftMeta {
        &self.meta
    }

    /// Session-transient flags.
    #[must_use]
    pub const fn session(&self) -> &SessionFlags {
        &self.session
    }

    const fn ensure_editable(&self) -> Result<(), CoreError> {
        if self.meta.status.is_terminal() {
            return Err(CoreError::DraftCompleted);
        }
        if self.session.is_submitting {
            return Err(CoreError::SubmissionInFlight);
        }
        Ok(())
    }

    /// Merges a patch into the contract block and marks the draft
    /// dirty.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is completed or a finalize call
    /// is in flight.
    pub fn update_contract(&mut self, patch: ContractInfoPatch) -> Result<(), CoreError> {
        self.ensure_editable()?;
        patch.apply_to(&mut self.draft.contract);
        self.session.is_dirty = true;
        Ok(())
    }

    /// Merges a patch into the vehicle block and marks the draft
    /// dirty. VINs are normalized by the merge.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is completed or a finalize call
    /// is in flight.
    pub fn update_vehicle(&mut self, patch: VehiclePatch) -> Result<(), CoreError> {
        self.ensure_editable()?;
        patch.apply_to(&mut self.draft.vehicle);
        self.session.is_dirty = true;
        Ok(())
    }

    /// Merges a patch into the buyer block and marks the draft dirty.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is completed or a finalize call
    /// is in flight.
    pub fn update_buyer(&mut self, patch: BuyerPatch) -> Result<(), CoreError> {
        self.ensure_editable()?;
        patch.apply_to(&mut self.draft.buyer);
        self.session.is_dirty = true;
        Ok(())
    }

    /// Replaces the price and marks the draft dirty.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is completed or a finalize call
    /// is in flight.
    pub fn update_price(&mut self, price: f64) -> Result<(), CoreError> {
        self.ensure_editable()?;
        self.draft.price = price;
        self.session.is_dirty = true;
        Ok(())
    }

    /// Moves the wizard to a step.
    pub const fn set_step(&mut self, step: WizardStep) {
        self.session.current_step = step;
    }

    /// Marks an autosave request as in flight.
    pub const fn mark_saving(&mut self) {
        self.session.is_saving = true;
    }

    /// Clears the in-flight save flag after a failed save attempt.
    ///
    /// The draft stays dirty so the next edit naturally retries.
    pub const fn clear_saving(&mut self) {
        self.session.is_saving = false;
    }

    /// Acknowledges a successful remote save.
    ///
    /// Records the server-assigned draft id, clears the dirty and
    /// saving flags, and keeps the previous `updated_at` when the
    /// server did not return one.
    pub fn mark_saved(&mut self, draft_id: DraftId, updated_at: Option<String>) {
        self.meta.draft_id = Some(draft_id);
        if updated_at.is_some() {
            self.meta.updated_at = updated_at;
        }
        self.session.is_dirty = false;
        self.session.is_saving = false;
    }

    /// Starts the finalize lifecycle.
    ///
    /// Moves the status to `Submitted` (a retry is already there) and
    /// blocks field mutation until `mark_submitted` or
    /// `clear_submitting` is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the draft is already completed.
    pub const fn mark_submitting(&mut self) -> Result<(), CoreError> {
        if self.meta.status.is_terminal() {
            return Err(CoreError::DraftCompleted);
        }
        if self.meta.status.can_transition_to(DraftStatus::Submitted) {
            self.meta.status = DraftStatus::Submitted;
        }
        self.session.is_submitting = true;
        Ok(())
    }

    /// Unblocks the draft after a recoverable finalize failure.
    ///
    /// The status stays `Submitted`; a retry reuses the same
    /// idempotency key.
    pub const fn clear_submitting(&mut self) {
        self.session.is_submitting = false;
    }

    /// Records a successful finalize result. Terminal.
    ///
    /// Idempotent once completed: a duplicate gateway response clears
    /// the in-flight flag but does not overwrite the first receipt.
    pub fn mark_submitted(&mut self, contract_id: i64, pdf_url: String) {
        if self.meta.status.is_terminal() {
            self.session.is_submitting = false;
            return;
        }
        self.meta.status = DraftStatus::Completed;
        self.meta.finalized_contract_id = Some(contract_id);
        self.meta.pdf_url = Some(pdf_url);
        self.session.is_submitting = false;
        self.session.is_dirty = false;
    }

    /// Discards the draft and metadata and starts over.
    ///
    /// The only place besides construction where a new idempotency
    /// key is minted. A completed draft's identity is never reused.
    pub fn reset(&mut self) {
        self.draft = ContractDraft::empty();
        self.meta = ContractDraftMeta::new();
        self.session = SessionFlags::default();
    }
}

impl Default for DraftStore {
    fn default() -> Self {
        Self::new()
    }
}
