// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The workflow engine boundary.
//!
//! The engine is the only place where the irreversible action
//! happens (PDF generation, persistence of the finalized contract).
//! This crate talks to it through one opaque call and enforces the
//! idempotency contract around it.

use carsale_domain::ContractDraft;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

/// The engine's record of a finalized contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineReceipt {
    /// Identifier of the finalized contract.
    pub contract_id: i64,
    /// URL of the generated contract PDF.
    pub pdf_url: String,
}

/// Failures of the engine call.
///
/// Any failure must propagate to the caller without a success record
/// being stored for the idempotency key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine could not be reached.
    Unavailable(String),
    /// The engine answered with a failure.
    Rejected {
        /// The engine's error message.
        message: String,
    },
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "Engine unavailable: {msg}"),
            Self::Rejected { message } => write!(f, "Engine rejected the contract: {message}"),
        }
    }
}

impl std::error::Error for EngineError {}

/// The external workflow engine, as seen by the finalize handler.
pub trait ContractEngine: Send + Sync {
    /// Performs the irreversible finalize action for one draft.
    fn execute(
        &self,
        caller: &str,
        draft: &ContractDraft,
    ) -> impl Future<Output = Result<EngineReceipt, EngineError>> + Send;
}

/// In-process engine stand-in.
///
/// Mints sequential contract ids and predictable PDF URLs; counts
/// executions so tests can assert the at-most-once property.
#[derive(Debug)]
pub struct StubEngine {
    next_contract_id: AtomicI64,
    executions: AtomicUsize,
    pdf_base_url: String,
}

impl StubEngine {
    /// Creates a stub engine with the default PDF base URL.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_contract_id: AtomicI64::new(1),
            executions: AtomicUsize::new(0),
            pdf_base_url: String::from("https://contracts.example/pdf"),
        }
    }

    /// Number of times the irreversible action actually ran.
    #[must_use]
    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}

impl Default for StubEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ContractEngine for StubEngine {
    async fn execute(
        &self,
        _caller: &str,
        _draft: &ContractDraft,
    ) -> Result<EngineReceipt, EngineError> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        let contract_id = self.next_contract_id.fetch_add(1, Ordering::SeqCst);
        Ok(EngineReceipt {
            contract_id,
            pdf_url: format!("{}/{contract_id}.pdf", self.pdf_base_url),
        })
    }
}
