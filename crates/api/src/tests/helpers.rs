// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::engine::{ContractEngine, EngineError, EngineReceipt};
use crate::{AuthenticatedCaller, FinalizeRequest};
use carsale_domain::{BuyerInfo, ContractDraft, ContractInfo, VehicleInfo};
use carsale_storage::{MemoryStorage, NewBuyer};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn create_test_caller() -> AuthenticatedCaller {
    AuthenticatedCaller::new(String::from("user-123"))
}

pub fn create_other_caller() -> AuthenticatedCaller {
    AuthenticatedCaller::new(String::from("user-456"))
}

pub fn create_valid_draft() -> ContractDraft {
    ContractDraft {
        contract: ContractInfo {
            number: String::from("CTR-2026-0042"),
            date: String::from("2026-03-14"),
        },
        vehicle: VehicleInfo {
            brand_model: String::from("Dacia Logan"),
            vin: String::from("1HGBH41JXMN109186"),
            km: 92_000,
            first_reg: String::from("2019-06-01"),
            ocr_file_url: None,
        },
        buyer: BuyerInfo {
            id: None,
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
        price: 4_500.0,
    }
}

pub fn create_finalize_request(key: &str) -> FinalizeRequest {
    FinalizeRequest {
        draft: create_valid_draft(),
        idempotency_key: String::from(key),
    }
}

pub fn seed_buyers(storage: &mut MemoryStorage, caller: &AuthenticatedCaller) {
    storage.add_buyer(
        &caller.id,
        NewBuyer {
            full_name: String::from("Maria Ionescu"),
            street: String::from("Strada Lunga"),
            zip: String::from("400100"),
            city: String::from("Cluj-Napoca"),
            phone: String::from("+40 712 345 678"),
            email: Some(String::from("maria@example.com")),
            document_number: Some(String::from("RX123456")),
            ..NewBuyer::default()
        },
    );
    storage.add_buyer(
        &caller.id,
        NewBuyer {
            full_name: String::from("Andrei Popescu"),
            street: String::from("Bulevardul Unirii"),
            zip: String::from("030833"),
            city: String::from("Bucuresti"),
            phone: String::from("+40 722 000 111"),
            ..NewBuyer::default()
        },
    );
}

/// Always fails without producing a receipt.
#[derive(Debug, Default)]
pub struct FailingEngine {
    executions: AtomicUsize,
}

impl FailingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn executions(&self) -> usize {
        self.executions.load(Ordering::SeqCst)
    }
}

impl ContractEngine for FailingEngine {
    async fn execute(
        &self,
        _caller: &str,
        _draft: &ContractDraft,
    ) -> Result<EngineReceipt, EngineError> {
        self.executions.fetch_add(1, Ordering::SeqCst);
        Err(EngineError::Rejected {
            message: String::from("downstream workflow returned 500"),
        })
    }
}
