// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use crate::{DraftStore, WizardStep};
use carsale_domain::{BuyerPatch, ContractInfoPatch, VehiclePatch};

pub fn fill_valid_draft(store: &mut DraftStore) {
    store
        .update_contract(ContractInfoPatch {
            number: Some(String::from("CTR-2026-0042")),
            date: Some(String::from("2026-03-14")),
        })
        .unwrap();
    store
        .update_vehicle(VehiclePatch {
            brand_model: Some(String::from("Dacia Logan")),
            vin: Some(String::from("1hgbh41jxmn109186")),
            km: Some(92_000),
            first_reg: Some(String::from("2019-06-01")),
            ocr_file_url: None,
        })
        .unwrap();
    store
        .update_buyer(BuyerPatch {
            full_name: Some(String::from("Maria Ionescu")),
            street: Some(String::from("Strada Lunga")),
            street_no: Some(String::from("14A")),
            zip: Some(String::from("400100")),
            city: Some(String::from("Cluj-Napoca")),
            phone: Some(String::from("+40 712 345 678")),
            email: Some(String::from("maria@example.com")),
            document_number: Some(String::from("RX123456")),
            document_authority: Some(String::from("SPCLEP Cluj")),
            ..BuyerPatch::default()
        })
        .unwrap();
    store.update_price(4_500.0).unwrap();
}

/// A store holding a fully valid draft, parked on the review step.
pub fn create_store_on_review() -> DraftStore {
    let mut store = DraftStore::new();
    fill_valid_draft(&mut store);
    store.set_step(WizardStep::Review);
    store
}
