// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::{BuyerPatch, ContractDraft, ContractInfoPatch, VehiclePatch};

/// Builds a draft that passes full validation.
pub fn create_valid_draft() -> ContractDraft {
    let mut draft = ContractDraft::empty();
    ContractInfoPatch {
        number: Some(String::from("CTR-2026-0042")),
        date: Some(String::from("2026-03-14")),
    }
    .apply_to(&mut draft.contract);
    VehiclePatch {
        brand_model: Some(String::from("Dacia Logan")),
        vin: Some(String::from("1HGBH41JXMN109186")),
        km: Some(92_000),
        first_reg: Some(String::from("2019-06-01")),
        ocr_file_url: None,
    }
    .apply_to(&mut draft.vehicle);
    BuyerPatch {
        id: None,
        full_name: Some(String::from("Maria Ionescu")),
        street: Some(String::from("Strada Lunga")),
        street_no: Some(String::from("14A")),
        zip: Some(String::from("400100")),
        city: Some(String::from("Cluj-Napoca")),
        phone: Some(String::from("+40 712 345 678")),
        email: Some(String::from("maria@example.com")),
        document_number: Some(String::from("RX123456")),
        document_authority: Some(String::from("SPCLEP Cluj")),
    }
    .apply_to(&mut draft.buyer);
    draft.price = 4_500.0;
    draft
}
