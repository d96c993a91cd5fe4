// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod draft;
mod error;
mod meta;
mod validation;
mod vin;

#[cfg(test)]
mod tests;

pub use draft::{
    BuyerInfo, BuyerPatch, ContractDraft, ContractInfo, ContractInfoPatch, VehicleInfo,
    VehiclePatch,
};
pub use error::DomainError;
pub use meta::{ContractDraftMeta, DraftId, DraftStatus, IdempotencyKey};
pub use validation::{
    FieldErrors, codes, is_iso_date, validate_buyer, validate_contract_info, validate_full_draft,
    validate_price, validate_vehicle,
};
pub use vin::{VIN_LENGTH, is_valid_vin, normalize_vin};
