// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::vin::normalize_vin;
use serde::{Deserialize, Serialize};

/// The contract identification block of a draft.
///
/// `date` is an ISO `YYYY-MM-DD` string; it is validated by the
/// validation engine, not at assignment time, so partially-typed
/// values can live in the draft while the user is still editing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    /// The contract number entered by the seller.
    pub number: String,
    /// The contract date (ISO `YYYY-MM-DD`).
    pub date: String,
}

/// The vehicle block of a draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleInfo {
    /// Brand and model in one display string (e.g. "Dacia Logan").
    pub brand_model: String,
    /// The vehicle identification number.
    ///
    /// Invariant: always stored normalized (trimmed, uppercased). The
    /// patch merge enforces this, so no other writer can break it.
    pub vin: String,
    /// Odometer reading in kilometers.
    pub km: u32,
    /// First registration date (ISO `YYYY-MM-DD`).
    pub first_reg: String,
    /// URL of the uploaded vehicle document, when one was attached.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocr_file_url: Option<String>,
}

/// The buyer block of a draft.
///
/// Document fields are optional in the data shape (a buyer picked from
/// lookup may arrive without them) but required by step validation
/// before the wizard may advance past the buyer step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerInfo {
    /// Identifier of a known buyer selected from lookup, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// The buyer's full name.
    pub full_name: String,
    /// Street name.
    pub street: String,
    /// Street number, when the address has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_no: Option<String>,
    /// Postal code.
    pub zip: String,
    /// City.
    pub city: String,
    /// Phone number.
    pub phone: String,
    /// Email address, optional but validated when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Identity document number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    /// Authority that issued the identity document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_authority: Option<String>,
}

/// The editable contract document under construction.
///
/// This is the only editable source of truth during the wizard. It is
/// exclusively owned and mutated by the draft store; every other
/// component reads snapshots.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractDraft {
    /// Contract identification.
    pub contract: ContractInfo,
    /// Vehicle data.
    pub vehicle: VehicleInfo,
    /// Buyer data.
    pub buyer: BuyerInfo,
    /// Sale price.
    pub price: f64,
}

impl ContractDraft {
    /// Creates an empty draft with every field at its blank value.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }
}

/// A shallow-merge patch for the contract block.
///
/// `None` fields are left unchanged; `Some` fields replace the current
/// value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfoPatch {
    /// New contract number, if changed.
    pub number: Option<String>,
    /// New contract date, if changed.
    pub date: Option<String>,
}

impl ContractInfoPatch {
    /// Applies this patch to a contract block.
    pub fn apply_to(self, target: &mut ContractInfo) {
        if let Some(number) = self.number {
            target.number = number;
        }
        if let Some(date) = self.date {
            target.date = date;
        }
    }
}

/// A shallow-merge patch for the vehicle block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehiclePatch {
    /// New brand/model, if changed.
    pub brand_model: Option<String>,
    /// New VIN, if changed. Normalized on merge.
    pub vin: Option<String>,
    /// New odometer reading, if changed.
    pub km: Option<u32>,
    /// New first registration date, if changed.
    pub first_reg: Option<String>,
    /// New document URL, if one was uploaded.
    pub ocr_file_url: Option<String>,
}

impl VehiclePatch {
    /// Applies this patch to a vehicle block.
    ///
    /// VIN values are normalized here so the stored draft never holds
    /// an unnormalized VIN.
    pub fn apply_to(self, target: &mut VehicleInfo) {
        if let Some(brand_model) = self.brand_model {
            target.brand_model = brand_model;
        }
        if let Some(vin) = self.vin {
            target.vin = normalize_vin(&vin);
        }
        if let Some(km) = self.km {
            target.km = km;
        }
        if let Some(first_reg) = self.first_reg {
            target.first_reg = first_reg;
        }
        if let Some(ocr_file_url) = self.ocr_file_url {
            target.ocr_file_url = Some(ocr_file_url);
        }
    }
}

/// A shallow-merge patch for the buyer block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerPatch {
    /// Known-buyer identifier, when one was selected from lookup.
    pub id: Option<i64>,
    /// New full name, if changed.
    pub full_name: Option<String>,
    /// New street, if changed.
    pub street: Option<String>,
    /// New street number, if changed.
    pub street_no: Option<String>,
    /// New postal code, if changed.
    pub zip: Option<String>,
    /// New city, if changed.
    pub city: Option<String>,
    /// New phone number, if changed.
    pub phone: Option<String>,
    /// New email, if changed.
    pub email: Option<String>,
    /// New document number, if changed.
    pub document_number: Option<String>,
    /// New document authority, if changed.
    pub document_authority: Option<String>,
}

impl BuyerPatch {
    /// Applies this patch to a buyer block.
    pub fn apply_to(self, target: &mut BuyerInfo) {
        if let Some(id) = self.id {
            target.id = Some(id);
        }
        if let Some(full_name) = self.full_name {
            target.full_name = full_name;
        }
        if let Some(street) = self.street {
            target.street = street;
        }
        if let Some(street_no) = self.street_no {
            target.street_no = Some(street_no);
        }
        if let Some(zip) = self.zip {
            target.zip = zip;
        }
        if let Some(city) = self.city {
            target.city = city;
        }
        if let Some(phone) = self.phone {
            target.phone = phone;
        }
        if let Some(email) = self.email {
            target.email = Some(email);
        }
        if let Some(document_number) = self.document_number {
            target.document_number = Some(document_number);
        }
        if let Some(document_authority) = self.document_authority {
            target.document_authority = Some(document_authority);
        }
    }
}
