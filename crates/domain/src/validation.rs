// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Step-gating validation for contract drafts.
//!
//! Validators are pure and synchronous: they never perform I/O and
//! never mutate the draft. Failures are returned as machine-readable
//! error codes keyed by dotted field path; resolving codes to display
//! text is the caller's concern.

use crate::draft::ContractDraft;
use crate::vin::{VIN_LENGTH, is_valid_vin, normalize_vin};
use serde::Serialize;
use std::collections::BTreeMap;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Machine-readable validation error codes.
///
/// These are stable identifiers resolved to display strings outside
/// this crate.
pub mod codes {
    /// A required field is empty or missing.
    pub const REQUIRED: &str = "errors.required";
    /// A date is not a valid ISO `YYYY-MM-DD` calendar date.
    pub const INVALID_DATE: &str = "errors.invalidDate";
    /// A VIN does not have 17 characters after normalization.
    pub const INVALID_VIN_LENGTH: &str = "errors.invalidVinLength";
    /// A VIN contains characters outside the ISO 3779 alphabet.
    pub const INVALID_VIN_FORMAT: &str = "errors.invalidVinFormat";
    /// A numeric field holds a non-finite value.
    pub const INVALID_NUMBER: &str = "errors.invalidNumber";
    /// A numeric field must be strictly positive.
    pub const MUST_BE_POSITIVE: &str = "errors.mustBePositive";
    /// A numeric field exceeds its upper bound.
    pub const TOO_LARGE: &str = "errors.tooLarge";
    /// An email address is malformed.
    pub const INVALID_EMAIL: &str = "errors.invalidEmail";
    /// A URL is malformed.
    pub const INVALID_URL: &str = "errors.invalidUrl";
}

/// Upper bound for plausible odometer readings, in kilometers.
pub const MAX_KM: u32 = 1_500_000;

const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Validation failures keyed by dotted field path (e.g. `buyer.email`).
///
/// Values are machine-readable error codes, not display strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, &'static str>);

impl FieldErrors {
    /// Creates an empty error map.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Records an error code for a field path.
    pub fn insert(&mut self, path: impl Into<String>, code: &'static str) {
        self.0.insert(path.into(), code);
    }

    /// Returns the code recorded for a field path, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&'static str> {
        self.0.get(path).copied()
    }

    /// Returns whether no errors were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over `(path, code)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.0.iter().map(|(path, code)| (path.as_str(), *code))
    }

    /// Absorbs all errors from another map.
    pub fn merge(&mut self, other: Self) {
        self.0.extend(other.0);
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Checks a string for strict ISO `YYYY-MM-DD` shape and calendar
/// validity.
#[must_use]
pub fn is_iso_date(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 4 && *i != 7)
        .all(|(_, b)| b.is_ascii_digit());
    digits_ok && Date::parse(value, ISO_DATE_FORMAT).is_ok()
}

fn is_valid_email(value: &str) -> bool {
    if value.contains(char::is_whitespace) || value.matches('@').count() != 1 {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn require(errors: &mut FieldErrors, path: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(path, codes::REQUIRED);
    }
}

fn require_opt(errors: &mut FieldErrors, path: &str, value: Option<&str>) {
    match value {
        Some(v) if !v.trim().is_empty() => {}
        _ => errors.insert(path, codes::REQUIRED),
    }
}

fn check_iso_date(errors: &mut FieldErrors, path: &str, value: &str) {
    if !is_iso_date(value) {
        errors.insert(path, codes::INVALID_DATE);
    }
}

/// Validates the contract-info step.
///
/// # Errors
///
/// Returns field-keyed codes when the contract number is empty or the
/// contract date is not a valid ISO date.
pub fn validate_contract_info(draft: &ContractDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    require(&mut errors, "contract.number", &draft.contract.number);
    check_iso_date(&mut errors, "contract.date", &draft.contract.date);
    errors.into_result()
}

/// Validates the vehicle step.
///
/// The VIN is checked against its normalized form; the draft itself is
/// not modified.
///
/// # Errors
///
/// Returns field-keyed codes for a missing brand/model, an invalid
/// VIN, an implausible odometer value, an invalid first-registration
/// date, or a malformed document URL.
pub fn validate_vehicle(draft: &ContractDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    let vehicle = &draft.vehicle;

    require(&mut errors, "vehicle.brand_model", &vehicle.brand_model);

    let vin = normalize_vin(&vehicle.vin);
    if vin.len() != VIN_LENGTH {
        errors.insert("vehicle.vin", codes::INVALID_VIN_LENGTH);
    } else if !is_valid_vin(&vin) {
        errors.insert("vehicle.vin", codes::INVALID_VIN_FORMAT);
    }

    if vehicle.km == 0 {
        errors.insert("vehicle.km", codes::MUST_BE_POSITIVE);
    } else if vehicle.km > MAX_KM {
        errors.insert("vehicle.km", codes::TOO_LARGE);
    }

    check_iso_date(&mut errors, "vehicle.first_reg", &vehicle.first_reg);

    if let Some(url) = &vehicle.ocr_file_url
        && !is_http_url(url)
    {
        errors.insert("vehicle.ocr_file_url", codes::INVALID_URL);
    }

    errors.into_result()
}

/// Validates the buyer step.
///
/// # Errors
///
/// Returns field-keyed codes for missing required buyer fields or a
/// malformed optional email.
pub fn validate_buyer(draft: &ContractDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    let buyer = &draft.buyer;

    require(&mut errors, "buyer.full_name", &buyer.full_name);
    require(&mut errors, "buyer.street", &buyer.street);
    require(&mut errors, "buyer.zip", &buyer.zip);
    require(&mut errors, "buyer.city", &buyer.city);
    require(&mut errors, "buyer.phone", &buyer.phone);
    require_opt(
        &mut errors,
        "buyer.document_number",
        buyer.document_number.as_deref(),
    );
    require_opt(
        &mut errors,
        "buyer.document_authority",
        buyer.document_authority.as_deref(),
    );

    if let Some(email) = &buyer.email
        && !email.is_empty()
        && !is_valid_email(email)
    {
        errors.insert("buyer.email", codes::INVALID_EMAIL);
    }

    errors.into_result()
}

/// Validates the price step.
///
/// # Errors
///
/// Returns a field-keyed code when the price is non-finite or not
/// strictly positive.
pub fn validate_price(draft: &ContractDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if !draft.price.is_finite() {
        errors.insert("price", codes::INVALID_NUMBER);
    } else if draft.price <= 0.0 {
        errors.insert("price", codes::MUST_BE_POSITIVE);
    }
    errors.into_result()
}

/// Validates the entire draft.
///
/// This is the union of all step validators and the sole gate before
/// the finalize call is issued.
///
/// # Errors
///
/// Returns the merged field-keyed codes of every failing step.
pub fn validate_full_draft(draft: &ContractDraft) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    for result in [
        validate_contract_info(draft),
        validate_vehicle(draft),
        validate_buyer(draft),
        validate_price(draft),
    ] {
        if let Err(step_errors) = result {
            errors.merge(step_errors);
        }
    }
    errors.into_result()
}
