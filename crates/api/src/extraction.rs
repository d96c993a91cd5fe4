// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document extraction boundary and best-effort normalization.
//!
//! The upstream extractor returns loosely structured JSON. Each
//! field is normalized independently and degrades to null with low
//! confidence when malformed; a bad field never fails the request.

use carsale_domain::{is_iso_date, normalize_vin};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Upper bound for plausible extracted odometer readings.
const MAX_EXTRACTED_KM: u64 = 1_500_000;

/// How much the extractor trusts one extracted field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Uncertain or missing.
    #[default]
    Low,
    /// Plausible but unverified.
    Medium,
    /// Clearly read.
    High,
}

impl Confidence {
    fn from_value(value: &Value) -> Self {
        match value.as_str() {
            Some("high") => Self::High,
            Some("medium") => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// Best-effort extracted vehicle fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// Brand and model.
    pub brand_model: Option<String>,
    /// Normalized VIN.
    pub vin: Option<String>,
    /// Odometer reading in kilometers.
    pub km: Option<u32>,
    /// First registration date, normalized to ISO `YYYY-MM-DD`.
    pub first_reg: Option<String>,
}

/// Per-field confidence tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldConfidence {
    /// Confidence for the brand/model field.
    pub brand_model: Confidence,
    /// Confidence for the VIN field.
    pub vin: Confidence,
    /// Confidence for the odometer field.
    pub km: Confidence,
    /// Confidence for the first-registration field.
    pub first_reg: Confidence,
}

/// The normalized extraction outcome returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Extracted values, nulled where unusable.
    pub extracted: ExtractedFields,
    /// Per-field confidence.
    pub confidence: FieldConfidence,
}

/// Failures of the upstream extractor call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractorError {
    /// The extractor could not be reached or is not configured.
    Unavailable(String),
    /// The extractor ran but produced no usable output.
    Failed(String),
}

impl std::fmt::Display for ExtractorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(msg) => write!(f, "Extractor unavailable: {msg}"),
            Self::Failed(msg) => write!(f, "Extraction failed: {msg}"),
        }
    }
}

impl std::error::Error for ExtractorError {}

/// The upstream document extractor, as seen by the extract handler.
pub trait DocumentExtractor: Send + Sync {
    /// Runs extraction against an uploaded document and returns the
    /// raw upstream JSON.
    fn extract(
        &self,
        caller: &str,
        file_url: &str,
    ) -> impl Future<Output = Result<Value, ExtractorError>> + Send;
}

/// In-process extractor stand-in answering with a canned payload.
#[derive(Debug, Clone, Default)]
pub struct StubExtractor {
    response: Value,
}

impl StubExtractor {
    /// Creates a stub answering with the given raw payload.
    #[must_use]
    pub const fn new(response: Value) -> Self {
        Self { response }
    }
}

impl DocumentExtractor for StubExtractor {
    async fn extract(&self, _caller: &str, _file_url: &str) -> Result<Value, ExtractorError> {
        Ok(self.response.clone())
    }
}

fn normalize_brand_model(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn normalize_extracted_vin(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(normalize_vin)
        .filter(|vin| !vin.is_empty())
}

/// Accepts ISO `YYYY-MM-DD` as-is and converts `DD.MM.YYYY`; anything
/// else (including impossible calendar dates) is dropped.
fn normalize_extracted_date(value: &Value) -> Option<String> {
    let s = value.as_str()?.trim();
    if is_iso_date(s) {
        return Some(s.to_string());
    }

    let bytes = s.as_bytes();
    if bytes.len() == 10 && s.is_ascii() && bytes[2] == b'.' && bytes[5] == b'.' {
        let (dd, mm, yyyy) = (&s[0..2], &s[3..5], &s[6..10]);
        let iso = format!("{yyyy}-{mm}-{dd}");
        if is_iso_date(&iso) {
            return Some(iso);
        }
    }
    None
}

/// Accepts numbers or digit-bearing strings, rounded and clamped to
/// the plausible range.
fn clamp_km(value: &Value) -> Option<u32> {
    let rounded: u64 = match value {
        Value::Number(_) => {
            let n = value.as_f64()?;
            if !n.is_finite() || n < 0.5 {
                return None;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                n.round() as u64
            }
        }
        Value::String(s) => {
            let digits: String = s.chars().filter(char::is_ascii_digit).collect();
            digits.parse().ok()?
        }
        _ => return None,
    };

    if rounded == 0 || rounded > MAX_EXTRACTED_KM {
        return None;
    }
    u32::try_from(rounded).ok()
}

/// Normalizes raw upstream output into the extraction contract.
///
/// Never fails: malformed or missing fields become null with low
/// confidence.
#[must_use]
pub fn normalize_extraction(raw: &Value) -> ExtractionResult {
    let confidence_block = &raw["confidence"];

    ExtractionResult {
        extracted: ExtractedFields {
            brand_model: normalize_brand_model(&raw["brand_model"]),
            vin: normalize_extracted_vin(&raw["vin"]),
            km: clamp_km(&raw["km"]),
            first_reg: normalize_extracted_date(&raw["first_reg"]),
        },
        confidence: FieldConfidence {
            brand_model: Confidence::from_value(&confidence_block["brand_model"]),
            vin: Confidence::from_value(&confidence_block["vin"]),
            km: Confidence::from_value(&confidence_block["km"]),
            first_reg: Confidence::from_value(&confidence_block["first_reg"]),
        },
    }
}
