// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use carsale_domain::{
    ContractDraft, FieldErrors, validate_buyer, validate_contract_info, validate_full_draft,
    validate_price, validate_vehicle,
};

/// One screen of the wizard.
///
/// A closed set of variants: unknown stages are a compile-time
/// concern, not a runtime lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    /// Contract number and date.
    ContractInfo,
    /// Vehicle data, optionally prefilled from document extraction.
    Vehicle,
    /// Buyer data, optionally prefilled from lookup.
    Buyer,
    /// Sale price.
    Price,
    /// Read-only review with section edit actions; the finalize gate.
    Review,
}

impl WizardStep {
    /// All steps in wizard order.
    pub const ALL: [Self; 5] = [
        Self::ContractInfo,
        Self::Vehicle,
        Self::Buyer,
        Self::Price,
        Self::Review,
    ];

    /// The first step of the wizard.
    #[must_use]
    pub const fn first() -> Self {
        Self::ContractInfo
    }

    /// Zero-based position of this step in wizard order.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::ContractInfo => 0,
            Self::Vehicle => 1,
            Self::Buyer => 2,
            Self::Price => 3,
            Self::Review => 4,
        }
    }

    /// The step after this one, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::ContractInfo => Some(Self::Vehicle),
            Self::Vehicle => Some(Self::Buyer),
            Self::Buyer => Some(Self::Price),
            Self::Price => Some(Self::Review),
            Self::Review => None,
        }
    }

    /// The step before this one, if any. The first step has no prior
    /// step; its back action is disabled.
    #[must_use]
    pub const fn prev(self) -> Option<Self> {
        match self {
            Self::ContractInfo => None,
            Self::Vehicle => Some(Self::ContractInfo),
            Self::Buyer => Some(Self::Vehicle),
            Self::Price => Some(Self::Buyer),
            Self::Review => Some(Self::Price),
        }
    }

    /// Returns whether this is the terminal review step.
    #[must_use]
    pub const fn is_review(self) -> bool {
        matches!(self, Self::Review)
    }

    /// Stable identifier for this step.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContractInfo => "contract-info",
            Self::Vehicle => "vehicle",
            Self::Buyer => "buyer",
            Self::Price => "price",
            Self::Review => "review",
        }
    }

    /// Runs this step's validator against the draft.
    ///
    /// Per-step validators check only the sub-object relevant to the
    /// step; the review step validates the full draft.
    ///
    /// # Errors
    ///
    /// Returns the field-keyed error codes of the failing validator.
    pub fn validate(self, draft: &ContractDraft) -> Result<(), FieldErrors> {
        match self {
            Self::ContractInfo => validate_contract_info(draft),
            Self::Vehicle => validate_vehicle(draft),
            Self::Buyer => validate_buyer(draft),
            Self::Price => validate_price(draft),
            Self::Review => validate_full_draft(draft),
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
