// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur on draft store and wizard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// The draft is completed; only `reset` may touch it.
    DraftCompleted,
    /// A finalize call is in flight; field mutation is blocked until a
    /// terminal or recoverable-failure response arrives.
    SubmissionInFlight,
    /// Full-draft validation failed; the field errors are recorded on
    /// the wizard controller.
    ValidationFailed,
    /// A section edit was requested outside the review step.
    SectionEditOutsideReview,
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DraftCompleted => {
                write!(f, "Draft is completed and can no longer be modified")
            }
            Self::SubmissionInFlight => {
                write!(f, "A finalize call is in flight; the draft is locked")
            }
            Self::ValidationFailed => write!(f, "Draft validation failed"),
            Self::SectionEditOutsideReview => {
                write!(f, "Section edits are only available from the review step")
            }
        }
    }
}

impl std::error::Error for CoreError {}
