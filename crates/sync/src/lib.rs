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
    clippy::all
)]

mod coordinator;
mod transport;

#[cfg(test)]
mod tests;

pub use coordinator::{AUTOSAVE_QUIET_PERIOD, AutosaveCoordinator, EditSignal, SharedDraftStore};
pub use transport::{DraftTransport, SaveRequest, SavedDraft, TransportError};
