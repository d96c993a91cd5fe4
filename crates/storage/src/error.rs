// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The requested draft does not exist for this caller.
    ///
    /// A foreign caller's row looks exactly like a missing row: the
    /// store never confirms another owner's data exists.
    DraftNotFound(String),
    /// The requested file does not exist.
    FileNotFound(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DraftNotFound(id) => write!(f, "Draft '{id}' not found"),
            Self::FileNotFound(key) => write!(f, "File '{key}' not found"),
        }
    }
}

impl std::error::Error for StorageError {}
