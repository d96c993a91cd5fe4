// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::StorageError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use uuid::Uuid;

/// Upper bound on buyer search results per query.
pub const MAX_BUYER_RESULTS: usize = 20;

/// A persisted draft row as returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRecord {
    /// The draft row id.
    pub id: String,
    /// The opaque draft payload.
    pub payload: Value,
    /// The row status (always `draft` on the autosave path).
    pub status: String,
    /// Timestamp of the last write.
    pub updated_at: String,
}

/// Acknowledgement of a draft upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftSaved {
    /// The (possibly newly assigned) draft row id.
    pub id: String,
    /// Timestamp of this write.
    pub updated_at: String,
}

/// A known buyer belonging to one caller.
///
/// Carries enough fields to fully populate the buyer form when the
/// user selects a candidate from lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyerRecord {
    /// Row id.
    pub id: i64,
    /// Full name.
    pub full_name: String,
    /// Street name.
    pub street: String,
    /// Street number, when the address has one.
    pub street_no: Option<String>,
    /// Postal code.
    pub zip: String,
    /// City.
    pub city: String,
    /// Phone number.
    pub phone: String,
    /// Email address, when known.
    pub email: Option<String>,
    /// Identity document number, when known.
    pub document_number: Option<String>,
    /// Issuing authority, when known.
    pub document_authority: Option<String>,
}

/// Input row for seeding a caller's buyer table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewBuyer {
    /// Full name.
    pub full_name: String,
    /// Street name.
    pub street: String,
    /// Street number.
    pub street_no: Option<String>,
    /// Postal code.
    pub zip: String,
    /// City.
    pub city: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: Option<String>,
    /// Identity document number.
    pub document_number: Option<String>,
    /// Issuing authority.
    pub document_authority: Option<String>,
}

/// A stored uploaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Per-caller-namespaced storage key.
    pub key: String,
    /// The document's MIME type.
    pub content_type: String,
    /// The document bytes.
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
struct DraftRow {
    owner: String,
    payload: Value,
    status: String,
    updated_at: String,
}

#[derive(Debug, Clone)]
struct FileRow {
    owner: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// Caller-scoped in-memory tables backing the HTTP boundary.
///
/// Every read and write is scoped to the owning caller; a foreign id
/// behaves like a missing one.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    drafts: HashMap<String, DraftRow>,
    idempotency: HashMap<(String, String), Value>,
    buyers: Vec<(String, BuyerRecord)>,
    files: HashMap<String, FileRow>,
    next_buyer_id: i64,
}

fn timestamp_now() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

fn safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

impl MemoryStorage {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Drafts
    // ------------------------------------------------------------------

    /// Creates or updates a draft row for a caller.
    ///
    /// A `None` id inserts a new row; a present id updates the row
    /// only when it belongs to this caller.
    ///
    /// # Errors
    ///
    /// Returns `DraftNotFound` for an unknown id or another caller's
    /// row; an update never silently succeeds against a foreign row.
    pub fn upsert_draft(
        &mut self,
        caller: &str,
        id: Option<&str>,
        payload: Value,
    ) -> Result<DraftSaved, StorageError> {
        let updated_at = timestamp_now();

        if let Some(id) = id {
            let row = self
                .drafts
                .get_mut(id)
                .filter(|row| row.owner == caller)
                .ok_or_else(|| StorageError::DraftNotFound(id.to_string()))?;
            row.payload = payload;
            row.status = String::from("draft");
            row.updated_at.clone_from(&updated_at);
            return Ok(DraftSaved {
                id: id.to_string(),
                updated_at,
            });
        }

        let id = Uuid::new_v4().to_string();
        self.drafts.insert(
            id.clone(),
            DraftRow {
                owner: caller.to_string(),
                payload,
                status: String::from("draft"),
                updated_at: updated_at.clone(),
            },
        );
        Ok(DraftSaved { id, updated_at })
    }

    /// Loads a caller's draft row for resume.
    ///
    /// # Errors
    ///
    /// Returns `DraftNotFound` for an unknown id or another caller's
    /// row.
    pub fn load_draft(&self, caller: &str, id: &str) -> Result<DraftRecord, StorageError> {
        self.drafts
            .get(id)
            .filter(|row| row.owner == caller)
            .map(|row| DraftRecord {
                id: id.to_string(),
                payload: row.payload.clone(),
                status: row.status.clone(),
                updated_at: row.updated_at.clone(),
            })
            .ok_or_else(|| StorageError::DraftNotFound(id.to_string()))
    }

    // ------------------------------------------------------------------
    // Idempotency records
    // ------------------------------------------------------------------

    /// Returns the stored finalize response for `(caller, key)`, if
    /// one exists.
    #[must_use]
    pub fn stored_response(&self, caller: &str, key: &str) -> Option<&Value> {
        self.idempotency
            .get(&(caller.to_string(), key.to_string()))
    }

    /// Stores a finalize response keyed by `(caller, key)`.
    ///
    /// Only success responses are ever stored; a failed downstream
    /// action must leave the key unused so a retry can execute.
    pub fn store_response(&mut self, caller: &str, key: &str, response: Value) {
        self.idempotency
            .insert((caller.to_string(), key.to_string()), response);
    }

    // ------------------------------------------------------------------
    // Buyers
    // ------------------------------------------------------------------

    /// Adds a buyer row to a caller's table and returns its id.
    pub fn add_buyer(&mut self, caller: &str, buyer: NewBuyer) -> i64 {
        self.next_buyer_id += 1;
        let id = self.next_buyer_id;
        self.buyers.push((
            caller.to_string(),
            BuyerRecord {
                id,
                full_name: buyer.full_name,
                street: buyer.street,
                street_no: buyer.street_no,
                zip: buyer.zip,
                city: buyer.city,
                phone: buyer.phone,
                email: buyer.email,
                document_number: buyer.document_number,
                document_authority: buyer.document_authority,
            },
        ));
        id
    }

    /// Case-insensitive substring search over a caller's buyers.
    ///
    /// Matches name, phone, email, and document number; results are
    /// ordered by name and capped at [`MAX_BUYER_RESULTS`]. A blank
    /// query returns nothing rather than the full table.
    #[must_use]
    pub fn search_buyers(&self, caller: &str, query: &str) -> Vec<BuyerRecord> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }

        let matches_query = |record: &BuyerRecord| {
            record.full_name.to_lowercase().contains(&query)
                || record.phone.to_lowercase().contains(&query)
                || record
                    .email
                    .as_ref()
                    .is_some_and(|email| email.to_lowercase().contains(&query))
                || record
                    .document_number
                    .as_ref()
                    .is_some_and(|doc| doc.to_lowercase().contains(&query))
        };

        let mut results: Vec<BuyerRecord> = self
            .buyers
            .iter()
            .filter(|(owner, record)| owner == caller && matches_query(record))
            .map(|(_, record)| record.clone())
            .collect();
        results.sort_by(|a, b| {
            a.full_name
                .to_lowercase()
                .cmp(&b.full_name.to_lowercase())
                .then(a.id.cmp(&b.id))
        });
        results.truncate(MAX_BUYER_RESULTS);
        results
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// Stores a document under a per-caller-namespaced key and
    /// returns the key.
    pub fn store_file(
        &mut self,
        caller: &str,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> String {
        let key = format!("{caller}/{}_{}", Uuid::new_v4(), safe_filename(filename));
        self.files.insert(
            key.clone(),
            FileRow {
                owner: caller.to_string(),
                content_type: content_type.to_string(),
                bytes,
            },
        );
        key
    }

    /// Retrieves a stored document by key.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` for an unknown key.
    pub fn load_file(&self, key: &str) -> Result<StoredFile, StorageError> {
        self.files
            .get(key)
            .map(|row| StoredFile {
                key: key.to_string(),
                content_type: row.content_type.clone(),
                bytes: row.bytes.clone(),
            })
            .ok_or_else(|| StorageError::FileNotFound(key.to_string()))
    }

    /// Returns whether a stored file belongs to a caller.
    #[must_use]
    pub fn file_owner_is(&self, key: &str, caller: &str) -> bool {
        self.files.get(key).is_some_and(|row| row.owner == caller)
    }
}
