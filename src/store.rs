//! SectionStore trait: pluggable persistence for hole sections
//!
//! A saved section is the raw snapshot, the values derived from it and the
//! ticket rows passed through alongside. Records are keyed by well and hole:
//! - `MemorySectionStore`: in-memory store for tests and the CLI
//! - A relational backend implements the same trait outside this crate

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rules::validate_hole_section;
use crate::types::{collect_ticket_rows, ComputedFields, FormInput, TicketRow};

/// Identifies one hole section of one well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionKey {
    pub well_id: String,
    pub hole_key: String,
}

impl SectionKey {
    /// Both parts are trimmed and must be non-blank.
    pub fn new(well_id: &str, hole_key: &str) -> Result<Self, StoreError> {
        let (well_id, hole_key) = (well_id.trim(), hole_key.trim());
        if well_id.is_empty() {
            return Err(StoreError::InvalidKey("well_id is blank".to_string()));
        }
        if hole_key.is_empty() {
            return Err(StoreError::InvalidKey("hole_key is blank".to_string()));
        }
        Ok(Self {
            well_id: well_id.to_string(),
            hole_key: hole_key.to_string(),
        })
    }
}

/// What gets persisted for one section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionRecord {
    pub input: FormInput,
    pub computed: ComputedFields,
    pub tickets: Vec<TicketRow>,
}

impl SectionRecord {
    /// Validate `input` and bundle it with its computed values and tickets.
    ///
    /// The record is built whether or not validation passed; callers decide
    /// whether to save a failing section.
    pub fn from_input(input: FormInput) -> (Self, Vec<String>) {
        let (ok, errors, computed) = validate_hole_section(&input).into_parts();
        debug!(ok, errors = errors.len(), "section record built");
        let tickets = collect_ticket_rows(&input);
        (
            Self {
                input,
                computed,
                tickets,
            },
            errors,
        )
    }
}

/// Trait for pluggable section storage.
///
/// Implementations must be `Send + Sync` so one store can be shared.
pub trait SectionStore: Send + Sync {
    /// Insert or replace the record stored under `key`.
    fn upsert_section(&self, key: &SectionKey, record: SectionRecord) -> Result<(), StoreError>;

    /// Load the record for `key`, if one was saved.
    fn load_section(&self, key: &SectionKey) -> Result<Option<SectionRecord>, StoreError>;

    /// Backend name for logging
    fn backend_name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid section key: {0}")]
    InvalidKey(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// In-memory section store. Not durable.
#[derive(Default)]
pub struct MemorySectionStore {
    sections: RwLock<HashMap<SectionKey, SectionRecord>>,
}

impl MemorySectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sections.read().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SectionStore for MemorySectionStore {
    fn upsert_section(&self, key: &SectionKey, record: SectionRecord) -> Result<(), StoreError> {
        let mut sections = self
            .sections
            .write()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        let replaced = sections.insert(key.clone(), record).is_some();
        debug!(well_id = %key.well_id, hole_key = %key.hole_key, replaced, "section upserted");
        Ok(())
    }

    fn load_section(&self, key: &SectionKey) -> Result<Option<SectionRecord>, StoreError> {
        let sections = self
            .sections
            .read()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(sections.get(key).cloned())
    }

    fn backend_name(&self) -> &'static str {
        "InMemory"
    }
}
