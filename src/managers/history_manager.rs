//! History Manager for QRGen.
//!
//! Implements `HistoryManagerTrait`: a bounded, most-recent-first, de-duplicated
//! list of generated QR codes, persisted as one JSON document in a
//! [`KeyValueStorage`] slot and fully overwritten on every mutation.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{SubsecRound, Utc};
use tracing::{debug, info, warn};

use crate::database::storage::KeyValueStorage;
use crate::services::payload_formatter::display_label;
use crate::services::qr_encoder::{QrEncoder, QrEncoderTrait};
use crate::types::errors::HistoryError;
use crate::types::history::HistoryEntry;
use crate::types::payload::PayloadType;

/// Maximum number of entries kept; older ones are evicted.
pub const HISTORY_CAPACITY: usize = 10;

/// Default storage slot for the serialized history.
pub const DEFAULT_STORAGE_KEY: &str = "qrgen-history";

/// Trait defining history store operations.
pub trait HistoryManagerTrait {
    fn add(
        &mut self,
        payload_type: PayloadType,
        raw_payload: &str,
    ) -> Result<Option<HistoryEntry>, HistoryError>;
    fn remove(&mut self, id: i64) -> Result<(), HistoryError>;
    fn list(&self) -> &[HistoryEntry];
    fn get(&self, id: i64) -> Option<&HistoryEntry>;
    fn load(&mut self);
    fn persist(&self) -> Result<(), HistoryError>;
}

/// History store backed by a key-value storage slot.
pub struct HistoryManager {
    storage: Arc<dyn KeyValueStorage>,
    storage_key: String,
    encoder: QrEncoder,
    entries: Vec<HistoryEntry>,
}

impl HistoryManager {
    /// Creates an empty store writing to `storage_key`. Call [`HistoryManagerTrait::load`]
    /// to restore persisted entries.
    pub fn new(storage: Arc<dyn KeyValueStorage>, storage_key: impl Into<String>) -> Self {
        Self {
            storage,
            storage_key: storage_key.into(),
            encoder: QrEncoder::new(),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Milliseconds since the epoch, bumped past every existing id.
    fn next_id(&self, now_ms: i64) -> i64 {
        let newest = self.entries.iter().map(|e| e.id).max().unwrap_or(i64::MIN);
        now_ms.max(newest.saturating_add(1))
    }

    fn read_persisted(&self) -> Vec<HistoryEntry> {
        let raw = match self.storage.get_item(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "history storage unreadable, starting empty");
                return Vec::new();
            }
        };

        let mut entries: Vec<HistoryEntry> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "persisted history is corrupt, starting empty");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        entries.retain(|e| seen.insert(e.raw_payload.clone()));
        entries.truncate(HISTORY_CAPACITY);
        entries
    }
}

impl HistoryManagerTrait for HistoryManager {
    /// Inserts a new entry at the front, unless the payload is already present.
    ///
    /// Returns `Ok(None)` for a duplicate; the store is left untouched.
    fn add(
        &mut self,
        payload_type: PayloadType,
        raw_payload: &str,
    ) -> Result<Option<HistoryEntry>, HistoryError> {
        if self.entries.iter().any(|e| e.raw_payload == raw_payload) {
            debug!(%payload_type, "payload already in history, skipping");
            return Ok(None);
        }

        let thumbnail = self.encoder.render_thumbnail(raw_payload)?.to_data_uri()?;
        let created_at = Utc::now().trunc_subsecs(3);

        let entry = HistoryEntry {
            id: self.next_id(created_at.timestamp_millis()),
            payload_type,
            raw_payload: raw_payload.to_string(),
            display_label: display_label(payload_type, raw_payload),
            thumbnail,
            created_at,
        };

        self.entries.insert(0, entry.clone());
        if self.entries.len() > HISTORY_CAPACITY {
            if let Some(evicted) = self.entries.pop() {
                debug!(id = evicted.id, "evicted oldest history entry");
            }
        }
        info!(id = entry.id, %payload_type, "added history entry");

        self.persist()?;
        Ok(Some(entry))
    }

    /// Deletes the entry with `id`. Unknown ids are ignored.
    fn remove(&mut self, id: i64) -> Result<(), HistoryError> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Ok(());
        }
        info!(id, "removed history entry");
        self.persist()
    }

    fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn get(&self, id: i64) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Replaces the in-memory list with the persisted one.
    ///
    /// Missing or unparseable data yields an empty history; this never fails.
    fn load(&mut self) {
        self.entries = self.read_persisted();
        debug!(count = self.entries.len(), "loaded history");
    }

    /// Overwrites the storage slot with the current list.
    fn persist(&self) -> Result<(), HistoryError> {
        let json = serde_json::to_string(&self.entries)
            .map_err(|e| HistoryError::SerializationError(e.to_string()))?;
        self.storage.set_item(&self.storage_key, &json)?;
        debug!(count = self.entries.len(), "persisted history");
        Ok(())
    }
}
