use std::collections::HashSet;
use std::sync::Arc;

use tracing::warn;

use crate::storage::Store;
use crate::types::{NotificationKind, NotificationRecord};

/// Filter applied when listing history.
#[derive(Debug, Clone)]
pub enum HistoryFilter {
    All,
    Unread,
    Kinds(HashSet<NotificationKind>),
}

/// Ordered notification history, newest first, mirrored to durable storage.
///
/// The in-memory sequence is authoritative; the durable snapshot is a mirror
/// rewritten on every mutation. A failed write leaves memory committed and
/// surfaces the error string to the caller.
pub struct NotificationStore {
    records: Vec<NotificationRecord>,
    store: Arc<dyn Store>,
    cap: usize,
    history_key: String,
}

impl NotificationStore {
    pub fn new(store: Arc<dyn Store>, cap: usize, history_key: String) -> Self {
        Self {
            records: Vec::new(),
            store,
            cap,
            history_key,
        }
    }

    /// Restore history from durable storage.
    ///
    /// Absent or corrupt snapshots start an empty history; never fatal.
    pub fn load(&mut self) {
        match self.store.get(&self.history_key) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<NotificationRecord>>(&blob) {
                Ok(records) => self.records = records,
                Err(e) => {
                    warn!("corrupt notification snapshot, starting empty: {e}");
                    self.records = Vec::new();
                }
            },
            Ok(None) => self.records = Vec::new(),
            Err(e) => {
                warn!("failed to read notification snapshot, starting empty: {e}");
                self.records = Vec::new();
            }
        }
    }

    /// Write the whole ordered sequence to durable storage.
    pub fn save(&self) -> Result<(), String> {
        let blob = serde_json::to_string(&self.records)
            .map_err(|e| format!("serialize history: {e}"))?;
        self.store.set(&self.history_key, &blob)
    }

    /// Prepend a record, evicting the oldest past the cap, then persist.
    ///
    /// The in-memory mutation is committed even when persistence fails; the
    /// error is returned so the caller can report it.
    pub fn add(&mut self, record: NotificationRecord) -> Result<(), String> {
        self.records.insert(0, record);
        if self.records.len() > self.cap {
            self.records.truncate(self.cap);
        }
        self.save()
    }

    /// Mark one record read. Absent ids are a no-op, not an error.
    pub fn mark_read(&mut self, id: &str) -> Result<bool, String> {
        let found = match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.is_read = true;
                true
            }
            None => return Ok(false),
        };
        self.save()?;
        Ok(found)
    }

    /// Mark every record read, persisting once.
    pub fn mark_all_read(&mut self) -> Result<(), String> {
        for record in &mut self.records {
            record.is_read = true;
        }
        self.save()
    }

    /// Empty the history and remove the durable snapshot entirely.
    pub fn clear(&mut self) -> Result<(), String> {
        self.records.clear();
        self.store.delete(&self.history_key)
    }

    /// Read-only ordered copy of the history. Never mutates read state.
    pub fn list(&self, filter: &HistoryFilter) -> Vec<NotificationRecord> {
        match filter {
            HistoryFilter::All => self.records.clone(),
            HistoryFilter::Unread => self
                .records
                .iter()
                .filter(|r| !r.is_read)
                .cloned()
                .collect(),
            HistoryFilter::Kinds(kinds) => self
                .records
                .iter()
                .filter(|r| kinds.contains(&r.kind))
                .cloned()
                .collect(),
        }
    }

    pub fn unread_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_read).count()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
