mod sqlite;

pub use sqlite::SqliteStore;

/// Abstract durable key-value storage.
///
/// History is serialized as a single blob under one fixed key and the
/// delivery token under another. All methods use `&self` — implementations
/// must handle interior mutability (e.g. `Mutex<Connection>` for sqlite).
pub trait Store: Send + Sync + 'static {
    /// Read the blob stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, String>;

    /// Write `value` under `key`, replacing any previous blob.
    fn set(&self, key: &str, value: &str) -> Result<(), String>;

    /// Remove `key` and its blob. Absent keys are not an error.
    fn delete(&self, key: &str) -> Result<(), String>;
}
