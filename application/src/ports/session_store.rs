//! Session store port
//!
//! Defines how completed rounds are persisted, retrieved, and pruned.
//! The filesystem adapter lives in the infrastructure layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use consilium_domain::RoundResult;
use thiserror::Error;

/// Errors from session persistence
///
/// All of these are recoverable: the service logs them and still returns
/// the in-memory round result to the caller.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("Malformed record for session {0}")]
    Malformed(String),
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e.to_string())
    }
}

/// A persisted session as read back from the store
///
/// Either artifact may be missing (partial deletion is tolerated); a
/// session is "not found" only when both are absent.
#[derive(Debug, Clone)]
pub struct PersistedSession {
    pub name: String,
    /// The human-readable transcript document
    pub document: Option<String>,
    /// The lossless structured record
    pub record: Option<RoundResult>,
    /// Newest modification time of either artifact
    pub modified_at: Option<DateTime<Utc>>,
}

/// Bounded, named persistence for completed rounds
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Assign the next session name, write both artifacts, and prune the
    /// store to its retention bound. Returns the assigned name. The whole
    /// sequence is atomic with respect to other `persist_new` calls: a
    /// name is never handed out twice and a session being written is
    /// never pruned.
    async fn persist_new(&self, result: &RoundResult) -> Result<String, StoreError>;

    /// Write both artifacts under an explicit name, overwriting if present
    async fn persist(&self, name: &str, result: &RoundResult) -> Result<(), StoreError>;

    /// Read a session back; `Ok(None)` when neither artifact exists
    async fn load(&self, name: &str) -> Result<Option<PersistedSession>, StoreError>;

    /// All session names currently in the store, sorted
    async fn list(&self) -> Result<Vec<String>, StoreError>;

    /// Remove both artifacts of a session; missing files are not an error
    async fn delete(&self, name: &str) -> Result<(), StoreError>;

    /// Delete the oldest sessions (by newest artifact mtime) until at most
    /// `keep` remain. Returns the deleted names.
    async fn prune(&self, keep: usize) -> Result<Vec<String>, StoreError>;
}
