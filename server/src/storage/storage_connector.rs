// server/src/storage/storage_connector.rs
use async_trait::async_trait;

use crate::error::PersistError;
use crate::note::Note;

/// Durable mirror of the note collection.
///
/// Backends always receive and return the whole collection; there is no
/// incremental write path.
#[async_trait]
pub trait NoteStorage {
    /// Returns `Ok(None)` when nothing has been persisted yet.
    async fn load(&self) -> Result<Option<Vec<Note>>, PersistError>;

    /// Replaces the persisted collection with `notes`.
    async fn save(&self, notes: &[Note]) -> Result<(), PersistError>;
}
