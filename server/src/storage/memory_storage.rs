use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use super::storage_connector::NoteStorage;
use crate::error::PersistError;
use crate::note::Note;

/// Holds the last saved collection in process memory.
///
/// Backs `--ephemeral` runs and lets tests simulate a failing disk.
#[derive(Default)]
pub struct MemoryStorage {
    snapshot: Mutex<Option<Vec<Note>>>,
    fail_saves: AtomicBool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_notes(notes: Vec<Note>) -> Self {
        Self {
            snapshot: Mutex::new(Some(notes)),
            fail_saves: AtomicBool::new(false),
        }
    }

    /// Makes every following `save` fail until switched back.
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Option<Vec<Note>> {
        self.snapshot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl NoteStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<Vec<Note>>, PersistError> {
        Ok(self.snapshot())
    }

    async fn save(&self, notes: &[Note]) -> Result<(), PersistError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(PersistError::Unavailable(String::from(
                "memory storage is set to fail",
            )));
        }
        *self.snapshot.lock().unwrap_or_else(PoisonError::into_inner) = Some(notes.to_vec());
        Ok(())
    }
}
