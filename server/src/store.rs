// store.rs
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::note::{Note, NoteId, NoteInput};
use crate::storage::storage_connector::NoteStorage;

// Store Structures -----------------------------------------------------------

/// What to tell the caller when a mutation could not be written to storage.
///
/// The mutation is kept in memory under both policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistPolicy {
    /// Log the failure and report success.
    BestEffort,
    /// Log the failure and return it to the caller.
    Strict,
}

impl Default for PersistPolicy {
    fn default() -> Self {
        PersistPolicy::BestEffort
    }
}

pub struct NoteStore {
    inner: Mutex<Notes>,
    storage: Arc<dyn NoteStorage + Send + Sync>,
    policy: PersistPolicy,
}

struct Notes {
    notes: Vec<Note>,
    next_id: NoteId,
}

// Notes Implementation -------------------------------------------------------

impl Notes {
    fn empty() -> Self {
        Self {
            notes: Vec::new(),
            next_id: 1,
        }
    }

    // `None` when the highest id leaves nothing to hand out next.
    fn from_notes(notes: Vec<Note>) -> Option<Self> {
        let next_id = notes.iter().map(|n| n.id).fold(0, NoteId::max).checked_add(1)?;
        Some(Self { notes, next_id })
    }

    fn position(&self, id: NoteId) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }
}

// NoteStore Implementation ---------------------------------------------------

impl NoteStore {
    /// Builds an empty store that mirrors mutations to `storage`.
    pub fn new(storage: Arc<dyn NoteStorage + Send + Sync>, policy: PersistPolicy) -> Self {
        Self {
            inner: Mutex::new(Notes::empty()),
            storage,
            policy,
        }
    }

    /// Builds a store from whatever `storage` holds.
    ///
    /// A failed load is logged and leaves the store empty.
    pub async fn load(storage: Arc<dyn NoteStorage + Send + Sync>, policy: PersistPolicy) -> Self {
        let store = Self::new(storage, policy);
        if let Err(e) = store.reload().await {
            error!("Could not load notes from storage: {}", e);
        }
        store
    }

    // Replaces the in-memory collection with the persisted one. On error the
    // current collection is left untouched.
    async fn reload(&self) -> Result<usize, StoreError> {
        let loaded = self.storage.load().await?;
        let mut inner = self.inner.lock().await;
        *inner = match loaded {
            Some(notes) => {
                let distinct: HashSet<NoteId> = notes.iter().map(|n| n.id).collect();
                if distinct.len() != notes.len() {
                    warn!("Persisted notes contain duplicate ids");
                }
                Notes::from_notes(notes).ok_or(StoreError::IdsExhausted)?
            }
            None => Notes::empty(),
        };
        info!(
            "Loaded {} notes, next id is {}",
            inner.notes.len(),
            inner.next_id
        );
        Ok(inner.notes.len())
    }

    pub async fn list_all(&self) -> Vec<Note> {
        self.inner.lock().await.notes.clone()
    }

    pub async fn get_by_id(&self, id: NoteId) -> Result<Note, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .notes
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    pub async fn create(&self, input: NoteInput) -> Result<Note, StoreError> {
        let mut inner = self.inner.lock().await;
        let id = inner.next_id;
        inner.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        let note = Note::from_input(id, input);
        inner.notes.push(note.clone());
        debug!("Created note {}", note.id);
        self.persist(&inner.notes).await?;
        Ok(note)
    }

    pub async fn update(&self, id: NoteId, input: NoteInput) -> Result<Note, StoreError> {
        let mut inner = self.inner.lock().await;
        let idx = inner.position(id).ok_or(StoreError::NotFound)?;
        inner.notes[idx].apply(input);
        let note = inner.notes[idx].clone();
        debug!("Updated note {}", id);
        self.persist(&inner.notes).await?;
        Ok(note)
    }

    pub async fn delete(&self, id: NoteId) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        let idx = inner.position(id).ok_or(StoreError::NotFound)?;
        inner.notes.remove(idx);
        debug!("Deleted note {}", id);
        self.persist(&inner.notes).await
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.notes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn next_id(&self) -> NoteId {
        self.inner.lock().await.next_id
    }

    // Called with the collection lock held so writes land in mutation order.
    async fn persist(&self, notes: &[Note]) -> Result<(), StoreError> {
        match self.storage.save(notes).await {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("Failed to save notes: {}", e);
                match self.policy {
                    PersistPolicy::BestEffort => Ok(()),
                    PersistPolicy::Strict => Err(e.into()),
                }
            }
        }
    }
}
