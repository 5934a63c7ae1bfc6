use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Id type of a note. Assigned by the server, never by the client.
pub type NoteId = i64;

pub type Result<T> = std::result::Result<T, ClientError>;

/// [`Note`] is a note as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

/// [`NoteInput`] is the body sent to create or update a note.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NoteInput {
    pub title: String,
    pub content: String,
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// Error type for the notes client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Note not found")]
    NotFound,
    #[error("Request rejected: {0}")]
    BadRequest(String),
    #[error("Server error ({0}): {1}")]
    Server(u16, String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// [`NotesClient`] is the interface to the notes service. Every call is a
/// single request; nothing is cached or retried on the client side.
#[async_trait::async_trait]
pub trait NotesClient: Send + Sync + 'static {
    /// Returns every note the service holds, in insertion order.
    async fn list(&self) -> Result<Vec<Note>>;

    async fn get(&self, id: NoteId) -> Result<Note>;

    /// Creates a note and returns it with its assigned id.
    async fn create(&self, input: &NoteInput) -> Result<Note>;

    async fn update(&self, id: NoteId, input: &NoteInput) -> Result<Note>;

    async fn delete(&self, id: NoteId) -> Result<()>;
}
