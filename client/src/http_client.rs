use async_trait::async_trait;
use log::debug;
use reqwest::{Response, StatusCode};
use serde::Deserialize;

use crate::client_api::{ClientError, Note, NoteId, NoteInput, NotesClient, Result};

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:8080";

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to the notes service over HTTP with JSON bodies.
pub struct HttpNotesClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpNotesClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn notes_url(&self) -> String {
        format!("{}/notes", self.base_url)
    }

    fn note_url(&self, id: NoteId) -> String {
        format!("{}/notes/{}", self.base_url, id)
    }

    // Turns a non-2xx response into a ClientError, using the server's
    // {"error": ...} body when there is one.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.to_string(),
        };
        debug!("Request failed with {}: {}", status, message);
        Err(error_for_status(status, message))
    }
}

pub(crate) fn error_for_status(status: StatusCode, message: String) -> ClientError {
    match status {
        StatusCode::NOT_FOUND => ClientError::NotFound,
        StatusCode::BAD_REQUEST => ClientError::BadRequest(message),
        _ => ClientError::Server(status.as_u16(), message),
    }
}

#[async_trait]
impl NotesClient for HttpNotesClient {
    async fn list(&self) -> Result<Vec<Note>> {
        let response = self.http.get(self.notes_url()).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn get(&self, id: NoteId) -> Result<Note> {
        let response = self.http.get(self.note_url(id)).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn create(&self, input: &NoteInput) -> Result<Note> {
        let response = self.http.post(self.notes_url()).json(input).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn update(&self, id: NoteId, input: &NoteInput) -> Result<Note> {
        let response = self.http.put(self.note_url(id)).json(input).send().await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete(&self, id: NoteId) -> Result<()> {
        let response = self.http.delete(self.note_url(id)).send().await?;
        Self::check(response).await?;
        Ok(())
    }
}
