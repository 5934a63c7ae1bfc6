// error.rs
use std::io;
use std::path::PathBuf;

use log::debug;
use rocket::http::Status;
use rocket::request::Request;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use serde::Serialize;
use thiserror::Error;

/// Failures of the persistence backend.
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("could not access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed notes file {}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode notes: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Outcome of a store operation that did not succeed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Note not found")]
    NotFound,
    #[error("No note ids left to assign")]
    IdsExhausted,
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Error body returned for every response off the happy path.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Errors surfaced to HTTP callers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::NotFound(_) => Status::NotFound,
            ApiError::Internal(_) => Status::InternalServerError,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound(e.to_string()),
            StoreError::IdsExhausted => ApiError::Internal(e.to_string()),
            StoreError::Persist(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        debug!("{} {} -> {}: {}", req.method(), req.uri(), status, self);
        (status, Json(ErrorBody::new(self.to_string()))).respond_to(req)
    }
}
