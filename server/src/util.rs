// util.rs
use crate::error::ApiError;
use crate::note::NoteId;

/// Parses the `<id>` path segment of the notes routes.
pub fn parse_id(raw: &str) -> Result<NoteId, ApiError> {
    raw.parse::<NoteId>()
        .map_err(|_| ApiError::BadRequest(String::from("Invalid ID")))
}
