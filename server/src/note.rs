// note.rs
use serde::{Deserialize, Deserializer, Serialize};

pub type NoteId = i64;

/// A single note as stored in memory, on disk and on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
}

/// Request body for create and update.
///
/// Has the shape of a [`Note`]. Missing or `null` fields become empty
/// strings. An `id` must still be an integer (or `null`) but its value is
/// dropped; the store owns id assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NoteInput {
    #[serde(rename = "id")]
    _id: Option<NoteId>,
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl NoteInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            _id: None,
            title: title.into(),
            content: content.into(),
        }
    }
}

impl Note {
    pub fn from_input(id: NoteId, input: NoteInput) -> Self {
        Self {
            id,
            title: input.title,
            content: input.content,
        }
    }

    pub fn apply(&mut self, input: NoteInput) {
        self.title = input.title;
        self.content = input.content;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_ignores_id_and_unknown_fields() {
        let input: NoteInput =
            serde_json::from_str(r#"{"id": 42, "title": "A", "content": "B", "tags": []}"#).unwrap();
        assert_eq!(input.title, "A");
        assert_eq!(input.content, "B");
        let note = Note::from_input(1, input);
        assert_eq!(note.id, 1);
    }

    #[test]
    fn test_input_defaults_missing_fields() {
        let input: NoteInput = serde_json::from_str(r#"{"title": "only title"}"#).unwrap();
        assert_eq!(input, NoteInput::new("only title", ""));
    }

    #[test]
    fn test_input_null_fields_are_empty() {
        let input: NoteInput =
            serde_json::from_str(r#"{"id": null, "title": null, "content": "B"}"#).unwrap();
        assert_eq!(input, NoteInput::new("", "B"));
    }

    #[test]
    fn test_input_rejects_wrong_types() {
        assert!(serde_json::from_str::<NoteInput>(r#"{"title": 5}"#).is_err());
        assert!(serde_json::from_str::<NoteInput>(r#""just text""#).is_err());
        assert!(serde_json::from_str::<NoteInput>(r#"{"id": "x", "title": "A"}"#).is_err());
        assert!(serde_json::from_str::<NoteInput>(r#"{"id": 1.5, "title": "A"}"#).is_err());
    }

    #[test]
    fn test_apply_keeps_id() {
        let mut note = Note::from_input(7, NoteInput::new("old", "old"));
        note.apply(NoteInput::new("new", "body"));
        assert_eq!(note.id, 7);
        assert_eq!(note.title, "new");
        assert_eq!(note.content, "body");
    }
}
