use async_trait::async_trait;
use log::debug;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use super::storage_connector::NoteStorage;
use crate::error::PersistError;
use crate::note::Note;

/// Keeps the collection in a single pretty-printed JSON array.
///
/// Every save rewrites the whole file. The new contents go to `<file>.tmp`
/// first and are renamed over the target, so an interrupted write leaves the
/// previous version in place.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl NoteStorage for JsonFileStorage {
    async fn load(&self) -> Result<Option<Vec<Note>>, PersistError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} does not exist yet", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(self.io_error(e)),
        };
        let notes = serde_json::from_slice::<Vec<Note>>(&bytes).map_err(|source| {
            PersistError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        Ok(Some(notes))
    }

    async fn save(&self, notes: &[Note]) -> Result<(), PersistError> {
        let mut body = serde_json::to_vec_pretty(notes)?;
        body.push(b'\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| self.io_error(e))?;
            }
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, &body).await.map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        debug!("Wrote {} notes to {}", notes.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, title: &str, content: &str) -> Note {
        Note {
            id,
            title: title.into(),
            content: content.into(),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("notes.json"));
        assert!(storage.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("notes.json"));
        let notes = vec![note(1, "A", "B"), note(3, "C", "D")];
        storage.save(&notes).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), Some(notes));
        assert!(!storage.tmp_path().exists());
    }

    #[tokio::test]
    async fn test_file_is_pretty_printed_array() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("notes.json"));
        storage.save(&[note(1, "A", "B")]).await.unwrap();
        let text = std::fs::read_to_string(storage.path()).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"id\": 1,\n    \"title\": \"A\",\n    \"content\": \"B\"\n  }\n]\n"
        );
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("notes.json"));
        storage
            .save(&[note(1, "A", "B"), note(2, "C", "D")])
            .await
            .unwrap();
        storage.save(&[]).await.unwrap();
        assert_eq!(storage.load().await.unwrap(), Some(vec![]));
    }

    #[tokio::test]
    async fn test_creates_missing_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("nested/data/notes.json"));
        storage.save(&[note(1, "A", "B")]).await.unwrap();
        assert_eq!(storage.load().await.unwrap().map(|n| n.len()), Some(1));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "{ not json").unwrap();
        let storage = JsonFileStorage::new(&path);
        match storage.load().await {
            Err(PersistError::Malformed { path: p, .. }) => assert_eq!(p, path),
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_save_into_unwritable_location() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        // parent "directory" is a regular file
        let storage = JsonFileStorage::new(blocker.join("notes.json"));
        assert!(matches!(
            storage.save(&[note(1, "A", "B")]).await,
            Err(PersistError::Io { .. })
        ));
    }
}
