//! Persistence boundary for the program document
//!
//! The codec submodule handles the pure mapping between graph and document;
//! [`DataStore`] adds the file I/O around it. A missing file is not an error
//! here: it is the defined "no program yet" signal, so first runs and
//! fresh starts read as `Ok(None)`.

pub mod codec;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::error::DomainError;
use crate::core::models::DegreeProgram;

pub use codec::{decode, encode};

/// Errors raised while reading or rebuilding the persisted document.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The program file exists but could not be read.
    #[error("failed to read program file: {0}")]
    Read(#[source] io::Error),

    /// The document is not well-formed JSON, misses a required field, or
    /// carries an unrecognized type tag.
    #[error("malformed program document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A decoded node carries values the entity constructors reject.
    #[error("invalid program document: {0}")]
    Invalid(#[from] DomainError),
}

/// Errors raised while serializing or writing the document.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The program graph could not be serialized.
    #[error("failed to serialize program document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The document could not be written to disk.
    #[error("failed to write program file: {0}")]
    Write(#[source] io::Error),
}

/// File-backed store for the persisted program document.
///
/// Writes are plain whole-file writes, not atomic replacements; callers are
/// expected to treat an unreadable file like a missing one.
#[derive(Debug, Clone)]
pub struct DataStore {
    path: PathBuf,
}

impl DataStore {
    /// Create a store bound to the given document path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the document this store reads and writes.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted program.
    ///
    /// # Returns
    /// `Ok(None)` if no document exists yet.
    ///
    /// # Errors
    /// Returns [`DecodeError`] if the file exists but cannot be read or does
    /// not decode into a program.
    pub fn load(&self) -> Result<Option<DegreeProgram>, DecodeError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(DecodeError::Read(err)),
        };
        decode(&text).map(Some)
    }

    /// Persist the program, creating missing parent directories.
    ///
    /// # Errors
    /// Returns [`EncodeError`] if serialization or the write fails.
    pub fn save(&self, program: &DegreeProgram) -> Result<(), EncodeError> {
        let text = encode(program)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(EncodeError::Write)?;
            }
        }
        fs::write(&self.path, text).map_err(EncodeError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_of_missing_file_is_no_program() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path().join("program.json"));

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path().join("program.json"));
        let program = DegreeProgram::new("Computer Science".to_string(), 6, 2.0).unwrap();

        store.save(&program).unwrap();
        let loaded = store.load().unwrap().unwrap();

        assert_eq!(loaded.name(), "Computer Science");
        assert_eq!(loaded.target_semesters(), 6);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = DataStore::new(dir.path().join("data").join("deep").join("program.json"));
        let program = DegreeProgram::new("Computer Science".to_string(), 6, 2.0).unwrap();

        store.save(&program).unwrap();

        assert!(store.path().exists());
        assert!(store.load().unwrap().is_some());
    }

    #[test]
    fn test_load_of_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("program.json");
        fs::write(&path, "{ truncated").unwrap();
        let store = DataStore::new(path);

        let err = store.load().unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)));
    }
}
