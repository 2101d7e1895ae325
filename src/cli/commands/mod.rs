//! CLI command handlers for `studytrack`.
//!
//! This module provides handlers for various CLI subcommands.
//! Each command is implemented in its own submodule.

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod overview;

use std::path::PathBuf;

use studytrack::config::Config;
use studytrack::core::models::DegreeProgram;
use studytrack::core::persistence::DataStore;
use studytrack::error;

/// Build the data store from the configured document path.
///
/// Falls back to `program.json` inside the studytrack config directory when
/// the configured path is empty.
#[must_use]
pub fn data_store(config: &Config) -> DataStore {
    let path = if config.paths.data_file.is_empty() {
        Config::get_studytrack_dir().join("program.json")
    } else {
        PathBuf::from(&config.paths.data_file)
    };
    DataStore::new(path)
}

/// Load the stored program, degrading load failures to "no program".
///
/// A missing document is the normal fresh start. An unreadable or malformed
/// document is logged and reported, then treated the same way; the broken
/// file stays on disk until the next save replaces it.
pub fn load_or_fresh(store: &DataStore) -> Option<DegreeProgram> {
    match store.load() {
        Ok(program) => program,
        Err(e) => {
            error!("Failed to load program data: {e}");
            eprintln!("✗ Failed to load program data: {e}");
            None
        }
    }
}
