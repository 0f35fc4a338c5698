//! # Ophidia IO
//!
//! Persistence layer for Ophidia runs.
//!
//! This crate provides:
//! - Structured error handling with custom error types
//! - Flat text weight tables for trained genomes
//! - Generation history as JSON lines and a gzip archive
//! - Run directories with metadata

/// Error types and result aliases for I/O operations
pub mod error;
/// Generation history logging and archives
pub mod history;
/// Run directory layout and metadata
pub mod run;
/// JSON file helpers
pub mod serialization;
/// Weight table persistence
pub mod weights;

pub use error::{IoError, Result};
pub use history::{read_generations, GenerationLine, HistoryLogger};
pub use run::{RunDirectory, RunMeta};
pub use weights::{load_genome, save_genome};

#[cfg(test)]
pub(crate) fn scratch_dir() -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("ophidia_io_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
