//! Per-run output directories.
//!
//! ```text
//! <root>/<run-id>/
//!     meta.json
//!     generations.jsonl
//!     history.json.gz
//!     w_input_hidden.txt  w_hidden_hidden.txt  w_hidden_output.txt
//! ```

use crate::error::{IoError, Result};
use crate::history::{self, HistoryLogger};
use crate::serialization::{read_json_file, write_json_file};
use crate::weights;
use chrono::{DateTime, Utc};
use ophidia_core::config::AppConfig;
use ophidia_data::{GenerationRecord, Genome, RunSummary};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const META_FILE: &str = "meta.json";
pub const GENERATIONS_FILE: &str = "generations.jsonl";
pub const HISTORY_FILE: &str = "history.json.gz";

/// Contents of `meta.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunMeta {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub fingerprint: String,
    pub config: AppConfig,
    pub summary: Option<RunSummary>,
}

#[derive(Debug)]
pub struct RunDirectory {
    path: PathBuf,
    meta: RunMeta,
}

impl RunDirectory {
    /// Creates `<root>/<uuid>/` and writes the initial metadata.
    pub fn create(root: &Path, config: &AppConfig) -> Result<Self> {
        let fingerprint = config.fingerprint()?;
        let id = Uuid::new_v4();
        let path = root.join(id.to_string());
        std::fs::create_dir_all(&path).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("creating run directory {}", path.display()))
        })?;
        let meta = RunMeta {
            id,
            started_at: Utc::now(),
            finished_at: None,
            fingerprint,
            config: config.clone(),
            summary: None,
        };
        write_json_file(&meta, path.join(META_FILE))?;
        tracing::info!(run = %id, path = %path.display(), "Created run directory");
        Ok(Self { path, meta })
    }

    /// Opens an existing run directory.
    pub fn open(path: &Path) -> Result<Self> {
        let meta_path = path.join(META_FILE);
        if !meta_path.exists() {
            return Err(IoError::not_found(meta_path.display().to_string()));
        }
        let meta: RunMeta = read_json_file(&meta_path)?;
        Ok(Self {
            path: path.to_path_buf(),
            meta,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.meta.id
    }

    #[must_use]
    pub fn meta(&self) -> &RunMeta {
        &self.meta
    }

    #[must_use]
    pub fn generations_path(&self) -> PathBuf {
        self.path.join(GENERATIONS_FILE)
    }

    #[must_use]
    pub fn history_path(&self) -> PathBuf {
        self.path.join(HISTORY_FILE)
    }

    pub fn history_logger(&self) -> Result<HistoryLogger> {
        HistoryLogger::new_at(&self.generations_path())
    }

    /// Persists the best genome, the archived history and the final metadata.
    pub fn finish(
        &mut self,
        best: &Genome,
        history: &[GenerationRecord],
        summary: RunSummary,
    ) -> Result<()> {
        weights::save_genome(&self.path, best)?;
        history::archive_history(&self.history_path(), history)?;
        self.meta.finished_at = Some(Utc::now());
        self.meta.summary = Some(summary);
        write_json_file(&self.meta, self.path.join(META_FILE))?;
        tracing::info!(run = %self.meta.id, "Run saved");
        Ok(())
    }

    /// Loads the best genome using the widths recorded in the run's config.
    pub fn load_best(&self) -> Result<Genome> {
        weights::load_genome(&self.path, self.meta.config.brain.layer_widths())
    }
}
