use crate::error::{IoError, Result};
use chrono::{DateTime, Utc};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use ophidia_data::{GenerationRecord, GenerationReport};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

/// One line of `generations.jsonl`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationLine {
    #[serde(flatten)]
    pub report: GenerationReport,
    pub timestamp: DateTime<Utc>,
}

/// Appends one JSON line per finished generation.
pub struct HistoryLogger {
    file: Option<BufWriter<File>>,
    path: PathBuf,
}

impl HistoryLogger {
    pub fn new_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Some(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Logger that discards everything.
    pub fn new_dummy() -> Self {
        Self {
            file: None,
            path: PathBuf::new(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn log_generation(&mut self, record: &GenerationRecord) -> Result<()> {
        if let Some(ref mut file) = self.file {
            let line = GenerationLine {
                report: record.report(),
                timestamp: Utc::now(),
            };
            let json = serde_json::to_string(&line)?;
            writeln!(file, "{}", json)?;
            file.flush()?;
        }
        Ok(())
    }
}

/// Reads a `generations.jsonl` file; blank lines are skipped.
pub fn read_generations(path: &Path) -> Result<Vec<GenerationLine>> {
    let file = File::open(path).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("opening history {}", path.display()))
    })?;
    let reader = BufReader::new(file);
    let mut lines = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parsed = serde_json::from_str::<GenerationLine>(&line)
            .map_err(|e| IoError::parse(path, i + 1, e.to_string()))?;
        lines.push(parsed);
    }
    Ok(lines)
}

/// Writes the full records, alpha genomes included, as gzip-compressed JSON.
pub fn archive_history(path: &Path, history: &[GenerationRecord]) -> Result<()> {
    let file = File::create(path)?;
    let mut encoder = GzEncoder::new(file, Compression::default());
    let json = serde_json::to_string(history)?;
    encoder.write_all(json.as_bytes())?;
    encoder.finish()?;
    Ok(())
}

pub fn load_history(path: &Path) -> Result<Vec<GenerationRecord>> {
    if !path.exists() {
        return Err(IoError::not_found(path.display().to_string()));
    }
    let file = File::open(path)?;
    let mut decoder = GzDecoder::new(file);
    let mut decoded = Vec::new();
    decoder.read_to_end(&mut decoded)?;
    Ok(serde_json::from_slice(&decoded)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ophidia_core::brain::GenomeLogic;
    use ophidia_data::{Genome, LayerWidths};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn record(generation: u32, alpha_fitness: u64) -> GenerationRecord {
        let mut rng = ChaCha8Rng::seed_from_u64(u64::from(generation));
        GenerationRecord {
            generation,
            mean_fitness: 12.5 * f64::from(generation),
            fitness_delta: if generation == 1 { 0.0 } else { 12.5 },
            alpha_fitness,
            alpha_size: 2,
            alpha_genome: Genome::new_random_with_rng(LayerWidths::new(4, 3, 4), &mut rng),
        }
    }

    #[test]
    fn test_logger_appends_lines() {
        let dir = crate::scratch_dir();
        let path = dir.join("generations.jsonl");
        let mut logger = HistoryLogger::new_at(&path).unwrap();
        logger.log_generation(&record(1, 200)).unwrap();
        logger.log_generation(&record(2, 450)).unwrap();
        drop(logger);

        let lines = read_generations(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].report, record(1, 200).report());
        assert_eq!(lines[1].report.alpha_fitness, 450);
        assert!(lines[0].timestamp <= lines[1].timestamp);

        let raw = std::fs::read_to_string(&path).unwrap();
        let first = raw.lines().next().unwrap();
        let value: serde_json::Value = serde_json::from_str(first).unwrap();
        assert_eq!(value["generation"], 1);
        assert!(value.get("timestamp").is_some());
        assert!(value.get("alpha_genome").is_none());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_dummy_logger_writes_nothing() {
        let mut logger = HistoryLogger::new_dummy();
        assert!(logger.log_generation(&record(1, 0)).is_ok());
    }

    #[test]
    fn test_malformed_line_reports_position() {
        let dir = crate::scratch_dir();
        let path = dir.join("generations.jsonl");
        std::fs::write(&path, "\n{ nope\n").unwrap();
        let err = read_generations(&path).unwrap_err();
        assert!(matches!(err, IoError::Parse { line: 2, .. }));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_archive_keeps_genomes() {
        let dir = crate::scratch_dir();
        let path = dir.join("history.json.gz");
        let history = vec![record(1, 200), record(2, 650)];
        archive_history(&path, &history).unwrap();
        assert_eq!(load_history(&path).unwrap(), history);
        assert!(matches!(
            load_history(&dir.join("missing.json.gz")),
            Err(IoError::NotFound(_))
        ));
        std::fs::remove_dir_all(&dir).ok();
    }
}
