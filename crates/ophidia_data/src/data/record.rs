use super::cell::Cell;
use super::genome::{Genome, Rgb};
use serde::{Deserialize, Serialize};

/// Aggregated statistics for one completed generation. Append-only history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// 1-based generation index.
    pub generation: u32,
    pub mean_fitness: f64,
    /// Change of `mean_fitness` against the previous generation, 0 for the first.
    pub fitness_delta: f64,
    pub alpha_fitness: u64,
    pub alpha_size: usize,
    pub alpha_genome: Genome,
}

impl GenerationRecord {
    #[must_use]
    pub fn report(&self) -> GenerationReport {
        GenerationReport {
            generation: self.generation,
            mean_fitness: self.mean_fitness,
            fitness_delta: self.fitness_delta,
            alpha_fitness: self.alpha_fitness,
            alpha_size: self.alpha_size,
        }
    }
}

/// The per-generation line handed to loggers and reporters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub generation: u32,
    pub mean_fitness: f64,
    pub fitness_delta: f64,
    pub alpha_fitness: u64,
    pub alpha_size: usize,
}

/// Whole-run statistics computed after the last generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub generations: u32,
    /// Mean of the per-generation mean fitness values.
    pub mean_fitness: f64,
    /// Mean of the per-generation fitness deltas.
    pub mean_fitness_delta: f64,
    pub best_generation: u32,
    pub best_fitness: u64,
    pub best_size: usize,
}

/// Read-only frame handed to an external viewer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    /// Head first.
    pub body: Vec<Cell>,
    pub fruit: Cell,
    pub color: Rgb,
    pub score: u64,
}
