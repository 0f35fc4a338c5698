//! Aggregate statistics over generations.

use ophidia_data::{GenerationReport, RunSummary};

/// Arithmetic mean; `0.0` for an empty input.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Mean fitness of one evaluated population.
#[must_use]
pub fn mean_fitness(fitness: &[u64]) -> f64 {
    if fitness.is_empty() {
        return 0.0;
    }
    fitness.iter().map(|&f| f as f64).sum::<f64>() / fitness.len() as f64
}

/// Index of the record holding the highest alpha fitness, earliest first.
#[must_use]
pub fn best_index<'a, I>(alphas: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a u64>,
{
    let mut best: Option<(usize, u64)> = None;
    for (i, &fitness) in alphas.into_iter().enumerate() {
        if best.map_or(true, |(_, b)| fitness > b) {
            best = Some((i, fitness));
        }
    }
    best.map(|(i, _)| i)
}

/// Summarises a run from its per-generation reports.
#[must_use]
pub fn summarize<I>(reports: I) -> RunSummary
where
    I: IntoIterator<Item = GenerationReport>,
{
    let reports: Vec<GenerationReport> = reports.into_iter().collect();
    let means: Vec<f64> = reports.iter().map(|r| r.mean_fitness).collect();
    let deltas: Vec<f64> = reports.iter().map(|r| r.fitness_delta).collect();
    let best = best_index(reports.iter().map(|r| &r.alpha_fitness)).map(|i| &reports[i]);
    RunSummary {
        generations: reports.len() as u32,
        mean_fitness: mean(&means),
        mean_fitness_delta: mean(&deltas),
        best_generation: best.map_or(0, |r| r.generation),
        best_fitness: best.map_or(0, |r| r.alpha_fitness),
        best_size: best.map_or(0, |r| r.alpha_size),
    }
}
