//! Evaluation counters and logging setup.
//!
//! Counters are updated from rayon workers during a generation's evaluation
//! phase and read once the phase has finished.

use crate::simulation::Outcome;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Lock-free counters for one evaluation phase.
#[derive(Debug)]
pub struct EvaluationMetrics {
    episodes: AtomicU64,
    steps: AtomicU64,
    faults: AtomicU64,
    collisions: AtomicU64,
    starvations: AtomicU64,
    budget_hits: AtomicU64,
    start_time: Instant,
}

impl Default for EvaluationMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl EvaluationMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            episodes: AtomicU64::new(0),
            steps: AtomicU64::new(0),
            faults: AtomicU64::new(0),
            collisions: AtomicU64::new(0),
            starvations: AtomicU64::new(0),
            budget_hits: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records an episode that ran to a terminal state.
    pub fn record_episode(&self, outcome: Outcome, steps: u64) {
        self.episodes.fetch_add(1, Ordering::Relaxed);
        self.steps.fetch_add(steps, Ordering::Relaxed);
        let counter = match outcome {
            Outcome::Collided => &self.collisions,
            Outcome::Starved => &self.starvations,
            Outcome::BudgetExhausted => &self.budget_hits,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Records an episode that failed and was scored as an instant death.
    pub fn record_fault(&self) {
        self.episodes.fetch_add(1, Ordering::Relaxed);
        self.faults.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn episodes(&self) -> u64 {
        self.episodes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn faults(&self) -> u64 {
        self.faults.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn collisions(&self) -> u64 {
        self.collisions.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn starvations(&self) -> u64 {
        self.starvations.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn budget_hits(&self) -> u64 {
        self.budget_hits.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Emits one summary event for the phase.
    pub fn log_summary(&self, generation: u32) {
        tracing::info!(
            generation,
            episodes = self.episodes(),
            steps = self.steps(),
            collisions = self.collisions(),
            starvations = self.starvations(),
            budget_hits = self.budget_hits(),
            faults = self.faults(),
            duration_ms = self.elapsed().as_millis() as u64,
            "Evaluation finished"
        );
    }
}

/// Initialize tracing subscriber for logging.
///
/// `RUST_LOG` takes precedence over `level`. A second call is a no-op.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn test_metrics_new() {
        let metrics = EvaluationMetrics::new();
        assert_eq!(metrics.episodes(), 0);
        assert_eq!(metrics.steps(), 0);
    }

    #[test]
    fn test_record_outcomes() {
        let metrics = EvaluationMetrics::new();
        metrics.record_episode(Outcome::Collided, 10);
        metrics.record_episode(Outcome::Starved, 200);
        metrics.record_episode(Outcome::BudgetExhausted, 5);
        metrics.record_fault();
        assert_eq!(metrics.episodes(), 4);
        assert_eq!(metrics.steps(), 215);
        assert_eq!(metrics.collisions(), 1);
        assert_eq!(metrics.starvations(), 1);
        assert_eq!(metrics.budget_hits(), 1);
        assert_eq!(metrics.faults(), 1);
    }

    #[test]
    fn test_concurrent_updates() {
        let metrics = EvaluationMetrics::new();
        (0..1000u64)
            .into_par_iter()
            .for_each(|i| metrics.record_episode(Outcome::Collided, i % 3));
        assert_eq!(metrics.episodes(), 1000);
        assert_eq!(metrics.collisions(), 1000);
        assert_eq!(metrics.steps(), (0..1000u64).map(|i| i % 3).sum::<u64>());
    }

    #[test]
    fn test_init_logging_twice() {
        init_logging("warn");
        init_logging("debug");
    }
}
