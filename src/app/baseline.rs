use crate::cli::BaselineArgs;
use anyhow::Result;
use ophidia_core::brain::GenotypeLogic;
use ophidia_core::config::{AppConfig, ControllerKind};
use ophidia_core::metrics::EvaluationMetrics;
use ophidia_core::simulation::SimulationRunner;
use ophidia_core::stats;
use ophidia_data::Genotype;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Aggregate scores of one controller.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineReport {
    pub controller: ControllerKind,
    pub episodes: usize,
    pub mean_fitness: f64,
    pub best_fitness: u64,
    pub mean_size: f64,
    pub collisions: u64,
    pub starvations: u64,
    pub budget_hits: u64,
    pub faults: u64,
}

/// Runs `episodes` episodes of the configured controller with seeds drawn
/// from `seed`. Every episode gets a fresh random genome.
pub fn evaluate(config: &AppConfig, episodes: usize, seed: u64) -> BaselineReport {
    let runner = SimulationRunner::new(config);
    let widths = config.brain.layer_widths();

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let seeds: Vec<u64> = (0..episodes).map(|_| rng.gen()).collect();
    let metrics = EvaluationMetrics::new();

    let scores: Vec<(u64, usize)> = seeds
        .par_iter()
        .map(|&episode_seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(episode_seed);
            let genotype = Genotype::new_random_with_rng(widths, &mut rng);
            match runner.run(ophidia_core::Agent::spawn(genotype, &config.world), rng) {
                Ok(result) => {
                    metrics.record_episode(result.outcome, result.steps);
                    (result.fitness(), result.agent.size())
                }
                Err(e) => {
                    metrics.record_fault();
                    tracing::warn!(seed = episode_seed, error = %e, "Baseline episode failed");
                    (0, 1)
                }
            }
        })
        .collect();

    let fitness: Vec<u64> = scores.iter().map(|&(f, _)| f).collect();
    let sizes: Vec<f64> = scores.iter().map(|&(_, s)| s as f64).collect();
    BaselineReport {
        controller: config.controller,
        episodes,
        mean_fitness: stats::mean_fitness(&fitness),
        best_fitness: fitness.iter().copied().max().unwrap_or(0),
        mean_size: stats::mean(&sizes),
        collisions: metrics.collisions(),
        starvations: metrics.starvations(),
        budget_hits: metrics.budget_hits(),
        faults: metrics.faults(),
    }
}

/// Loads the config for `args`, letting `--controller` replace the
/// configured controller.
pub fn resolve_config(args: &BaselineArgs) -> Result<AppConfig> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(controller) = args.controller {
        config.controller = controller.into();
    }
    super::finalize(config, args.seed)
}

pub fn run(args: &BaselineArgs) -> Result<BaselineReport> {
    let config = resolve_config(args)?;
    let seed = config.evolution.seed.unwrap_or_else(rand::random);
    let report = evaluate(&config, args.episodes, seed);
    tracing::info!(
        controller = ?report.controller,
        episodes = report.episodes,
        mean_fitness = report.mean_fitness,
        best_fitness = report.best_fitness,
        mean_size = report.mean_size,
        collisions = report.collisions,
        starvations = report.starvations,
        budget_hits = report.budget_hits,
        "Baseline finished"
    );
    Ok(report)
}
