use crate::cli::EvolveArgs;
use anyhow::{Context, Result};
use ophidia_core::config::{AppConfig, ControllerKind};
use ophidia_core::evolution::{EvolutionEngine, RunOutcome};
use ophidia_io::{load_genome, RunDirectory};
use std::path::PathBuf;

/// Where a finished run was written and what it produced.
#[derive(Debug)]
pub struct EvolveReport {
    pub run_dir: PathBuf,
    pub outcome: RunOutcome,
}

fn apply_overrides(mut config: AppConfig, args: &EvolveArgs) -> Result<AppConfig> {
    if let Some(generations) = args.generations {
        config.evolution.max_generations = generations;
    }
    if let Some(population) = args.population {
        config.evolution.population_size = population;
    }
    super::finalize(config, args.seed)
}

pub fn run(args: &EvolveArgs) -> Result<EvolveReport> {
    let config = apply_overrides(super::load_config(args.config.as_deref())?, args)?;
    if config.controller != ControllerKind::Neural {
        tracing::warn!(
            controller = ?config.controller,
            "Evolution scores genomes through the neural controller; ignoring configured controller"
        );
    }

    let mut engine = match &args.blueprint {
        Some(dir) => {
            let blueprint = load_genome(dir, config.brain.layer_widths())
                .with_context(|| format!("loading blueprint from {}", dir.display()))?;
            tracing::info!(blueprint = %dir.display(), "Seeding generation 0 from blueprint");
            EvolutionEngine::from_blueprint(config.clone(), &blueprint)?
        }
        None => EvolutionEngine::new(config.clone())?,
    };

    let mut run_dir = RunDirectory::create(&args.output, &config)?;
    let mut logger = run_dir.history_logger()?;
    let mut log_error = None;
    let outcome = engine.run(|record| {
        if let Err(e) = logger.log_generation(record) {
            tracing::error!(error = %e, "Failed to append generation history");
            log_error.get_or_insert(e);
        }
    })?;
    if let Some(e) = log_error {
        return Err(e).context("writing generation history");
    }

    run_dir
        .finish(&outcome.best.alpha_genome, engine.history(), outcome.summary)
        .context("saving run results")?;

    Ok(EvolveReport {
        run_dir: run_dir.path().to_path_buf(),
        outcome,
    })
}
