use crate::cli::ReplayArgs;
use anyhow::{Context, Result};
use ophidia_core::body::Agent;
use ophidia_core::config::AppConfig;
use ophidia_core::simulation::{EpisodeResult, SimulationRunner};
use ophidia_data::{FrameSnapshot, Genome, Genotype, Rgb};
use ophidia_io::run::{RunDirectory, META_FILE};
use ophidia_io::load_genome;
use ophidia_tui::Tui;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;
use std::time::Duration;

const REPLAY_COLOR: Rgb = Rgb::new(80, 220, 120);

/// Resolves the config and genome for `dir`; a run directory supplies its
/// own config unless one is given explicitly.
pub fn load_replay(dir: &Path, config_path: Option<&Path>) -> Result<(AppConfig, Genome)> {
    let config = match config_path {
        Some(_) => super::load_config(config_path)?,
        None if dir.join(META_FILE).exists() => RunDirectory::open(dir)?.meta().config.clone(),
        None => AppConfig::default(),
    };
    let genome = load_genome(dir, config.brain.layer_widths())
        .with_context(|| format!("loading genome from {}", dir.display()))?;
    Ok((config, genome))
}

/// Plays one episode of `genome` under the configured controller, handing
/// every frame to `observer`.
pub fn play<F>(config: &AppConfig, genome: Genome, seed: u64, observer: F) -> Result<EpisodeResult>
where
    F: FnMut(&FrameSnapshot),
{
    let runner = SimulationRunner::new(config);
    let genotype = Genotype {
        genome,
        color: REPLAY_COLOR,
    };
    let agent = Agent::spawn(genotype, &config.world);
    let result = runner.run_observed(agent, ChaCha8Rng::seed_from_u64(seed), observer)?;
    Ok(result)
}

pub fn run(args: &ReplayArgs) -> Result<EpisodeResult> {
    let (config, genome) = load_replay(&args.genome, args.config.as_deref())?;
    let config = super::finalize(config, args.seed)?;
    let seed = config.evolution.seed.unwrap_or(0);
    let frame_time = Duration::from_secs_f64(1.0 / f64::from(args.fps.max(1)));
    let (width, height) = (config.world.width, config.world.height);

    let mut tui = Tui::new()?;
    tui.init()?;
    let mut draw_error = None;
    let mut frame_index = 0u64;
    let result = play(&config, genome, seed, |frame| {
        if draw_error.is_some() {
            return;
        }
        let caption = format!("Replay step {frame_index}");
        if let Err(e) = tui.draw(frame, width, height, &caption) {
            draw_error = Some(e);
            return;
        }
        frame_index += 1;
        std::thread::sleep(frame_time);
    });
    tui.exit()?;

    if let Some(e) = draw_error {
        return Err(e.context("drawing replay frame"));
    }
    let result = result?;
    tracing::info!(
        steps = result.steps,
        size = result.agent.size(),
        fitness = result.fitness(),
        outcome = ?result.outcome,
        "Replay finished"
    );
    Ok(result)
}
