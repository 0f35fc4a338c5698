use anyhow::Result;
use clap::Parser;
use ophidia_core::metrics::init_logging;
use ophidia_lib::app;
use ophidia_lib::cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command {
        Command::Evolve(args) => {
            let report = app::evolve::run(&args)?;
            let summary = report.outcome.summary;
            println!("Run saved to {}", report.run_dir.display());
            println!(
                "Best genome: generation {} with fitness {} (size {})",
                summary.best_generation, summary.best_fitness, summary.best_size
            );
            println!(
                "Mean fitness {:.3} over {} generations, mean delta {:.3}",
                summary.mean_fitness, summary.generations, summary.mean_fitness_delta
            );
        }
        Command::Replay(args) => {
            let result = app::replay::run(&args)?;
            println!(
                "Episode ended ({:?}) after {} steps: size {}, fitness {}",
                result.outcome,
                result.steps,
                result.agent.size(),
                result.fitness()
            );
        }
        Command::Baseline(args) => {
            let report = app::baseline::run(&args)?;
            println!(
                "{:?} controller over {} episodes: mean fitness {:.3}, best {}, mean size {:.2}",
                report.controller,
                report.episodes, report.mean_fitness, report.best_fitness, report.mean_size
            );
            println!(
                "Collisions {}, starvations {}, step budget hits {}, faults {}",
                report.collisions, report.starvations, report.budget_hits, report.faults
            );
        }
    }

    Ok(())
}
