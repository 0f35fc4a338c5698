use clap::{Args, Parser, Subcommand, ValueEnum};
use ophidia_core::config::ControllerKind;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Evolve neural snake controllers", long_about = None)]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the genetic algorithm and save the best genome
    Evolve(EvolveArgs),
    /// Watch a saved genome play one episode
    Replay(ReplayArgs),
    /// Score a controller over many random episodes
    Baseline(BaselineArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EvolveArgs {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub generations: Option<u32>,

    #[arg(short, long)]
    pub population: Option<usize>,

    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Root directory for run directories
    #[arg(short, long, default_value = "runs")]
    pub output: PathBuf,

    /// Directory holding weight tables to seed generation 0 from
    #[arg(short, long)]
    pub blueprint: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Run directory or directory of weight tables
    #[arg(short, long)]
    pub genome: PathBuf,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Frames per second
    #[arg(short, long, default_value_t = 10)]
    pub fps: u32,
}

#[derive(Args, Debug, Clone)]
pub struct BaselineArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, default_value_t = 100)]
    pub episodes: usize,

    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Controller to score instead of the configured one
    #[arg(long, value_enum)]
    pub controller: Option<ControllerArg>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerArg {
    Neural,
    Heuristic,
}

impl From<ControllerArg> for ControllerKind {
    fn from(arg: ControllerArg) -> Self {
        match arg {
            ControllerArg::Neural => ControllerKind::Neural,
            ControllerArg::Heuristic => ControllerKind::Heuristic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evolve_defaults() {
        let cli = Cli::parse_from(["ophidia", "evolve"]);
        assert_eq!(cli.log_level, "info");
        match cli.command {
            Command::Evolve(args) => {
                assert_eq!(args.output, PathBuf::from("runs"));
                assert!(args.config.is_none());
                assert!(args.generations.is_none());
                assert!(args.blueprint.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_evolve_overrides() {
        let cli = Cli::parse_from([
            "ophidia",
            "evolve",
            "--generations",
            "5",
            "--population",
            "50",
            "--seed",
            "9",
            "--output",
            "out",
            "--log-level",
            "debug",
        ]);
        assert_eq!(cli.log_level, "debug");
        let Command::Evolve(args) = cli.command else {
            panic!("expected evolve");
        };
        assert_eq!(args.generations, Some(5));
        assert_eq!(args.population, Some(50));
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.output, PathBuf::from("out"));
    }

    #[test]
    fn test_replay_requires_genome() {
        assert!(Cli::try_parse_from(["ophidia", "replay"]).is_err());
        let cli = Cli::parse_from(["ophidia", "replay", "--genome", "runs/abc", "--fps", "30"]);
        let Command::Replay(args) = cli.command else {
            panic!("expected replay");
        };
        assert_eq!(args.genome, PathBuf::from("runs/abc"));
        assert_eq!(args.fps, 30);
    }

    #[test]
    fn test_baseline_defaults() {
        let cli = Cli::parse_from(["ophidia", "baseline"]);
        let Command::Baseline(args) = cli.command else {
            panic!("expected baseline");
        };
        assert_eq!(args.episodes, 100);
        assert!(args.seed.is_none());
        assert!(args.controller.is_none());
    }

    #[test]
    fn test_baseline_controller_override() {
        let cli = Cli::parse_from(["ophidia", "baseline", "--controller", "heuristic"]);
        let Command::Baseline(args) = cli.command else {
            panic!("expected baseline");
        };
        assert_eq!(args.controller, Some(ControllerArg::Heuristic));
        assert_eq!(
            args.controller.map(ControllerKind::from),
            Some(ControllerKind::Heuristic)
        );
        assert!(Cli::try_parse_from(["ophidia", "baseline", "--controller", "random"]).is_err());
    }
}
