use anyhow::Context;
use clap::Parser;
use ophidia_core::stats;
use ophidia_data::RunSummary;
use ophidia_io::history::{read_generations, GenerationLine};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarise a recorded generation history", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "runs/latest/generations.jsonl")]
    input: PathBuf,

    /// Also print one row per generation
    #[arg(short, long)]
    verbose: bool,
}

fn render_summary(summary: &RunSummary) -> String {
    format!(
        "Generations:        {}\n\
         Mean fitness:       {:.3}\n\
         Mean fitness delta: {:.3}\n\
         Best generation:    {}\n\
         Best fitness:       {}\n\
         Best size:          {}",
        summary.generations,
        summary.mean_fitness,
        summary.mean_fitness_delta,
        summary.best_generation,
        summary.best_fitness,
        summary.best_size
    )
}

fn render_row(line: &GenerationLine) -> String {
    let r = &line.report;
    format!(
        "{:>5} {:>12.3} {:>+10.3} {:>8} {:>5}  {}",
        r.generation,
        r.mean_fitness,
        r.fitness_delta,
        r.alpha_fitness,
        r.alpha_size,
        line.timestamp.format("%Y-%m-%d %H:%M:%S")
    )
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let lines = read_generations(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    if lines.is_empty() {
        println!("No generations found in {}.", args.input.display());
        return Ok(());
    }

    if args.verbose {
        println!("  gen         mean      delta    alpha  size  time");
        for line in &lines {
            println!("{}", render_row(line));
        }
        println!();
    }

    let summary = stats::summarize(lines.iter().map(|l| l.report));
    println!("{}", render_summary(&summary));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parsing_defaults() {
        let args = Args::parse_from(["analyze"]);
        assert_eq!(args.input, PathBuf::from("runs/latest/generations.jsonl"));
        assert!(!args.verbose);
    }

    #[test]
    fn test_args_parsing_custom() {
        let args = Args::parse_from(["analyze", "-i", "run/generations.jsonl", "-v"]);
        assert_eq!(args.input, PathBuf::from("run/generations.jsonl"));
        assert!(args.verbose);
    }

    #[test]
    fn test_render_summary() {
        let summary = RunSummary {
            generations: 3,
            mean_fitness: 20.0,
            mean_fitness_delta: 5.5,
            best_generation: 2,
            best_fitness: 650,
            best_size: 4,
        };
        let text = render_summary(&summary);
        assert!(text.contains("Best generation:    2"));
        assert!(text.contains("Mean fitness delta: 5.500"));
    }
}
