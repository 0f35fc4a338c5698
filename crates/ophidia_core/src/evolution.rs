//! Generational genetic algorithm: evaluate, select, reproduce, record.

use crate::brain::GenotypeLogic;
use crate::config::AppConfig;
use crate::error::{CoreError, Result};
use crate::metrics::EvaluationMetrics;
use crate::simulation::{EpisodeResult, Outcome, SimulationRunner};
use crate::stats;
use ophidia_data::{GenerationRecord, Genome, Genotype, RunSummary};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

/// Fitness of one population member after its episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluated {
    /// Position in the evaluated population.
    pub index: usize,
    pub fitness: u64,
    pub size: usize,
    /// `None` when the episode faulted.
    pub outcome: Option<Outcome>,
}

/// Ranked results of one evaluation phase.
#[derive(Debug)]
pub struct Evaluation {
    /// Sorted by descending fitness; ties keep population order.
    pub ranked: Vec<Evaluated>,
    pub metrics: EvaluationMetrics,
}

impl Evaluation {
    #[must_use]
    pub fn alpha(&self) -> &Evaluated {
        &self.ranked[0]
    }

    #[must_use]
    pub fn mean_fitness(&self) -> f64 {
        let fitness: Vec<u64> = self.ranked.iter().map(|e| e.fitness).collect();
        stats::mean_fitness(&fitness)
    }
}

/// Final result of [`EvolutionEngine::run`].
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Global-best alpha across every generation.
    pub best: GenerationRecord,
    pub summary: RunSummary,
}

pub struct EvolutionEngine {
    config: AppConfig,
    population: Vec<Genotype>,
    rng: ChaCha8Rng,
    generation: u32,
    history: Vec<GenerationRecord>,
    best: Option<usize>,
}

impl std::fmt::Debug for EvolutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolutionEngine")
            .field("population", &self.population.len())
            .field("generation", &self.generation)
            .field("history", &self.history.len())
            .finish()
    }
}

fn engine_rng(config: &AppConfig) -> ChaCha8Rng {
    config
        .evolution
        .seed
        .map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64)
}

impl EvolutionEngine {
    /// Engine with a random generation 0.
    pub fn new(config: AppConfig) -> Result<Self> {
        config.validate()?;
        let mut rng = engine_rng(&config);
        let widths = config.brain.layer_widths();
        let population = (0..config.evolution.population_size)
            .map(|_| Genotype::new_random_with_rng(widths, &mut rng))
            .collect();
        Ok(Self::assemble(config, population, rng))
    }

    /// Engine whose generation 0 is bred from `blueprint` crossed with itself.
    pub fn from_blueprint(config: AppConfig, blueprint: &Genome) -> Result<Self> {
        config.validate()?;
        check_widths(&config, blueprint)?;
        let mut rng = engine_rng(&config);
        let seed = Genotype {
            genome: blueprint.clone(),
            color: crate::brain::topology::random_color(&mut rng),
        };
        let rate = config.evolution.mutation_rate;
        let population = (0..config.evolution.population_size)
            .map(|_| seed.breed_with_rng(&seed, rate, &mut rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::assemble(config, population, rng))
    }

    /// Engine over an explicit generation 0 of exactly `population_size` members.
    pub fn with_population(config: AppConfig, population: Vec<Genotype>) -> Result<Self> {
        config.validate()?;
        if population.len() != config.evolution.population_size {
            return Err(CoreError::config(format!(
                "Population holds {} genotypes, expected {}",
                population.len(),
                config.evolution.population_size
            )));
        }
        for genotype in &population {
            check_widths(&config, &genotype.genome)?;
        }
        let rng = engine_rng(&config);
        Ok(Self::assemble(config, population, rng))
    }

    fn assemble(config: AppConfig, population: Vec<Genotype>, rng: ChaCha8Rng) -> Self {
        Self {
            config,
            population,
            rng,
            generation: 0,
            history: Vec::new(),
            best: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[must_use]
    pub fn population(&self) -> &[Genotype] {
        &self.population
    }

    /// Number of completed generations.
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn history(&self) -> &[GenerationRecord] {
        &self.history
    }

    /// Global-best alpha so far; the earliest generation wins ties.
    #[must_use]
    pub fn best(&self) -> Option<&GenerationRecord> {
        self.best.map(|i| &self.history[i])
    }

    /// Runs one episode per genome with the neural controller.
    pub fn evaluate(&mut self) -> Evaluation {
        let config = self.config.clone();
        let runner = SimulationRunner::neural(&config);
        self.evaluate_with(|genotype, seed| runner.run_seeded(genotype.clone(), seed))
    }

    /// Runs `episode` once per genome in parallel, then ranks the results.
    ///
    /// Episode seeds are drawn from the engine RNG before dispatch. An
    /// episode that errors or panics scores 0 and is logged.
    pub fn evaluate_with<F>(&mut self, episode: F) -> Evaluation
    where
        F: Fn(&Genotype, u64) -> Result<EpisodeResult> + Sync,
    {
        let seeds: Vec<u64> = (0..self.population.len()).map(|_| self.rng.gen()).collect();
        let metrics = EvaluationMetrics::new();

        let mut ranked: Vec<Evaluated> = self
            .population
            .par_iter()
            .zip(seeds.par_iter())
            .enumerate()
            .map(|(index, (genotype, &seed))| {
                let result = catch_unwind(AssertUnwindSafe(|| episode(genotype, seed)))
                    .unwrap_or_else(|payload| Err(CoreError::EpisodeFault(panic_message(payload.as_ref()))));
                match result {
                    Ok(done) => {
                        metrics.record_episode(done.outcome, done.steps);
                        Evaluated {
                            index,
                            fitness: done.fitness(),
                            size: done.agent.size(),
                            outcome: Some(done.outcome),
                        }
                    }
                    Err(e) => {
                        metrics.record_fault();
                        tracing::warn!(index, seed, error = %e, "Episode failed, scoring 0");
                        Evaluated {
                            index,
                            fitness: 0,
                            size: 1,
                            outcome: None,
                        }
                    }
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.fitness.cmp(&a.fitness));
        Evaluation { ranked, metrics }
    }

    /// Builds the next population from a ranked evaluation of the current one.
    ///
    /// Fails with a shape mismatch when `evaluation` does not rank exactly
    /// this population.
    pub fn reproduce(&mut self, evaluation: &Evaluation) -> Result<Vec<Genotype>> {
        let evo = &self.config.evolution;
        let size = self.population.len();
        if evaluation.ranked.len() != size {
            return Err(CoreError::shape(
                "evaluation ranking",
                (size, 1),
                (evaluation.ranked.len(), 1),
            ));
        }
        let pool = evaluation.ranked[..evo.breeding_pool_size().min(size)]
            .iter()
            .map(|e| {
                self.population
                    .get(e.index)
                    .ok_or_else(|| CoreError::shape("evaluation index", (size, 1), (e.index + 1, 1)))
            })
            .collect::<Result<Vec<&Genotype>>>()?;
        let Some(&alpha) = pool.first() else {
            return Err(CoreError::config("breeding pool is empty"));
        };
        let rate = evo.mutation_rate;
        let rng = &mut self.rng;

        let mut next = Vec::with_capacity(evo.population_size);
        next.extend((0..evo.elite_clone_count()).map(|_| alpha.clone()));
        for _ in 0..evo.elite_cross_count() {
            let partner = pool[rng.gen_range(0..pool.len())];
            next.push(alpha.breed_with_rng(partner, rate, rng)?);
        }
        while next.len() < evo.population_size {
            let a = pool[rng.gen_range(0..pool.len())];
            let b = pool[rng.gen_range(0..pool.len())];
            next.push(a.breed_with_rng(b, rate, rng)?);
        }
        Ok(next)
    }

    /// One evaluate, select, reproduce, record cycle.
    pub fn run_generation(&mut self) -> Result<&GenerationRecord> {
        let config = self.config.clone();
        let runner = SimulationRunner::neural(&config);
        self.run_generation_with(|genotype, seed| runner.run_seeded(genotype.clone(), seed))
    }

    pub fn run_generation_with<F>(&mut self, episode: F) -> Result<&GenerationRecord>
    where
        F: Fn(&Genotype, u64) -> Result<EpisodeResult> + Sync,
    {
        let generation = self.generation + 1;
        tracing::info!(generation, population = self.population.len(), "Generation started");

        let evaluation = self.evaluate_with(episode);
        evaluation.metrics.log_summary(generation);

        let breeding_start = Instant::now();
        let next = self.reproduce(&evaluation)?;
        tracing::debug!(
            generation,
            duration_ms = breeding_start.elapsed().as_millis() as u64,
            "Breeding finished"
        );

        let alpha = evaluation.alpha();
        let mean_fitness = evaluation.mean_fitness();
        let fitness_delta = self
            .history
            .last()
            .map_or(0.0, |prev| mean_fitness - prev.mean_fitness);
        let record = GenerationRecord {
            generation,
            mean_fitness,
            fitness_delta,
            alpha_fitness: alpha.fitness,
            alpha_size: alpha.size,
            alpha_genome: self.population[alpha.index].genome.clone(),
        };
        tracing::info!(
            generation,
            mean_fitness,
            fitness_delta,
            alpha_fitness = record.alpha_fitness,
            alpha_size = record.alpha_size,
            "Generation finished"
        );

        if self
            .best()
            .map_or(true, |best| record.alpha_fitness > best.alpha_fitness)
        {
            self.best = Some(self.history.len());
        }
        self.history.push(record);
        self.population = next;
        self.generation = generation;
        Ok(&self.history[self.history.len() - 1])
    }

    /// Runs `max_generations` generations, handing each record to `observer`.
    pub fn run<F>(&mut self, mut observer: F) -> Result<RunOutcome>
    where
        F: FnMut(&GenerationRecord),
    {
        for _ in 0..self.config.evolution.max_generations {
            let record = self.run_generation()?;
            observer(record);
        }
        self.finish()
    }

    /// Summary and global best of the generations run so far.
    pub fn finish(&self) -> Result<RunOutcome> {
        let best = self
            .best()
            .cloned()
            .ok_or_else(|| CoreError::config("No generation has been run"))?;
        let summary = stats::summarize(self.history.iter().map(GenerationRecord::report));
        tracing::info!(
            generations = summary.generations,
            mean_fitness = summary.mean_fitness,
            mean_fitness_delta = summary.mean_fitness_delta,
            best_generation = summary.best_generation,
            best_fitness = summary.best_fitness,
            best_size = summary.best_size,
            "Run summary"
        );
        Ok(RunOutcome { best, summary })
    }
}

fn check_widths(config: &AppConfig, genome: &Genome) -> Result<()> {
    let expected = config.brain.layer_widths();
    let found = genome.widths();
    if found != expected {
        return Err(CoreError::shape(
            "genome layer widths",
            (expected.input, expected.hidden),
            (found.input, found.hidden),
        ));
    }
    Ok(())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic during episode".to_string()
    }
}
