//! Single-episode state machine.

use crate::body::Agent;
use crate::config::{AppConfig, WorldConfig};
use crate::controller::{AnyController, Controller, NeuralController};
use crate::error::Result;
use crate::fruit::FruitSpawner;
use crate::grid::Grid;
use ophidia_data::{Cell, FrameSnapshot, Genotype};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Read-only view handed to controllers and sensing.
#[derive(Debug, Clone, Copy)]
pub struct EpisodeView<'a> {
    pub grid: &'a Grid,
    pub agent: &'a Agent,
    pub fruit: Cell,
}

/// How an episode ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Collided,
    Starved,
    BudgetExhausted,
}

/// Per-episode environment: the fruit cell and the RNG that places it.
#[derive(Debug)]
pub struct Episode<R: Rng> {
    grid: Grid,
    spawner: FruitSpawner,
    fruit: Cell,
    rng: R,
    steps: u64,
}

impl<R: Rng> Episode<R> {
    /// Places the first fruit off the agent's starting body.
    pub fn new(world: &WorldConfig, agent: &Agent, mut rng: R) -> Result<Self> {
        let grid = Grid::from_config(world);
        let spawner = FruitSpawner::new(grid, world.fruit_spawn_attempts);
        let fruit = spawner.spawn(agent, &mut rng)?;
        Ok(Self {
            grid,
            spawner,
            fruit,
            rng,
            steps: 0,
        })
    }

    #[must_use]
    pub fn fruit(&self) -> Cell {
        self.fruit
    }

    #[must_use]
    pub fn steps(&self) -> u64 {
        self.steps
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[must_use]
    pub fn view<'a>(&'a self, agent: &'a Agent) -> EpisodeView<'a> {
        EpisodeView {
            grid: &self.grid,
            agent,
            fruit: self.fruit,
        }
    }

    #[must_use]
    pub fn snapshot(&self, agent: &Agent) -> FrameSnapshot {
        FrameSnapshot {
            body: agent.body().iter().copied().collect(),
            fruit: self.fruit,
            color: agent.color(),
            score: agent.fitness(),
        }
    }

    fn respawn_fruit(&mut self, agent: &Agent) -> Result<()> {
        self.fruit = self.spawner.spawn(agent, &mut self.rng)?;
        Ok(())
    }
}

/// A finished episode.
#[derive(Debug, Clone)]
pub struct EpisodeResult {
    pub agent: Agent,
    pub outcome: Outcome,
    pub steps: u64,
}

impl EpisodeResult {
    #[must_use]
    pub fn fitness(&self) -> u64 {
        self.agent.fitness()
    }
}

/// Drives one agent through one episode.
#[derive(Debug, Clone, Copy)]
pub struct SimulationRunner<'c> {
    world: &'c WorldConfig,
    controller: AnyController,
}

impl<'c> SimulationRunner<'c> {
    /// Runner using the configured controller.
    #[must_use]
    pub fn new(config: &'c AppConfig) -> Self {
        Self {
            world: &config.world,
            controller: AnyController::from_config(config.controller, config.brain.sensing),
        }
    }

    /// Runner that always decides through the agent's genome.
    #[must_use]
    pub fn neural(config: &'c AppConfig) -> Self {
        Self {
            world: &config.world,
            controller: AnyController::Neural(NeuralController::new(config.brain.sensing)),
        }
    }

    #[must_use]
    pub fn world(&self) -> &WorldConfig {
        self.world
    }

    /// Spawns `genotype` at the configured start cell and runs it with a
    /// ChaCha stream seeded from `seed`.
    pub fn run_seeded(&self, genotype: Genotype, seed: u64) -> Result<EpisodeResult> {
        let agent = Agent::spawn(genotype, self.world);
        self.run(agent, ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn run<R: Rng>(&self, agent: Agent, rng: R) -> Result<EpisodeResult> {
        self.run_with(&self.controller, agent, rng, |_| {})
    }

    /// Like [`run`](Self::run), calling `observer` with the initial frame
    /// and once after every step.
    pub fn run_observed<R, F>(&self, agent: Agent, rng: R, observer: F) -> Result<EpisodeResult>
    where
        R: Rng,
        F: FnMut(&FrameSnapshot),
    {
        self.run_with(&self.controller, agent, rng, observer)
    }

    pub fn run_with<C, R, F>(
        &self,
        controller: &C,
        mut agent: Agent,
        rng: R,
        mut observer: F,
    ) -> Result<EpisodeResult>
    where
        C: Controller + ?Sized,
        R: Rng,
        F: FnMut(&FrameSnapshot),
    {
        let world = self.world;
        let mut episode = Episode::new(world, &agent, rng)?;
        observer(&episode.snapshot(&agent));

        let outcome = loop {
            if agent.ttl() == 0 {
                break Outcome::Starved;
            }
            if episode.steps >= world.max_steps {
                break Outcome::BudgetExhausted;
            }

            let direction = controller.decide(&episode.view(&agent))?;
            agent.move_in(direction);
            episode.steps += 1;

            // Growth toward the minimum size lands on the vacated tail cell,
            // which the head may have just entered, so it precedes the check.
            let ate = agent.head() == episode.fruit;
            if !ate && agent.size() < world.min_body_size {
                agent.grow();
            }

            if agent.on_self() || agent.on_wall(&episode.grid) {
                observer(&episode.snapshot(&agent));
                break Outcome::Collided;
            }

            if ate {
                agent.grow();
                episode.respawn_fruit(&agent)?;
                agent.refill_ttl(world.ttl_policy, world.initial_ttl);
            }

            agent.tick();
            observer(&episode.snapshot(&agent));
        };

        agent.kill();
        tracing::trace!(
            steps = episode.steps,
            size = agent.size(),
            fitness = agent.fitness(),
            ?outcome,
            "Episode finished"
        );
        Ok(EpisodeResult {
            agent,
            outcome,
            steps: episode.steps,
        })
    }
}
