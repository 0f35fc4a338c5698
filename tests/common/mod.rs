pub mod macros;

use ophidia_lib::model::body::Agent;
use ophidia_lib::model::config::{AppConfig, ControllerKind, SensingMode, TtlPolicy};
use ophidia_lib::model::data::{Cell, Genotype};
use ophidia_lib::model::evolution::EvolutionEngine;
use ophidia_lib::model::GenotypeLogic;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Small, fast configurations for integration tests.
#[allow(dead_code)]
pub struct ConfigBuilder {
    config: AppConfig,
}

#[allow(dead_code)]
impl ConfigBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.width = 10;
        config.world.height = 10;
        config.world.initial_ttl = 60;
        config.brain.hidden_width = 6;
        config.evolution.population_size = 20;
        config.evolution.max_generations = 3;
        config.evolution.seed = Some(7);
        Self { config }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.evolution.seed = Some(seed);
        self
    }

    pub fn with_population(mut self, size: usize) -> Self {
        self.config.evolution.population_size = size;
        self
    }

    pub fn with_grid(mut self, width: u16, height: u16) -> Self {
        self.config.world.width = width;
        self.config.world.height = height;
        self
    }

    pub fn with_start(mut self, x: i32, y: i32) -> Self {
        self.config.world.start = Some(Cell::new(x, y));
        self
    }

    pub fn with_ttl(mut self, initial: u32, policy: TtlPolicy) -> Self {
        self.config.world.initial_ttl = initial;
        self.config.world.ttl_policy = policy;
        self
    }

    pub fn with_step_budget(mut self, max_steps: u64) -> Self {
        self.config.world.max_steps = max_steps;
        self
    }

    pub fn with_sensing(mut self, sensing: SensingMode) -> Self {
        self.config.brain.sensing = sensing;
        self
    }

    pub fn with_controller(mut self, controller: ControllerKind) -> Self {
        self.config.controller = controller;
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }

    pub fn engine(self) -> EvolutionEngine {
        EvolutionEngine::new(self.config).expect("test config should validate")
    }
}

#[allow(dead_code)]
pub fn random_genotype(config: &AppConfig, seed: u64) -> Genotype {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Genotype::new_random_with_rng(config.brain.layer_widths(), &mut rng)
}

#[allow(dead_code)]
pub fn spawn_agent(config: &AppConfig, seed: u64) -> Agent {
    Agent::spawn(random_genotype(config, seed), &config.world)
}

#[allow(dead_code)]
pub fn scratch_dir(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "ophidia_{tag}_{}_{:016x}",
        std::process::id(),
        rand::random::<u64>()
    ));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
