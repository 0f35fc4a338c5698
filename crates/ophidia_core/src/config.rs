//! Configuration management for simulation and evolution parameters.
//!
//! Strongly-typed structures that map to a `config.toml` file. The loaded
//! value is immutable and threaded through constructors; nothing in the core
//! reads ambient globals.
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 20
//! height = 20
//! initial_ttl = 200
//! ttl_policy = { mode = "reset" }
//!
//! [brain]
//! hidden_width = 18
//! sensing = "ray_cast"
//!
//! [evolution]
//! population_size = 2000
//! mutation_rate = 0.01
//! breeding_fraction = 0.2
//! ```

use crate::error::{ensure_config, Result};
use ophidia_data::{Cell, LayerWidths};
use serde::{Deserialize, Serialize};

/// Number of network outputs: one per movement direction.
pub const BRAIN_OUTPUTS: usize = 4;

/// What happens to the time-to-live counter when fruit is eaten.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TtlPolicy {
    /// Refill to `initial_ttl`. Keeps every episode bounded.
    #[default]
    Reset,
    /// Add a fixed amount. Unbounded in principle; `max_steps` caps it.
    Increment { amount: u32 },
}

/// Input encoding fed to the neural controller.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SensingMode {
    /// Inverse distances along eight rays: fruit, body, wall per ray.
    #[default]
    RayCast,
    /// Raw Manhattan distances from the four neighbouring cells.
    Manhattan,
}

impl SensingMode {
    #[must_use]
    pub const fn input_count(self) -> usize {
        match self {
            SensingMode::RayCast => 24,
            SensingMode::Manhattan => 12,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    #[default]
    Neural,
    Heuristic,
}

/// Board and episode parameters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    pub width: u16,
    pub height: u16,
    /// Spawn cell of every agent; the grid centre when unset.
    pub start: Option<Cell>,
    pub initial_ttl: u32,
    pub ttl_policy: TtlPolicy,
    /// Hard ceiling on steps per episode, whatever the TTL policy.
    pub max_steps: u64,
    pub fruit_spawn_attempts: usize,
    /// Agents shorter than this grow by one on every step without fruit.
    pub min_body_size: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            start: None,
            initial_ttl: 200,
            ttl_policy: TtlPolicy::Reset,
            max_steps: 10_000,
            fruit_spawn_attempts: 100_000,
            min_body_size: 1,
        }
    }
}

impl WorldConfig {
    #[must_use]
    pub fn start_cell(&self) -> Cell {
        self.start.unwrap_or(Cell::new(
            i32::from(self.width / 2),
            i32::from(self.height / 2),
        ))
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BrainConfig {
    pub hidden_width: usize,
    pub sensing: SensingMode,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            hidden_width: 18,
            sensing: SensingMode::RayCast,
        }
    }
}

impl BrainConfig {
    #[must_use]
    pub fn layer_widths(&self) -> LayerWidths {
        LayerWidths::new(self.sensing.input_count(), self.hidden_width, BRAIN_OUTPUTS)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub mutation_rate: f64,
    /// Top fraction of each generation kept as crossover parents.
    pub breeding_fraction: f64,
    /// Fraction of the next generation that is an unmutated copy of the alpha.
    pub elite_clone_fraction: f64,
    /// Fraction of the next generation bred from the alpha and a pool member.
    pub elite_cross_fraction: f64,
    pub max_generations: u32,
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 2000,
            mutation_rate: 0.01,
            breeding_fraction: 0.20,
            elite_clone_fraction: 0.01,
            elite_cross_fraction: 0.30,
            max_generations: 100,
            seed: None,
        }
    }
}

fn floor_share(fraction: f64, total: usize) -> usize {
    (fraction * total as f64).floor() as usize
}

impl EvolutionConfig {
    #[must_use]
    pub fn breeding_pool_size(&self) -> usize {
        floor_share(self.breeding_fraction, self.population_size)
    }

    #[must_use]
    pub fn elite_clone_count(&self) -> usize {
        floor_share(self.elite_clone_fraction, self.population_size)
    }

    #[must_use]
    pub fn elite_cross_count(&self) -> usize {
        floor_share(self.elite_cross_fraction, self.population_size)
    }

    /// Children bred from two random pool members; absorbs all rounding.
    #[must_use]
    pub fn remainder_count(&self) -> usize {
        self.population_size
            .saturating_sub(self.elite_clone_count() + self.elite_cross_count())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub brain: BrainConfig,
    pub evolution: EvolutionConfig,
    pub controller: ControllerKind,
}

fn is_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Err(CoreError::Config)` describing the first violation.
    ///
    /// # Validation Rules
    /// - Grid dimensions positive and reasonable (<= 1000), at least two cells
    /// - Start cell inside the grid
    /// - TTL, step budget and fruit placement attempts positive
    /// - Rates and fractions in [0.0, 1.0]
    /// - Breeding pool holds at least one genome; elite buckets fit in the population
    pub fn validate(&self) -> Result<()> {
        let world = &self.world;
        ensure_config!(world.width > 0, "World width must be positive");
        ensure_config!(world.width <= 1000, "World width too large (max 1000)");
        ensure_config!(world.height > 0, "World height must be positive");
        ensure_config!(world.height <= 1000, "World height too large (max 1000)");
        ensure_config!(
            world.cell_count() >= 2,
            "World must have at least two cells so fruit can spawn"
        );
        let start = world.start_cell();
        ensure_config!(
            start.x >= 0
                && start.y >= 0
                && start.x < i32::from(world.width)
                && start.y < i32::from(world.height),
            "Start cell ({}, {}) lies outside the {}x{} grid",
            start.x,
            start.y,
            world.width,
            world.height
        );
        ensure_config!(world.initial_ttl > 0, "Initial TTL must be positive");
        ensure_config!(world.max_steps > 0, "Step budget must be positive");
        ensure_config!(
            world.fruit_spawn_attempts > 0,
            "Fruit spawn attempts must be positive"
        );
        ensure_config!(
            world.min_body_size >= 1 && world.min_body_size < world.cell_count(),
            "Minimum body size must be in [1, {})",
            world.cell_count()
        );
        if let TtlPolicy::Increment { amount } = world.ttl_policy {
            ensure_config!(amount > 0, "TTL increment must be positive");
        }

        ensure_config!(self.brain.hidden_width > 0, "Hidden width must be positive");

        let evo = &self.evolution;
        ensure_config!(evo.population_size > 0, "Population size must be positive");
        ensure_config!(
            evo.population_size <= 1_000_000,
            "Population size too large (max 1000000)"
        );
        ensure_config!(evo.max_generations > 0, "At least one generation must run");
        ensure_config!(
            is_unit_interval(evo.mutation_rate),
            "Mutation rate must be in [0.0, 1.0]"
        );
        ensure_config!(
            is_unit_interval(evo.breeding_fraction),
            "Breeding fraction must be in [0.0, 1.0]"
        );
        ensure_config!(
            is_unit_interval(evo.elite_clone_fraction),
            "Elite clone fraction must be in [0.0, 1.0]"
        );
        ensure_config!(
            is_unit_interval(evo.elite_cross_fraction),
            "Elite cross fraction must be in [0.0, 1.0]"
        );
        ensure_config!(
            evo.breeding_pool_size() >= 1,
            "Breeding pool is empty: floor({} * {}) = 0",
            evo.breeding_fraction,
            evo.population_size
        );
        ensure_config!(
            evo.elite_clone_count() + evo.elite_cross_count() <= evo.population_size,
            "Elite clones ({}) plus elite crosses ({}) exceed population size {}",
            evo.elite_clone_count(),
            evo.elite_cross_count(),
            evo.population_size
        );

        Ok(())
    }

    /// Parses and validates a `config.toml` document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config = toml::from_str::<Self>(content)
            .map_err(|e| crate::error::CoreError::config(format!("Invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// SHA-256 over the TOML form of every setting that changes episode
    /// outcomes.
    ///
    /// Fails when a value has no TOML representation, such as a step budget
    /// above `i64::MAX`.
    pub fn fingerprint(&self) -> Result<String> {
        use sha2::{Digest, Sha256};

        #[derive(Serialize)]
        struct Fingerprinted<'a> {
            controller: ControllerKind,
            world: &'a WorldConfig,
            brain: &'a BrainConfig,
            evolution: &'a EvolutionConfig,
        }

        let canonical = toml::to_string(&Fingerprinted {
            controller: self.controller,
            world: &self.world,
            brain: &self.brain,
            evolution: &self.evolution,
        })
        .map_err(|e| crate::error::CoreError::config(format!("Unfingerprintable config: {e}")))?;
        Ok(hex::encode(Sha256::digest(canonical.as_bytes())))
    }
}
