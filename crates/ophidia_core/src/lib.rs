//! # Ophidia Core
//!
//! Simulation and evolution engine for Ophidia, a genetic algorithm that
//! evolves neural controllers for a grid-bound snake.
//!
//! This crate contains:
//! - Fixed-topology three-layer networks (forward pass, crossover, mutation)
//! - The agent body model, fruit placement and sensing
//! - A single-episode state machine with pluggable controllers
//! - The generational engine, run statistics and evaluation metrics
//!
//! ## Architecture
//!
//! Plain data lives in `ophidia_data`; the logic traits here are implemented
//! on those types. Episodes are independent and evaluated in parallel with
//! Rayon, each with its own seeded RNG, so a seeded run is reproducible
//! regardless of worker count.
//!
//! ## Example
//!
//! ```
//! use ophidia_core::brain::GenomeLogic;
//! use ophidia_data::{Genome, LayerWidths};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let mut rng = ChaCha8Rng::seed_from_u64(42);
//! let genome = Genome::new_random_with_rng(LayerWidths::new(24, 18, 4), &mut rng);
//!
//! let outputs = genome.forward(&[0.5; 24]).unwrap();
//! assert!(outputs.iter().all(|v| (0.0..=1.0).contains(v)));
//! ```

/// Agent body, movement, growth and fitness
pub mod body;
/// Fixed-topology neural network logic
pub mod brain;
/// Controllers that choose the next move
pub mod controller;
/// Configuration management for simulation and evolution parameters
pub mod config;
/// Error types
pub mod error;
/// Selection, reproduction and generation records
pub mod evolution;
/// Fruit placement
pub mod fruit;
/// Grid bounds and coordinate arithmetic
pub mod grid;
/// Evaluation counters and structured logging
pub mod metrics;
/// Network input encodings
pub mod sensing;
/// Single-episode simulation
pub mod simulation;
/// Run statistics
pub mod stats;

pub use body::Agent;
pub use brain::{GenomeLogic, GenotypeLogic};
pub use config::AppConfig;
pub use controller::{AnyController, Controller, HeuristicController, NeuralController};
pub use error::{CoreError, Result};
pub use evolution::{EvolutionEngine, RunOutcome};
pub use grid::Grid;
pub use metrics::{init_logging, EvaluationMetrics};
pub use simulation::{Episode, EpisodeResult, EpisodeView, Outcome, SimulationRunner};
