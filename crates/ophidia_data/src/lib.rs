//! Core data structures for the ophidia simulation.
//!
//! Everything in this crate is plain data: grid coordinates, weight matrices,
//! genomes and the records the evolution loop emits. Behaviour lives in
//! `ophidia_core`, which implements its logic traits on these types.

pub mod data;

pub use data::cell::{Cell, Compass, Direction};
pub use data::genome::{Genome, Genotype, LayerWidths, Rgb, LAYER_NAMES};
pub use data::matrix::{Matrix, ShapeMismatch};
pub use data::record::{FrameSnapshot, GenerationRecord, GenerationReport, RunSummary};
