pub mod crossover;
pub mod forward;
pub mod mutation;
pub mod topology;

use crate::error::Result;
use ophidia_data::{Direction, Genome, Genotype, LayerWidths};
use rand::Rng;

pub use crate::config::BRAIN_OUTPUTS;
pub use ophidia_data::Matrix;
pub use topology::{create_genome_random_with_rng, create_genotype_random_with_rng};

/// Trait defining the neural logic of a fixed-topology three-layer network.
pub trait GenomeLogic: Sized {
    fn new_random(widths: LayerWidths) -> Self;
    fn new_random_with_rng<R: Rng>(widths: LayerWidths, rng: &mut R) -> Self;

    /// Output activations for `inputs`, each in `[0, 1]`.
    fn forward(&self, inputs: &[f64]) -> Result<[f64; BRAIN_OUTPUTS]>;

    /// Direction of the strongest output; ties go to the lowest index.
    fn decide(&self, inputs: &[f64]) -> Result<Direction>;

    fn crossover_with_rng<R: Rng>(&self, other: &Self, rng: &mut R) -> Result<Self>;
    fn mutate_with_rng<R: Rng>(&self, rate: f64, rng: &mut R) -> Self;
}

/// Trait defining how genotypes are created and bred.
pub trait GenotypeLogic: Sized {
    fn new_random_with_rng<R: Rng>(widths: LayerWidths, rng: &mut R) -> Self;

    /// Crossover with `partner`, then mutation, plus an inherited colour.
    fn breed_with_rng<R: Rng>(&self, partner: &Self, mutation_rate: f64, rng: &mut R)
        -> Result<Self>;
}

impl GenomeLogic for Genome {
    fn new_random(widths: LayerWidths) -> Self {
        let mut rng = rand::thread_rng();
        Self::new_random_with_rng(widths, &mut rng)
    }

    fn new_random_with_rng<R: Rng>(widths: LayerWidths, rng: &mut R) -> Self {
        topology::create_genome_random_with_rng(widths, rng)
    }

    fn forward(&self, inputs: &[f64]) -> Result<[f64; BRAIN_OUTPUTS]> {
        forward::forward(self, inputs)
    }

    fn decide(&self, inputs: &[f64]) -> Result<Direction> {
        let outputs = forward::forward(self, inputs)?;
        let index = forward::argmax(&outputs);
        Ok(Direction::ALL[index])
    }

    fn crossover_with_rng<R: Rng>(&self, other: &Self, rng: &mut R) -> Result<Self> {
        crossover::genome_crossover_with_rng(self, other, rng)
    }

    fn mutate_with_rng<R: Rng>(&self, rate: f64, rng: &mut R) -> Self {
        mutation::mutate_genome_with_rng(self, rate, rng)
    }
}

impl GenotypeLogic for Genotype {
    fn new_random_with_rng<R: Rng>(widths: LayerWidths, rng: &mut R) -> Self {
        topology::create_genotype_random_with_rng(widths, rng)
    }

    fn breed_with_rng<R: Rng>(
        &self,
        partner: &Self,
        mutation_rate: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let color = if rng.gen_bool(0.5) {
            self.color
        } else {
            partner.color
        };
        let genome = self
            .genome
            .crossover_with_rng(&partner.genome, rng)?
            .mutate_with_rng(mutation_rate, rng);
        Ok(Genotype {
            genome,
            color: mutation::jitter_color(color, rng),
        })
    }
}
