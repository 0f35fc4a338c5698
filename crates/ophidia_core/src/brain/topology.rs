use ophidia_data::{Genome, Genotype, LayerWidths, Matrix, Rgb};
use rand::Rng;

fn random_matrix<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
    Matrix::from_fn(rows, cols, |_, _| rng.gen_range(-1.0..=1.0))
}

/// Fresh genome with every weight drawn uniformly from `[-1, 1]`.
pub fn create_genome_random_with_rng<R: Rng>(widths: LayerWidths, rng: &mut R) -> Genome {
    let [(r0, c0), (r1, c1), (r2, c2)] = widths.shapes();
    let ih = random_matrix(r0, c0, rng);
    let hh = random_matrix(r1, c1, rng);
    let ho = random_matrix(r2, c2, rng);
    match Genome::new(ih, hh, ho) {
        Ok(genome) => genome,
        Err(e) => unreachable!("shapes come from LayerWidths::shapes: {e}"),
    }
}

pub fn random_color<R: Rng>(rng: &mut R) -> Rgb {
    Rgb::new(
        rng.gen_range(1..=255),
        rng.gen_range(1..=255),
        rng.gen_range(1..=255),
    )
}

pub fn create_genotype_random_with_rng<R: Rng>(widths: LayerWidths, rng: &mut R) -> Genotype {
    let genome = create_genome_random_with_rng(widths, rng);
    Genotype {
        genome,
        color: random_color(rng),
    }
}
