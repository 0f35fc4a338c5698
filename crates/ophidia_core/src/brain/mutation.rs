use ophidia_data::{Genome, Matrix, Rgb};
use rand::Rng;

/// Additive perturbation: each weight independently gains `uniform(-1, 1)`
/// with probability `rate`. Values are not clamped.
pub fn mutate_matrix_with_rng<R: Rng>(matrix: &Matrix, rate: f64, rng: &mut R) -> Matrix {
    Matrix::from_fn(matrix.rows(), matrix.cols(), |i, j| {
        let value = matrix.get(i, j);
        if rng.gen::<f64>() < rate {
            value + rng.gen_range(-1.0..1.0)
        } else {
            value
        }
    })
}

pub fn mutate_genome_with_rng<R: Rng>(genome: &Genome, rate: f64, rng: &mut R) -> Genome {
    let [ih, hh, ho] = genome.layers();
    let layers = [
        mutate_matrix_with_rng(ih, rate, rng),
        mutate_matrix_with_rng(hh, rate, rng),
        mutate_matrix_with_rng(ho, rate, rng),
    ];
    match Genome::from_layers(layers) {
        Ok(child) => child,
        Err(e) => unreachable!("mutation preserves layer shapes: {e}"),
    }
}

/// Shifts every channel by -1, 0 or +1, wrapping at 256.
pub fn jitter_color<R: Rng>(color: Rgb, rng: &mut R) -> Rgb {
    let mut shift = |channel: u8| -> u8 {
        match rng.gen_range(-1i8..=1) {
            -1 => channel.wrapping_sub(1),
            1 => channel.wrapping_add(1),
            _ => channel,
        }
    };
    Rgb::new(shift(color.r), shift(color.g), shift(color.b))
}
