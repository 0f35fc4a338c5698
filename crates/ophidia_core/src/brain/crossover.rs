use crate::error::{CoreError, Result};
use ophidia_data::{Genome, Matrix, LAYER_NAMES};
use rand::Rng;

/// Row-major single-point crossover at cut `(row, col)`: cells before the
/// cut come from `a`, the rest from `b`. `(0, 0)` reproduces `b` and
/// `(rows, cols)` reproduces `a`.
#[must_use]
pub fn crossover_matrix_at(a: &Matrix, b: &Matrix, row: usize, col: usize) -> Matrix {
    Matrix::from_fn(a.rows(), a.cols(), |i, j| {
        if i < row || (i == row && j < col) {
            a.get(i, j)
        } else {
            b.get(i, j)
        }
    })
}

pub fn crossover_matrix_with_rng<R: Rng>(a: &Matrix, b: &Matrix, rng: &mut R) -> Result<Matrix> {
    if a.shape() != b.shape() {
        return Err(CoreError::shape("crossover parents", a.shape(), b.shape()));
    }
    let row = rng.gen_range(0..=a.rows());
    let col = rng.gen_range(0..=a.cols());
    Ok(crossover_matrix_at(a, b, row, col))
}

fn cross_layer<R: Rng>(name: &str, a: &Matrix, b: &Matrix, rng: &mut R) -> Result<Matrix> {
    if a.shape() != b.shape() {
        return Err(CoreError::shape(name, a.shape(), b.shape()));
    }
    crossover_matrix_with_rng(a, b, rng)
}

/// Crosses each of the three layers independently.
pub fn genome_crossover_with_rng<R: Rng>(a: &Genome, b: &Genome, rng: &mut R) -> Result<Genome> {
    let [a_ih, a_hh, a_ho] = a.layers();
    let [b_ih, b_hh, b_ho] = b.layers();
    let ih = cross_layer(LAYER_NAMES[0], a_ih, b_ih, rng)?;
    let hh = cross_layer(LAYER_NAMES[1], a_hh, b_hh, rng)?;
    let ho = cross_layer(LAYER_NAMES[2], a_ho, b_ho, rng)?;
    Ok(Genome::new(ih, hh, ho)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn numbered(rows: usize, cols: usize, offset: f64) -> Matrix {
        Matrix::from_fn(rows, cols, |i, j| offset + (i * cols + j) as f64)
    }

    #[test]
    fn test_boundary_cuts() {
        let a = numbered(3, 4, 0.0);
        let b = numbered(3, 4, 100.0);
        assert_eq!(crossover_matrix_at(&a, &b, 0, 0), b);
        assert_eq!(crossover_matrix_at(&a, &b, 3, 4), a);
    }

    #[test]
    fn test_interior_cut_is_row_major() {
        let a = numbered(2, 3, 0.0);
        let b = numbered(2, 3, 100.0);
        let child = crossover_matrix_at(&a, &b, 1, 1);
        assert_eq!(child.row(0), a.row(0));
        assert_eq!(child.get(1, 0), a.get(1, 0));
        assert_eq!(child.get(1, 1), b.get(1, 1));
        assert_eq!(child.get(1, 2), b.get(1, 2));
    }

    #[test]
    fn test_random_crossover_takes_each_cell_from_a_parent() {
        let a = numbered(5, 6, 0.0);
        let b = numbered(5, 6, 100.0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let child = crossover_matrix_with_rng(&a, &b, &mut rng).unwrap();
            let mut from_b = false;
            for i in 0..5 {
                for j in 0..6 {
                    let v = child.get(i, j);
                    if v == b.get(i, j) {
                        from_b = true;
                    } else {
                        assert_eq!(v, a.get(i, j));
                        assert!(!from_b, "a-cell after the cut at ({i}, {j})");
                    }
                }
            }
        }
    }

    #[test]
    fn test_shape_mismatch_is_reported() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let err = crossover_matrix_with_rng(&Matrix::zeros(2, 2), &Matrix::zeros(2, 3), &mut rng)
            .unwrap_err();
        assert!(matches!(err, CoreError::ShapeMismatch { .. }));
    }
}
