use super::matrix::{Matrix, ShapeMismatch};
use serde::{Deserialize, Serialize};

/// File stems of the three weight tables, in layer order.
pub const LAYER_NAMES: [&str; 3] = ["w_input_hidden", "w_hidden_hidden", "w_hidden_output"];

/// Node counts of the three network layers (bias nodes excluded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerWidths {
    pub input: usize,
    pub hidden: usize,
    pub output: usize,
}

impl LayerWidths {
    #[must_use]
    pub const fn new(input: usize, hidden: usize, output: usize) -> Self {
        Self {
            input,
            hidden,
            output,
        }
    }

    /// Expected `(rows, cols)` of each weight matrix; every column count
    /// includes the bias input.
    #[must_use]
    pub const fn shapes(&self) -> [(usize, usize); 3] {
        [
            (self.hidden, self.input + 1),
            (self.hidden, self.hidden + 1),
            (self.output, self.hidden + 1),
        ]
    }
}

/// The three weight matrices defining one controller.
///
/// A genome never changes after construction; breeding always builds a new
/// one. Shapes are checked on every construction path, deserialization
/// included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GenomeRepr")]
pub struct Genome {
    input_hidden: Matrix,
    hidden_hidden: Matrix,
    hidden_output: Matrix,
}

#[derive(Deserialize)]
struct GenomeRepr {
    input_hidden: Matrix,
    hidden_hidden: Matrix,
    hidden_output: Matrix,
}

impl TryFrom<GenomeRepr> for Genome {
    type Error = ShapeMismatch;

    fn try_from(repr: GenomeRepr) -> Result<Self, Self::Error> {
        Genome::new(repr.input_hidden, repr.hidden_hidden, repr.hidden_output)
    }
}

impl Genome {
    pub fn new(
        input_hidden: Matrix,
        hidden_hidden: Matrix,
        hidden_output: Matrix,
    ) -> Result<Self, ShapeMismatch> {
        let widths = LayerWidths::new(
            input_hidden.cols().saturating_sub(1),
            input_hidden.rows(),
            hidden_output.rows(),
        );
        if input_hidden.cols() == 0 {
            return Err(ShapeMismatch::new(
                LAYER_NAMES[0],
                (widths.hidden, 1),
                input_hidden.shape(),
            ));
        }
        let [_, hh_shape, ho_shape] = widths.shapes();
        if hidden_hidden.shape() != hh_shape {
            return Err(ShapeMismatch::new(
                LAYER_NAMES[1],
                hh_shape,
                hidden_hidden.shape(),
            ));
        }
        if hidden_output.shape() != ho_shape {
            return Err(ShapeMismatch::new(
                LAYER_NAMES[2],
                ho_shape,
                hidden_output.shape(),
            ));
        }
        Ok(Self {
            input_hidden,
            hidden_hidden,
            hidden_output,
        })
    }

    /// Builds a genome from layers in `LAYER_NAMES` order.
    pub fn from_layers(layers: [Matrix; 3]) -> Result<Self, ShapeMismatch> {
        let [ih, hh, ho] = layers;
        Self::new(ih, hh, ho)
    }

    #[must_use]
    pub fn widths(&self) -> LayerWidths {
        LayerWidths::new(
            self.input_hidden.cols() - 1,
            self.input_hidden.rows(),
            self.hidden_output.rows(),
        )
    }

    #[must_use]
    pub fn input_hidden(&self) -> &Matrix {
        &self.input_hidden
    }

    #[must_use]
    pub fn hidden_hidden(&self) -> &Matrix {
        &self.hidden_hidden
    }

    #[must_use]
    pub fn hidden_output(&self) -> &Matrix {
        &self.hidden_output
    }

    #[must_use]
    pub fn layers(&self) -> [&Matrix; 3] {
        [&self.input_hidden, &self.hidden_hidden, &self.hidden_output]
    }
}

/// Cosmetic body colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// What survives from one generation to the next: the genome plus the
/// inherited cosmetic colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genotype {
    pub genome: Genome,
    pub color: Rgb,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layers(widths: LayerWidths) -> [Matrix; 3] {
        widths.shapes().map(|(r, c)| Matrix::zeros(r, c))
    }

    #[test]
    fn test_new_accepts_consistent_shapes() {
        let widths = LayerWidths::new(24, 18, 4);
        let genome = Genome::from_layers(layers(widths)).unwrap();
        assert_eq!(genome.widths(), widths);
        assert_eq!(genome.input_hidden().shape(), (18, 25));
        assert_eq!(genome.hidden_hidden().shape(), (18, 19));
        assert_eq!(genome.hidden_output().shape(), (4, 19));
    }

    #[test]
    fn test_new_rejects_hidden_mismatch() {
        let err = Genome::new(
            Matrix::zeros(18, 25),
            Matrix::zeros(17, 19),
            Matrix::zeros(4, 19),
        )
        .unwrap_err();
        assert_eq!(err.context, "w_hidden_hidden");
        assert_eq!(err.expected, (18, 19));
    }

    #[test]
    fn test_new_rejects_output_mismatch() {
        let err = Genome::new(
            Matrix::zeros(18, 25),
            Matrix::zeros(18, 19),
            Matrix::zeros(4, 18),
        )
        .unwrap_err();
        assert_eq!(err.context, "w_hidden_output");
    }

    #[test]
    fn test_deserialize_rejects_bad_genome() {
        let genome = Genome::from_layers(layers(LayerWidths::new(2, 2, 1))).unwrap();
        let mut json: serde_json::Value = serde_json::to_value(&genome).unwrap();
        json["hidden_output"] = serde_json::to_value(Matrix::zeros(1, 5)).unwrap();
        assert!(serde_json::from_value::<Genome>(json).is_err());
    }
}
