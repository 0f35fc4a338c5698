use super::BRAIN_OUTPUTS;
use crate::error::{CoreError, Result};
use ophidia_data::{Genome, Matrix};

const BIAS: f64 = 1.0;

#[must_use]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// `sigmoid(weights · input)`; `input` already carries its bias term.
fn activate_layer(weights: &Matrix, input: &[f64]) -> Vec<f64> {
    weights
        .iter_rows()
        .map(|row| sigmoid(row.iter().zip(input).map(|(w, x)| w * x).sum()))
        .collect()
}

pub fn forward(genome: &Genome, inputs: &[f64]) -> Result<[f64; BRAIN_OUTPUTS]> {
    let widths = genome.widths();
    if inputs.len() != widths.input {
        return Err(CoreError::shape(
            "network inputs",
            (widths.input, 1),
            (inputs.len(), 1),
        ));
    }
    if widths.output != BRAIN_OUTPUTS {
        return Err(CoreError::shape(
            "network outputs",
            (BRAIN_OUTPUTS, widths.hidden + 1),
            genome.hidden_output().shape(),
        ));
    }

    let mut layer: Vec<f64> = Vec::with_capacity(widths.input.max(widths.hidden) + 1);
    layer.extend_from_slice(inputs);
    layer.push(BIAS);

    let mut hidden = activate_layer(genome.input_hidden(), &layer);
    hidden.push(BIAS);
    let mut hidden = activate_layer(genome.hidden_hidden(), &hidden);
    hidden.push(BIAS);
    let output = activate_layer(genome.hidden_output(), &hidden);

    let mut outputs = [0.0; BRAIN_OUTPUTS];
    outputs.copy_from_slice(&output);
    Ok(outputs)
}

/// Index of the largest value, lowest index on ties.
#[must_use]
pub fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
