//! Flat text weight tables.
//!
//! One matrix per file, one row per line, values whitespace-separated in
//! scientific notation. Tables carry no shape; loaders pass the layer widths.

use crate::error::{IoError, Result};
use ophidia_data::{Genome, LayerWidths, Matrix, LAYER_NAMES};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

/// `w_input_hidden.txt`, `w_hidden_hidden.txt`, `w_hidden_output.txt` under `dir`.
#[must_use]
pub fn table_paths(dir: &Path) -> [PathBuf; 3] {
    LAYER_NAMES.map(|name| dir.join(format!("{name}.txt")))
}

#[must_use]
pub fn format_table(matrix: &Matrix) -> String {
    let mut out = String::new();
    for row in matrix.iter_rows() {
        let line: Vec<String> = row.iter().map(|v| format!("{v:.18e}")).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}

/// Parses a table that must hold exactly `rows` x `cols` values.
pub fn parse_table(path: &Path, content: &str, rows: usize, cols: usize) -> Result<Matrix> {
    let mut values = Vec::with_capacity(rows * cols);
    let mut found_rows = 0;
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|e| {
                    IoError::parse(path, i + 1, format!("invalid value {token:?}: {e}"))
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        if row.len() != cols {
            return Err(IoError::parse(
                path,
                i + 1,
                format!("expected {cols} values, found {}", row.len()),
            ));
        }
        values.extend(row);
        found_rows += 1;
    }
    if found_rows != rows {
        return Err(IoError::validation(format!(
            "{} holds {found_rows} rows, expected {rows}",
            path.display()
        )));
    }
    Matrix::new(rows, cols, values).map_err(|e| IoError::validation(e.to_string()))
}

pub fn save_table(path: &Path, matrix: &Matrix) -> Result<()> {
    std::fs::write(path, format_table(matrix)).map_err(|e| {
        IoError::FileSystem(e).with_context(format!("writing weight table {}", path.display()))
    })
}

pub fn load_table(path: &Path, rows: usize, cols: usize) -> Result<Matrix> {
    if !path.exists() {
        return Err(IoError::not_found(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    parse_table(path, &content, rows, cols)
}

/// Writes the three weight tables of `genome` into `dir`.
pub fn save_genome(dir: &Path, genome: &Genome) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    for (path, matrix) in table_paths(dir).iter().zip(genome.layers()) {
        save_table(path, matrix)?;
    }
    tracing::debug!(dir = %dir.display(), "Saved genome weight tables");
    Ok(())
}

/// Reads a genome saved by [`save_genome`]; `widths` must match the saved one.
pub fn load_genome(dir: &Path, widths: LayerWidths) -> Result<Genome> {
    let [ih, hh, ho] = table_paths(dir);
    let [s_ih, s_hh, s_ho] = widths.shapes();
    let genome = Genome::new(
        load_table(&ih, s_ih.0, s_ih.1)?,
        load_table(&hh, s_hh.0, s_hh.1)?,
        load_table(&ho, s_ho.0, s_ho.1)?,
    )
    .map_err(|e| IoError::validation(e.to_string()))?;
    Ok(genome)
}
