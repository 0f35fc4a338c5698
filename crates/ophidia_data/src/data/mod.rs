pub mod cell;
pub mod genome;
pub mod matrix;
pub mod record;
