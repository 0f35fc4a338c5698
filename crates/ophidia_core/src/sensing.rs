//! Input encodings built from the agent's head.

use crate::config::SensingMode;
use crate::grid::Grid;
use crate::simulation::EpisodeView;
use ophidia_data::{Compass, Direction};

/// Builds the network input vector for `mode`.
#[must_use]
pub fn sense(mode: SensingMode, view: &EpisodeView<'_>) -> Vec<f64> {
    match mode {
        SensingMode::RayCast => ray_cast(view),
        SensingMode::Manhattan => manhattan(view),
    }
}

fn inverse(distance: Option<u32>) -> f64 {
    distance.map_or(0.0, |d| 1.0 / f64::from(d))
}

/// Three metrics per ray, rays in [`Compass::ALL`] order:
/// inverse distance to the fruit if the ray crosses it, inverse distance to
/// the first body cell on the ray, inverse distance to the board edge.
#[must_use]
pub fn ray_cast(view: &EpisodeView<'_>) -> Vec<f64> {
    let head = view.agent.head();
    let mut inputs = Vec::with_capacity(Compass::ALL.len() * 3);
    for compass in Compass::ALL {
        let mut fruit = None;
        let mut body = None;
        for (distance, cell) in view.grid.ray(head, compass) {
            if fruit.is_none() && cell == view.fruit {
                fruit = Some(distance);
            }
            if body.is_none() && view.agent.occupies(cell) {
                body = Some(distance);
            }
            if fruit.is_some() && body.is_some() {
                break;
            }
        }
        inputs.push(inverse(fruit));
        inputs.push(inverse(body));
        inputs.push(inverse(Some(view.grid.distance_to_wall(head, compass))));
    }
    inputs
}

/// Raw Manhattan distances from each neighbouring cell (in
/// [`Direction::ALL`] order) to the fruit, to the nearest non-head body
/// cell, and the step count from the head to the board edge.
#[must_use]
pub fn manhattan(view: &EpisodeView<'_>) -> Vec<f64> {
    let head = view.agent.head();
    let no_body = view.grid.cell_count() as f64;
    let mut inputs = Vec::with_capacity(Direction::ALL.len() * 3);
    for direction in Direction::ALL {
        let next = Grid::step(head, direction);
        let body = view
            .agent
            .body()
            .iter()
            .skip(1)
            .map(|&c| next.manhattan(c))
            .min()
            .map_or(no_body, f64::from);
        inputs.push(f64::from(next.manhattan(view.fruit)));
        inputs.push(body);
        inputs.push(f64::from(view.grid.distance_to_wall(head, direction.into())));
    }
    inputs
}
