//! Decision makers that turn an episode view into a movement direction.

use crate::brain::GenomeLogic;
use crate::config::{ControllerKind, SensingMode};
use crate::error::Result;
use crate::grid::Grid;
use crate::sensing;
use crate::simulation::EpisodeView;
use ophidia_data::Direction;

pub trait Controller {
    fn decide(&self, view: &EpisodeView<'_>) -> Result<Direction>;
}

/// Feeds the sensed inputs through the agent's own genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NeuralController {
    pub sensing: SensingMode,
}

impl NeuralController {
    #[must_use]
    pub fn new(sensing: SensingMode) -> Self {
        Self { sensing }
    }
}

impl Controller for NeuralController {
    fn decide(&self, view: &EpisodeView<'_>) -> Result<Direction> {
        let inputs = sensing::sense(self.sensing, view);
        view.agent.genome().decide(&inputs)
    }
}

/// Greedy baseline: step towards the fruit along any direction that does
/// not end the episode on the next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeuristicController;

impl HeuristicController {
    fn is_fatal(view: &EpisodeView<'_>, direction: Direction) -> bool {
        let next = Grid::step(view.agent.head(), direction);
        if !view.grid.contains(next) {
            return true;
        }
        // the tail cell is vacated by the same move
        let body = view.agent.body();
        body.iter().take(body.len() - 1).any(|&c| c == next)
    }
}

impl Controller for HeuristicController {
    fn decide(&self, view: &EpisodeView<'_>) -> Result<Direction> {
        let head = view.agent.head();
        let best = Direction::ALL
            .into_iter()
            .filter(|&d| !Self::is_fatal(view, d))
            .min_by_key(|&d| Grid::step(head, d).manhattan(view.fruit));
        Ok(best.unwrap_or(view.agent.facing()))
    }
}

/// Controller selected by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyController {
    Neural(NeuralController),
    Heuristic(HeuristicController),
}

impl AnyController {
    #[must_use]
    pub fn from_config(kind: ControllerKind, sensing: SensingMode) -> Self {
        match kind {
            ControllerKind::Neural => Self::Neural(NeuralController::new(sensing)),
            ControllerKind::Heuristic => Self::Heuristic(HeuristicController),
        }
    }
}

impl Controller for AnyController {
    fn decide(&self, view: &EpisodeView<'_>) -> Result<Direction> {
        match self {
            Self::Neural(c) => c.decide(view),
            Self::Heuristic(c) => c.decide(view),
        }
    }
}
