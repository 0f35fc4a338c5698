//! Fruit placement.

use crate::body::Agent;
use crate::config::WorldConfig;
use crate::error::{CoreError, Result};
use crate::grid::Grid;
use ophidia_data::Cell;
use rand::Rng;

/// Rejection-samples fruit cells off the agent's body.
#[derive(Debug, Clone, Copy)]
pub struct FruitSpawner {
    grid: Grid,
    max_attempts: usize,
}

impl FruitSpawner {
    #[must_use]
    pub fn new(grid: Grid, max_attempts: usize) -> Self {
        Self {
            grid,
            max_attempts: max_attempts.max(1),
        }
    }

    #[must_use]
    pub fn from_config(world: &WorldConfig) -> Self {
        Self::new(Grid::from_config(world), world.fruit_spawn_attempts)
    }

    /// Draws uniformly random cells until one is free of the agent's body.
    ///
    /// Fails immediately when the body already covers the board and after
    /// `max_attempts` misses otherwise.
    pub fn spawn<R: Rng>(&self, agent: &Agent, rng: &mut R) -> Result<Cell> {
        let capacity = self.grid.cell_count();
        let occupied = agent.body().iter().filter(|&&c| self.grid.contains(c)).count();
        if occupied >= capacity {
            return Err(CoreError::FruitPlacement {
                attempts: 0,
                occupied,
                capacity,
            });
        }
        for _ in 0..self.max_attempts {
            let cell = self.grid.random_cell(rng);
            if !agent.occupies(cell) {
                return Ok(cell);
            }
        }
        Err(CoreError::FruitPlacement {
            attempts: self.max_attempts,
            occupied,
            capacity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::GenotypeLogic;
    use ophidia_data::{Direction, Genotype, LayerWidths};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn agent(start: Cell) -> Agent {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        Agent::new(
            Genotype::new_random_with_rng(LayerWidths::new(24, 4, 4), &mut rng),
            start,
            200,
        )
    }

    #[test]
    fn test_spawn_never_lands_on_body() {
        let mut snake = agent(Cell::new(0, 0));
        for _ in 0..3 {
            snake.move_in(Direction::East);
            snake.grow();
        }
        let spawner = FruitSpawner::new(Grid::new(3, 2), 1000);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..200 {
            let fruit = spawner.spawn(&snake, &mut rng).unwrap();
            assert!(!snake.occupies(fruit));
            assert!(Grid::new(3, 2).contains(fruit));
        }
    }

    #[test]
    fn test_full_board_fails_without_sampling() {
        let mut snake = agent(Cell::new(0, 0));
        snake.move_in(Direction::East);
        snake.grow();
        let spawner = FruitSpawner::new(Grid::new(2, 1), 1000);
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let err = spawner.spawn(&snake, &mut rng).unwrap_err();
        assert_eq!(
            err,
            CoreError::FruitPlacement {
                attempts: 0,
                occupied: 2,
                capacity: 2
            }
        );
    }

    #[test]
    fn test_attempt_budget_is_bounded() {
        let snake = agent(Cell::new(0, 0));
        // a single attempt on a two-cell board misses about half the time
        let spawner = FruitSpawner::new(Grid::new(2, 1), 1);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let failures = (0..100)
            .filter(|_| spawner.spawn(&snake, &mut rng).is_err())
            .count();
        assert!(failures > 0 && failures < 100);
    }
}
