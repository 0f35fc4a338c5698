//! Grid bounds and coordinate arithmetic.

use crate::config::WorldConfig;
use ophidia_data::{Cell, Compass, Direction};
use rand::Rng;

/// Rectangular board of `width * height` cells with the origin at the
/// north-west corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: i32,
    height: i32,
}

impl Grid {
    #[must_use]
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: i32::from(width),
            height: i32::from(height),
        }
    }

    #[must_use]
    pub fn from_config(world: &WorldConfig) -> Self {
        Self::new(world.width, world.height)
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn cell_count(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.width && cell.y < self.height
    }

    #[must_use]
    pub fn step(cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.delta();
        cell.offset(dx, dy)
    }

    /// Uniformly random in-bounds cell.
    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        Cell::new(rng.gen_range(0..self.width), rng.gen_range(0..self.height))
    }

    /// Cells visited walking from `origin` (exclusive) along `compass`,
    /// paired with their step distance, until the walk leaves the board.
    pub fn ray(&self, origin: Cell, compass: Compass) -> impl Iterator<Item = (u32, Cell)> + '_ {
        let (dx, dy) = compass.delta();
        (1u32..)
            .map(move |d| (d, origin.offset(dx * d as i32, dy * d as i32)))
            .take_while(move |&(_, cell)| self.contains(cell))
    }

    /// Steps from `origin` along `compass` to the first off-board cell.
    /// Always at least 1.
    #[must_use]
    pub fn distance_to_wall(&self, origin: Cell, compass: Compass) -> u32 {
        let (dx, dy) = compass.delta();
        let steps = |pos: i32, delta: i32, limit: i32| -> u32 {
            match delta {
                d if d < 0 => (pos + 1).max(1) as u32,
                d if d > 0 => (limit - pos).max(1) as u32,
                _ => u32::MAX,
            }
        };
        steps(origin.x, dx, self.width).min(steps(origin.y, dy, self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_contains_bounds() {
        let grid = Grid::new(20, 10);
        assert!(grid.contains(Cell::new(0, 0)));
        assert!(grid.contains(Cell::new(19, 9)));
        assert!(!grid.contains(Cell::new(20, 9)));
        assert!(!grid.contains(Cell::new(19, 10)));
        assert!(!grid.contains(Cell::new(-1, 0)));
        assert_eq!(grid.cell_count(), 200);
    }

    #[test]
    fn test_ray_stops_at_boundary() {
        let grid = Grid::new(5, 5);
        let cells: Vec<_> = grid.ray(Cell::new(1, 2), Compass::West).collect();
        assert_eq!(cells, vec![(1, Cell::new(0, 2))]);
        let diag: Vec<_> = grid.ray(Cell::new(1, 1), Compass::SouthEast).collect();
        assert_eq!(diag.len(), 3);
        assert_eq!(diag[2], (3, Cell::new(4, 4)));
    }

    #[test]
    fn test_distance_to_wall_matches_ray_length() {
        let grid = Grid::new(7, 4);
        for x in 0..7 {
            for y in 0..4 {
                let origin = Cell::new(x, y);
                for compass in Compass::ALL {
                    let walked = grid.ray(origin, compass).count() as u32 + 1;
                    assert_eq!(grid.distance_to_wall(origin, compass), walked);
                }
            }
        }
    }

    #[test]
    fn test_random_cell_in_bounds() {
        let grid = Grid::new(3, 2);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..100 {
            assert!(grid.contains(grid.random_cell(&mut rng)));
        }
    }
}
