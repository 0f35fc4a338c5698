//! Agent body: an ordered run of cells, head first.

use crate::config::{TtlPolicy, WorldConfig};
use crate::grid::Grid;
use ophidia_data::{Cell, Direction, Genome, Genotype, Rgb};
use std::collections::VecDeque;

/// Points per body segment beyond the head.
pub const FITNESS_PER_GROWTH: u64 = 200;
/// Survival time is scored modulo this, so it never outweighs one growth.
pub const SURVIVAL_BONUS_MODULUS: u64 = 201;

/// One simulated snake. Owns its genotype for the length of an episode.
///
/// Invariants: the body is never empty, index 0 is the head, and
/// consecutive cells are exactly one grid step apart.
#[derive(Debug, Clone)]
pub struct Agent {
    body: VecDeque<Cell>,
    facing: Direction,
    alive: bool,
    ttl: u32,
    time_lived: u64,
    /// Where the tail was before the last move; consumed by `grow`.
    vacated_tail: Option<Cell>,
    genotype: Genotype,
}

impl Agent {
    #[must_use]
    pub fn new(genotype: Genotype, start: Cell, ttl: u32) -> Self {
        Self {
            body: VecDeque::from([start]),
            facing: Direction::default(),
            alive: true,
            ttl,
            time_lived: 0,
            vacated_tail: None,
            genotype,
        }
    }

    #[must_use]
    pub fn spawn(genotype: Genotype, world: &WorldConfig) -> Self {
        Self::new(genotype, world.start_cell(), world.initial_ttl)
    }

    #[must_use]
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    #[must_use]
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    #[must_use]
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    #[must_use]
    pub fn time_lived(&self) -> u64 {
        self.time_lived
    }

    #[must_use]
    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    #[must_use]
    pub fn genome(&self) -> &Genome {
        &self.genotype.genome
    }

    #[must_use]
    pub fn color(&self) -> Rgb {
        self.genotype.color
    }

    #[must_use]
    pub fn into_genotype(self) -> Genotype {
        self.genotype
    }

    /// Advances the head one step; every other cell takes the position its
    /// head-ward neighbour held before the move.
    pub fn move_in(&mut self, direction: Direction) {
        let head = Grid::step(self.head(), direction);
        self.body.push_front(head);
        self.vacated_tail = self.body.pop_back();
        self.facing = direction;
    }

    /// Appends a tail cell where the tail stood before the last move.
    ///
    /// Without a preceding move the body is extended one step past the tail,
    /// continuing the last segment (or backwards from the facing direction
    /// for a lone head).
    pub fn grow(&mut self) {
        let cell = match self.vacated_tail.take() {
            Some(cell) => cell,
            None => {
                let tail = self.tail();
                let (dx, dy) = match self.body.len() {
                    1 => self.facing.opposite().delta(),
                    n => {
                        let before = self.body[n - 2];
                        (tail.x - before.x, tail.y - before.y)
                    }
                };
                tail.offset(dx, dy)
            }
        };
        self.body.push_back(cell);
    }

    #[must_use]
    pub fn on_wall(&self, grid: &Grid) -> bool {
        !grid.contains(self.head())
    }

    #[must_use]
    pub fn on_self(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|&c| c == head)
    }

    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Counts one elapsed step against the time-to-live.
    pub fn tick(&mut self) {
        self.time_lived += 1;
        self.ttl = self.ttl.saturating_sub(1);
    }

    pub fn refill_ttl(&mut self, policy: TtlPolicy, initial: u32) {
        self.ttl = match policy {
            TtlPolicy::Reset => initial,
            TtlPolicy::Increment { amount } => self.ttl.saturating_add(amount),
        };
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    #[must_use]
    pub fn fitness(&self) -> u64 {
        (self.size() as u64 - 1) * FITNESS_PER_GROWTH + self.time_lived % SURVIVAL_BONUS_MODULUS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brain::GenotypeLogic;
    use ophidia_data::LayerWidths;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn agent_at(x: i32, y: i32) -> Agent {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let genotype = Genotype::new_random_with_rng(LayerWidths::new(24, 4, 4), &mut rng);
        Agent::new(genotype, Cell::new(x, y), 200)
    }

    fn assert_contiguous(agent: &Agent) {
        let cells: Vec<Cell> = agent.body().iter().copied().collect();
        for pair in cells.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1, "gap in body {cells:?}");
        }
    }

    #[test]
    fn test_move_shifts_body_from_head_to_tail() {
        let mut agent = agent_at(5, 5);
        agent.move_in(Direction::East);
        agent.grow();
        agent.move_in(Direction::East);
        agent.grow();
        let before: Vec<Cell> = agent.body().iter().copied().collect();
        agent.move_in(Direction::South);
        let after: Vec<Cell> = agent.body().iter().copied().collect();
        assert_eq!(after[0], Cell::new(7, 6));
        assert_eq!(&after[1..], &before[..before.len() - 1]);
    }

    #[test]
    fn test_grow_adds_previous_tail_position() {
        let mut agent = agent_at(5, 5);
        agent.move_in(Direction::North);
        let head = agent.head();
        agent.grow();
        assert_eq!(agent.size(), 2);
        assert_eq!(agent.head(), head);
        assert_eq!(agent.tail(), Cell::new(5, 5));
        assert_contiguous(&agent);
    }

    #[test]
    fn test_grow_without_move_stays_contiguous() {
        let mut agent = agent_at(5, 5);
        agent.grow();
        agent.grow();
        agent.grow();
        assert_eq!(agent.size(), 4);
        assert_eq!(agent.head(), Cell::new(5, 5));
        assert_contiguous(&agent);
    }

    #[test]
    fn test_on_wall() {
        let grid = Grid::new(10, 10);
        let mut agent = agent_at(0, 3);
        assert!(!agent.on_wall(&grid));
        agent.move_in(Direction::West);
        assert!(agent.on_wall(&grid));
    }

    #[test]
    fn test_on_self_after_tight_turn() {
        let mut agent = agent_at(5, 5);
        for _ in 0..4 {
            agent.move_in(Direction::East);
            agent.grow();
        }
        assert!(!agent.on_self());
        agent.move_in(Direction::South);
        agent.move_in(Direction::West);
        assert!(!agent.on_self());
        agent.move_in(Direction::North);
        assert!(agent.on_self());
    }

    #[test]
    fn test_reversing_into_neck_collides() {
        let mut agent = agent_at(5, 5);
        agent.move_in(Direction::East);
        agent.grow();
        agent.move_in(Direction::East);
        agent.grow();
        agent.move_in(Direction::West);
        assert!(agent.on_self());
    }

    #[test]
    fn test_fitness_formula() {
        let mut agent = agent_at(5, 5);
        assert_eq!(agent.fitness(), 0);
        for _ in 0..250 {
            agent.tick();
        }
        assert_eq!(agent.fitness(), 250 % 201);
        agent.grow();
        agent.grow();
        assert_eq!(agent.fitness(), 400 + 49);
    }

    #[test]
    fn test_ttl_refill_policies() {
        let mut agent = agent_at(5, 5);
        agent.tick();
        agent.tick();
        assert_eq!(agent.ttl(), 198);
        agent.refill_ttl(TtlPolicy::Increment { amount: 100 }, 200);
        assert_eq!(agent.ttl(), 298);
        agent.refill_ttl(TtlPolicy::Reset, 200);
        assert_eq!(agent.ttl(), 200);
    }
}
