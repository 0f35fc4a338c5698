use serde::{Deserialize, Serialize};

/// A single grid cell. Coordinates are signed so a head that steps off the
/// board is still representable until the wall check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[must_use]
    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Movement direction chosen by a controller.
///
/// The discriminants are the network's output-node indices. Genomes store
/// raw matrix rows in this order, so reordering the variants silently breaks
/// every saved genome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    West = 0,
    #[default]
    East = 1,
    North = 2,
    South = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Unit step; y grows southwards.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
        }
    }

    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }

    #[must_use]
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.delta() == (dx, dy))
    }
}

/// The eight ray directions used for sensing, in input-vector order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Compass {
    West,
    East,
    North,
    South,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Compass {
    pub const ALL: [Compass; 8] = [
        Compass::West,
        Compass::East,
        Compass::North,
        Compass::South,
        Compass::NorthWest,
        Compass::NorthEast,
        Compass::SouthWest,
        Compass::SouthEast,
    ];

    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Compass::West => (-1, 0),
            Compass::East => (1, 0),
            Compass::North => (0, -1),
            Compass::South => (0, 1),
            Compass::NorthWest => (-1, -1),
            Compass::NorthEast => (1, -1),
            Compass::SouthWest => (-1, 1),
            Compass::SouthEast => (1, 1),
        }
    }
}

impl From<Direction> for Compass {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::West => Compass::West,
            Direction::East => Compass::East,
            Direction::North => Compass::North,
            Direction::South => Compass::South,
        }
    }
}
