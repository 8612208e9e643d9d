use serde::{Deserialize, Serialize};

/// A grid coordinate. Also used for relative offsets in percepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub y: i32,
    pub x: i32,
}

impl Cell {
    pub fn step(self, direction: Direction) -> Cell {
        let (dy, dx) = direction.offset();
        Cell { y: self.y + dy, x: self.x + dx }
    }

    pub fn offset(self, delta: Cell) -> Cell {
        Cell { y: self.y + delta.y, x: self.x + delta.x }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Up,
    Right,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Self::Left, Self::Up, Self::Right, Self::Down];

    /// Unit offset as `(dy, dx)`.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Self::Left => (0, -1),
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Self::Left => Self::Right,
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
        }
    }
}

/// The single discrete value the agent emits each turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Move {
    Wait,
    Left,
    Up,
    Right,
    Down,
}

impl Move {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Wait => None,
            Self::Left => Some(Direction::Left),
            Self::Up => Some(Direction::Up),
            Self::Right => Some(Direction::Right),
            Self::Down => Some(Direction::Down),
        }
    }
}

impl From<Direction> for Move {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Left => Self::Left,
            Direction::Up => Self::Up,
            Direction::Right => Self::Right,
            Direction::Down => Self::Down,
        }
    }
}

/// Direction of the single step from `from` to an adjacent cell `to`.
pub fn direction_between(from: Cell, to: Cell) -> Option<Direction> {
    match (to.y - from.y, to.x - from.x) {
        (0, -1) => Some(Direction::Left),
        (-1, 0) => Some(Direction::Up),
        (0, 1) => Some(Direction::Right),
        (1, 0) => Some(Direction::Down),
        _ => None,
    }
}

/// Door periodicity is static ground truth, so a contradicting observation
/// means the upstream geometry or indexing is wrong. Fatal by design intent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MemoryError {
    FrequencyConflict { cell: Cell, direction: Direction, stored: u32, observed: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetReason {
    Goal,
    Frontier,
    UnreachableFrontier,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogEvent {
    TargetChanged { target: Cell, reason: TargetReason },
    MoveRejected { turn: u64, direction: Direction },
    ExplorationFallback { turn: u64 },
    Stalled { turn: u64 },
}

/// Per-run agent parameters, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentConfig {
    pub maximum_door_frequency: u32,
    pub radius: u32,
    pub seed: u64,
}
