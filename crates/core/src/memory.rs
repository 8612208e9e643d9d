//! Accumulated door knowledge, visited set, and confirmed position.
//! This module exists so everything the agent believes about the maze lives in
//! one owned value, mutated only through its own methods. It does not own
//! graph construction or path planning.

use std::collections::{BTreeMap, BTreeSet, btree_map::Entry};

use crate::percept::Percept;
use crate::types::{Cell, Direction, MemoryError};

/// Door knowledge grows monotonically: a learned frequency is never changed,
/// only confirmed. The agent's own cell is always in `visited`.
#[derive(Clone, Debug)]
pub struct MazeMemory {
    doors: BTreeMap<(Cell, Direction), u32>,
    visited: BTreeSet<Cell>,
    pos: Cell,
    turn: u64,
}

impl Default for MazeMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeMemory {
    /// Fresh memory with the agent at the coordinate origin. All positions are
    /// tracked in the frame where the starting cell is `(0, 0)`.
    pub fn new() -> Self {
        let origin = Cell { y: 0, x: 0 };
        Self { doors: BTreeMap::new(), visited: BTreeSet::from([origin]), pos: origin, turn: 0 }
    }

    /// Folds one turn's observations into long-term knowledge. Idempotent on
    /// repeated identical observations; a frequency that contradicts a stored
    /// one is a fatal inconsistency, never an overwrite.
    pub fn ingest(&mut self, percept: &Percept) -> Result<(), MemoryError> {
        self.turn = percept.turn;
        self.visited.insert(self.pos);
        for observation in &percept.doors {
            let Some(observed) = observation.frequency else {
                continue;
            };
            let cell = self.pos.offset(observation.offset);
            match self.doors.entry((cell, observation.direction)) {
                Entry::Vacant(entry) => {
                    entry.insert(observed);
                }
                Entry::Occupied(entry) => {
                    let stored = *entry.get();
                    if stored != observed {
                        return Err(MemoryError::FrequencyConflict {
                            cell,
                            direction: observation.direction,
                            stored,
                            observed,
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Final gate before any move is emitted. Checks the live percept, not
    /// memory: the door on this cell facing `direction` and the reciprocal
    /// door on the neighbor must both be reported open right now.
    pub fn is_move_valid(&self, direction: Direction, percept: &Percept) -> bool {
        let here = Cell { y: 0, x: 0 };
        let (dy, dx) = direction.offset();
        let neighbor = Cell { y: dy, x: dx };
        percept.is_open_now(here, direction)
            && percept.is_open_now(neighbor, direction.opposite())
    }

    /// Applies the unit offset. Callers invoke this only after
    /// [`Self::is_move_valid`] confirmed the crossing.
    pub fn update_pos(&mut self, direction: Direction) {
        self.pos = self.pos.step(direction);
        self.visited.insert(self.pos);
    }

    pub fn pos(&self) -> Cell {
        self.pos
    }

    pub fn turn(&self) -> u64 {
        self.turn
    }

    pub fn visited(&self) -> &BTreeSet<Cell> {
        &self.visited
    }

    pub fn frequency(&self, cell: Cell, direction: Direction) -> Option<u32> {
        self.doors.get(&(cell, direction)).copied()
    }

    pub fn doors(&self) -> impl Iterator<Item = (&(Cell, Direction), &u32)> {
        self.doors.iter()
    }

    /// Every cell with at least one recorded door. Cells in here but not in
    /// `visited` form the exploration frontier.
    pub fn known_cells(&self) -> BTreeSet<Cell> {
        self.doors.keys().map(|&(cell, _)| cell).collect()
    }
}
