//! Time-expanded adjacency over known cells.
//! This module exists to turn raw door knowledge into something the planner
//! can expand. It does not own search order or target policy.

use std::collections::BTreeMap;

use crate::door;
use crate::memory::MazeMemory;
use crate::types::{Cell, Direction};

/// A directed crossing whose traversal cost depends on the arrival turn. Both
/// reciprocal door frequencies are known and nonzero by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Edge {
    pub to: Cell,
    pub direction: Direction,
    pub out_frequency: u32,
    pub in_frequency: u32,
}

impl Edge {
    /// Turns spent waiting at the source cell before both doors align, when
    /// arriving there at `turn`. Capped at one LCM period by construction.
    pub fn wait_from(&self, turn: u64) -> Option<u64> {
        door::aligned_wait(self.out_frequency, self.in_frequency, turn)
    }
}

/// Rebuilt from memory every turn; O(known doors). Unknown doors form no
/// edge: unknown is not closed, but it is unusable for planning.
#[derive(Clone, Debug, Default)]
pub(super) struct MazeGraph {
    edges: BTreeMap<Cell, Vec<Edge>>,
}

impl MazeGraph {
    pub fn from_memory(memory: &MazeMemory) -> Self {
        let mut edges: BTreeMap<Cell, Vec<Edge>> = BTreeMap::new();
        for (&(cell, direction), &out_frequency) in memory.doors() {
            if out_frequency == 0 {
                continue;
            }
            let to = cell.step(direction);
            let Some(in_frequency) = memory.frequency(to, direction.opposite()) else {
                continue;
            };
            if in_frequency == 0 {
                continue;
            }
            edges
                .entry(cell)
                .or_default()
                .push(Edge { to, direction, out_frequency, in_frequency });
        }
        Self { edges }
    }

    pub fn edges_from(&self, cell: Cell) -> &[Edge] {
        self.edges.get(&cell).map_or(&[], Vec::as_slice)
    }
}
