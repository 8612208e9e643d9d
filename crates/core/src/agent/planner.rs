//! Minimum-turn search over the time-expanded graph.
//! This module exists so arrival-turn bookkeeping stays out of decision flow.
//! It does not own target policy or move validation.

use std::collections::{BTreeMap, BTreeSet};

use super::graph::MazeGraph;
use crate::types::Cell;

/// Frontier entry ordered by arrival turn, then `(y, x)` for stable,
/// deterministic ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    arrival: u64,
    y: i32,
    x: i32,
}

/// Arrival turns and predecessors for every cell reachable from the start
/// with current knowledge. One sweep serves both path extraction and the
/// target selector's reachability preference.
#[derive(Clone, Debug)]
pub(super) struct ShortestPaths {
    start: Cell,
    arrival: BTreeMap<Cell, u64>,
    parent: BTreeMap<Cell, Cell>,
}

/// Dijkstra-style label-correcting search keyed by cumulative arrival turn.
///
/// Edge cost is evaluated lazily at the expanded node's arrival turn: waiting
/// earlier changes which doors are open later, so a crossing's wait is a
/// function of when the agent reaches its source cell. Every edge costs at
/// least the one turn of movement, so arrival turns strictly increase along
/// any path and the frontier pop order stays valid.
pub(super) fn shortest_paths(graph: &MazeGraph, start: Cell, start_turn: u64) -> ShortestPaths {
    let mut arrival = BTreeMap::new();
    let mut parent = BTreeMap::new();
    let mut open = BTreeSet::new();

    arrival.insert(start, start_turn);
    open.insert(OpenNode { arrival: start_turn, y: start.y, x: start.x });

    while let Some(node) = open.pop_first() {
        let cell = Cell { y: node.y, x: node.x };
        let best = *arrival.get(&cell).expect("popped node must have an arrival label");
        if node.arrival > best {
            // Superseded frontier entry.
            continue;
        }
        for edge in graph.edges_from(cell) {
            let Some(wait) = edge.wait_from(node.arrival) else {
                continue;
            };
            let next_arrival = node.arrival + wait + 1;
            if next_arrival < *arrival.get(&edge.to).unwrap_or(&u64::MAX) {
                arrival.insert(edge.to, next_arrival);
                parent.insert(edge.to, cell);
                open.insert(OpenNode { arrival: next_arrival, y: edge.to.y, x: edge.to.x });
            }
        }
    }

    ShortestPaths { start, arrival, parent }
}

impl ShortestPaths {
    pub fn arrival_at(&self, cell: Cell) -> Option<u64> {
        self.arrival.get(&cell).copied()
    }

    /// Full cell sequence from the start to `target`, start included, or
    /// `None` when no known door configuration connects them.
    pub fn path_to(&self, target: Cell) -> Option<Vec<Cell>> {
        if target == self.start {
            return Some(vec![self.start]);
        }
        self.arrival.get(&target)?;
        let mut path = vec![target];
        let mut current = target;
        while current != self.start {
            current = *self.parent.get(&current).expect("reached cell must have a predecessor");
            path.push(current);
        }
        path.reverse();
        Some(path)
    }
}
