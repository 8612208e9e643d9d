//! Target selection and the local exploration fallback.
//! This module exists to keep where-to-go policy separate from how-to-get-there
//! search. It does not own the planner or memory mutation.

use std::collections::{BTreeSet, VecDeque};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::Rng;

use super::graph::MazeGraph;
use super::planner::ShortestPaths;
use crate::memory::MazeMemory;
use crate::percept::Percept;
use crate::types::{Cell, Direction, TargetReason};

/// Picks the cell the agent should currently head for.
///
/// The goal wins whenever the percept flags it. Otherwise the frontier of
/// known-but-unvisited cells is consulted: planner-reachable candidates are
/// preferred, nearest arrival first with `(y, x)` tie-break; when none is
/// reachable yet, a seeded pick keeps runs reproducible.
pub(super) fn select_target(
    memory: &MazeMemory,
    paths: &ShortestPaths,
    percept: &Percept,
    rng: &mut ChaCha8Rng,
) -> Option<(Cell, TargetReason)> {
    if let Some(goal_offset) = percept.goal {
        return Some((memory.pos().offset(goal_offset), TargetReason::Goal));
    }

    let frontier: Vec<Cell> = memory
        .known_cells()
        .into_iter()
        .filter(|candidate| !memory.visited().contains(candidate))
        .collect();
    if frontier.is_empty() {
        return None;
    }

    let nearest_reachable = frontier
        .iter()
        .filter_map(|&candidate| {
            paths.arrival_at(candidate).map(|arrival| (arrival, candidate.y, candidate.x))
        })
        .min();
    if let Some((_, y, x)) = nearest_reachable {
        return Some((Cell { y, x }, TargetReason::Frontier));
    }

    let pick = rng.next_u64() as usize % frontier.len();
    Some((frontier[pick], TargetReason::UnreachableFrontier))
}

/// Local fallback when the planner produced no usable path: a live-open
/// direction into an unvisited-or-unknown cell, else a live-open direction
/// whose known region still reaches an unvisited cell, else nothing.
pub(super) fn exploration_step(
    memory: &MazeMemory,
    graph: &MazeGraph,
    percept: &Percept,
) -> Option<Direction> {
    let open_now: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|&direction| memory.is_move_valid(direction, percept))
        .collect();

    for &direction in &open_now {
        if !memory.visited().contains(&memory.pos().step(direction)) {
            return Some(direction);
        }
    }
    open_now
        .into_iter()
        .find(|&direction| region_reaches_unvisited(memory, graph, memory.pos().step(direction)))
}

/// Shared reachable-and-unvisited predicate: breadth-first over known
/// crossings, ignoring timing. Used by the exploration fallback so it cannot
/// diverge from the graph the planner searches.
pub(super) fn region_reaches_unvisited(
    memory: &MazeMemory,
    graph: &MazeGraph,
    start: Cell,
) -> bool {
    let mut visited = BTreeSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        if !memory.visited().contains(&current) {
            return true;
        }
        for edge in graph.edges_from(current) {
            if visited.insert(edge.to) {
                queue.push_back(edge.to);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use rand_chacha::rand_core::SeedableRng;

    use super::*;
    use crate::agent::planner::shortest_paths;
    use crate::agent::test_support::*;

    fn seeded_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(11)
    }

    #[test]
    fn visible_goal_wins_over_any_frontier() {
        let memory = corridor_memory(&[1, 1]);
        let graph = MazeGraph::from_memory(&memory);
        let paths = shortest_paths(&graph, memory.pos(), 1);
        let percept = Percept { turn: 1, doors: vec![], goal: Some(cell(2, 3)) };

        let (target, reason) = select_target(&memory, &paths, &percept, &mut seeded_rng())
            .expect("goal must be targeted");
        assert_eq!(target, cell(2, 3));
        assert_eq!(reason, TargetReason::Goal);
    }

    #[test]
    fn nearest_reachable_frontier_is_preferred_with_y_x_tie_break() {
        // Two frontier cells at equal arrival: (0,1) and (1,0). Lowest (y,x)
        // wins deterministically.
        let memory = memory_with_doors(&[
            ((0, 0), Direction::Right, 1),
            ((0, 1), Direction::Left, 1),
            ((0, 0), Direction::Down, 1),
            ((1, 0), Direction::Up, 1),
        ]);
        let graph = MazeGraph::from_memory(&memory);
        let paths = shortest_paths(&graph, memory.pos(), 1);
        let percept = Percept { turn: 1, doors: vec![], goal: None };

        let (target, reason) = select_target(&memory, &paths, &percept, &mut seeded_rng())
            .expect("frontier must be targeted");
        assert_eq!(target, cell(0, 1));
        assert_eq!(reason, TargetReason::Frontier);
    }

    #[test]
    fn unreachable_frontier_choice_is_deterministic_per_seed() {
        // Doors on a far cell are known, but no crossing connects to it.
        let memory = memory_with_doors(&[((5, 5), Direction::Right, 2)]);
        let graph = MazeGraph::from_memory(&memory);
        let paths = shortest_paths(&graph, memory.pos(), 1);
        let percept = Percept { turn: 1, doors: vec![], goal: None };

        let first = select_target(&memory, &paths, &percept, &mut seeded_rng());
        let second = select_target(&memory, &paths, &percept, &mut seeded_rng());
        assert_eq!(first, second);
        let (target, reason) = first.expect("unreachable frontier still yields a target");
        assert_eq!(target, cell(5, 5));
        assert_eq!(reason, TargetReason::UnreachableFrontier);
    }

    #[test]
    fn no_frontier_yields_no_target() {
        let mut memory = corridor_memory(&[1]);
        memory.update_pos(Direction::Right);
        let graph = MazeGraph::from_memory(&memory);
        let paths = shortest_paths(&graph, memory.pos(), 2);
        let percept = Percept { turn: 2, doors: vec![], goal: None };

        assert_eq!(select_target(&memory, &paths, &percept, &mut seeded_rng()), None);
    }

    #[test]
    fn exploration_prefers_an_open_door_into_unvisited_territory() {
        let memory = corridor_memory(&[1, 1]);
        let graph = MazeGraph::from_memory(&memory);
        let percept = live_percept(&memory, 4);

        assert_eq!(exploration_step(&memory, &graph, &percept), Some(Direction::Right));
    }

    #[test]
    fn exploration_walks_back_through_visited_cells_toward_the_frontier() {
        // Agent at (0,1) with everything adjacent visited; the only unvisited
        // cell is behind it through the visited origin.
        let mut memory = memory_with_doors(&[
            ((0, 0), Direction::Right, 1),
            ((0, 1), Direction::Left, 1),
            ((0, 0), Direction::Down, 1),
            ((1, 0), Direction::Up, 1),
        ]);
        memory.update_pos(Direction::Right);
        let graph = MazeGraph::from_memory(&memory);
        let percept = live_percept(&memory, 5);

        assert_eq!(exploration_step(&memory, &graph, &percept), Some(Direction::Left));
    }

    #[test]
    fn exploration_reports_nothing_when_every_region_is_exhausted() {
        let mut memory = corridor_memory(&[1]);
        memory.update_pos(Direction::Right);
        let graph = MazeGraph::from_memory(&memory);
        let percept = live_percept(&memory, 6);

        assert_eq!(exploration_step(&memory, &graph, &percept), None);
    }
}
