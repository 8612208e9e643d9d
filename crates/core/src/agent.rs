//! The per-turn decision loop: ingest, plan, validate, move.
//! This module exists to glue memory, graph, planner, and exploration policy
//! into the single move the environment asks for each turn. It does not own
//! ground-truth maze state or turn-loop wiring.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::memory::MazeMemory;
use crate::percept::Percept;
use crate::types::*;

mod explore;
mod graph;
mod hash;
mod planner;
#[cfg(test)]
mod test_support;

use explore::{exploration_step, select_target};
use graph::MazeGraph;
use planner::shortest_paths;

/// The autonomous maze agent. Owns all mutable per-run state; the environment
/// only ever hands it a percept and receives a move back.
pub struct Agent {
    config: AgentConfig,
    memory: MazeMemory,
    rng: ChaCha8Rng,
    log: Vec<LogEvent>,
    last_target: Option<Cell>,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            memory: MazeMemory::new(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            log: Vec::new(),
            last_target: None,
        }
    }

    /// Computes this turn's move. Synchronous and bounded: one memory ingest,
    /// one graph rebuild, one planner sweep.
    ///
    /// The only fatal outcome is a door-knowledge conflict from `ingest`;
    /// every planning dead end degrades to exploration and finally to
    /// [`Move::Wait`], and none of those corrupts memory.
    pub fn decide(&mut self, percept: &Percept) -> Result<Move, MemoryError> {
        self.memory.ingest(percept)?;

        let graph = MazeGraph::from_memory(&self.memory);
        let paths = shortest_paths(&graph, self.memory.pos(), percept.turn);

        if let Some((target, reason)) = select_target(&self.memory, &paths, percept, &mut self.rng)
        {
            if self.last_target != Some(target) {
                self.last_target = Some(target);
                self.log.push(LogEvent::TargetChanged { target, reason });
            }
            if let Some(path) = paths.path_to(target)
                && path.len() > 1
            {
                let direction = direction_between(path[0], path[1])
                    .expect("consecutive path cells must be grid-adjacent");
                return Ok(self.commit(direction, percept));
            }
        }

        self.log.push(LogEvent::ExplorationFallback { turn: percept.turn });
        if let Some(direction) = exploration_step(&self.memory, &graph, percept) {
            return Ok(self.commit(direction, percept));
        }

        self.log.push(LogEvent::Stalled { turn: percept.turn });
        Ok(Move::Wait)
    }

    /// Re-validates against the live percept and only then updates position.
    /// A rejection costs the turn but leaves memory intact; the next ingest
    /// self-corrects the staleness.
    fn commit(&mut self, direction: Direction, percept: &Percept) -> Move {
        if self.memory.is_move_valid(direction, percept) {
            self.memory.update_pos(direction);
            Move::from(direction)
        } else {
            self.log.push(LogEvent::MoveRejected { turn: percept.turn, direction });
            Move::Wait
        }
    }

    pub fn config(&self) -> AgentConfig {
        self.config
    }

    pub fn memory(&self) -> &MazeMemory {
        &self.memory
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }
}
