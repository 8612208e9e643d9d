//! Per-turn sensory input delivered by the environment.
//! This module exists to keep the wire shape of observations separate from
//! what the agent chooses to remember. It does not own memory or planning.

use serde::{Deserialize, Serialize};

use crate::types::{Cell, Direction};

/// One visible door this turn. `offset` is relative to the agent's cell.
///
/// `open_now` is authoritative for the current turn only. `frequency` is
/// reported once the environment has determined the door's period; the agent
/// commits only that field to long-term memory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoorObservation {
    pub offset: Cell,
    pub direction: Direction,
    pub open_now: bool,
    pub frequency: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percept {
    pub turn: u64,
    pub doors: Vec<DoorObservation>,
    /// Goal offset relative to the agent, present only while the goal is
    /// inside the perception radius.
    pub goal: Option<Cell>,
}

impl Percept {
    pub fn door(&self, offset: Cell, direction: Direction) -> Option<&DoorObservation> {
        self.doors.iter().find(|observation| {
            observation.offset == offset && observation.direction == direction
        })
    }

    /// Whether the door at `offset` facing `direction` is reported open this
    /// turn. A door not in the percept is not open as far as the agent may act.
    pub fn is_open_now(&self, offset: Cell, direction: Direction) -> bool {
        self.door(offset, direction).is_some_and(|observation| observation.open_now)
    }
}
