//! Shared test fixtures for the `agent` submodule test suites.
//! This module exists to avoid repeating door and percept setup across many
//! tests. It does not own production decision logic.

use super::*;
use crate::door;
use crate::percept::{DoorObservation, Percept};

pub(super) fn cell(y: i32, x: i32) -> Cell {
    Cell { y, x }
}

/// Memory preloaded with absolute-frame door frequencies, agent at origin.
pub(super) fn memory_with_doors(doors: &[((i32, i32), Direction, u32)]) -> MazeMemory {
    let mut memory = MazeMemory::new();
    let percept = Percept {
        turn: 0,
        doors: doors
            .iter()
            .map(|&((y, x), direction, frequency)| DoorObservation {
                offset: cell(y, x),
                direction,
                open_now: door::is_open(frequency, 0),
                frequency: Some(frequency),
            })
            .collect(),
        goal: None,
    };
    memory.ingest(&percept).expect("fixture doors must not conflict");
    memory
}

/// A straight east corridor of `length + 1` cells starting at the origin, with
/// the given per-crossing frequencies applied to both sides of each crossing.
pub(super) fn corridor_memory(frequencies: &[u32]) -> MazeMemory {
    let mut doors = Vec::new();
    for (index, &frequency) in frequencies.iter().enumerate() {
        let x = index as i32;
        doors.push(((0, x), Direction::Right, frequency));
        doors.push(((0, x + 1), Direction::Left, frequency));
    }
    memory_with_doors(&doors)
}

/// Live percept that reports every door of `memory` around the given cell as
/// open-or-closed per its stored schedule at `turn`.
pub(super) fn live_percept(memory: &MazeMemory, turn: u64) -> Percept {
    let pos = memory.pos();
    let doors = memory
        .doors()
        .map(|(&(door_cell, direction), &frequency)| DoorObservation {
            offset: cell(door_cell.y - pos.y, door_cell.x - pos.x),
            direction,
            open_now: door::is_open(frequency, turn),
            frequency: Some(frequency),
        })
        .collect();
    Percept { turn, doors, goal: None }
}
