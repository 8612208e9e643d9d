//! Stable snapshot hashing for deterministic verification.
//! This module exists to keep hashing concerns separate from decision code.
//! It does not own replay execution or journal persistence.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::Agent;

impl Agent {
    /// Order-stable digest of everything the agent has learned and where it
    /// stands. Two runs that diverge anywhere diverge here.
    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.config.seed);
        hasher.write_u32(self.config.maximum_door_frequency);
        hasher.write_u32(self.config.radius);
        hasher.write_u64(self.memory.turn());
        hasher.write_i32(self.memory.pos().y);
        hasher.write_i32(self.memory.pos().x);
        for cell in self.memory.visited() {
            hasher.write_i32(cell.y);
            hasher.write_i32(cell.x);
        }
        for (&(cell, direction), &frequency) in self.memory.doors() {
            hasher.write_i32(cell.y);
            hasher.write_i32(cell.x);
            hasher.write_u8(direction as u8);
            hasher.write_u32(frequency);
        }
        hasher.finish()
    }
}
