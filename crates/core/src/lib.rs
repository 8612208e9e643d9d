pub mod agent;
pub mod door;
pub mod journal;
pub mod memory;
pub mod percept;
pub mod replay;
pub mod sim;
pub mod types;

pub use agent::Agent;
pub use journal::{RunJournal, TurnRecord};
pub use memory::MazeMemory;
pub use percept::{DoorObservation, Percept};
pub use replay::{ReplayError, ReplayResult, replay_to_end};
pub use sim::{Maze, MazeParams, RunOutcome, RunResult, SimError, run_to_end};
pub use types::*;
