use crate::journal::RunJournal;
use crate::sim::{self, RunOutcome, SimError};
use crate::types::Move;

#[derive(Debug, PartialEq, Eq)]
pub enum ReplayError {
    Sim(SimError),
    MoveMismatch { turn: u64, recorded: Move, replayed: Move },
    LengthMismatch { recorded: usize, replayed: usize },
    HashMismatch { recorded: u64, replayed: u64 },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub outcome: RunOutcome,
    pub final_turn: u64,
    pub final_snapshot_hash: u64,
}

/// Reruns the journal's parameters and verifies every recorded decision and
/// the final snapshot hash.
pub fn replay_to_end(journal: &RunJournal) -> Result<ReplayResult, ReplayError> {
    let rerun = sim::run_to_end(&journal.params).map_err(ReplayError::Sim)?;

    if rerun.journal.records.len() != journal.records.len() {
        return Err(ReplayError::LengthMismatch {
            recorded: journal.records.len(),
            replayed: rerun.journal.records.len(),
        });
    }
    for (recorded, replayed) in journal.records.iter().zip(&rerun.journal.records) {
        if recorded.decided != replayed.decided {
            return Err(ReplayError::MoveMismatch {
                turn: recorded.turn,
                recorded: recorded.decided,
                replayed: replayed.decided,
            });
        }
    }
    if rerun.journal.final_snapshot_hash != journal.final_snapshot_hash {
        return Err(ReplayError::HashMismatch {
            recorded: journal.final_snapshot_hash,
            replayed: rerun.journal.final_snapshot_hash,
        });
    }

    Ok(ReplayResult {
        outcome: rerun.outcome,
        final_turn: rerun.journal.final_turn(),
        final_snapshot_hash: rerun.journal.final_snapshot_hash,
    })
}
