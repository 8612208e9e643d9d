use serde::{Deserialize, Serialize};

use crate::sim::MazeParams;
use crate::types::Move;

pub const JOURNAL_FORMAT_VERSION: u16 = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: u64,
    pub decided: Move,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunJournal {
    pub format_version: u16,
    pub params: MazeParams,
    pub records: Vec<TurnRecord>,
    /// Agent snapshot hash at the end of the run; zero until sealed.
    pub final_snapshot_hash: u64,
}

impl RunJournal {
    pub fn new(params: MazeParams) -> Self {
        Self {
            format_version: JOURNAL_FORMAT_VERSION,
            params,
            records: Vec::new(),
            final_snapshot_hash: 0,
        }
    }

    pub fn record(&mut self, turn: u64, decided: Move) {
        self.records.push(TurnRecord { turn, decided });
    }

    pub fn seal(&mut self, final_snapshot_hash: u64) {
        self.final_snapshot_hash = final_snapshot_hash;
    }

    pub fn final_turn(&self) -> u64 {
        self.records.last().map_or(0, |record| record.turn)
    }
}
