use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use maze_core::{MazeParams, RunJournal, RunOutcome, replay_to_end, run_to_end};
use std::fs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a seeded timing maze, run the agent to completion, and
    /// optionally write the run journal as JSON
    Run {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 12)]
        width: i32,
        #[arg(long, default_value_t = 10)]
        height: i32,
        /// Largest interior door period the generator may assign
        #[arg(long, default_value_t = 5)]
        max_frequency: u32,
        /// Perception radius around the agent
        #[arg(long, default_value_t = 4)]
        radius: u32,
        #[arg(long, default_value_t = 5_000)]
        turn_limit: u64,
        /// Path to write the journal JSON to
        #[arg(long)]
        journal: Option<String>,
    },
    /// Replay a recorded journal and verify every move and the final hash
    Replay {
        /// Path to the journal JSON file to replay
        #[arg(short, long)]
        journal: String,
    },
}

fn main() -> Result<()> {
    match Cli::parse().command {
        Command::Run { seed, width, height, max_frequency, radius, turn_limit, journal } => {
            let params = MazeParams {
                seed,
                width,
                height,
                maximum_door_frequency: max_frequency,
                radius,
                turn_limit,
            };
            let result = run_to_end(&params)
                .map_err(|e| anyhow::anyhow!("Run failed during execution: {:?}", e))?;

            match result.outcome {
                RunOutcome::GoalReached { turn } => println!("Goal reached on turn {turn}."),
                RunOutcome::TurnLimit => println!("Turn limit hit after {turn_limit} turns."),
            }
            println!("Moves recorded: {}", result.journal.records.len());
            println!("Snapshot Hash: {}", result.journal.final_snapshot_hash);

            if let Some(path) = journal {
                let encoded = serde_json::to_string_pretty(&result.journal)
                    .with_context(|| "Failed to serialize journal JSON")?;
                fs::write(&path, encoded)
                    .with_context(|| format!("Failed to write journal file: {path}"))?;
                println!("Journal written to {path}");
            }
        }
        Command::Replay { journal } => {
            let journal_data = fs::read_to_string(&journal)
                .with_context(|| format!("Failed to read journal file: {journal}"))?;
            let journal: RunJournal = serde_json::from_str(&journal_data)
                .with_context(|| "Failed to deserialize journal JSON")?;

            let result = replay_to_end(&journal)
                .map_err(|e| anyhow::anyhow!("Replay failed during execution: {:?}", e))?;

            println!("Replay verified.");
            println!("Final Turn: {}", result.final_turn);
            println!("Outcome: {:?}", result.outcome);
            println!("Snapshot Hash: {}", result.final_snapshot_hash);
        }
    }

    Ok(())
}
