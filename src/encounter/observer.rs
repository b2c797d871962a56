//! Presentation hook
//!
//! The rendering collaborator sees the board after every cascade step. The
//! engine never waits on it; any animation timing is the observer's business.

use crate::board::{Board, Step};

/// Receives each cascade step after it has been applied to the board
pub trait StepObserver {
    fn on_step(&mut self, board: &Board, step: &Step);

    /// The settled board had no productive swap and was replaced wholesale
    fn on_reshuffle(&mut self, _board: &Board) {}
}

/// No presenter attached
impl StepObserver for () {
    fn on_step(&mut self, _board: &Board, _step: &Step) {}
}

/// Record steps, mostly for tests and replays
impl StepObserver for Vec<Step> {
    fn on_step(&mut self, _board: &Board, step: &Step) {
        self.push(step.clone());
    }
}

/// Writes each step to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogObserver;

impl StepObserver for LogObserver {
    fn on_step(&mut self, board: &Board, step: &Step) {
        match step {
            Step::Removed { generation, tiles } => {
                log::debug!("[gen {}] removed {} tiles", generation, tiles.len());
            }
            Step::Fell { generation, moves } => {
                log::debug!("[gen {}] {} tiles fell", generation, moves.len());
            }
            Step::Spawned { generation, tiles } => {
                log::debug!("[gen {}] spawned {} tiles", generation, tiles.len());
            }
            Step::Stable(res) => {
                log::debug!(
                    "Stable after {} generations ({}):\n{}",
                    res.generations,
                    res.tally,
                    board
                );
            }
        }
    }

    fn on_reshuffle(&mut self, board: &Board) {
        log::debug!("Dead board replaced:\n{}", board);
    }
}
