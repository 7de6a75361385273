//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the match state, ticks it, and executes player
//! commands between ticks.

mod simulation;

pub use simulation::{Command, SimulationWorker};
