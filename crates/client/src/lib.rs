//! Headless client for the battle runtime.
//!
//! Loads content, starts a [`battle_runtime::Runtime`], lets a scripted
//! autopilot play for the player side and streams the combat log.

pub mod autopilot;
pub mod config;
pub mod summary;

pub use autopilot::{Move, next_move};
pub use config::ClientConfig;
pub use summary::MatchSummary;
