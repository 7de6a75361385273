//! Event payloads for the match topic.

use battle_core::Side;
use serde::{Deserialize, Serialize};

/// Match lifecycle events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MatchEvent {
    /// A new match was set up.
    Started { seed: u64 },

    /// A winner was decided. The state is final until the next restart.
    Ended {
        winner: Side,
        /// Remaining match time when the match ended, `m:ss`.
        time: String,
    },
}
