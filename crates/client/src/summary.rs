//! End-of-match summary printed as JSON.

use serde::Serialize;

use battle_core::{MatchState, Side};

#[derive(Debug, Serialize)]
pub struct MatchSummary {
    pub winner: Option<Side>,
    pub time_left: String,
    pub seed: u64,
    pub player_units: usize,
    pub enemy_units: usize,
    pub player_captain_hp: u32,
    pub enemy_captain_hp: u32,
    pub log_entries: u64,
}

impl MatchSummary {
    pub fn from_state(state: &MatchState) -> Self {
        let captain_hp = |side| state.captain(side).map_or(0, |c| c.stats.hp);
        Self {
            winner: state.winner,
            time_left: state.time_label(),
            seed: state.rng_seed,
            player_units: state.living(Side::Player).count(),
            enemy_units: state.living(Side::Enemy).count(),
            player_captain_hp: captain_hp(Side::Player),
            enemy_captain_hp: captain_hp(Side::Enemy),
            log_entries: state.log.next_seq(),
        }
    }
}
