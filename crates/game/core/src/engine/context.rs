use crate::config::GameConfig;
use crate::env::{Dice, MatchEnv, RngOracle};
use crate::state::{LogCategory, LogRecord, Side, Timestamp};

/// Scratch space shared by every step of one state transition.
///
/// Collects log records and the winner signal while the roster is being
/// mutated, so the reducer can commit them to the match state in one place.
pub struct TickContext<'a> {
    pub env: MatchEnv<'a>,
    pub now: Timestamp,
    pub dice: Dice<'a, dyn RngOracle + 'a>,
    winner: Option<Side>,
    records: Vec<LogRecord>,
}

impl<'a> TickContext<'a> {
    pub fn new(
        env: MatchEnv<'a>,
        now: Timestamp,
        rng_seed: u64,
        rng_nonce: u64,
        winner: Option<Side>,
    ) -> Self {
        Self {
            env,
            now,
            dice: Dice::new(env.rng(), rng_seed, rng_nonce),
            winner,
            records: Vec::new(),
        }
    }

    #[inline]
    pub fn config(&self) -> &'a GameConfig {
        self.env.config()
    }

    pub fn log(&mut self, category: LogCategory, side: Side, message: impl Into<String>) {
        self.records.push(LogRecord::new(category, side, message));
    }

    /// Records the winner unless one is already set.
    pub fn declare_winner(&mut self, side: Side) {
        if self.winner.is_none() {
            tracing::debug!(%side, "winner declared");
            self.winner = Some(side);
        }
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Consumes the context, returning records, winner and the advanced roll counter.
    pub fn finish(self) -> TickOutcome {
        TickOutcome {
            rng_nonce: self.dice.nonce(),
            winner: self.winner,
            records: self.records,
        }
    }
}

/// Everything a finished [`TickContext`] hands back to the match state.
#[derive(Debug)]
pub struct TickOutcome {
    pub rng_nonce: u64,
    pub winner: Option<Side>,
    pub records: Vec<LogRecord>,
}
