//! Match state reducer and player-action gates.
//!
//! The [`MatchEngine`] is the authoritative reducer for [`MatchState`]. A tick
//! advances the clock and energy, runs every living unit through the
//! scheduler, purges units whose removal time has passed, commits the tick's
//! log and refills the hand. Player actions (deploy, captain ultimate, pause,
//! speed, drag) are separate transitions applied between ticks.

mod captain;
mod clock;
mod context;
mod controls;
mod deploy;
mod errors;
pub mod scheduler;

pub use clock::{Frame, FrameClock};
pub use context::{TickContext, TickOutcome};
pub use errors::{CaptainSkillError, DeployError, DragError};
pub use scheduler::UnitAction;

use crate::env::MatchEnv;
use crate::state::{MatchState, Side};

/// What a single tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    /// Match-time seconds advanced. Zero for a skipped tick.
    pub dt: f64,
    /// Log entries appended.
    pub logged: usize,
    /// Units purged from the roster.
    pub removed: usize,
    /// True if this tick decided the match.
    pub decided: bool,
}

impl TickReport {
    pub fn advanced(&self) -> bool {
        self.dt > 0.0
    }
}

/// Reducer over a borrowed match state.
pub struct MatchEngine<'a> {
    state: &'a mut MatchState,
}

impl<'a> MatchEngine<'a> {
    pub fn new(state: &'a mut MatchState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &MatchState {
        self.state
    }

    /// Advances the match by one frame.
    ///
    /// A no-op while paused or once a winner is set. The frame delta is
    /// clamped to `max_frame_delta_ms` and scaled by the drag scale when a card
    /// is being dragged, otherwise by the match time scale.
    pub fn tick(&mut self, env: MatchEnv<'_>, frame: Frame) -> TickReport {
        let state = &mut *self.state;
        if state.is_paused || state.is_over() {
            return TickReport::default();
        }
        let config = env.config();

        let scale = if state.dragging.is_some() {
            config.global.drag_time_scale
        } else {
            state.time_scale
        };
        let delta_ms = frame.delta_ms.min(config.timing.max_frame_delta_ms);
        let dt = delta_ms as f64 / 1000.0 * scale;
        if dt <= 0.0 {
            return TickReport::default();
        }

        state.time_remaining = (state.time_remaining - dt).max(0.0);
        state.energy =
            (state.energy + config.global.energy_regen_per_sec * dt).min(state.max_energy);
        if state.time_remaining <= 0.0 {
            state.winner = Some(Side::Enemy);
            tracing::debug!("match timed out");
            return TickReport {
                dt,
                decided: true,
                ..TickReport::default()
            };
        }

        let now = frame.now;
        let label = state.time_label();
        let mut ctx = TickContext::new(env, now, state.rng_seed, state.rng_nonce, None);

        for unit in &mut state.units {
            unit.reset_fx(now, config.timing.fx_lifetime_ms);
        }
        for index in 0..state.units.len() {
            scheduler::run_unit(&mut ctx, &mut state.units, index, dt);
        }

        let outcome = ctx.finish();
        let before = state.units.len();
        state
            .units
            .retain(|u| u.remove_at.is_none_or(|at| now < at));
        let removed = before - state.units.len();

        let logged = outcome.records.len();
        state.log.append(&label, outcome.records);
        state.rng_nonce = outcome.rng_nonce;
        state.winner = outcome.winner;

        state.refill_hand();
        state.deck.replenish_if_low();

        TickReport {
            dt,
            logged,
            removed,
            decided: state.winner.is_some(),
        }
    }
}

/// Pure form of [`MatchEngine::tick`]: consumes a state and returns the next one.
pub fn tick(mut state: MatchState, env: MatchEnv<'_>, frame: Frame) -> MatchState {
    MatchEngine::new(&mut state).tick(env, frame);
    state
}
