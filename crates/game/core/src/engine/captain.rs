//! Player-triggered captain ultimate.

use crate::env::MatchEnv;
use crate::skill::perform_skill;
use crate::state::{Side, Timestamp};

use super::{CaptainSkillError, MatchEngine, TickContext};

impl MatchEngine<'_> {
    /// Fires the player captain's skill.
    ///
    /// Held to the same threshold as auto-casting: the meter must be full.
    /// Applied immediately between ticks; rage resets to zero.
    ///
    /// # Errors
    ///
    /// Any [`CaptainSkillError`]; the state is unchanged when one is returned.
    pub fn trigger_captain_skill(
        &mut self,
        env: MatchEnv<'_>,
        now: Timestamp,
    ) -> Result<(), CaptainSkillError> {
        let state = &*self.state;
        if state.is_over() {
            return Err(CaptainSkillError::MatchOver);
        }
        if state.is_paused {
            return Err(CaptainSkillError::Paused);
        }
        let index = state
            .units
            .iter()
            .position(|u| u.side == Side::Player && u.is_captain() && u.is_alive())
            .ok_or(CaptainSkillError::CaptainMissing(Side::Player))?;
        let captain = &state.units[index];
        let skill_id = captain.skill_id.ok_or(CaptainSkillError::NoSkill)?;
        if env.skills().skill(skill_id).is_none() {
            return Err(CaptainSkillError::UnknownSkill(skill_id));
        }
        if !captain.stats.is_rage_full() {
            return Err(CaptainSkillError::RageNotFull {
                have: captain.stats.rage,
                need: captain.stats.max_rage,
            });
        }

        let state = &mut *self.state;
        let label = state.time_label();
        let mut ctx = TickContext::new(env, now, state.rng_seed, state.rng_nonce, state.winner);

        state.units[index].begin_cast(now);
        // Lookup was checked above.
        if let Err(error) = perform_skill(&mut ctx, &mut state.units, index) {
            tracing::warn!(%error, "captain skill failed after lookup succeeded");
        }

        let outcome = ctx.finish();
        state.rng_nonce = outcome.rng_nonce;
        state.winner = outcome.winner;
        state.log.append(&label, outcome.records);
        tracing::debug!(winner = ?state.winner, "captain skill fired");

        Ok(())
    }
}
