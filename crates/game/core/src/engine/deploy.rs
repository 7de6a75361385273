//! Deployment gate: playing a card from the hand onto the grid.

use crate::env::MatchEnv;
use crate::state::{
    CardInstanceId, GridSlot, LogCategory, LogRecord, Role, Side, UnitId, ms_to_secs,
};

use super::{DeployError, MatchEngine};

impl MatchEngine<'_> {
    /// Summons the unit on `card` into `slot` on `side`.
    ///
    /// Only the player side accepts deployments. On success the card leaves
    /// the hand, its cost is paid, any drag in progress ends, and the new unit
    /// joins the end of the roster.
    ///
    /// # Errors
    ///
    /// Any [`DeployError`]; the state is unchanged when one is returned.
    pub fn play_card(
        &mut self,
        env: MatchEnv<'_>,
        card: CardInstanceId,
        side: Side,
        slot: GridSlot,
    ) -> Result<UnitId, DeployError> {
        let config = env.config();
        let state = &*self.state;

        if state.is_over() {
            return Err(DeployError::MatchOver);
        }
        if state.is_paused {
            return Err(DeployError::Paused);
        }
        let (hand_index, instance) = state
            .hand
            .find(card)
            .ok_or(DeployError::CardNotInHand(card))?;
        let template = env.template(&instance.template_id)?;
        if template.role == Role::Captain {
            return Err(DeployError::CaptainTemplate(template.id.clone()));
        }
        if side != Side::Player {
            return Err(DeployError::WrongSide { side, slot });
        }
        if state.energy < template.cost as f64 {
            return Err(DeployError::NotEnoughEnergy {
                have: state.energy,
                need: template.cost,
            });
        }
        if state.occupant(side, slot).is_some() {
            return Err(DeployError::SlotOccupied(slot));
        }

        let state = &mut *self.state;
        let countdown = ms_to_secs(config.timing.summon_attack_delay_ms);
        let mut unit = state.unit_from_template(config, template, side, slot, countdown);
        if unit.role == Role::Tank {
            unit.stats.shield =
                (template.hp as f64 * config.effects.shield_absorb_ratio).floor() as u32;
        }
        let fill = config.global.max_rage * config.rage.summon_fill_ratio;
        unit.stats.gain_rage(fill);

        let id = unit.id;
        let name = unit.name.clone();
        state.energy -= template.cost as f64;
        state.hand.take(hand_index);
        state.dragging = None;
        state.units.push(unit);

        let label = state.time_label();
        state.log.push(
            &label,
            LogRecord::new(LogCategory::System, side, format!("Player summoned {name}")),
        );
        tracing::debug!(unit = %id, template = %template.id, %slot, "card played");

        Ok(id)
    }
}
