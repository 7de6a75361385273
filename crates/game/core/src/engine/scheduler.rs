//! Per-unit action scheduling.
//!
//! Each living unit either casts (full rage, auto-cast eligible) or runs down
//! its basic-action countdown. Captains additionally regenerate rage.

use crate::combat::{heal, most_wounded_ally, select_target, strike};
use crate::skill::perform_skill;
use crate::state::{Role, Unit, UnitFx, ms_to_secs};

use super::TickContext;

/// Basic action a unit took this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitAction {
    /// Dead, or countdown still running.
    Idle,
    /// Countdown elapsed but nothing to act on; retried next tick.
    Waiting,
    Cast,
    Attack,
    Heal,
}

/// Advances one unit by `dt` match-time seconds.
pub fn run_unit(ctx: &mut TickContext<'_>, roster: &mut [Unit], index: usize, dt: f64) -> UnitAction {
    if roster[index].is_dead {
        return UnitAction::Idle;
    }
    let config = ctx.config();

    let action = if roster[index].stats.is_rage_full() && roster[index].auto_casts() {
        cast(ctx, roster, index);
        UnitAction::Cast
    } else {
        roster[index].attack_countdown -= dt;
        if roster[index].attack_countdown <= 0.0 {
            basic_action(ctx, roster, index)
        } else {
            UnitAction::Idle
        }
    };

    let unit = &mut roster[index];
    if unit.is_captain() {
        let regen = config.captain(unit.side).rage_regen_per_sec;
        unit.stats.gain_rage(regen * dt);
    }

    action
}

fn cast(ctx: &mut TickContext<'_>, roster: &mut [Unit], index: usize) {
    roster[index].begin_cast(ctx.now);

    if let Err(error) = perform_skill(ctx, roster, index) {
        tracing::warn!(unit = %roster[index].id, %error, "skill lookup failed, cast skipped");
    }
}

fn basic_action(ctx: &mut TickContext<'_>, roster: &mut [Unit], index: usize) -> UnitAction {
    let config = ctx.config();
    let cooldown = ms_to_secs(config.global.attack_cooldown_ms);

    if roster[index].role == Role::Healer {
        let Some(target) = most_wounded_ally(roster, roster[index].side) else {
            return UnitAction::Waiting;
        };
        let unit = &mut roster[index];
        unit.attack_countdown = cooldown;
        unit.fx.insert(UnitFx::HEALING);
        let amount = (unit.stats.atk as f64 * config.effects.basic_heal_multiplier).floor() as u32;
        heal(ctx, roster, index, target, amount);
        roster[index].stats.gain_rage(config.rage.on_basic_heal);
        return UnitAction::Heal;
    }

    let Some(target) = select_target(&roster[index], roster, ctx.now) else {
        return UnitAction::Waiting;
    };
    let unit = &mut roster[index];
    unit.attack_countdown = cooldown;
    unit.fx.insert(UnitFx::ATTACKING);
    strike(ctx, roster, index, target, 1.0);
    roster[index].stats.gain_rage(config.rage.on_basic_attack);
    UnitAction::Attack
}
