//! Post-roll application of damage, heals and shields to the roster.
//!
//! Shared by basic attacks and skill effects. Every function here is a no-op
//! on a dead target.

use crate::engine::TickContext;
use crate::state::{FloatingTextKind, LogCategory, Unit, UnitFx};

use super::damage::compute_damage;

/// What a single hit did to its target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HitOutcome {
    /// Damage taken by hp.
    pub dealt: u32,
    /// Damage eaten by shield.
    pub absorbed: u32,
    pub is_crit: bool,
    pub is_block: bool,
    pub killed: bool,
}

/// Rolls one hit from `attacker` onto `defender` and applies it.
///
/// Shield absorbs first, the remainder comes off hp. The defender gains
/// hit rage; a killing blow marks the defender dead, schedules its removal,
/// grants the attacker kill rage and, for a captain, decides the match.
///
/// Returns `None` if the defender was already dead.
pub fn strike(
    ctx: &mut TickContext<'_>,
    roster: &mut [Unit],
    attacker: usize,
    defender: usize,
    multiplier: f64,
) -> Option<HitOutcome> {
    if attacker == defender || roster[defender].is_dead {
        return None;
    }
    let config = ctx.config();
    let now = ctx.now;

    let roll = compute_damage(
        &roster[attacker],
        &roster[defender],
        &config.effects,
        multiplier,
        &mut ctx.dice,
    );
    let attacker_name = roster[attacker].name.clone();
    let attacker_side = roster[attacker].side;

    let target = &mut roster[defender];
    let had_shield = target.stats.shield > 0;
    let absorbed = target.stats.shield.min(roll.amount);
    target.stats.shield -= absorbed;
    let dealt = roll.amount - absorbed;
    target.stats.hp = target.stats.hp.saturating_sub(dealt);
    target.stats.gain_rage(config.rage.on_hit_taken);
    target.fx.insert(UnitFx::HIT);

    let fully_absorbed = had_shield && dealt == 0;
    let kind = if roll.is_block {
        FloatingTextKind::Block
    } else if roll.is_crit {
        FloatingTextKind::Crit
    } else {
        FloatingTextKind::Damage
    };
    let text = if roll.is_block {
        "Block".to_string()
    } else if fully_absorbed {
        "Absorbed".to_string()
    } else {
        dealt.to_string()
    };
    target.push_text(text, kind, now);

    let message = if fully_absorbed {
        format!("{attacker_name} hits {} (absorbed by shield)", target.name)
    } else {
        let mut message = format!("{attacker_name} hits {} for {dealt}", target.name);
        if roll.is_crit {
            message.push_str(" (crit!)");
        }
        if roll.is_block {
            message.push_str(" (blocked)");
        }
        message
    };
    tracing::trace!(
        attacker = %roster[attacker].id,
        defender = %roster[defender].id,
        amount = roll.amount,
        absorbed,
        crit = roll.is_crit,
        block = roll.is_block,
        "hit"
    );
    ctx.log(LogCategory::Damage, attacker_side, message);

    let target = &mut roster[defender];
    let killed = target.stats.hp == 0;
    if killed {
        target.is_dead = true;
        target.remove_at = Some(now + config.timing.death_removal_ms);
        let fallen = target.name.clone();
        let fallen_side = target.side;
        let fallen_captain = target.is_captain();
        tracing::debug!(unit = %target.id, name = %fallen, "unit defeated");

        roster[attacker].stats.gain_rage(config.rage.on_kill);
        ctx.log(LogCategory::Death, fallen_side, format!("{fallen} was defeated"));
        if fallen_captain {
            ctx.declare_winner(fallen_side.opponent());
        }
    }

    Some(HitOutcome {
        dealt,
        absorbed,
        is_crit: roll.is_crit,
        is_block: roll.is_block,
        killed,
    })
}

/// Restores `amount` hp to `target`, clamped to max hp.
///
/// Returns false if the target was dead.
pub fn heal(
    ctx: &mut TickContext<'_>,
    roster: &mut [Unit],
    healer: usize,
    target: usize,
    amount: u32,
) -> bool {
    if roster[target].is_dead {
        return false;
    }
    let healer_name = roster[healer].name.clone();
    let healer_side = roster[healer].side;

    let unit = &mut roster[target];
    unit.stats.hp = unit.stats.hp.saturating_add(amount).min(unit.stats.max_hp);
    unit.fx.insert(UnitFx::HEALING);
    unit.push_text(amount.to_string(), FloatingTextKind::Heal, ctx.now);

    let message = format!("{healer_name} heals {} +{amount}", unit.name);
    ctx.log(LogCategory::Heal, healer_side, message);
    true
}

/// Adds `amount` shield to `target`. Shields are uncapped.
///
/// Returns false if the target was dead.
pub fn shield(ctx: &TickContext<'_>, target: &mut Unit, amount: u32) -> bool {
    if target.is_dead {
        return false;
    }
    target.stats.shield = target.stats.shield.saturating_add(amount);
    target.push_text("Shield", FloatingTextKind::Block, ctx.now);
    true
}
