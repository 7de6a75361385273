//! Data-driven skill resolution.
//!
//! A cast is resolved in two steps: the skill's [`TargetSelector`] becomes a
//! list of roster indices, then the skill's [`SkillEffect`] is applied to each
//! index. Nothing here branches on the caster's role.
//!
//! Gating (rage threshold, auto-cast eligibility) and resetting the caster's
//! rage are the caller's job.

use crate::combat::{
    heal, living_on, lowest_hp_enemy, lowest_ratio_ally, select_target, shield, strike,
};
use crate::config::GameConfig;
use crate::engine::TickContext;
use crate::env::{OracleError, SkillEffect, SkillTemplate, TargetSelector};
use crate::state::{FloatingTextKind, LogCategory, Unit};

/// Summary of a resolved cast.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillCast {
    pub skill: SkillTemplate,
    /// Effect applications, one per resolved target entry (repeats included).
    pub applications: usize,
}

/// Resolves the caster's linked skill against the roster.
///
/// Returns `Ok(None)` when the caster has no linked skill.
///
/// # Errors
///
/// Returns `OracleError::SkillNotFound` if the linked skill id is not in the
/// skill table. The roster is untouched in that case.
pub fn perform_skill(
    ctx: &mut TickContext<'_>,
    roster: &mut [Unit],
    caster: usize,
) -> Result<Option<SkillCast>, OracleError> {
    let Some(skill_id) = roster[caster].skill_id else {
        return Ok(None);
    };
    let skill = ctx.env.skill(skill_id)?;
    let targets = resolve_targets(ctx, roster, caster, skill.target);

    let caster_name = roster[caster].name.clone();
    let message = match (skill.target, targets.first()) {
        (
            TargetSelector::SingleEnemy
            | TargetSelector::LowestHpEnemy
            | TargetSelector::LowestHpAlly
            | TargetSelector::FrontThreeStrikes,
            Some(&first),
        ) => format!("{caster_name} casts {} on {}", skill.name, roster[first].name),
        _ => format!("{caster_name} casts {}", skill.name),
    };
    ctx.log(LogCategory::Skill, roster[caster].side, message);
    tracing::debug!(
        caster = %roster[caster].id,
        skill = %skill.id,
        targets = targets.len(),
        "skill cast"
    );

    let mut applications = 0;
    for &target in &targets {
        if apply_effect(ctx, roster, caster, target, skill) {
            applications += 1;
        }
    }

    Ok(Some(SkillCast {
        skill: skill.clone(),
        applications,
    }))
}

/// Expands a target selector into roster indices.
///
/// Indices may repeat (multi-strike selectors). Only living units are returned.
pub fn resolve_targets(
    ctx: &mut TickContext<'_>,
    roster: &[Unit],
    caster: usize,
    selector: TargetSelector,
) -> Vec<usize> {
    let side = roster[caster].side;
    let now = ctx.now;

    match selector {
        TargetSelector::SelfOnly => vec![caster],
        TargetSelector::SingleEnemy => select_target(&roster[caster], roster, now)
            .into_iter()
            .collect(),
        TargetSelector::AllEnemies => living_on(roster, side.opponent()).collect(),
        TargetSelector::AllAllies => living_on(roster, side).collect(),
        TargetSelector::LowestHpAlly => lowest_ratio_ally(roster, side).into_iter().collect(),
        TargetSelector::LowestHpEnemy => lowest_hp_enemy(roster, side).into_iter().collect(),
        TargetSelector::RandomThreeEnemies => {
            let mut pool: Vec<usize> = living_on(roster, side.opponent()).collect();
            ctx.dice.shuffle(roster[caster].id, &mut pool);
            pool.truncate(GameConfig::RANDOM_TARGET_COUNT);
            pool
        }
        TargetSelector::FrontThreeStrikes => {
            let Some(target) = select_target(&roster[caster], roster, now) else {
                return Vec::new();
            };
            vec![target; GameConfig::FRONT_STRIKE_COUNT]
        }
    }
}

/// Applies one effect application. Returns false if it had no effect.
fn apply_effect(
    ctx: &mut TickContext<'_>,
    roster: &mut [Unit],
    caster: usize,
    target: usize,
    skill: &SkillTemplate,
) -> bool {
    let caster_stats = &roster[caster].stats;
    let scaled_atk = (caster_stats.atk as f64 * skill.multiplier).floor() as u32;

    match skill.effect {
        SkillEffect::Damage => strike(ctx, roster, caster, target, skill.multiplier).is_some(),
        SkillEffect::Heal => heal(ctx, roster, caster, target, scaled_atk),
        SkillEffect::Shield => shield(ctx, &mut roster[target], scaled_atk),
        SkillEffect::TauntAndShield => {
            if target != caster {
                return false;
            }
            let config = ctx.config();
            let unit = &mut roster[caster];
            let amount = (unit.stats.max_hp as f64 * skill.multiplier).floor() as u32;
            unit.taunt_until = Some(ctx.now + config.effects.taunt_duration_ms as u64);
            unit.stats.shield = unit.stats.shield.saturating_add(amount);
            unit.push_text("Taunt", FloatingTextKind::Text, ctx.now);
            true
        }
    }
}
