//! Damage calculation.

use crate::config::EffectTunables;
use crate::env::{Dice, RngOracle, RollContext};
use crate::state::{Role, Unit};

/// Result of a single damage roll, before shields are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRoll {
    pub amount: u32,
    pub is_crit: bool,
    pub is_block: bool,
}

/// Mitigated damage before multipliers and rolls.
///
/// ```text
/// base = max(atk - def, atk × floor_ratio)
/// ```
pub fn base_damage(atk: u32, def: u32, floor_ratio: f64) -> f64 {
    let atk = atk as f64;
    (atk - def as f64).max(atk * floor_ratio)
}

/// Calculate damage for one hit.
///
/// # Formula
///
/// ```text
/// amount = base × multiplier
/// crit:  amount ×= crit_multiplier               (crit_chance)
/// block: amount ×= block_multiplier              (block_chance, Tank defenders, non-crit only)
/// final = floor(amount)
/// ```
///
/// The crit roll is always made; the block roll only when the hit is not a
/// crit and the defender is a Tank.
pub fn compute_damage<R: RngOracle + ?Sized>(
    attacker: &Unit,
    defender: &Unit,
    effects: &EffectTunables,
    multiplier: f64,
    dice: &mut Dice<'_, R>,
) -> DamageRoll {
    let mut amount = base_damage(
        attacker.stats.atk,
        defender.stats.def,
        effects.damage_floor_ratio,
    ) * multiplier;

    let is_crit = dice.chance(attacker.id, RollContext::Crit, effects.crit_chance);
    if is_crit {
        amount *= effects.crit_multiplier;
    }

    let mut is_block = false;
    if !is_crit
        && defender.role == Role::Tank
        && dice.chance(attacker.id, RollContext::Block, effects.block_chance)
    {
        amount *= effects.block_multiplier;
        is_block = true;
    }

    DamageRoll {
        amount: amount.max(0.0).floor() as u32,
        is_crit,
        is_block,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GridSlot, Side, UnitFx, UnitId, UnitStats};

    struct Fixed(u32);
    impl RngOracle for Fixed {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    const NEVER: Fixed = Fixed(u32::MAX);
    const ALWAYS: Fixed = Fixed(0);

    fn unit(role: Role, atk: u32, def: u32) -> Unit {
        Unit {
            id: UnitId(1),
            template_id: "t".into(),
            name: "u".into(),
            role,
            side: Side::Player,
            slot: GridSlot::new(1).unwrap(),
            stats: UnitStats::new(1000, atk, def, 1000.0),
            attack_countdown: 0.0,
            is_dead: false,
            remove_at: None,
            taunt_until: None,
            skill_id: None,
            fx: UnitFx::empty(),
            floating_text: Vec::new(),
        }
    }

    #[test]
    fn floor_applies_against_heavy_armor() {
        let effects = EffectTunables::default();
        let mut dice = Dice::new(&NEVER, 0, 0);
        let roll = compute_damage(
            &unit(Role::Archer, 100, 0),
            &unit(Role::Mage, 0, 1000),
            &effects,
            1.0,
            &mut dice,
        );
        assert_eq!(roll.amount, 5);
        assert!(!roll.is_crit && !roll.is_block);
    }

    #[test]
    fn crit_multiplies_and_excludes_block() {
        let effects = EffectTunables::default();
        let mut dice = Dice::new(&ALWAYS, 0, 0);
        let roll = compute_damage(
            &unit(Role::Berserker, 300, 0),
            &unit(Role::Tank, 0, 100),
            &effects,
            1.0,
            &mut dice,
        );
        assert!(roll.is_crit);
        assert!(!roll.is_block);
        assert_eq!(roll.amount, 300);
        assert_eq!(dice.nonce(), 1);
    }

    #[test]
    fn tank_blocks_non_crit_hits() {
        let effects = EffectTunables {
            crit_chance: 0.0,
            block_chance: 1.0,
            ..EffectTunables::default()
        };
        let mut dice = Dice::new(&NEVER, 0, 0);
        let roll = compute_damage(
            &unit(Role::Archer, 300, 0),
            &unit(Role::Tank, 0, 100),
            &effects,
            1.0,
            &mut dice,
        );
        assert!(roll.is_block);
        assert_eq!(roll.amount, 140);
    }

    #[test]
    fn multiplier_scales_before_flooring() {
        let effects = EffectTunables::default();
        let mut dice = Dice::new(&NEVER, 0, 0);
        let roll = compute_damage(
            &unit(Role::Mage, 333, 0),
            &unit(Role::Archer, 0, 0),
            &effects,
            1.5,
            &mut dice,
        );
        assert_eq!(roll.amount, 499);
    }
}
