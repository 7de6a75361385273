//! Match configuration: every balance number the reducer reads.
//!
//! The reducer never reads a literal balance value. Everything tunable lives in
//! [`GameConfig`] and can be swapped wholesale between matches; only structural
//! limits (hand size, log capacity, grid size) are compile-time constants.

use crate::env::SkillId;
use crate::state::{GridSlot, Side};

/// Complete configuration bundle for a match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub global: GlobalTunables,
    pub effects: EffectTunables,
    pub rage: RageTunables,
    pub timing: TimingTunables,
    pub captains: Captains,
}

impl GameConfig {
    // ===== compile-time structural limits =====
    /// Number of card slots in the hand.
    pub const HAND_SIZE: usize = 4;
    /// Number of most-recent combat log entries retained.
    pub const LOG_CAPACITY: usize = 200;
    /// Number of grid slots per side (3×3).
    pub const GRID_SLOTS: usize = 9;
    /// The deck is topped up with a fresh copy of the starting list below this size.
    pub const DECK_REFILL_THRESHOLD: usize = 5;
    /// Maximum distinct targets drawn by a random multi-target skill.
    pub const RANDOM_TARGET_COUNT: usize = 3;
    /// Number of hits delivered by a front-strike skill.
    pub const FRONT_STRIKE_COUNT: usize = 3;

    pub fn new() -> Self {
        Self {
            global: GlobalTunables::default(),
            effects: EffectTunables::default(),
            rage: RageTunables::default(),
            timing: TimingTunables::default(),
            captains: Captains::default(),
        }
    }

    /// Returns the captain block for the given side.
    pub fn captain(&self, side: Side) -> &CaptainStats {
        match side {
            Side::Player => &self.captains.player,
            Side::Enemy => &self.captains.enemy,
        }
    }

    /// Checks value ranges that the reducer relies on.
    ///
    /// Cross-table references (captain skill ids, template skill ids) are checked
    /// by the content loader, which owns the tables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.global;
        let e = &self.effects;

        positive("global.max_energy", g.max_energy)?;
        positive("global.max_rage", g.max_rage)?;
        positive("global.match_duration_secs", g.match_duration_secs)?;
        non_negative("global.energy_regen_per_sec", g.energy_regen_per_sec)?;
        positive("global.base_time_scale", g.base_time_scale)?;
        positive("global.fast_time_scale", g.fast_time_scale)?;
        non_negative("global.drag_time_scale", g.drag_time_scale)?;
        if g.initial_energy < 0.0 || g.initial_energy > g.max_energy {
            return Err(ConfigError::OutOfRange {
                field: "global.initial_energy",
                value: g.initial_energy,
            });
        }

        probability("effects.crit_chance", e.crit_chance)?;
        probability("effects.block_chance", e.block_chance)?;
        probability("effects.damage_floor_ratio", e.damage_floor_ratio)?;
        non_negative("effects.crit_multiplier", e.crit_multiplier)?;
        non_negative("effects.block_multiplier", e.block_multiplier)?;
        non_negative("effects.shield_absorb_ratio", e.shield_absorb_ratio)?;
        non_negative("effects.basic_heal_multiplier", e.basic_heal_multiplier)?;

        let r = &self.rage;
        non_negative("rage.on_basic_attack", r.on_basic_attack)?;
        non_negative("rage.on_basic_heal", r.on_basic_heal)?;
        non_negative("rage.on_hit_taken", r.on_hit_taken)?;
        non_negative("rage.on_kill", r.on_kill)?;
        probability("rage.summon_fill_ratio", r.summon_fill_ratio)?;

        if self.timing.max_frame_delta_ms == 0 {
            return Err(ConfigError::OutOfRange {
                field: "timing.max_frame_delta_ms",
                value: 0.0,
            });
        }

        for side in [Side::Player, Side::Enemy] {
            let captain = self.captain(side);
            if captain.hp == 0 {
                return Err(ConfigError::CaptainWithoutHealth(side));
            }
            non_negative("captains.rage_regen_per_sec", captain.rage_regen_per_sec)?;
        }

        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Match-wide pacing and economy.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GlobalTunables {
    pub initial_energy: f64,
    pub max_energy: f64,
    pub energy_regen_per_sec: f64,
    pub match_duration_secs: f64,
    pub max_rage: f64,
    pub attack_cooldown_ms: u32,
    pub base_time_scale: f64,
    /// Speed used when the player toggles fast-forward.
    pub fast_time_scale: f64,
    /// Near-freeze speed while a card is being dragged.
    pub drag_time_scale: f64,
}

impl Default for GlobalTunables {
    fn default() -> Self {
        Self {
            initial_energy: 15.0,
            max_energy: 30.0,
            energy_regen_per_sec: 0.8,
            match_duration_secs: 180.0,
            max_rage: 1000.0,
            attack_cooldown_ms: 2000,
            base_time_scale: 1.0,
            fast_time_scale: 2.0,
            drag_time_scale: 0.05,
        }
    }
}

/// Probability and ratio tunables used by the damage model and skills.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EffectTunables {
    pub taunt_duration_ms: u32,
    /// Fraction of max HP a deployed Tank starts with as shield.
    pub shield_absorb_ratio: f64,
    pub crit_chance: f64,
    pub crit_multiplier: f64,
    pub block_chance: f64,
    pub block_multiplier: f64,
    /// Minimum damage as a fraction of attacker ATK, regardless of defense.
    pub damage_floor_ratio: f64,
    /// Healer basic heal as a multiple of ATK.
    pub basic_heal_multiplier: f64,
}

impl Default for EffectTunables {
    fn default() -> Self {
        Self {
            taunt_duration_ms: 4000,
            shield_absorb_ratio: 0.3,
            crit_chance: 0.2,
            crit_multiplier: 1.5,
            block_chance: 0.3,
            block_multiplier: 0.7,
            damage_floor_ratio: 0.05,
            basic_heal_multiplier: 1.5,
        }
    }
}

/// Rage granted by combat events.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RageTunables {
    pub on_basic_attack: f64,
    pub on_basic_heal: f64,
    pub on_hit_taken: f64,
    pub on_kill: f64,
    /// Fraction of the meter a freshly deployed unit starts with.
    pub summon_fill_ratio: f64,
}

impl Default for RageTunables {
    fn default() -> Self {
        Self {
            on_basic_attack: 250.0,
            on_basic_heal: 150.0,
            on_hit_taken: 60.0,
            on_kill: 300.0,
            summon_fill_ratio: 1.0,
        }
    }
}

/// Wall-clock timings (unscaled milliseconds unless noted).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingTunables {
    /// Upper bound on a single tick's delta, bounding catch-up after a stall.
    pub max_frame_delta_ms: u64,
    /// First attack delay for units present at match start (match time).
    pub initial_attack_delay_ms: u32,
    /// First attack delay for deployed units (match time).
    pub summon_attack_delay_ms: u32,
    /// Grace period between death and removal from the roster.
    pub death_removal_ms: u64,
    /// Lifetime of floating combat text.
    pub fx_lifetime_ms: u64,
}

impl Default for TimingTunables {
    fn default() -> Self {
        Self {
            max_frame_delta_ms: 60,
            initial_attack_delay_ms: 2000,
            summon_attack_delay_ms: 100,
            death_removal_ms: 1000,
            fx_lifetime_ms: 1200,
        }
    }
}

/// One captain block per side.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Captains {
    pub player: CaptainStats,
    pub enemy: CaptainStats,
}

impl Default for Captains {
    fn default() -> Self {
        Self {
            player: CaptainStats {
                name: "Human Warlord".to_string(),
                hp: 16000,
                atk: 450,
                def: 100,
                rage_regen_per_sec: 20.0,
                skill_id: SkillId(901),
                slot: GridSlot::MIDDLE_BACK,
            },
            enemy: CaptainStats {
                name: "Abyss Tyrant".to_string(),
                hp: 10000,
                atk: 650,
                def: 150,
                rage_regen_per_sec: 20.0,
                skill_id: SkillId(902),
                slot: GridSlot::MIDDLE_BACK,
            },
        }
    }
}

/// Stat block for a side's captain.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CaptainStats {
    pub name: String,
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub rage_regen_per_sec: f64,
    pub skill_id: SkillId,
    pub slot: GridSlot,
}

/// Malformed configuration values.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} = {value} is out of range")]
    OutOfRange { field: &'static str, value: f64 },

    #[error("{0} captain has no health")]
    CaptainWithoutHealth(Side),

    #[error("skill {skill} referenced by {owner} is not in the skill table")]
    UnknownSkill { owner: String, skill: SkillId },

    #[error("template '{0}' referenced by the match setup is not in the template table")]
    UnknownTemplate(String),

    #[error("template '{0}' is a captain and cannot be a starting unit")]
    CaptainInScenario(String),

    #[error("{side} slot {slot} is taken twice at match start")]
    SlotTaken { side: Side, slot: GridSlot },
}

impl crate::error::GameError for ConfigError {
    fn severity(&self) -> crate::error::ErrorSeverity {
        crate::error::ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "CONFIG_OUT_OF_RANGE",
            Self::CaptainWithoutHealth(_) => "CONFIG_CAPTAIN_WITHOUT_HEALTH",
            Self::UnknownSkill { .. } => "CONFIG_UNKNOWN_SKILL",
            Self::UnknownTemplate(_) => "CONFIG_UNKNOWN_TEMPLATE",
            Self::CaptainInScenario(_) => "CONFIG_CAPTAIN_IN_SCENARIO",
            Self::SlotTaken { .. } => "CONFIG_SLOT_TAKEN",
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

fn probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(GameConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_probability_above_one() {
        let mut config = GameConfig::default();
        config.effects.crit_chance = 1.5;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange {
                field: "effects.crit_chance",
                ..
            })
        ));
    }

    #[test]
    fn rejects_initial_energy_above_max() {
        let mut config = GameConfig::default();
        config.global.initial_energy = config.global.max_energy + 1.0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_dead_captain() {
        let mut config = GameConfig::default();
        config.captains.enemy.hp = 0;

        assert_eq!(
            config.validate(),
            Err(ConfigError::CaptainWithoutHealth(Side::Enemy))
        );
    }

    #[test]
    fn captain_lookup_by_side() {
        let config = GameConfig::default();
        assert_eq!(config.captain(Side::Player).skill_id, SkillId(901));
        assert_eq!(config.captain(Side::Enemy).skill_id, SkillId(902));
    }
}
