//! Skill definitions and oracle interface.
//!
//! A skill is fully described by data: a target selector, an effect tag, and a
//! multiplier. The skill engine dispatches on these tags, never on the caster's
//! role, so any unit can be wired to any skill.

use std::fmt;

/// Numeric skill identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(pub u32);

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which units a skill lands on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TargetSelector {
    /// The caster only.
    SelfOnly,
    /// The normal attack target.
    SingleEnemy,
    AllEnemies,
    AllAllies,
    /// Living ally with the lowest hp / max hp ratio.
    LowestHpAlly,
    /// Living enemy with the lowest absolute hp.
    LowestHpEnemy,
    /// Up to three distinct living enemies, drawn without replacement.
    RandomThreeEnemies,
    /// The normal attack target, struck three times.
    FrontThreeStrikes,
}

/// What a skill does to each resolved target.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SkillEffect {
    /// Damage-model hit scaled by the multiplier.
    Damage,
    /// Heals `atk × multiplier`, clamped to max hp.
    Heal,
    /// Adds `atk × multiplier` shield.
    Shield,
    /// Caster only: taunts and adds `max_hp × multiplier` shield.
    TauntAndShield,
}

/// Immutable skill definition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillTemplate {
    pub id: SkillId,
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
    pub target: TargetSelector,
    pub effect: SkillEffect,
    pub multiplier: f64,
}

/// Lookup of skill definitions by id.
pub trait SkillOracle: Send + Sync {
    fn skill(&self, id: SkillId) -> Option<&SkillTemplate>;
}
