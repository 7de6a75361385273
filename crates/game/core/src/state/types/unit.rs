//! Runtime combatant instances.

use crate::env::SkillId;

use super::{GridSlot, Role, Side, Timestamp, UnitId};

/// Mutable combat stats of a unit.
///
/// Invariants: `hp <= max_hp`, `0 <= rage <= max_rage`. Shield is unbounded.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStats {
    pub hp: u32,
    pub max_hp: u32,
    pub shield: u32,
    pub atk: u32,
    pub def: u32,
    pub rage: f64,
    pub max_rage: f64,
}

impl UnitStats {
    pub fn new(hp: u32, atk: u32, def: u32, max_rage: f64) -> Self {
        Self {
            hp,
            max_hp: hp,
            shield: 0,
            atk,
            def,
            rage: 0.0,
            max_rage,
        }
    }

    /// Adds rage, clamped to the meter's maximum.
    #[inline]
    pub fn gain_rage(&mut self, amount: f64) {
        self.rage = (self.rage + amount).clamp(0.0, self.max_rage);
    }

    #[inline]
    pub fn is_rage_full(&self) -> bool {
        self.rage >= self.max_rage
    }

    /// Fraction of health remaining, in 0.0..=1.0.
    pub fn hp_ratio(&self) -> f64 {
        if self.max_hp == 0 {
            0.0
        } else {
            self.hp as f64 / self.max_hp as f64
        }
    }
}

bitflags::bitflags! {
    /// Transient "just happened" markers for the presentation layer.
    ///
    /// Cleared at the start of every tick.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct UnitFx: u8 {
        const HIT       = 1 << 0;
        const HEALING   = 1 << 1;
        const ATTACKING = 1 << 2;
        const SKILL     = 1 << 3;
    }
}

/// Visual category of a floating combat number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FloatingTextKind {
    Damage,
    Heal,
    Crit,
    Block,
    Text,
}

/// Short-lived text popped over a unit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FloatingText {
    pub text: String,
    pub kind: FloatingTextKind,
    pub created_at: Timestamp,
}

/// A combatant on the battlefield.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub template_id: String,
    pub name: String,
    pub role: Role,
    pub side: Side,
    pub slot: GridSlot,
    pub stats: UnitStats,
    /// Match-time seconds until the next basic action.
    pub attack_countdown: f64,
    pub is_dead: bool,
    pub remove_at: Option<Timestamp>,
    pub taunt_until: Option<Timestamp>,
    pub skill_id: Option<SkillId>,
    pub fx: UnitFx,
    pub floating_text: Vec<FloatingText>,
}

impl Unit {
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    #[inline]
    pub fn is_captain(&self) -> bool {
        self.role == Role::Captain
    }

    /// Whether a full rage meter triggers the skill without player input.
    ///
    /// The player's captain is the only unit whose skill is manual.
    #[inline]
    pub fn auto_casts(&self) -> bool {
        !self.is_captain() || self.side == Side::Enemy
    }

    /// Whether the unit is taunting at `now`.
    #[inline]
    pub fn is_taunting(&self, now: Timestamp) -> bool {
        self.taunt_until.is_some_and(|until| until > now)
    }

    pub fn push_text(&mut self, text: impl Into<String>, kind: FloatingTextKind, now: Timestamp) {
        self.floating_text.push(FloatingText {
            text: text.into(),
            kind,
            created_at: now,
        });
    }

    /// Spends the full meter on a cast: empties rage, flags the cast and shows
    /// the banner. Auto-casts and the manual captain ultimate both start here.
    pub fn begin_cast(&mut self, now: Timestamp) {
        self.stats.rage = 0.0;
        self.fx.insert(UnitFx::SKILL);
        self.push_text("MAX!!", FloatingTextKind::Text, now);
    }

    /// Clears transient fx and drops floating text older than `lifetime_ms`.
    pub fn reset_fx(&mut self, now: Timestamp, lifetime_ms: u64) {
        self.fx = UnitFx::empty();
        self.floating_text
            .retain(|ft| now.since(ft.created_at) < lifetime_ms);
    }
}
