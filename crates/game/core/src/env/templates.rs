//! Summonable unit templates and oracle interface.
//!
//! Templates are indexed by string id (e.g. `"101"`) because cards in the hand
//! and deck refer to them by that id.

use crate::state::Role;

use super::SkillId;

/// Static definition of a summonable unit.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitTemplate {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub cost: u32,
    pub hp: u32,
    pub atk: u32,
    pub def: u32,
    pub skill_id: Option<SkillId>,
    /// Presentation metadata, passed through untouched.
    #[cfg_attr(feature = "serde", serde(default))]
    pub color: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub icon: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

/// Lookup of unit templates by id.
pub trait TemplateOracle: Send + Sync {
    fn template(&self, id: &str) -> Option<&UnitTemplate>;
}
