//! Match scenario: who starts on the field and what the deck holds.

use crate::state::{GridSlot, Side};

/// A unit placed on the field at match start.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub template_id: String,
    pub side: Side,
    pub slot: GridSlot,
}

/// Starting roster (besides captains) and starting deck list.
///
/// The first `HAND_SIZE` deck entries go straight into the hand; the full list
/// is also the refill list appended whenever the deck runs low.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchSetup {
    pub starting_units: Vec<Placement>,
    pub deck: Vec<String>,
}
