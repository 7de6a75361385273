//! Scripted stand-in for a human player.
//!
//! Plays the first affordable card into the first free player slot and fires
//! the captain ultimate as soon as the meter is full. Nothing more.

use battle_core::{CardInstanceId, GridSlot, MatchState, Side, TemplateOracle, TemplateTable};

/// What the autopilot wants to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Move {
    PlayCard { card: CardInstanceId, slot: GridSlot },
    CaptainSkill,
}

/// Picks the next move for the player side, if any.
pub fn next_move(state: &MatchState, templates: &TemplateTable) -> Option<Move> {
    if state.is_over() || state.is_paused {
        return None;
    }

    let captain_ready = state
        .captain(Side::Player)
        .is_some_and(|c| c.stats.is_rage_full());
    if captain_ready {
        return Some(Move::CaptainSkill);
    }

    let slot = GridSlot::all().find(|&slot| state.occupant(Side::Player, slot).is_none())?;
    let card = state.hand.cards().find(|card| {
        templates
            .template(&card.template_id)
            .is_some_and(|t| f64::from(t.cost) <= state.energy)
    })?;

    Some(Move::PlayCard {
        card: card.instance_id,
        slot,
    })
}
