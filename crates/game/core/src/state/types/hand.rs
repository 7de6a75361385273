//! Card hand and cyclic deck.

use std::collections::VecDeque;

use crate::config::GameConfig;

use super::CardInstanceId;

/// A card drawn into the hand.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstance {
    pub instance_id: CardInstanceId,
    pub template_id: String,
}

/// Fixed-length hand of optional cards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand {
    slots: [Option<CardInstance>; GameConfig::HAND_SIZE],
}

impl Hand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: [Option<CardInstance>; GameConfig::HAND_SIZE]) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &[Option<CardInstance>; GameConfig::HAND_SIZE] {
        &self.slots
    }

    /// Position and contents of the card with the given instance id.
    pub fn find(&self, id: CardInstanceId) -> Option<(usize, &CardInstance)> {
        self.slots.iter().enumerate().find_map(|(index, slot)| {
            slot.as_ref()
                .filter(|card| card.instance_id == id)
                .map(|card| (index, card))
        })
    }

    pub fn contains(&self, id: CardInstanceId) -> bool {
        self.find(id).is_some()
    }

    pub fn take(&mut self, index: usize) -> Option<CardInstance> {
        self.slots.get_mut(index).and_then(Option::take)
    }

    pub fn cards(&self) -> impl Iterator<Item = &CardInstance> {
        self.slots.iter().flatten()
    }

    /// Fills empty slots front-to-back from the deck, minting ids via `next_id`.
    ///
    /// Returns the number of cards drawn.
    pub fn refill_from(&mut self, deck: &mut Deck, next_id: &mut u32) -> usize {
        let mut drawn = 0;
        for slot in self.slots.iter_mut().filter(|slot| slot.is_none()) {
            let Some(template_id) = deck.draw() else {
                break;
            };
            *slot = Some(CardInstance {
                instance_id: CardInstanceId(*next_id),
                template_id,
            });
            *next_id += 1;
            drawn += 1;
        }
        drawn
    }
}

/// Queue of template ids that is topped up with the starting list when it runs low.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Deck {
    queue: VecDeque<String>,
    starting: Vec<String>,
}

impl Deck {
    /// Builds a deck whose queue is `remaining` and whose refill list is `starting`.
    pub fn new(remaining: impl IntoIterator<Item = String>, starting: Vec<String>) -> Self {
        Self {
            queue: remaining.into_iter().collect(),
            starting,
        }
    }

    pub fn draw(&mut self) -> Option<String> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn remaining(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    /// Appends a fresh copy of the starting list when fewer than
    /// [`GameConfig::DECK_REFILL_THRESHOLD`] cards remain.
    pub fn replenish_if_low(&mut self) -> bool {
        if self.queue.len() < GameConfig::DECK_REFILL_THRESHOLD && !self.starting.is_empty() {
            self.queue.extend(self.starting.iter().cloned());
            true
        } else {
            false
        }
    }
}
