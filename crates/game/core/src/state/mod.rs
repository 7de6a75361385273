//! Authoritative match state representation.
//!
//! This module owns the data structures that describe the roster, the card
//! economy and the combat log. Runtime layers clone or query this state but
//! mutate it exclusively through the engine.
pub mod types;

pub use types::{
    CardInstance, CardInstanceId, CombatLog, Deck, FloatingText, FloatingTextKind, GridSlot, Hand,
    InvalidGridSlot, LogCategory, LogEntry, LogRecord, Role, Row, Side, Timestamp, Unit, UnitFx,
    UnitId, UnitStats, format_clock,
};

use crate::config::{CaptainStats, GameConfig};
use crate::env::{MatchEnv, MatchSetup, OracleError, UnitTemplate};

/// Canonical snapshot of a match.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchState {
    /// Match-time seconds left on the clock.
    pub time_remaining: f64,
    pub energy: f64,
    pub max_energy: f64,
    pub is_paused: bool,
    /// Speed multiplier applied to match time while no card is dragged.
    pub time_scale: f64,
    /// Set once, never cleared.
    pub winner: Option<Side>,
    /// Live roster in insertion order.
    pub units: Vec<Unit>,
    pub hand: Hand,
    pub deck: Deck,
    /// Card currently being dragged, if any. Slows combat to a crawl.
    pub dragging: Option<CardInstanceId>,
    pub log: CombatLog,

    /// RNG seed, fixed at match start.
    pub rng_seed: u64,
    /// Roll counter, advanced by every random roll.
    pub rng_nonce: u64,

    next_unit_id: u32,
    next_card_id: u32,
}

impl MatchState {
    /// Creates an empty match with the clock and energy set from `config`.
    ///
    /// No units, empty hand and deck. Use [`MatchState::start`] for a full setup.
    pub fn empty(config: &GameConfig, seed: u64) -> Self {
        Self {
            time_remaining: config.global.match_duration_secs,
            energy: config.global.initial_energy,
            max_energy: config.global.max_energy,
            is_paused: false,
            time_scale: config.global.base_time_scale,
            winner: None,
            units: Vec::new(),
            hand: Hand::new(),
            deck: Deck::default(),
            dragging: None,
            log: CombatLog::new(),
            rng_seed: seed,
            rng_nonce: 0,
            next_unit_id: 1,
            next_card_id: 1,
        }
    }

    /// Sets up a fresh match: both captains, the scenario's starting units,
    /// an opening hand and the remaining deck.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TemplateNotFound` if a starting unit references an
    /// unknown template.
    ///
    /// Placements that use a captain template, or that land on a cell already
    /// held by a captain or an earlier placement, are skipped with a warning.
    pub fn start(env: MatchEnv<'_>, setup: &MatchSetup, seed: u64) -> Result<Self, OracleError> {
        let config = env.config();
        let mut state = Self::empty(config, seed);

        for side in [Side::Player, Side::Enemy] {
            state.spawn_captain(config, side);
        }
        for placement in &setup.starting_units {
            let template = env.template(&placement.template_id)?;
            if template.role == Role::Captain {
                tracing::warn!(
                    template = %template.id,
                    "captain template in starting units, placement skipped"
                );
                continue;
            }
            if state.occupant(placement.side, placement.slot).is_some() {
                tracing::warn!(
                    side = %placement.side,
                    slot = %placement.slot,
                    "starting slot already taken, placement skipped"
                );
                continue;
            }
            let countdown = ms_to_secs(config.timing.initial_attack_delay_ms);
            let unit = state.unit_from_template(
                config,
                template,
                placement.side,
                placement.slot,
                countdown,
            );
            state.units.push(unit);
        }

        // Opening hand is the head of the list; the rest stays queued.
        state.deck = Deck::new(setup.deck.iter().cloned(), setup.deck.clone());
        state.refill_hand();

        let label = state.time_label();
        state.log.push(
            &label,
            LogRecord::new(LogCategory::System, Side::Player, "Battle start"),
        );

        tracing::debug!(
            units = state.units.len(),
            deck = state.deck.len(),
            seed,
            "match started"
        );
        Ok(state)
    }

    /// Remaining time formatted `m:ss`.
    pub fn time_label(&self) -> String {
        format_clock(self.time_remaining)
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// The living captain of `side`, if any.
    pub fn captain(&self, side: Side) -> Option<&Unit> {
        self.units
            .iter()
            .find(|u| u.side == side && u.is_captain() && u.is_alive())
    }

    pub fn living(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.units
            .iter()
            .filter(move |u| u.side == side && u.is_alive())
    }

    /// Living unit of `side` standing on `slot`.
    pub fn occupant(&self, side: Side, slot: GridSlot) -> Option<&Unit> {
        self.living(side).find(|u| u.slot == slot)
    }

    pub(crate) fn allocate_unit_id(&mut self) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        id
    }

    pub(crate) fn refill_hand(&mut self) -> usize {
        self.hand.refill_from(&mut self.deck, &mut self.next_card_id)
    }

    fn spawn_captain(&mut self, config: &GameConfig, side: Side) {
        let CaptainStats {
            name,
            hp,
            atk,
            def,
            skill_id,
            slot,
            ..
        } = config.captain(side);
        let unit = Unit {
            id: self.allocate_unit_id(),
            template_id: "captain".to_string(),
            name: name.clone(),
            role: Role::Captain,
            side,
            slot: *slot,
            stats: UnitStats::new(*hp, *atk, *def, config.global.max_rage),
            attack_countdown: ms_to_secs(config.timing.initial_attack_delay_ms),
            is_dead: false,
            remove_at: None,
            taunt_until: None,
            skill_id: Some(*skill_id),
            fx: UnitFx::empty(),
            floating_text: Vec::new(),
        };
        self.units.push(unit);
    }

    /// Builds a unit from a template. Does not add it to the roster.
    pub(crate) fn unit_from_template(
        &mut self,
        config: &GameConfig,
        template: &UnitTemplate,
        side: Side,
        slot: GridSlot,
        attack_countdown: f64,
    ) -> Unit {
        Unit {
            id: self.allocate_unit_id(),
            template_id: template.id.clone(),
            name: template.name.clone(),
            role: template.role,
            side,
            slot,
            stats: UnitStats::new(template.hp, template.atk, template.def, config.global.max_rage),
            attack_countdown,
            is_dead: false,
            remove_at: None,
            taunt_until: None,
            skill_id: template.skill_id,
            fx: UnitFx::empty(),
            floating_text: Vec::new(),
        }
    }
}

/// Converts unscaled milliseconds into match-time seconds.
#[inline]
pub(crate) fn ms_to_secs(ms: u32) -> f64 {
    ms as f64 / 1000.0
}
