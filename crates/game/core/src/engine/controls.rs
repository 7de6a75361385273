//! Pause, speed and drag controls.

use crate::config::GameConfig;
use crate::state::CardInstanceId;

use super::{DragError, MatchEngine};

impl MatchEngine<'_> {
    /// Freezes or resumes time-driven advancement.
    pub fn set_paused(&mut self, paused: bool) {
        self.state.is_paused = paused;
    }

    /// Flips between the base and the fast time scale. Returns the new scale.
    pub fn toggle_speed(&mut self, config: &GameConfig) -> f64 {
        let global = &config.global;
        self.state.time_scale = if self.state.time_scale == global.fast_time_scale {
            global.base_time_scale
        } else {
            global.fast_time_scale
        };
        self.state.time_scale
    }

    /// Marks `card` as being dragged, which slows combat to the drag time scale.
    ///
    /// # Errors
    ///
    /// Rejected while paused, once decided, or for a card not in hand.
    pub fn begin_drag(&mut self, card: CardInstanceId) -> Result<(), DragError> {
        if self.state.is_over() {
            return Err(DragError::MatchOver);
        }
        if self.state.is_paused {
            return Err(DragError::Paused);
        }
        if !self.state.hand.contains(card) {
            return Err(DragError::CardNotInHand(card));
        }
        self.state.dragging = Some(card);
        Ok(())
    }

    /// Ends a drag without playing. Touches nothing else.
    pub fn cancel_drag(&mut self) {
        self.state.dragging = None;
    }
}
