//! Runtime wrapper around the static match content.
//!
//! [`OracleManager`] shares one [`ContentBundle`] with every reader and builds
//! [`battle_core::MatchEnv`] views on demand. The data is immutable while a
//! match runs; replacing it means swapping the whole manager.
use std::sync::Arc;

use battle_content::ContentBundle;
use battle_core::{GameConfig, MatchEnv, PcgRng};

/// Shared content plus the random source used for rolls.
#[derive(Clone)]
pub struct OracleManager {
    content: Arc<ContentBundle>,
    rng: PcgRng,
}

impl OracleManager {
    pub fn new(content: Arc<ContentBundle>) -> Self {
        Self {
            content,
            rng: PcgRng, // PcgRng is stateless
        }
    }

    /// Borrows the content as a battle-core environment
    pub fn as_match_env(&self) -> MatchEnv<'_> {
        self.content.env(&self.rng)
    }

    pub fn config(&self) -> &GameConfig {
        &self.content.config
    }

    pub fn content(&self) -> &ContentBundle {
        &self.content
    }
}
