//! Unified error types surfaced by the runtime API.
//!
//! Wraps rejected player commands, content problems and worker coordination
//! failures so clients can bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use battle_core::{CaptainSkillError, ConfigError, DeployError, DragError, OracleError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    CaptainSkill(#[from] CaptainSkillError),

    #[error(transparent)]
    Drag(#[from] DragError),

    #[error("content rejected: {0}")]
    InvalidContent(#[from] ConfigError),

    #[error("failed to load content: {0}")]
    ContentLoad(String),

    #[error("failed to set up the match")]
    InitialState(#[source] OracleError),

    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}

impl RuntimeError {
    /// True for errors caused by a player command that the match rules
    /// rejected. The match itself is unaffected.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::Deploy(_) | Self::CaptainSkill(_) | Self::Drag(_)
        )
    }
}
