//! Rejection reasons for player-initiated transitions.
//!
//! Every variant guarantees the match state was left untouched.

use crate::env::{OracleError, SkillId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{CardInstanceId, GridSlot, Side};

/// Why a card could not be played.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DeployError {
    #[error("match is already decided")]
    MatchOver,

    #[error("match is paused")]
    Paused,

    #[error("{0} is not in hand")]
    CardNotInHand(CardInstanceId),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("template '{0}' is a captain and cannot be summoned")]
    CaptainTemplate(String),

    #[error("slot {slot} on the {side} side is not deployable")]
    WrongSide { side: Side, slot: GridSlot },

    #[error("not enough energy: have {have:.1}, need {need}")]
    NotEnoughEnergy { have: f64, need: u32 },

    #[error("slot {0} is occupied")]
    SlotOccupied(GridSlot),
}

impl GameError for DeployError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEnoughEnergy { .. } | Self::Paused | Self::SlotOccupied(_) => {
                ErrorSeverity::Recoverable
            }
            Self::Oracle(inner) => inner.severity(),
            Self::MatchOver
            | Self::CardNotInHand(_)
            | Self::CaptainTemplate(_)
            | Self::WrongSide { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MatchOver => "DEPLOY_MATCH_OVER",
            Self::Paused => "DEPLOY_PAUSED",
            Self::CardNotInHand(_) => "DEPLOY_CARD_NOT_IN_HAND",
            Self::Oracle(inner) => inner.error_code(),
            Self::CaptainTemplate(_) => "DEPLOY_CAPTAIN_TEMPLATE",
            Self::WrongSide { .. } => "DEPLOY_WRONG_SIDE",
            Self::NotEnoughEnergy { .. } => "DEPLOY_NOT_ENOUGH_ENERGY",
            Self::SlotOccupied(_) => "DEPLOY_SLOT_OCCUPIED",
        }
    }
}

/// Why the player's captain ultimate could not fire.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CaptainSkillError {
    #[error("match is already decided")]
    MatchOver,

    #[error("match is paused")]
    Paused,

    #[error("no living {0} captain")]
    CaptainMissing(Side),

    #[error("captain has no linked skill")]
    NoSkill,

    #[error("skill {0} is not in the skill table")]
    UnknownSkill(SkillId),

    #[error("rage not full: have {have:.0}, need {need:.0}")]
    RageNotFull { have: f64, need: f64 },
}

impl GameError for CaptainSkillError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::RageNotFull { .. } | Self::Paused => ErrorSeverity::Recoverable,
            Self::MatchOver | Self::CaptainMissing(_) | Self::NoSkill | Self::UnknownSkill(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MatchOver => "CAPTAIN_MATCH_OVER",
            Self::Paused => "CAPTAIN_PAUSED",
            Self::CaptainMissing(_) => "CAPTAIN_MISSING",
            Self::NoSkill => "CAPTAIN_NO_SKILL",
            Self::UnknownSkill(_) => "CAPTAIN_UNKNOWN_SKILL",
            Self::RageNotFull { .. } => "CAPTAIN_RAGE_NOT_FULL",
        }
    }
}

/// Why a drag could not begin.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    #[error("match is already decided")]
    MatchOver,

    #[error("match is paused")]
    Paused,

    #[error("{0} is not in hand")]
    CardNotInHand(CardInstanceId),
}

impl GameError for DragError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Paused => ErrorSeverity::Recoverable,
            Self::MatchOver | Self::CardNotInHand(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::MatchOver => "DRAG_MATCH_OVER",
            Self::Paused => "DRAG_PAUSED",
            Self::CardNotInHand(_) => "DRAG_CARD_NOT_IN_HAND",
        }
    }
}
