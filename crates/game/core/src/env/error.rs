//! Oracle lookup errors.
//!
//! A miss means content points at something the tables do not define. The tick
//! path logs these and skips the affected action instead of halting.

use crate::error::{ErrorSeverity, GameError};

use super::SkillId;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// Skill id is not in the skill table.
    #[error("skill {0} not found")]
    SkillNotFound(SkillId),

    /// Template id is not in the unit template table.
    #[error("unit template '{0}' not found")]
    TemplateNotFound(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::SkillNotFound(_) => "ORACLE_SKILL_NOT_FOUND",
            OracleError::TemplateNotFound(_) => "ORACLE_TEMPLATE_NOT_FOUND",
        }
    }
}
