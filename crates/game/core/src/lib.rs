//! Deterministic combat core for a two-sided, real-time grid autobattler.
//!
//! `battle-core` defines the canonical rules (targeting, damage, skills,
//! scheduling, deployment) and exposes pure APIs that can be driven by the
//! runtime or by offline tools. All state mutation flows through
//! [`engine::MatchEngine`], and supporting crates depend on the types
//! re-exported here.
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod skill;
pub mod state;

pub use combat::{DamageRoll, HitOutcome, compute_damage, select_target};
pub use config::{
    CaptainStats, Captains, ConfigError, EffectTunables, GameConfig, GlobalTunables,
    RageTunables, TimingTunables,
};
pub use engine::{
    CaptainSkillError, DeployError, DragError, Frame, FrameClock, MatchEngine, TickContext,
    TickReport, tick,
};
pub use env::{
    Dice, Env, MatchEnv, MatchSetup, OracleError, PcgRng, Placement, RngOracle, SkillEffect,
    SkillId, SkillOracle, SkillTable, SkillTemplate, TargetSelector, TemplateOracle,
    TemplateTable, UnitTemplate,
};
pub use error::{ErrorSeverity, GameError};
pub use skill::{SkillCast, perform_skill};
pub use state::{
    CardInstance, CardInstanceId, CombatLog, Deck, FloatingText, FloatingTextKind, GridSlot,
    Hand, LogCategory, LogEntry, MatchState, Role, Row, Side, Timestamp, Unit, UnitFx, UnitId,
    UnitStats,
};
