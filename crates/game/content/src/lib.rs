//! Data-driven match content and loaders.
//!
//! This crate houses the default match content and provides loaders for
//! RON/TOML data files:
//! - Match configuration (TOML)
//! - Skill table (RON)
//! - Unit templates (RON)
//! - Starting roster and deck (RON)
//!
//! Content is consumed through battle-core oracles and never appears in match
//! state. All loaders use battle-core types directly with serde.

pub mod bundle;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use bundle::ContentBundle;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentLoader, LoadResult, ScenarioLoader, SkillCatalog, SkillLoader,
    TemplateLoader, UnitCatalog,
};
