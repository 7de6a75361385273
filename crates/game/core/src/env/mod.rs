//! Traits describing read-only match data.
//!
//! Oracles expose the skill table, the unit template table and the random
//! source. The [`Env`] aggregate bundles them with the active [`GameConfig`] so
//! the engine can access everything it needs without hard coupling to concrete
//! implementations. Swapping the bundle between matches requires no code change.
mod error;
mod rng;
mod setup;
mod skills;
mod tables;
mod templates;

pub use error::OracleError;
pub use rng::{Dice, PcgRng, RngOracle, RollContext, compute_seed};
pub use setup::{MatchSetup, Placement};
pub use skills::{SkillEffect, SkillId, SkillOracle, SkillTemplate, TargetSelector};
pub use tables::{SkillTable, TemplateTable};
pub use templates::{TemplateOracle, UnitTemplate};

use crate::config::GameConfig;

/// Aggregates the configuration and read-only oracles required by the reducer.
pub struct Env<'a, S, T, R>
where
    S: SkillOracle + ?Sized,
    T: TemplateOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    config: &'a GameConfig,
    skills: &'a S,
    templates: &'a T,
    rng: &'a R,
}

pub type MatchEnv<'a> =
    Env<'a, dyn SkillOracle + 'a, dyn TemplateOracle + 'a, dyn RngOracle + 'a>;

impl<'a, S, T, R> Env<'a, S, T, R>
where
    S: SkillOracle + ?Sized,
    T: TemplateOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(config: &'a GameConfig, skills: &'a S, templates: &'a T, rng: &'a R) -> Self {
        Self {
            config,
            skills,
            templates,
            rng,
        }
    }

    pub fn config(&self) -> &'a GameConfig {
        self.config
    }

    pub fn skills(&self) -> &'a S {
        self.skills
    }

    pub fn templates(&self) -> &'a T {
        self.templates
    }

    pub fn rng(&self) -> &'a R {
        self.rng
    }

    /// Looks up a skill by id.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::SkillNotFound` if the table has no such skill.
    pub fn skill(&self, id: SkillId) -> Result<&'a SkillTemplate, OracleError> {
        self.skills.skill(id).ok_or(OracleError::SkillNotFound(id))
    }

    /// Looks up a unit template by id.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::TemplateNotFound` if the table has no such template.
    pub fn template(&self, id: &str) -> Result<&'a UnitTemplate, OracleError> {
        self.templates
            .template(id)
            .ok_or_else(|| OracleError::TemplateNotFound(id.to_string()))
    }
}

impl<'a, S, T, R> Env<'a, S, T, R>
where
    S: SkillOracle + 'a,
    T: TemplateOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts this environment into a trait-object based `MatchEnv`.
    pub fn into_match_env(self) -> MatchEnv<'a> {
        let skills: &'a dyn SkillOracle = self.skills;
        let templates: &'a dyn TemplateOracle = self.templates;
        let rng: &'a dyn RngOracle = self.rng;
        Env::new(self.config, skills, templates, rng)
    }
}

impl<S, T, R> Clone for Env<'_, S, T, R>
where
    S: SkillOracle + ?Sized,
    T: TemplateOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<S, T, R> Copy for Env<'_, S, T, R>
where
    S: SkillOracle + ?Sized,
    T: TemplateOracle + ?Sized,
    R: RngOracle + ?Sized,
{
}
