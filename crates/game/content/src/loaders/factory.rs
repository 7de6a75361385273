//! Content loader for a whole data directory.

use std::path::{Path, PathBuf};

use battle_core::{GameConfig, MatchSetup, SkillTable, TemplateTable};

use crate::bundle::ContentBundle;
use crate::loaders::{ConfigLoader, LoadResult, ScenarioLoader, SkillLoader, TemplateLoader};

/// Loads match content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── skills.ron
/// ├── units.ron
/// └── scenario.ron
/// ```
///
/// Any file may be left out; the embedded default takes its place.
pub struct ContentLoader {
    data_dir: PathBuf,
}

impl ContentLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load and cross-check every file under `path`.
    pub fn load_dir(path: impl Into<PathBuf>) -> LoadResult<ContentBundle> {
        Self::new(path).load()
    }

    /// Load the full bundle, falling back to embedded defaults per file.
    pub fn load(&self) -> LoadResult<ContentBundle> {
        let bundle = ContentBundle {
            config: self.load_config()?,
            skills: self.load_skills()?,
            templates: self.load_templates()?,
            setup: self.load_scenario()?,
        };
        bundle
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid content in {}: {}", self.data_dir.display(), e))?;

        tracing::info!(
            dir = %self.data_dir.display(),
            skills = bundle.skills.len(),
            templates = bundle.templates.len(),
            "loaded content"
        );
        Ok(bundle)
    }

    /// Load match configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        match self.existing("config.toml") {
            Some(path) => ConfigLoader::load(&path),
            None => ConfigLoader::parse(crate::bundle::DEFAULT_CONFIG),
        }
    }

    /// Load the skill table from `skills.ron`.
    pub fn load_skills(&self) -> LoadResult<SkillTable> {
        match self.existing("skills.ron") {
            Some(path) => SkillLoader::load(&path),
            None => SkillLoader::parse(crate::bundle::DEFAULT_SKILLS),
        }
    }

    /// Load unit templates from `units.ron`.
    pub fn load_templates(&self) -> LoadResult<TemplateTable> {
        match self.existing("units.ron") {
            Some(path) => TemplateLoader::load(&path),
            None => TemplateLoader::parse(crate::bundle::DEFAULT_UNITS),
        }
    }

    /// Load the starting roster and deck from `scenario.ron`.
    pub fn load_scenario(&self) -> LoadResult<MatchSetup> {
        match self.existing("scenario.ron") {
            Some(path) => ScenarioLoader::load(&path),
            None => ScenarioLoader::parse(crate::bundle::DEFAULT_SCENARIO),
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn existing(&self, file: &str) -> Option<PathBuf> {
        let path = self.data_dir.join(file);
        if path.is_file() {
            Some(path)
        } else {
            tracing::debug!(file, "content file absent, using embedded default");
            None
        }
    }
}
