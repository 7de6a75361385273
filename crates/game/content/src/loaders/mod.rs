//! Content loaders for reading match data from files.
//!
//! Each loader turns one RON/TOML file into the battle-core type it describes.
//! [`ContentLoader`] ties them together for a whole content directory.

pub mod config;
pub mod factory;
pub mod scenario;
pub mod skills;
pub mod units;

pub use config::ConfigLoader;
pub use factory::ContentLoader;
pub use scenario::ScenarioLoader;
pub use skills::{SkillCatalog, SkillLoader};
pub use units::{TemplateLoader, UnitCatalog};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
