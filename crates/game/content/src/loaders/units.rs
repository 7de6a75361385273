//! Unit template loader.

use std::path::Path;

use battle_core::{TemplateTable, UnitTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Unit catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitCatalog {
    pub units: Vec<UnitTemplate>,
}

/// Loader for summonable unit templates from RON files.
pub struct TemplateLoader;

impl TemplateLoader {
    /// Load the template table from a RON file.
    pub fn load(path: &Path) -> LoadResult<TemplateTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TemplateTable> {
        let catalog: UnitCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse unit catalog RON: {}", e))?;

        let mut table = TemplateTable::default();
        for template in catalog.units {
            let id = template.id.clone();
            if table.insert(template).is_some() {
                anyhow::bail!("Duplicate unit template '{}'", id);
            }
        }
        Ok(table)
    }
}
