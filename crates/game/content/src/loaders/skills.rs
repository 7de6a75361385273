//! Skill table loader.

use std::path::Path;

use battle_core::{SkillTable, SkillTemplate};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Skill catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillCatalog {
    pub skills: Vec<SkillTemplate>,
}

/// Loader for the skill table from RON files.
pub struct SkillLoader;

impl SkillLoader {
    /// Load the skill table from a RON file.
    pub fn load(path: &Path) -> LoadResult<SkillTable> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse skill catalog RON. Duplicate ids are an error.
    pub fn parse(content: &str) -> LoadResult<SkillTable> {
        let catalog: SkillCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse skill catalog RON: {}", e))?;

        let mut table = SkillTable::default();
        for skill in catalog.skills {
            let id = skill.id;
            if table.insert(skill).is_some() {
                anyhow::bail!("Duplicate skill id {}", id);
            }
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use battle_core::{SkillEffect, SkillId, SkillOracle, TargetSelector};

    use super::*;

    #[test]
    fn parses_selectors_and_effects() {
        let table = SkillLoader::parse(
            r#"(skills: [
                (id: 7, name: "Volley", target: random_three_enemies, effect: damage, multiplier: 1.8),
            ])"#,
        )
        .unwrap();

        let volley = table.skill(SkillId(7)).unwrap();
        assert_eq!(volley.target, TargetSelector::RandomThreeEnemies);
        assert_eq!(volley.effect, SkillEffect::Damage);
        assert!(volley.description.is_empty());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = SkillLoader::parse(
            r#"(skills: [
                (id: 1, name: "a", target: self_only, effect: shield, multiplier: 1.0),
                (id: 1, name: "b", target: self_only, effect: shield, multiplier: 1.0),
            ])"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Duplicate skill id 1");
    }
}
