//! Match scenario loader (starting roster and deck).

use std::path::Path;

use battle_core::MatchSetup;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`MatchSetup`] from RON files.
pub struct ScenarioLoader;

impl ScenarioLoader {
    pub fn load(path: &Path) -> LoadResult<MatchSetup> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<MatchSetup> {
        let setup: MatchSetup = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse scenario RON: {}", e))?;
        Ok(setup)
    }
}

#[cfg(test)]
mod tests {
    use battle_core::Side;

    use super::*;

    #[test]
    fn parses_placements() {
        let setup = ScenarioLoader::parse(
            r#"(starting_units: [(template_id: "101", side: enemy, slot: 2)], deck: ["101"])"#,
        )
        .unwrap();
        assert_eq!(setup.starting_units[0].side, Side::Enemy);
        assert_eq!(setup.starting_units[0].slot.index(), 2);
        assert_eq!(setup.deck, ["101"]);
    }

    #[test]
    fn slot_outside_the_grid_is_rejected() {
        assert!(
            ScenarioLoader::parse(
                r#"(starting_units: [(template_id: "101", side: enemy, slot: 10)], deck: [])"#,
            )
            .is_err()
        );
    }
}
