//! The complete set of content a match needs.

use battle_core::{
    ConfigError, Env, GameConfig, MatchEnv, MatchSetup, Role, RngOracle, Side, SkillOracle,
    SkillTable, TemplateOracle, TemplateTable,
};

#[cfg(feature = "loaders")]
pub(crate) const DEFAULT_CONFIG: &str = include_str!("../data/config.toml");
#[cfg(feature = "loaders")]
pub(crate) const DEFAULT_SKILLS: &str = include_str!("../data/skills.ron");
#[cfg(feature = "loaders")]
pub(crate) const DEFAULT_UNITS: &str = include_str!("../data/units.ron");
#[cfg(feature = "loaders")]
pub(crate) const DEFAULT_SCENARIO: &str = include_str!("../data/scenario.ron");

/// Configuration, skill and template tables, and the scenario, swapped as one
/// unit between matches.
#[derive(Clone, Debug, PartialEq)]
pub struct ContentBundle {
    pub config: GameConfig,
    pub skills: SkillTable,
    pub templates: TemplateTable,
    pub setup: MatchSetup,
}

impl ContentBundle {
    /// The embedded default content.
    #[cfg(feature = "loaders")]
    pub fn defaults() -> crate::loaders::LoadResult<Self> {
        use crate::loaders::{ConfigLoader, ScenarioLoader, SkillLoader, TemplateLoader};

        let bundle = Self {
            config: ConfigLoader::parse(DEFAULT_CONFIG)?,
            skills: SkillLoader::parse(DEFAULT_SKILLS)?,
            templates: TemplateLoader::parse(DEFAULT_UNITS)?,
            setup: ScenarioLoader::parse(DEFAULT_SCENARIO)?,
        };
        bundle
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid embedded content: {}", e))?;
        Ok(bundle)
    }

    /// Range-checks the config and resolves every cross-table reference.
    ///
    /// Captain skills, template skills, and every template named by the
    /// scenario must exist. Starting units may not be captains and may not
    /// share a slot with each other or with their side's captain.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.config.validate()?;

        for captain in [&self.config.captains.player, &self.config.captains.enemy] {
            if self.skills.skill(captain.skill_id).is_none() {
                return Err(ConfigError::UnknownSkill {
                    owner: captain.name.clone(),
                    skill: captain.skill_id,
                });
            }
        }

        for template in self.templates.iter() {
            let Some(skill) = template.skill_id else {
                continue;
            };
            if self.skills.skill(skill).is_none() {
                return Err(ConfigError::UnknownSkill {
                    owner: format!("template '{}'", template.id),
                    skill,
                });
            }
        }

        let referenced = self
            .setup
            .starting_units
            .iter()
            .map(|p| &p.template_id)
            .chain(&self.setup.deck);
        for id in referenced {
            if self.templates.template(id).is_none() {
                return Err(ConfigError::UnknownTemplate(id.clone()));
            }
        }

        let captains = &self.config.captains;
        let mut taken = vec![
            (Side::Player, captains.player.slot),
            (Side::Enemy, captains.enemy.slot),
        ];
        for placement in &self.setup.starting_units {
            if self
                .templates
                .template(&placement.template_id)
                .is_some_and(|t| t.role == Role::Captain)
            {
                return Err(ConfigError::CaptainInScenario(placement.template_id.clone()));
            }
            let key = (placement.side, placement.slot);
            if taken.contains(&key) {
                return Err(ConfigError::SlotTaken {
                    side: placement.side,
                    slot: placement.slot,
                });
            }
            taken.push(key);
        }

        Ok(())
    }

    /// Borrows the bundle as a match environment with the given random source.
    pub fn env<'a>(&'a self, rng: &'a dyn RngOracle) -> MatchEnv<'a> {
        let skills: &'a dyn SkillOracle = &self.skills;
        let templates: &'a dyn TemplateOracle = &self.templates;
        Env::new(&self.config, skills, templates, rng)
    }
}

#[cfg(all(test, feature = "loaders"))]
mod tests {
    use battle_core::{GameError, GridSlot, Placement, SkillId, UnitTemplate};

    use super::*;

    #[test]
    fn defaults_are_consistent() {
        let bundle = ContentBundle::defaults().unwrap();
        assert_eq!(bundle.config, GameConfig::default());
        assert_eq!(bundle.skills.len(), 9);
        assert_eq!(bundle.templates.len(), 7);
        assert_eq!(bundle.setup.deck.len(), 12);
    }

    #[test]
    fn captain_skill_must_resolve() {
        let mut bundle = ContentBundle::defaults().unwrap();
        bundle.config.captains.enemy.skill_id = SkillId(4242);

        let err = bundle.validate().unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownSkill {
                owner: "Abyss Tyrant".into(),
                skill: SkillId(4242),
            }
        );
        assert_eq!(err.error_code(), "CONFIG_UNKNOWN_SKILL");
    }

    #[test]
    fn deck_entries_must_resolve() {
        let mut bundle = ContentBundle::defaults().unwrap();
        bundle.setup.deck.push("999".into());
        assert_eq!(
            bundle.validate(),
            Err(ConfigError::UnknownTemplate("999".into()))
        );
    }

    fn captain_template(id: &str) -> UnitTemplate {
        UnitTemplate {
            id: id.to_string(),
            name: "Pretender".into(),
            role: Role::Captain,
            cost: 1,
            hp: 100,
            atk: 10,
            def: 1,
            skill_id: None,
            color: String::new(),
            icon: String::new(),
            description: String::new(),
        }
    }

    #[test]
    fn starting_units_cannot_be_captains() {
        let mut bundle = ContentBundle::defaults().unwrap();
        bundle.templates.insert(captain_template("900"));
        bundle.setup.starting_units.push(Placement {
            template_id: "900".into(),
            side: Side::Enemy,
            slot: GridSlot::new(5).unwrap(),
        });

        let err = bundle.validate().unwrap_err();
        assert_eq!(err, ConfigError::CaptainInScenario("900".into()));
        assert_eq!(err.error_code(), "CONFIG_CAPTAIN_IN_SCENARIO");
    }

    #[test]
    fn starting_units_cannot_share_a_slot() {
        let mut bundle = ContentBundle::defaults().unwrap();
        let captain_slot = bundle.config.captains.enemy.slot;
        bundle.setup.starting_units.push(Placement {
            template_id: "105".into(),
            side: Side::Enemy,
            slot: captain_slot,
        });
        assert_eq!(
            bundle.validate(),
            Err(ConfigError::SlotTaken {
                side: Side::Enemy,
                slot: captain_slot,
            })
        );

        let mut bundle = ContentBundle::defaults().unwrap();
        let first = bundle.setup.starting_units[0].clone();
        bundle.setup.starting_units.push(first.clone());
        assert_eq!(
            bundle.validate(),
            Err(ConfigError::SlotTaken {
                side: first.side,
                slot: first.slot,
            })
        );

        // Same slot number on the other side is a different cell.
        let mut bundle = ContentBundle::defaults().unwrap();
        bundle.setup.starting_units.push(Placement {
            side: Side::Player,
            ..first
        });
        assert_eq!(bundle.validate(), Ok(()));
    }
}
