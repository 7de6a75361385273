use std::collections::BTreeMap;

use super::{SkillId, SkillOracle, SkillTemplate, TemplateOracle, UnitTemplate};

/// In-memory skill table keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SkillTable {
    skills: BTreeMap<SkillId, SkillTemplate>,
}

impl SkillTable {
    pub fn new(skills: impl IntoIterator<Item = SkillTemplate>) -> Self {
        Self {
            skills: skills.into_iter().map(|s| (s.id, s)).collect(),
        }
    }

    /// Inserts or replaces a skill, returning the previous definition.
    pub fn insert(&mut self, skill: SkillTemplate) -> Option<SkillTemplate> {
        self.skills.insert(skill.id, skill)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillTemplate> {
        self.skills.values()
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

impl SkillOracle for SkillTable {
    fn skill(&self, id: SkillId) -> Option<&SkillTemplate> {
        self.skills.get(&id)
    }
}

/// In-memory unit template table keyed by template id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateTable {
    templates: BTreeMap<String, UnitTemplate>,
}

impl TemplateTable {
    pub fn new(templates: impl IntoIterator<Item = UnitTemplate>) -> Self {
        Self {
            templates: templates
                .into_iter()
                .map(|t| (t.id.clone(), t))
                .collect(),
        }
    }

    pub fn insert(&mut self, template: UnitTemplate) -> Option<UnitTemplate> {
        self.templates.insert(template.id.clone(), template)
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitTemplate> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateOracle for TemplateTable {
    fn template(&self, id: &str) -> Option<&UnitTemplate> {
        self.templates.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{SkillEffect, TargetSelector};
    use crate::state::Role;

    #[test]
    fn insert_replaces_by_id() {
        let mut table = SkillTable::new([SkillTemplate {
            id: SkillId(1),
            name: "old".into(),
            description: String::new(),
            target: TargetSelector::SelfOnly,
            effect: SkillEffect::Shield,
            multiplier: 1.0,
        }]);
        let replaced = table.insert(SkillTemplate {
            id: SkillId(1),
            name: "new".into(),
            description: String::new(),
            target: TargetSelector::AllAllies,
            effect: SkillEffect::Heal,
            multiplier: 2.0,
        });

        assert_eq!(replaced.unwrap().name, "old");
        assert_eq!(table.len(), 1);
        assert_eq!(table.skill(SkillId(1)).unwrap().name, "new");
    }

    #[test]
    fn template_lookup_by_string_id() {
        let table = TemplateTable::new([UnitTemplate {
            id: "101".into(),
            name: "Guard".into(),
            role: Role::Tank,
            cost: 5,
            hp: 2200,
            atk: 120,
            def: 120,
            skill_id: Some(SkillId(101)),
            color: String::new(),
            icon: String::new(),
            description: String::new(),
        }]);

        assert_eq!(table.template("101").unwrap().cost, 5);
        assert!(table.template("999").is_none());
    }
}
