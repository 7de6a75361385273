//! Shared fixtures for battle-core integration tests.
#![allow(dead_code)]

use battle_core::{
    Env, GameConfig, GridSlot, MatchEnv, MatchSetup, MatchState, Placement, RngOracle, Role, Side,
    SkillEffect, SkillId, SkillTable, SkillTemplate, TargetSelector, TemplateTable, Unit, UnitFx,
    UnitId, UnitStats, UnitTemplate,
};

/// Oracle that always returns the same value.
///
/// `Fixed(0)` makes every probability roll succeed, `Fixed(u32::MAX)` makes
/// every roll below 1.0 fail.
#[derive(Clone, Copy, Debug)]
pub struct Fixed(pub u32);

impl RngOracle for Fixed {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

pub const ALWAYS: Fixed = Fixed(0);
pub const NEVER: Fixed = Fixed(u32::MAX);

pub fn skill(id: u32, target: TargetSelector, effect: SkillEffect, multiplier: f64) -> SkillTemplate {
    SkillTemplate {
        id: SkillId(id),
        name: format!("skill-{id}"),
        description: String::new(),
        target,
        effect,
        multiplier,
    }
}

pub fn default_skills() -> SkillTable {
    use SkillEffect::*;
    use TargetSelector::*;
    SkillTable::new([
        skill(101, SelfOnly, TauntAndShield, 0.3),
        skill(102, AllAllies, Shield, 3.0),
        skill(103, LowestHpEnemy, Damage, 5.0),
        skill(104, FrontThreeStrikes, Damage, 1.5),
        skill(105, RandomThreeEnemies, Damage, 1.8),
        skill(106, AllEnemies, Damage, 2.0),
        skill(107, AllAllies, Heal, 3.5),
        skill(901, AllEnemies, Damage, 2.5),
        skill(902, AllEnemies, Damage, 2.5),
    ])
}

pub fn template(id: &str, role: Role, cost: u32, hp: u32, atk: u32, def: u32) -> UnitTemplate {
    UnitTemplate {
        id: id.to_string(),
        name: format!("{role}-{id}"),
        role,
        cost,
        hp,
        atk,
        def,
        skill_id: id.parse().ok().map(SkillId),
        color: String::new(),
        icon: String::new(),
        description: String::new(),
    }
}

pub fn default_templates() -> TemplateTable {
    TemplateTable::new([
        template("101", Role::Tank, 5, 2200, 120, 120),
        template("102", Role::Paladin, 6, 1800, 180, 90),
        template("103", Role::Assassin, 4, 750, 420, 30),
        template("104", Role::Berserker, 5, 1100, 350, 40),
        template("105", Role::Archer, 4, 650, 280, 20),
        template("106", Role::Mage, 7, 700, 320, 30),
        template("107", Role::Healer, 5, 900, 100, 40),
    ])
}

pub const STARTING_DECK: [&str; 12] = [
    "101", "105", "107", "104", "106", "103", "102", "101", "105", "104", "106", "107",
];

pub fn default_setup() -> MatchSetup {
    MatchSetup {
        starting_units: vec![
            Placement {
                template_id: "101".into(),
                side: Side::Enemy,
                slot: slot(2),
            },
            Placement {
                template_id: "105".into(),
                side: Side::Enemy,
                slot: slot(4),
            },
        ],
        deck: STARTING_DECK.iter().map(|s| s.to_string()).collect(),
    }
}

/// Config, tables and a random source bundled for building a [`MatchEnv`].
pub struct Fixture<R: RngOracle> {
    pub config: GameConfig,
    pub skills: SkillTable,
    pub templates: TemplateTable,
    pub rng: R,
}

impl<R: RngOracle> Fixture<R> {
    pub fn new(rng: R) -> Self {
        Self {
            config: GameConfig::default(),
            skills: default_skills(),
            templates: default_templates(),
            rng,
        }
    }

    pub fn env(&self) -> MatchEnv<'_> {
        Env::new(&self.config, &self.skills, &self.templates, &self.rng).into_match_env()
    }

    /// Full default match: both captains, starting enemies, opening hand.
    pub fn start(&self, seed: u64) -> MatchState {
        MatchState::start(self.env(), &default_setup(), seed).unwrap()
    }

    /// Match with no units, hand or deck.
    pub fn empty(&self) -> MatchState {
        MatchState::empty(&self.config, 7)
    }
}

pub fn slot(n: u8) -> GridSlot {
    GridSlot::new(n).unwrap()
}

pub fn unit(id: u32, side: Side, role: Role, slot_index: u8) -> Unit {
    Unit {
        id: UnitId(id),
        template_id: "test".into(),
        name: format!("{side}-{role}-{id}"),
        role,
        side,
        slot: slot(slot_index),
        stats: UnitStats::new(1000, 100, 0, 1000.0),
        attack_countdown: 2.0,
        is_dead: false,
        remove_at: None,
        taunt_until: None,
        skill_id: None,
        fx: UnitFx::empty(),
        floating_text: Vec::new(),
    }
}

/// Asserts the per-unit stat invariants hold for every unit.
pub fn assert_stat_invariants(state: &MatchState) {
    for u in &state.units {
        assert!(u.stats.hp <= u.stats.max_hp, "{} hp above max", u.name);
        assert!(
            (0.0..=u.stats.max_rage).contains(&u.stats.rage),
            "{} rage {} out of range",
            u.name,
            u.stats.rage
        );
        if u.is_dead {
            assert_eq!(u.stats.hp, 0, "{} dead with hp", u.name);
        }
    }
}
