//! Target selection heuristics.
//!
//! All functions work on roster indices so callers can mutate the chosen unit
//! without holding a borrow across the lookup.

use std::cmp::Reverse;

use crate::state::{Role, Row, Side, Timestamp, Unit};

/// Picks the basic-attack target for `actor` from the opposing living units.
///
/// Priority, first match wins:
/// 1. taunting enemies, lowest slot
/// 2. Assassins: highest slot (first encountered on ties)
/// 3. enemies in the actor's row, lowest slot
/// 4. middle row, then top row, then bottom row, lowest slot
/// 5. any living enemy
pub fn select_target(actor: &Unit, roster: &[Unit], now: Timestamp) -> Option<usize> {
    let enemy = actor.side.opponent();
    let enemies = || living_on(roster, enemy);

    if let Some(index) = enemies()
        .filter(|&i| roster[i].is_taunting(now))
        .min_by_key(|&i| roster[i].slot)
    {
        return Some(index);
    }

    if actor.role == Role::Assassin {
        return enemies().min_by_key(|&i| Reverse(roster[i].slot));
    }

    let own_row = actor.slot.row();
    std::iter::once(own_row)
        .chain(Row::FALLBACK_ORDER)
        .find_map(|row| {
            enemies()
                .filter(|&i| roster[i].slot.row() == row)
                .min_by_key(|&i| roster[i].slot)
        })
        .or_else(|| enemies().next())
}

/// Living ally with the lowest hp / max hp ratio.
pub fn lowest_ratio_ally(roster: &[Unit], side: Side) -> Option<usize> {
    living_on(roster, side).min_by(|&a, &b| {
        roster[a]
            .stats
            .hp_ratio()
            .total_cmp(&roster[b].stats.hp_ratio())
    })
}

/// Living, damaged ally with the lowest hp / max hp ratio.
pub fn most_wounded_ally(roster: &[Unit], side: Side) -> Option<usize> {
    lowest_ratio_ally(roster, side).filter(|&i| roster[i].stats.hp < roster[i].stats.max_hp)
}

/// Living enemy of `side` with the lowest absolute hp.
pub fn lowest_hp_enemy(roster: &[Unit], side: Side) -> Option<usize> {
    living_on(roster, side.opponent()).min_by_key(|&i| roster[i].stats.hp)
}

/// Indices of living units on `side`, in roster order.
pub fn living_on(roster: &[Unit], side: Side) -> impl Iterator<Item = usize> + '_ {
    roster
        .iter()
        .enumerate()
        .filter(move |(_, u)| u.side == side && u.is_alive())
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{GridSlot, UnitFx, UnitId, UnitStats};

    fn unit(id: u32, side: Side, role: Role, slot: u8) -> Unit {
        Unit {
            id: UnitId(id),
            template_id: "t".into(),
            name: format!("u{id}"),
            role,
            side,
            slot: GridSlot::new(slot).unwrap(),
            stats: UnitStats::new(1000, 100, 10, 1000.0),
            attack_countdown: 0.0,
            is_dead: false,
            remove_at: None,
            taunt_until: None,
            skill_id: None,
            fx: UnitFx::empty(),
            floating_text: Vec::new(),
        }
    }

    fn target_id(actor: &Unit, roster: &[Unit]) -> Option<u32> {
        select_target(actor, roster, Timestamp(1000)).map(|i| roster[i].id.0)
    }

    #[test]
    fn prefers_same_row_lowest_slot() {
        let actor = unit(1, Side::Player, Role::Archer, 3);
        let roster = vec![
            actor.clone(),
            unit(10, Side::Enemy, Role::Tank, 1),
            unit(11, Side::Enemy, Role::Mage, 9),
            unit(12, Side::Enemy, Role::Mage, 6),
        ];
        assert_eq!(target_id(&actor, &roster), Some(12));
    }

    #[test]
    fn falls_back_middle_then_top_then_bottom() {
        let actor = unit(1, Side::Player, Role::Archer, 1);
        let mut roster = vec![
            actor.clone(),
            unit(10, Side::Enemy, Role::Tank, 3),
            unit(11, Side::Enemy, Role::Mage, 8),
        ];
        assert_eq!(target_id(&actor, &roster), Some(11));

        roster[2].is_dead = true;
        assert_eq!(target_id(&actor, &roster), Some(10));

        let bottom_actor = unit(2, Side::Player, Role::Archer, 3);
        let roster = vec![
            bottom_actor.clone(),
            unit(20, Side::Enemy, Role::Mage, 7),
            unit(21, Side::Enemy, Role::Mage, 4),
        ];
        assert_eq!(target_id(&bottom_actor, &roster), Some(21));
    }

    #[test]
    fn assassin_picks_highest_slot_first_on_ties() {
        let actor = unit(1, Side::Player, Role::Assassin, 1);
        let roster = vec![
            actor.clone(),
            unit(10, Side::Enemy, Role::Tank, 2),
            unit(11, Side::Enemy, Role::Mage, 9),
            unit(12, Side::Enemy, Role::Healer, 9),
        ];
        assert_eq!(target_id(&actor, &roster), Some(11));
    }

    #[test]
    fn taunt_overrides_everything() {
        let actor = unit(1, Side::Player, Role::Assassin, 1);
        let mut taunter = unit(10, Side::Enemy, Role::Tank, 5);
        taunter.taunt_until = Some(Timestamp(5000));
        let mut expired = unit(11, Side::Enemy, Role::Tank, 2);
        expired.taunt_until = Some(Timestamp(1000));
        let roster = vec![
            actor.clone(),
            unit(12, Side::Enemy, Role::Mage, 9),
            taunter,
            expired,
        ];
        assert_eq!(target_id(&actor, &roster), Some(10));
    }

    #[test]
    fn no_living_enemy_yields_none() {
        let actor = unit(1, Side::Player, Role::Archer, 1);
        let mut dead = unit(10, Side::Enemy, Role::Tank, 1);
        dead.is_dead = true;
        let roster = vec![actor.clone(), dead, unit(2, Side::Player, Role::Mage, 2)];
        assert_eq!(target_id(&actor, &roster), None);
    }

    #[test]
    fn wounded_ally_ignores_full_health() {
        let mut roster = vec![
            unit(1, Side::Player, Role::Healer, 1),
            unit(2, Side::Player, Role::Tank, 2),
        ];
        assert_eq!(lowest_ratio_ally(&roster, Side::Player), Some(0));
        assert_eq!(most_wounded_ally(&roster, Side::Player), None);

        roster[1].stats.hp = 400;
        assert_eq!(most_wounded_ally(&roster, Side::Player), Some(1));
    }

    #[test]
    fn lowest_hp_enemy_uses_absolute_hp() {
        let mut big = unit(10, Side::Enemy, Role::Tank, 1);
        big.stats.max_hp = 5000;
        big.stats.hp = 900;
        let mut small = unit(11, Side::Enemy, Role::Mage, 2);
        small.stats.max_hp = 1000;
        small.stats.hp = 950;
        let roster = vec![unit(1, Side::Player, Role::Assassin, 1), big, small];
        assert_eq!(lowest_hp_enemy(&roster, Side::Player), Some(1));
    }
}
