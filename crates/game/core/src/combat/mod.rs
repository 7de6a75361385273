//! Combat resolution system.
//!
//! # Architecture
//!
//! - **Targeting**: pure index lookups over the roster (taunt, role, row)
//! - **Damage**: pure roll from attacker/defender stats and probability tunables
//! - **Pipeline**: applies rolls to the roster (shield, hp, rage, death, winner)
//!
//! # Core Functions
//!
//! - `select_target`: basic-attack target for a unit
//! - `compute_damage`: mitigated, rolled damage for one hit
//! - `strike`: one full hit through the post-damage pipeline
//! - `heal` / `shield`: restorative effects

pub mod damage;
pub mod pipeline;
pub mod targeting;

pub use damage::{DamageRoll, base_damage, compute_damage};
pub use pipeline::{HitOutcome, heal, shield, strike};
pub use targeting::{
    living_on, lowest_hp_enemy, lowest_ratio_ally, most_wounded_ally, select_target,
};
