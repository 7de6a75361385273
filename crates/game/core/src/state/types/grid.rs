//! Fixed 3×3 battlefield layout.
//!
//! Slots are numbered 1..=9 per side and map onto rows column-major:
//!
//! ```text
//!   col:   2   1   0
//! row 0:   1   4   7
//! row 1:   2   5   8
//! row 2:   3   6   9
//! ```
//!
//! Column 2 (slots 1-3) faces the enemy; lower slot numbers sit closer to the front.

use std::fmt;

use crate::config::GameConfig;

/// One of the nine positions on a side's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct GridSlot(u8);

impl GridSlot {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = GameConfig::GRID_SLOTS as u8;

    /// Middle row, rearmost column. Default captain position.
    pub const MIDDLE_BACK: Self = Self(8);

    /// Creates a slot if `index` is within 1..=9.
    pub const fn new(index: u8) -> Option<Self> {
        if index >= Self::MIN && index <= Self::MAX {
            Some(Self(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn row(self) -> Row {
        match (self.0 - 1) % 3 {
            0 => Row::Top,
            1 => Row::Middle,
            _ => Row::Bottom,
        }
    }

    /// Column counted from the back line (0) to the front line (2).
    #[inline]
    pub const fn column(self) -> u8 {
        2 - (self.0 - 1) / 3
    }

    /// All nine slots in ascending order.
    pub fn all() -> impl Iterator<Item = GridSlot> {
        (Self::MIN..=Self::MAX).map(GridSlot)
    }
}

impl TryFrom<u8> for GridSlot {
    type Error = InvalidGridSlot;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(InvalidGridSlot(value))
    }
}

impl From<GridSlot> for u8 {
    fn from(slot: GridSlot) -> u8 {
        slot.0
    }
}

impl fmt::Display for GridSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slot index outside 1..=9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("grid slot {0} is outside 1..=9")]
pub struct InvalidGridSlot(pub u8);

/// Horizontal lane shared by three slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Row {
    Top,
    Middle,
    Bottom,
}

impl Row {
    /// Lanes searched when the attacker's own lane is empty.
    pub const FALLBACK_ORDER: [Row; 3] = [Row::Middle, Row::Top, Row::Bottom];
}
