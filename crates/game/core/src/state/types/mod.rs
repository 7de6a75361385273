pub mod common;
pub mod grid;
pub mod hand;
pub mod log;
pub mod unit;

// Re-export identifiers and tags
pub use common::{CardInstanceId, Role, Side, Timestamp, UnitId};

// Re-export grid layout
pub use grid::{GridSlot, InvalidGridSlot, Row};

// Re-export hand and deck
pub use hand::{CardInstance, Deck, Hand};

// Re-export combat log
pub use log::{CombatLog, LogCategory, LogEntry, LogRecord, format_clock};

// Re-export unit types
pub use unit::{FloatingText, FloatingTextKind, Unit, UnitFx, UnitStats};
