//! Repository implementations for database access
//!
//! Each repository follows the same patterns:
//! - Plain gets return Option; absent rows are not errors
//! - Lookups feeding a dependent write fail as NotFound before commit
//! - Multi-table writes share one transaction
//! - Deletes by key are idempotent

pub mod cards;
pub mod events;
pub mod players;
pub mod tags;

pub use cards::{Card, CardRepo, UpgradeEdge};
pub use events::{Event, EventRepo};
pub use players::{CardOwnership, Player, PlayerRepo};
pub use tags::{Tag, TagRepo};
