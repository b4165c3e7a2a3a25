//! Aggregate roots - domain objects that own their related data
//!
//! Each aggregate:
//! - Owns all its constituent parts (enforced by Rust ownership)
//! - Exposes behavior through methods, not public fields
//! - Returns a summary value from mutations instead of mutating silently

pub mod player;
pub mod player_record;

pub use player::{LevelAdvance, Player};
pub use player_record::{PlayerRecord, REQUIRED_FIELDS};
