//! Character generation and item composition rules.
//!
//! Pure and synchronous: no I/O, no logging, no entropy of its own. Callers
//! supply randomness through [`RandomPort`].

pub mod aggregates;
pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use aggregates::{LevelAdvance, Player, PlayerRecord};
pub use entities::{Component, ComponentKind, Item};
pub use error::DomainError;
pub use ports::RandomPort;

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    ability_modifier, carry_capacity, roll, Ability, AbilityScores, Archetype, CharacterClass,
    CharacterName, DiceExpression, DiceParseError, DiceRoll, Equipment, EquipmentSlot, ItemId,
    Race,
};
