//! Value objects - Immutable objects defined by their attributes

mod ability;
mod archetype;
mod character_class;
mod dice;
mod equipment;
mod names;
mod progression;
mod race;

pub use ability::{ability_modifier, Ability, AbilityScores, BonusMap};
pub use archetype::Archetype;
pub use character_class::CharacterClass;
pub use dice::{roll, DiceExpression, DiceParseError, DiceRoll};
pub use equipment::{Equipment, EquipmentSlot};
pub use names::{CharacterName, ItemId};
pub use progression::{
    carry_capacity, growth_step, ABILITY_ROLL, MAX_CARRY_CAPACITY, MIN_CARRY_CAPACITY,
};
pub use race::Race;
