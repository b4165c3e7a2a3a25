//! Archetype - the derived profile of one race paired with one class
//!
//! The race contributes the health die, the class contributes the magic die,
//! and both contribute ability bonuses, which are summed per ability.

use std::fmt;

use super::ability::{Ability, BonusMap};
use super::character_class::CharacterClass;
use super::dice::DiceExpression;
use super::race::Race;
use crate::error::DomainError;

/// A race/class pairing. Holds no state of its own; every derived value is
/// recomputed from the static catalogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Archetype {
    race: Race,
    class: CharacterClass,
}

impl Archetype {
    /// Pair a race with a class.
    pub fn compose(race: Race, class: CharacterClass) -> Self {
        Self { race, class }
    }

    /// Compose from catalog keys.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotFound` if either key is not in its catalog.
    pub fn from_keys(race_key: &str, class_key: &str) -> Result<Self, DomainError> {
        Ok(Self::compose(race_key.parse()?, class_key.parse()?))
    }

    pub fn race(&self) -> Race {
        self.race
    }

    pub fn class(&self) -> CharacterClass {
        self.class
    }

    /// Hit point die, taken from the race.
    pub fn health_die(&self) -> DiceExpression {
        self.race.health_die()
    }

    /// Magic point die, taken from the class.
    pub fn magic_die(&self) -> DiceExpression {
        self.class.magic_die()
    }

    /// Race bonuses plus class bonuses, summed per ability. Abilities named by
    /// only one side pass through unchanged.
    pub fn bonuses(&self) -> BonusMap {
        let mut merged = self.race.bonuses();
        for (ability, value) in self.class.bonuses() {
            *merged.entry(ability).or_insert(0) += value;
        }
        merged
    }

    /// Merged bonus for a single ability (0 when neither side names it).
    pub fn bonus(&self, ability: Ability) -> i32 {
        self.race.bonuses().get(&ability).copied().unwrap_or(0)
            + self.class.bonuses().get(&ability).copied().unwrap_or(0)
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.race.label(), self.class.label())
    }
}
