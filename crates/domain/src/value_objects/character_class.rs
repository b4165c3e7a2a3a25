//! Character classes - a closed catalog of static definitions.

use std::fmt;
use std::str::FromStr;

use super::ability::{bonus_map, Ability, BonusMap};
use super::dice::DiceExpression;
use crate::error::DomainError;

/// A character class. Each variant carries a fixed label, magic die and
/// trained ability bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Burglar,
    Ranger,
    Warrior,
    Wizard,
}

impl CharacterClass {
    /// Every class in the catalog.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Burglar,
        CharacterClass::Ranger,
        CharacterClass::Warrior,
        CharacterClass::Wizard,
    ];

    /// Catalog key, as stored in character records.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Burglar => "BURGLAR",
            Self::Ranger => "RANGER",
            Self::Warrior => "WARRIOR",
            Self::Wizard => "WIZARD",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Burglar => "Burglar",
            Self::Ranger => "Ranger",
            Self::Warrior => "Warrior",
            Self::Wizard => "Wizard",
        }
    }

    /// Die rolled for magic points on every level gained.
    pub fn magic_die(&self) -> DiceExpression {
        match self {
            Self::Burglar => DiceExpression::from_parts(1, 6),
            Self::Ranger => DiceExpression::from_parts(1, 8),
            Self::Warrior => DiceExpression::from_parts(1, 3),
            Self::Wizard => DiceExpression::from_parts(1, 10),
        }
    }

    /// Trained ability bonuses.
    pub fn bonuses(&self) -> BonusMap {
        use Ability::*;
        match self {
            Self::Burglar => bonus_map(&[
                (Strength, -1),
                (Intelligence, 2),
                (Dexterity, 2),
                (Constitution, -2),
            ]),
            Self::Ranger => bonus_map(&[(Intelligence, 1), (Dexterity, 3), (Constitution, 2)]),
            Self::Warrior => bonus_map(&[(Strength, 3), (Intelligence, -5), (Constitution, 3)]),
            Self::Wizard => bonus_map(&[(Strength, -2), (Intelligence, 5), (Constitution, -2)]),
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CharacterClass {
    type Err = DomainError;

    /// Case-insensitive lookup by catalog key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|class| class.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::not_found("CharacterClass", s))
    }
}
