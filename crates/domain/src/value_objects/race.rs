//! Playable races - a closed catalog of static definitions.

use std::fmt;
use std::str::FromStr;

use super::ability::{bonus_map, Ability, BonusMap};
use super::dice::DiceExpression;
use crate::error::DomainError;

/// A playable race. Each variant carries a fixed label, health die and
/// innate ability bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Race {
    Human,
    Elf,
    Dwarf,
    Dunadan,
    Hobbit,
}

impl Race {
    /// Every race in the catalog.
    pub const ALL: [Race; 5] = [
        Race::Human,
        Race::Elf,
        Race::Dwarf,
        Race::Dunadan,
        Race::Hobbit,
    ];

    /// Catalog key, as stored in character records.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Human => "HUMAN",
            Self::Elf => "ELF",
            Self::Dwarf => "DWARF",
            Self::Dunadan => "DUNADAN",
            Self::Hobbit => "HOBBIT",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Elf => "Elf",
            Self::Dwarf => "Dwarf",
            Self::Dunadan => "Dunadan",
            Self::Hobbit => "Hobbit",
        }
    }

    /// Die rolled for hit points on every level gained.
    pub fn health_die(&self) -> DiceExpression {
        match self {
            Self::Human | Self::Elf => DiceExpression::from_parts(1, 8),
            Self::Dwarf | Self::Dunadan => DiceExpression::from_parts(1, 10),
            Self::Hobbit => DiceExpression::from_parts(1, 6),
        }
    }

    /// Innate ability bonuses.
    pub fn bonuses(&self) -> BonusMap {
        use Ability::*;
        match self {
            Self::Human => BonusMap::new(),
            Self::Elf => bonus_map(&[(Intelligence, 2), (Dexterity, 2), (Constitution, 1)]),
            Self::Dwarf => bonus_map(&[
                (Strength, 2),
                (Intelligence, 1),
                (Dexterity, 2),
                (Constitution, 1),
            ]),
            Self::Dunadan => bonus_map(&[
                (Strength, 1),
                (Intelligence, 1),
                (Dexterity, 1),
                (Constitution, 1),
            ]),
            Self::Hobbit => bonus_map(&[(Strength, -2), (Dexterity, 2)]),
        }
    }
}

impl fmt::Display for Race {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Race {
    type Err = DomainError;

    /// Case-insensitive lookup by catalog key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|race| race.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::not_found("Race", s))
    }
}
