//! The four ability scores and signed bonus maps over them.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::DomainError;

/// Mapping from ability to a signed adjustment.
pub type BonusMap = BTreeMap<Ability, i32>;

/// A raw ability score category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Strength,
    Intelligence,
    Dexterity,
    Constitution,
}

impl Ability {
    /// Every ability, in rolling order.
    pub const ALL: [Ability; 4] = [
        Ability::Strength,
        Ability::Intelligence,
        Ability::Dexterity,
        Ability::Constitution,
    ];

    /// Record key used in stored characters and bonus tables.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Intelligence => "intelligence",
            Self::Dexterity => "dexterity",
            Self::Constitution => "constitution",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for Ability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ability| ability.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::not_found("Ability", s))
    }
}

/// Rolled base scores for all four abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: i32,
    pub intelligence: i32,
    pub dexterity: i32,
    pub constitution: i32,
}

impl AbilityScores {
    /// Scores in `Ability::ALL` order.
    pub fn from_array([strength, intelligence, dexterity, constitution]: [i32; 4]) -> Self {
        Self {
            strength,
            intelligence,
            dexterity,
            constitution,
        }
    }

    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Intelligence => self.intelligence,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
        }
    }
}

/// Build a bonus map from a static table.
pub(crate) fn bonus_map(table: &[(Ability, i32)]) -> BonusMap {
    table.iter().copied().collect()
}

/// Floor-toward-negative-infinity ability modifier: `floor((score - 10) / 2)`.
///
/// Rust's `/` truncates toward zero, so 8 must give -1 rather than 0.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}
