//! Flat persisted shape of a player
//!
//! The record is the interchange format for saved games: one JSON object
//! with the keys below, in this order. Equipment slot keys are always
//! present and hold `null` when empty.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DomainError;
use crate::value_objects::ItemId;

/// Keys every stored player must carry, in record order.
pub const REQUIRED_FIELDS: [&str; 23] = [
    "name",
    "level",
    "experience",
    "race",
    "character_class",
    "max_hit_points",
    "current_hit_points",
    "max_magic_points",
    "current_magic_points",
    "max_carry",
    "strength",
    "intelligence",
    "dexterity",
    "constitution",
    "helmet",
    "armor",
    "boots",
    "neck",
    "finger",
    "shield",
    "weapon",
    "quiver",
    "inventory",
];

/// A complete stored player.
///
/// Race and class are kept as catalog keys (`"HOBBIT"`, `"BURGLAR"`) and
/// resolved when the record is turned into a [`super::Player`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub level: u32,
    pub experience: u64,
    pub race: String,
    pub character_class: String,
    pub max_hit_points: u32,
    pub current_hit_points: u32,
    pub max_magic_points: u32,
    pub current_magic_points: u32,
    pub max_carry: u32,
    pub strength: i32,
    pub intelligence: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub helmet: Option<ItemId>,
    pub armor: Option<ItemId>,
    pub boots: Option<ItemId>,
    pub neck: Option<ItemId>,
    pub finger: Option<ItemId>,
    pub shield: Option<ItemId>,
    pub weapon: Option<ItemId>,
    pub quiver: Option<ItemId>,
    pub inventory: Vec<ItemId>,
}

impl PlayerRecord {
    /// Parse a loosely-typed record.
    ///
    /// # Errors
    ///
    /// - `DomainError::MissingField` naming the first absent key in record order
    /// - `DomainError::Validation` if the value is not an object or a field
    ///   has the wrong type
    pub fn from_value(value: &Value) -> Result<Self, DomainError> {
        let map = value
            .as_object()
            .ok_or_else(|| DomainError::validation("Player record must be a JSON object"))?;

        if let Some(missing) = REQUIRED_FIELDS.iter().find(|key| !map.contains_key(**key)) {
            return Err(DomainError::missing_field(*missing));
        }

        serde_json::from_value(value.clone())
            .map_err(|e| DomainError::validation(format!("Invalid player record: {}", e)))
    }
}
