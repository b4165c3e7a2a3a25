//! Equipment slots worn by a player. Each slot holds at most one item id.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::names::ItemId;
use crate::error::DomainError;

/// A named body slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentSlot {
    Helmet,
    Armor,
    Boots,
    Neck,
    Finger,
    Shield,
    Weapon,
    Quiver,
}

impl EquipmentSlot {
    /// Every slot, in record order.
    pub const ALL: [EquipmentSlot; 8] = [
        EquipmentSlot::Helmet,
        EquipmentSlot::Armor,
        EquipmentSlot::Boots,
        EquipmentSlot::Neck,
        EquipmentSlot::Finger,
        EquipmentSlot::Shield,
        EquipmentSlot::Weapon,
        EquipmentSlot::Quiver,
    ];

    /// Record key for this slot.
    pub fn key(&self) -> &'static str {
        match self {
            EquipmentSlot::Helmet => "helmet",
            EquipmentSlot::Armor => "armor",
            EquipmentSlot::Boots => "boots",
            EquipmentSlot::Neck => "neck",
            EquipmentSlot::Finger => "finger",
            EquipmentSlot::Shield => "shield",
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Quiver => "quiver",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for EquipmentSlot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::not_found("EquipmentSlot", s))
    }
}

/// What a player is wearing, one optional item per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Equipment {
    slots: [Option<ItemId>; 8],
}

impl Equipment {
    /// No slot occupied.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&ItemId> {
        self.slots[slot.index()].as_ref()
    }

    /// Put `item` in `slot` (or clear it with `None`), returning what was there.
    pub fn set(&mut self, slot: EquipmentSlot, item: Option<ItemId>) -> Option<ItemId> {
        std::mem::replace(&mut self.slots[slot.index()], item)
    }

    /// Occupied slots in record order.
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &ItemId)> + '_ {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|item| (slot, item)))
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}
