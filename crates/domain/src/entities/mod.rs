//! Domain entities - Core business objects with identity

mod item;
mod item_components;

pub use item::Item;
pub use item_components::{
    Component, ComponentKind, ConsumeOutcome, Consumable, Equippable, StackRemoval, Stackable,
    Weapon, DEFAULT_CHARGES, DEFAULT_MAX_STACK, DEFAULT_QUANTITY, DEFAULT_RANGE,
};
