//! Item components - independent capability bundles attached to an item
//!
//! An item holds at most one component of each kind. Components carry data
//! only; applying an effect or equipping an item is gameplay logic that lives
//! elsewhere.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::ports::RandomPort;
use crate::value_objects::{DiceExpression, DiceParseError, DiceRoll};

/// Default number of uses for a consumable.
pub const DEFAULT_CHARGES: u32 = 1;

/// Default stack ceiling.
pub const DEFAULT_MAX_STACK: u32 = 99;

/// Default stack quantity.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Default weapon reach.
pub const DEFAULT_RANGE: u32 = 1;

// ============================================================================
// ComponentKind
// ============================================================================

/// Tag identifying a component kind. Also the template key for that component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Equippable,
    Consumable,
    Stackable,
    Weapon,
}

impl ComponentKind {
    /// Every recognized component kind.
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Equippable,
        ComponentKind::Consumable,
        ComponentKind::Stackable,
        ComponentKind::Weapon,
    ];

    /// Template key for this component.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Equippable => "equippable",
            Self::Consumable => "consumable",
            Self::Stackable => "stackable",
            Self::Weapon => "weapon",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ComponentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == s)
            .ok_or_else(|| DomainError::not_found("ComponentKind", s))
    }
}

// ============================================================================
// Component
// ============================================================================

/// One capability attached to an item.
///
/// Serializes as the bare component record, so an item's component map has
/// the same shape as the template it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Component {
    Equippable(Equippable),
    Consumable(Consumable),
    Stackable(Stackable),
    Weapon(Weapon),
}

impl Component {
    /// The kind tag for this component.
    pub fn kind(&self) -> ComponentKind {
        match self {
            Self::Equippable(_) => ComponentKind::Equippable,
            Self::Consumable(_) => ComponentKind::Consumable,
            Self::Stackable(_) => ComponentKind::Stackable,
            Self::Weapon(_) => ComponentKind::Weapon,
        }
    }
}

impl From<Equippable> for Component {
    fn from(component: Equippable) -> Self {
        Self::Equippable(component)
    }
}

impl From<Consumable> for Component {
    fn from(component: Consumable) -> Self {
        Self::Consumable(component)
    }
}

impl From<Stackable> for Component {
    fn from(component: Stackable) -> Self {
        Self::Stackable(component)
    }
}

impl From<Weapon> for Component {
    fn from(component: Weapon) -> Self {
        Self::Weapon(component)
    }
}

// ============================================================================
// Equippable
// ============================================================================

/// Data for items that can be worn or wielded.
///
/// Plain data: any combination of values is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Equippable {
    /// Equipment slot name (e.g. "weapon", "head", "hand")
    pub slot: String,
    /// Flat attack bonus while equipped
    pub attack_bonus: i32,
    /// Flat defense bonus while equipped
    pub defense_bonus: i32,
}

impl Equippable {
    pub fn new(slot: impl Into<String>) -> Self {
        Self {
            slot: slot.into(),
            attack_bonus: 0,
            defense_bonus: 0,
        }
    }

    pub fn with_attack_bonus(mut self, attack_bonus: i32) -> Self {
        self.attack_bonus = attack_bonus;
        self
    }

    pub fn with_defense_bonus(mut self, defense_bonus: i32) -> Self {
        self.defense_bonus = defense_bonus;
        self
    }
}

// ============================================================================
// Consumable
// ============================================================================

/// Result of using a consumable once.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsumeOutcome {
    /// A charge was spent; the caller applies this effect payload
    Applied(Value),
    /// No charges were left; nothing happened
    Depleted,
}

impl ConsumeOutcome {
    /// The effect payload, if a charge was spent.
    pub fn effect(&self) -> Option<&Value> {
        match self {
            Self::Applied(effect) => Some(effect),
            Self::Depleted => None,
        }
    }

    pub fn is_depleted(&self) -> bool {
        matches!(self, Self::Depleted)
    }
}

/// Data for items that are used up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consumable {
    effect: Value,
    charges: u32,
}

impl Consumable {
    /// `effect` is opaque here; gameplay logic interprets it.
    pub fn new(effect: Value, charges: u32) -> Self {
        Self { effect, charges }
    }

    pub fn effect(&self) -> &Value {
        &self.effect
    }

    /// Uses remaining.
    pub fn charges(&self) -> u32 {
        self.charges
    }

    /// Spend one charge and hand back the effect payload, or report
    /// [`ConsumeOutcome::Depleted`] once charges reach zero.
    pub fn consume(&mut self) -> ConsumeOutcome {
        if self.charges == 0 {
            return ConsumeOutcome::Depleted;
        }
        self.charges -= 1;
        ConsumeOutcome::Applied(self.effect.clone())
    }
}

// ============================================================================
// Stackable
// ============================================================================

/// Result of removing units from a stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackRemoval {
    /// Units left on the stack after removal
    Remaining(u32),
    /// The stack was emptied (quantity would reach zero or below)
    Depleted,
}

impl StackRemoval {
    /// Check if the item holding this stack should be discarded
    pub fn should_remove(&self) -> bool {
        matches!(self, Self::Depleted)
    }
}

/// Data for items that pile up in one inventory entry.
///
/// # Invariants
///
/// - `max_stack >= 1`
/// - `quantity <= max_stack`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stackable {
    max_stack: u32,
    quantity: u32,
}

impl Stackable {
    /// Create a stack, rejecting an empty ceiling or an over-full stack.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Constraint` if `max_stack` is 0 or `quantity`
    /// exceeds `max_stack`.
    pub fn new(max_stack: u32, quantity: u32) -> Result<Self, DomainError> {
        if max_stack == 0 {
            return Err(DomainError::constraint("Max stack must be at least 1"));
        }
        if quantity > max_stack {
            return Err(DomainError::constraint(format!(
                "Stack quantity {} exceeds max stack {}",
                quantity, max_stack
            )));
        }
        Ok(Self {
            max_stack,
            quantity,
        })
    }

    pub fn max_stack(&self) -> u32 {
        self.max_stack
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Room left before the stack is full.
    pub fn space(&self) -> u32 {
        self.max_stack - self.quantity
    }

    /// Add up to `amount` units and return how many did not fit.
    pub fn add(&mut self, amount: u32) -> u32 {
        let accepted = amount.min(self.space());
        self.quantity += accepted;
        amount - accepted
    }

    /// Remove `amount` units.
    pub fn remove(&mut self, amount: u32) -> StackRemoval {
        if amount >= self.quantity {
            self.quantity = 0;
            StackRemoval::Depleted
        } else {
            self.quantity -= amount;
            StackRemoval::Remaining(self.quantity)
        }
    }
}

impl Default for Stackable {
    fn default() -> Self {
        Self {
            max_stack: DEFAULT_MAX_STACK,
            quantity: DEFAULT_QUANTITY,
        }
    }
}

// ============================================================================
// Weapon
// ============================================================================

/// Weapon-specific data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Weapon {
    /// Damage expression (e.g. "1d8"), kept as written in the template
    pub damage_die: String,
    /// Attack range in tiles
    pub range: u32,
    /// Ammunition consumed by ranged weapons
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ammo_type: Option<String>,
}

impl Weapon {
    pub fn new(damage_die: impl Into<String>) -> Self {
        Self {
            damage_die: damage_die.into(),
            range: DEFAULT_RANGE,
            ammo_type: None,
        }
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.range = range;
        self
    }

    pub fn with_ammo_type(mut self, ammo_type: impl Into<String>) -> Self {
        self.ammo_type = Some(ammo_type.into());
        self
    }

    /// Parse the damage die.
    pub fn damage_expression(&self) -> Result<DiceExpression, DiceParseError> {
        DiceExpression::parse(&self.damage_die)
    }

    /// Roll damage once.
    pub fn roll_damage(&self, rng: &dyn RandomPort) -> Result<DiceRoll, DiceParseError> {
        Ok(self.damage_expression()?.roll(rng))
    }

    pub fn is_ranged(&self) -> bool {
        self.range > 1 || self.ammo_type.is_some()
    }
}
