//! Item entity - an aggregate of independent capability components
//!
//! Items are built from loosely-typed JSON templates:
//!
//! ```json
//! {
//!   "id": "potion_healing_small",
//!   "name": "Small Healing Potion",
//!   "description": "Restores a small amount of HP.",
//!   "weight": 0.5,
//!   "consumable": { "effect": {"heal": 20}, "charges": 1 },
//!   "stackable": { "quantity": 3 }
//! }
//! ```
//!
//! `id` and `name` are required. Each recognized component key that is
//! present produces exactly one component; unknown keys are ignored so older
//! engines can read newer templates.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::item_components::{
    Component, ComponentKind, Consumable, Equippable, Stackable, Weapon, DEFAULT_CHARGES,
    DEFAULT_MAX_STACK, DEFAULT_QUANTITY, DEFAULT_RANGE,
};
use crate::error::DomainError;
use crate::value_objects::ItemId;

/// An instantiated item with a set of components.
///
/// # Invariants
///
/// - `weight` is finite and non-negative
/// - at most one component per [`ComponentKind`]
///
/// Identity (`id`, `name`) never changes after construction; only component
/// state (charges, stack quantity) is mutable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    id: ItemId,
    name: String,
    description: String,
    weight: f64,
    components: BTreeMap<ComponentKind, Component>,
}

impl Item {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create an item with no description, zero weight and no components.
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            weight: 0.0,
            components: BTreeMap::new(),
        }
    }

    /// Build an item from a JSON template.
    ///
    /// # Errors
    ///
    /// - `DomainError::MissingField` if `id` or `name` is absent
    /// - `DomainError::ComponentFieldMissing` if a present component lacks
    ///   `equippable.slot`, `consumable.effect` or `weapon.damage_die`
    /// - `DomainError::Validation` for wrong value types or a negative weight
    /// - `DomainError::Constraint` for an over-full stack
    pub fn from_template(template: &Value) -> Result<Self, DomainError> {
        let root = Fields::root(template)?;

        let id = ItemId::new(root.required_str("id")?)?;
        let name = root.required_str("name")?;
        let description = root.optional_str("description")?.unwrap_or_default();
        let weight = root.optional_f64("weight", 0.0)?;

        let mut item = Self::new(id, name)
            .with_description(description)
            .with_weight(weight)?;

        for kind in ComponentKind::ALL {
            if let Some(fields) = root.component(kind)? {
                item = item.with_component(build_component(kind, &fields)?);
            }
        }

        Ok(item)
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// # Errors
    ///
    /// Returns `DomainError::Validation` for a negative or non-finite weight.
    pub fn with_weight(mut self, weight: f64) -> Result<Self, DomainError> {
        if !weight.is_finite() || weight < 0.0 {
            return Err(DomainError::validation(format!(
                "Item weight must be a non-negative number, got {}",
                weight
            )));
        }
        self.weight = weight;
        Ok(self)
    }

    /// Attach a component, replacing any existing component of the same kind.
    pub fn with_component(mut self, component: impl Into<Component>) -> Self {
        let component = component.into();
        self.components.insert(component.kind(), component);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Weight of a single unit, used for carry calculations.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn components(&self) -> &BTreeMap<ComponentKind, Component> {
        &self.components
    }

    /// Whether the item has a component of this kind.
    pub fn has(&self, kind: ComponentKind) -> bool {
        self.components.contains_key(&kind)
    }

    /// The component of this kind, or `None` when the capability does not apply.
    pub fn get(&self, kind: ComponentKind) -> Option<&Component> {
        self.components.get(&kind)
    }

    pub fn get_mut(&mut self, kind: ComponentKind) -> Option<&mut Component> {
        self.components.get_mut(&kind)
    }

    pub fn equippable(&self) -> Option<&Equippable> {
        match self.get(ComponentKind::Equippable) {
            Some(Component::Equippable(c)) => Some(c),
            _ => None,
        }
    }

    pub fn consumable(&self) -> Option<&Consumable> {
        match self.get(ComponentKind::Consumable) {
            Some(Component::Consumable(c)) => Some(c),
            _ => None,
        }
    }

    pub fn consumable_mut(&mut self) -> Option<&mut Consumable> {
        match self.get_mut(ComponentKind::Consumable) {
            Some(Component::Consumable(c)) => Some(c),
            _ => None,
        }
    }

    pub fn stackable(&self) -> Option<&Stackable> {
        match self.get(ComponentKind::Stackable) {
            Some(Component::Stackable(c)) => Some(c),
            _ => None,
        }
    }

    pub fn stackable_mut(&mut self) -> Option<&mut Stackable> {
        match self.get_mut(ComponentKind::Stackable) {
            Some(Component::Stackable(c)) => Some(c),
            _ => None,
        }
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        match self.get(ComponentKind::Weapon) {
            Some(Component::Weapon(c)) => Some(c),
            _ => None,
        }
    }
}

fn build_component(kind: ComponentKind, fields: &Fields<'_>) -> Result<Component, DomainError> {
    let component = match kind {
        ComponentKind::Equippable => Equippable::new(fields.required_str("slot")?)
            .with_attack_bonus(fields.optional_i32("attack_bonus", 0)?)
            .with_defense_bonus(fields.optional_i32("defense_bonus", 0)?)
            .into(),
        ComponentKind::Consumable => Consumable::new(
            fields.required("effect")?.clone(),
            fields.optional_u32("charges", DEFAULT_CHARGES)?,
        )
        .into(),
        ComponentKind::Stackable => Stackable::new(
            fields.optional_u32("max_stack", DEFAULT_MAX_STACK)?,
            fields.optional_u32("quantity", DEFAULT_QUANTITY)?,
        )?
        .into(),
        ComponentKind::Weapon => {
            let range = fields.optional_u32("range", DEFAULT_RANGE)?;
            if range == 0 {
                return Err(DomainError::validation("Field 'weapon.range' must be at least 1"));
            }
            let mut weapon = Weapon::new(fields.required_str("damage_die")?).with_range(range);
            if let Some(ammo_type) = fields.optional_str("ammo_type")? {
                weapon = weapon.with_ammo_type(ammo_type);
            }
            weapon.into()
        }
    };
    Ok(component)
}

// =============================================================================
// Template field access
// =============================================================================

/// A view over one JSON object of a template: either the root record or a
/// component block. `null` values count as absent.
struct Fields<'a> {
    map: &'a Map<String, Value>,
    component: Option<ComponentKind>,
}

impl<'a> Fields<'a> {
    fn root(template: &'a Value) -> Result<Self, DomainError> {
        let map = template
            .as_object()
            .ok_or_else(|| DomainError::validation("Item template must be a JSON object"))?;
        Ok(Self {
            map,
            component: None,
        })
    }

    /// The sub-record for `kind`, if the template has one.
    fn component(&self, kind: ComponentKind) -> Result<Option<Fields<'a>>, DomainError> {
        match self.map.get(kind.key()) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(Fields {
                map,
                component: Some(kind),
            })),
            Some(_) => Err(DomainError::validation(format!(
                "Field '{}' must be an object",
                kind
            ))),
        }
    }

    fn path(&self, field: &str) -> String {
        match self.component {
            Some(kind) => format!("{}.{}", kind, field),
            None => field.to_string(),
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|value| !value.is_null())
    }

    fn required(&self, field: &'static str) -> Result<&'a Value, DomainError> {
        self.get(field).ok_or_else(|| match self.component {
            Some(kind) => DomainError::component_field_missing(kind.key(), field),
            None => DomainError::missing_field(field),
        })
    }

    fn required_str(&self, field: &'static str) -> Result<&'a str, DomainError> {
        self.required(field)?
            .as_str()
            .ok_or_else(|| self.wrong_type(field, "a string"))
    }

    fn optional_str(&self, field: &str) -> Result<Option<&'a str>, DomainError> {
        self.get(field)
            .map(|value| value.as_str().ok_or_else(|| self.wrong_type(field, "a string")))
            .transpose()
    }

    fn optional_f64(&self, field: &str, default: f64) -> Result<f64, DomainError> {
        match self.get(field) {
            None => Ok(default),
            Some(value) => value
                .as_f64()
                .ok_or_else(|| self.wrong_type(field, "a number")),
        }
    }

    fn optional_i32(&self, field: &str, default: i32) -> Result<i32, DomainError> {
        match self.get(field) {
            None => Ok(default),
            Some(value) => value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or_else(|| self.wrong_type(field, "an integer")),
        }
    }

    fn optional_u32(&self, field: &str, default: u32) -> Result<u32, DomainError> {
        match self.get(field) {
            None => Ok(default),
            Some(value) => value
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .ok_or_else(|| self.wrong_type(field, "a non-negative integer")),
        }
    }

    fn wrong_type(&self, field: &str, expected: &str) -> DomainError {
        DomainError::validation(format!("Field '{}' must be {}", self.path(field), expected))
    }
}
