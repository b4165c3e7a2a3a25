//! Item catalog use cases.
//!
//! Templates are instantiated once at load; players refer to items by id.

use std::collections::BTreeMap;

use serde_json::Value;
use thangorodrim_domain::{DomainError, Item, ItemId, Player};

use crate::infrastructure::storage::{JsonStore, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum ItemError {
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Every known item, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: BTreeMap<ItemId, Item>,
}

impl ItemCatalog {
    /// Build a catalog from raw templates.
    ///
    /// Templates that fail to build are skipped with a warning. Two valid
    /// templates sharing an id is a `DomainError::Constraint`.
    pub fn from_templates(templates: &[Value]) -> Result<Self, ItemError> {
        let mut items = BTreeMap::new();
        for (index, template) in templates.iter().enumerate() {
            let item = match Item::from_template(template) {
                Ok(item) => item,
                Err(error) => {
                    tracing::warn!(index, error = %error, "Skipping invalid item template");
                    continue;
                }
            };
            if items.contains_key(item.id()) {
                return Err(DomainError::constraint(format!(
                    "Duplicate item id '{}' in catalog",
                    item.id()
                ))
                .into());
            }
            items.insert(item.id().clone(), item);
        }
        Ok(Self { items })
    }

    /// Load `items.json` from the store.
    pub fn load(store: &JsonStore) -> Result<Self, ItemError> {
        let templates = store.load_item_templates()?;
        let catalog = Self::from_templates(&templates)?;
        tracing::info!(
            templates = templates.len(),
            items = catalog.len(),
            "Item catalog loaded"
        );
        Ok(catalog)
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.values()
    }

    /// Total weight of everything the player has equipped or carries.
    /// An id listed twice counts twice, and a stackable item weighs
    /// `weight * quantity`.
    pub fn carry_weight(&self, player: &Player) -> Result<f64, ItemError> {
        player.carried_item_ids().try_fold(0.0, |total, id| {
            self.get(id)
                .map(|item| total + stack_weight(item))
                .ok_or_else(|| ItemError::UnknownItem(id.clone()))
        })
    }

    /// Whether the carried weight exceeds the player's capacity.
    pub fn is_overburdened(&self, player: &Player) -> Result<bool, ItemError> {
        Ok(self.carry_weight(player)? > f64::from(player.max_carry()))
    }
}

fn stack_weight(item: &Item) -> f64 {
    let quantity = item.stackable().map_or(1, |stack| stack.quantity());
    item.weight() * f64::from(quantity)
}
