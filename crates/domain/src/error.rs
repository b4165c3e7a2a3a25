//! Unified error types for the domain layer
//!
//! Provides a common error type that can be used across all domain operations,
//! enabling consistent error handling without forcing adapters to use String or anyhow.
//! Every variant is a distinct, matchable kind: callers branch on a malformed dice
//! expression versus an out-of-range one, and on a missing top-level field versus
//! a missing component sub-field.

use thiserror::Error;

use crate::value_objects::DiceParseError;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Dice notation could not be parsed or had an illegal magnitude
    #[error(transparent)]
    Dice(#[from] DiceParseError),

    /// Catalog or entity lookup failed
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// A template or record lacks a mandatory top-level key
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// A present component block lacks one of its own mandatory sub-fields
    #[error("Component '{component}' is missing required field: {field}")]
    ComponentFieldMissing {
        component: &'static str,
        field: &'static str,
    },

    /// Validation failed (e.g., invalid field values or types)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Business rule violation
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

impl DomainError {
    /// Creates a validation error for malformed input.
    ///
    /// Use this when a value is present but unusable:
    /// - Wrong JSON type for a recognized field
    /// - Values outside allowed ranges
    /// - Empty names
    ///
    /// # Example
    /// ```ignore
    /// if name.is_empty() {
    ///     return Err(DomainError::validation("Character name cannot be empty"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Create a missing required field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }

    /// Create a missing component sub-field error
    pub fn component_field_missing(component: &'static str, field: &'static str) -> Self {
        Self::ComponentFieldMissing { component, field }
    }

    /// Create a constraint violation error
    pub fn constraint(msg: impl Into<String>) -> Self {
        Self::Constraint(msg.into())
    }

    /// True for a missing top-level template/record key.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField(_))
    }

    /// True for a missing sub-field inside a component block.
    pub fn is_component_field_missing(&self) -> bool {
        matches!(self, Self::ComponentFieldMissing { .. })
    }

    /// True for a failed catalog or entity lookup.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
