//! Use cases - orchestration of domain rules against storage and entropy.

pub mod character;
pub mod items;

pub use character::{CharacterError, CharacterUseCases};
pub use items::{ItemCatalog, ItemError};
