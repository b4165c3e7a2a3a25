//! Thangorodrim engine library.
//!
//! Boundary layer around the pure rules in `thangorodrim-domain`.
//!
//! ## Structure
//!
//! - `use_cases/` - Character and item catalog orchestration
//! - `infrastructure/` - Random sources, JSON storage, settings, tracing setup
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
