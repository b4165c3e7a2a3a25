//! Infrastructure implementations.
//!
//! Adapters for everything outside the pure rules: entropy, the file system,
//! process environment and the tracing subscriber.

pub mod logging;
pub mod random;
pub mod settings;
pub mod storage;
