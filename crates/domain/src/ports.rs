//! Testability ports for injecting randomness.
//!
//! The domain never owns an entropy source. Adapters (thread RNG, seeded
//! generators, fixed values) live in the engine crate and are handed in by
//! the caller.

// =============================================================================
// Testability Ports
// =============================================================================

/// Source of uniform random integers.
///
/// Implementations shared across threads must make each call atomic.
#[cfg_attr(test, mockall::automock)]
pub trait RandomPort: Send + Sync {
    /// Uniform integer in the closed interval `[min, max]`.
    fn gen_range(&self, min: i32, max: i32) -> i32;
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::RandomPort;

    /// Walks through `[min, max]` one step per call. Deterministic and
    /// covers every face of small dice quickly.
    #[derive(Default)]
    pub(crate) struct CyclingRandom {
        counter: AtomicU32,
    }

    impl RandomPort for CyclingRandom {
        fn gen_range(&self, min: i32, max: i32) -> i32 {
            let step = self.counter.fetch_add(1, Ordering::Relaxed);
            let span = (max - min + 1).max(1) as u32;
            min + (step % span) as i32
        }
    }

    /// Always answers the same value, regardless of bounds.
    pub(crate) struct FixedRandom(pub i32);

    impl RandomPort for FixedRandom {
        fn gen_range(&self, _min: i32, _max: i32) -> i32 {
            self.0
        }
    }
}
