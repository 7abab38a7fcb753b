//! Fairness ordering of members.
//!
//! Provides the running-count accumulator and the seeded fairness queue
//! consulted by the assignment engine.
//!
//! # Reproducibility
//!
//! All shuffles draw from one [`SmallRng`] seeded per run, so the same
//! seed, counts and member set always yield the same queues.

mod counts;
mod queue;

pub use counts::LoadCounts;
pub use queue::FairnessQueue;

use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Creates the run RNG from a seed.
pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
