//! Scripted policies: baseline controllers that pick the shared action from an observation.
//!
//! # Invariants
//! - A policy sees only the observation, never the world.
//! - Seeded policies are reproducible: same seed and observations, same actions.

pub mod forager;
pub mod simple;

pub use forager::{ForagerParams, ForagerPolicy};
pub use simple::{FixedPolicy, RandomPolicy};

use antcolony_input::Action;
use antcolony_kernel::Observation;

/// Chooses the action applied to every ant for the next tick.
pub trait Policy {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &str;

    fn act(&mut self, obs: &Observation) -> Action;
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn act(&mut self, obs: &Observation) -> Action {
        (**self).act(obs)
    }
}

/// Errors from building a policy.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("probability `{name}` must lie in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("`{name}` must be finite and non-negative, got {value}")]
    InvalidDistance { name: &'static str, value: f64 },
}
