use antcolony_input::Action;
use antcolony_kernel::Observation;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::Policy;

/// Picks uniformly among the four actions, ignoring the observation.
#[derive(Debug, Clone)]
pub struct RandomPolicy {
    rng: ChaCha8Rng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn name(&self) -> &str {
        "random"
    }

    fn act(&mut self, _obs: &Observation) -> Action {
        Action::ALL[self.rng.gen_range(0..Action::COUNT)]
    }
}

/// Always returns the same action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedPolicy(pub Action);

impl Policy for FixedPolicy {
    fn name(&self) -> &str {
        "fixed"
    }

    fn act(&mut self, _obs: &Observation) -> Action {
        self.0
    }
}
