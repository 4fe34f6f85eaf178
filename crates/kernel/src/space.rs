use std::f64::consts::PI;

use antcolony_input::Action;
use serde::{Deserialize, Serialize};

use crate::config::EnvConfig;
use crate::observation::{OBSERVATION_LEN, Observation};

/// A discrete space of `n` integer codes `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionSpace {
    pub n: usize,
}

impl ActionSpace {
    pub fn new() -> Self {
        Self { n: Action::COUNT }
    }

    pub fn contains(&self, code: i64) -> bool {
        usize::try_from(code).is_ok_and(|c| c < self.n)
    }
}

impl Default for ActionSpace {
    fn default() -> Self {
        Self::new()
    }
}

/// An axis-aligned box bounding every observation component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationSpace {
    pub low: [f64; OBSERVATION_LEN],
    pub high: [f64; OBSERVATION_LEN],
}

impl ObservationSpace {
    /// Bounds implied by the window size: positions in `[0, w] × [0, h]`,
    /// heading in `[-π, π]`, carrying flag in `[0, 1]`.
    pub fn for_config(config: &EnvConfig) -> Self {
        let (w, h) = (config.window_width, config.window_height);
        Self {
            low: [0.0, 0.0, -PI, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            high: [w, h, PI, 1.0, w, h, w, h, w, h],
        }
    }

    pub fn contains(&self, obs: &Observation) -> bool {
        obs.0
            .iter()
            .zip(self.low.iter().zip(&self.high))
            .all(|(v, (lo, hi))| (*lo..=*hi).contains(v))
    }
}
