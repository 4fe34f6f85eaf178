use antcolony_input::Action;

use crate::config::ConfigError;
use crate::env::{Environment, Info, Step};
use crate::observation::Observation;
use crate::space::{ActionSpace, ObservationSpace};

/// Caps episode length by marking the step that reaches the cap as truncated.
///
/// Truncation depends only on the step count, so a step can be both
/// terminated and truncated. The counter restarts on every reset.
#[derive(Debug, Clone)]
pub struct TimeLimit<E> {
    env: E,
    max_episode_steps: u64,
    elapsed_steps: u64,
}

impl<E: Environment> TimeLimit<E> {
    pub fn new(env: E, max_episode_steps: u64) -> Result<Self, ConfigError> {
        if max_episode_steps == 0 {
            return Err(ConfigError::InvalidConfiguration {
                field: "max_episode_steps",
                reason: "must be at least 1".into(),
            });
        }
        Ok(Self {
            env,
            max_episode_steps,
            elapsed_steps: 0,
        })
    }

    pub fn max_episode_steps(&self) -> u64 {
        self.max_episode_steps
    }

    /// Steps taken since the last reset.
    pub fn elapsed_steps(&self) -> u64 {
        self.elapsed_steps
    }

    pub fn inner(&self) -> &E {
        &self.env
    }
}

impl<E: Environment> Environment for TimeLimit<E> {
    fn reset(&mut self, seed: Option<u64>) -> (Observation, Info) {
        self.elapsed_steps = 0;
        self.env.reset(seed)
    }

    fn step(&mut self, action: Action) -> Step {
        let mut step = self.env.step(action);
        self.elapsed_steps += 1;
        if self.elapsed_steps >= self.max_episode_steps {
            step.truncated = true;
        }
        step
    }

    fn render(&self) {
        self.env.render();
    }

    fn action_space(&self) -> ActionSpace {
        self.env.action_space()
    }

    fn observation_space(&self) -> ObservationSpace {
        self.env.observation_space()
    }
}
