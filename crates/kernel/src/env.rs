use antcolony_input::Action;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, EnvConfig};
use crate::observation::Observation;
use crate::space::{ActionSpace, ObservationSpace};
use crate::world::{World, WorldEvent};

/// Auxiliary information returned alongside observations. Always empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {}

/// The outcome of a single step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub observation: Observation,
    /// Total food delivered so far, not the increment of this step.
    pub reward: f64,
    /// Every food source is empty.
    pub terminated: bool,
    /// Cut short by a step cap. Never set by the kernel itself.
    pub truncated: bool,
    pub info: Info,
}

/// A reset/step environment driven by one discrete action per tick.
pub trait Environment {
    /// Start a new episode. `Some(seed)` makes the layout reproducible.
    fn reset(&mut self, seed: Option<u64>) -> (Observation, Info);

    /// Advance one tick.
    fn step(&mut self, action: Action) -> Step;

    /// Draw the current state. Environments without a view do nothing.
    fn render(&self) {}

    fn action_space(&self) -> ActionSpace;

    fn observation_space(&self) -> ObservationSpace;
}

/// The ant colony foraging environment.
///
/// Every step applies the same action to every ant in every colony, then
/// evaporates pheromones, resolves food pickup and delivery, and reports the
/// view of the reference ant together with the cumulative food collected.
#[derive(Debug, Clone)]
pub struct AntColonyEnv {
    world: World,
}

impl AntColonyEnv {
    /// Validate `config` and build a populated, ready-to-step environment.
    pub fn new(config: EnvConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mut world = World::new(config, rng);
        world.reset(None);
        tracing::info!(
            colonies = world.colonies().len(),
            food_sources = world.food_sources().len(),
            "environment created"
        );
        Ok(Self { world })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable access to the world, for building scenarios in tests and tools.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &EnvConfig {
        self.world.config()
    }

    /// Step with a raw integer code. Codes outside `0..=3` do nothing.
    pub fn step_code(&mut self, code: i64) -> Step {
        self.step(Action::from_code(code))
    }

    pub fn observation(&self) -> Observation {
        Observation::from_world(&self.world)
    }

    /// Cumulative food delivered across all colonies.
    pub fn reward(&self) -> f64 {
        self.world.total_food_collected() as f64
    }

    pub fn is_terminated(&self) -> bool {
        self.world.all_food_depleted()
    }

    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        self.world.drain_events()
    }
}

impl Environment for AntColonyEnv {
    fn reset(&mut self, seed: Option<u64>) -> (Observation, Info) {
        self.world.reset(seed);
        (self.observation(), Info::default())
    }

    fn step(&mut self, action: Action) -> Step {
        self.world.step(action);
        let step = Step {
            observation: self.observation(),
            reward: self.reward(),
            terminated: self.is_terminated(),
            truncated: false,
            info: Info::default(),
        };
        if step.terminated {
            tracing::debug!(tick = self.world.tick(), reward = step.reward, "all food collected");
        }
        step
    }

    fn render(&self) {
        tracing::trace!(tick = self.world.tick(), "render requested; no view attached");
    }

    fn action_space(&self) -> ActionSpace {
        ActionSpace::new()
    }

    fn observation_space(&self) -> ObservationSpace {
        ObservationSpace::for_config(self.world.config())
    }
}
