//! Simulation kernel: authoritative ant colony world state and the per-tick step.
//!
//! # Invariants
//! - The world is owned by exactly one environment; there is no ambient state.
//! - Given the same seed and action sequence, every step produces identical states.
//! - After every tick ants lie inside the window and headings lie in `(-π, π]`.

pub mod config;
pub mod env;
pub mod observation;
pub mod space;
pub mod time_limit;
pub mod world;

pub use config::{ConfigError, EnvConfig};
pub use env::{AntColonyEnv, Environment, Info, Step};
pub use observation::Observation;
pub use space::{ActionSpace, ObservationSpace};
pub use time_limit::TimeLimit;
pub use world::{World, WorldEvent};

pub use antcolony_input::Action;
