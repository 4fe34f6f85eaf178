//! Developer tooling: read-only world inspection for logs and the CLI.
//!
//! # Invariants
//! - Tools never mutate the world they inspect.

pub mod inspector;

pub use inspector::{ColonyInfo, WorldInspector, WorldSummary};
