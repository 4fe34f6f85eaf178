//! Shared types for the ant colony environment: points, colonies, ants, food, pheromones.
//!
//! # Invariants
//! - Every entity is a plain value owned by exactly one collection.
//! - Geometry helpers keep positions inside the window and headings in `(-π, π]`.

pub mod geometry;
pub mod types;

pub use geometry::{Bounds, angle_between, normalize_angle};
pub use types::{Ant, Colony, ColonyId, FoodSource, Pheromone, Point};
