use antcolony_common::Point;
use serde::{Deserialize, Serialize};

use crate::world::World;

/// What the agent sees after each reset or step.
///
/// Built from a single reference ant (colony 0, ant 0) and colony 0:
///
/// | index | value |
/// |-------|-------|
/// | 0, 1  | ant position |
/// | 2     | ant heading |
/// | 3     | 1.0 if the ant carries food, else 0.0 |
/// | 4, 5  | nearest non-empty food source, `(0, 0)` if none |
/// | 6, 7  | strongest own-colony pheromone in vision range, `(0, 0)` if none |
/// | 8, 9  | colony 0 position |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observation(pub [f64; OBSERVATION_LEN]);

/// Number of components in an [`Observation`].
pub const OBSERVATION_LEN: usize = 10;

impl Observation {
    pub const LEN: usize = OBSERVATION_LEN;

    /// Observe `world` from its reference ant.
    ///
    /// The world must be populated (at least one colony with one ant).
    pub fn from_world(world: &World) -> Self {
        let ant = &world.ants()[0][0];
        let colony = &world.colonies()[0];

        let mut nearest_food = Point::ZERO;
        let mut min_distance = f64::INFINITY;
        for food in world.food_sources().iter().filter(|f| f.amount > 0) {
            let d = food.position.distance(ant.position);
            if d < min_distance {
                min_distance = d;
                nearest_food = food.position;
            }
        }

        let vision_range = world.config().ant_vision_range;
        let mut strongest = Point::ZERO;
        let mut max_strength = 0.0;
        for p in world
            .pheromones()
            .iter()
            .filter(|p| p.colony_id == ant.colony_id)
        {
            if p.position.distance(ant.position) < vision_range && p.strength > max_strength {
                max_strength = p.strength;
                strongest = p.position;
            }
        }

        Self([
            ant.position.x,
            ant.position.y,
            ant.direction,
            if ant.has_food { 1.0 } else { 0.0 },
            nearest_food.x,
            nearest_food.y,
            strongest.x,
            strongest.y,
            colony.position.x,
            colony.position.y,
        ])
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// The observation as the float32 vector handed to learners.
    pub fn to_f32_array(&self) -> [f32; Self::LEN] {
        self.0.map(|v| v as f32)
    }

    pub fn ant_position(&self) -> Point {
        Point::new(self.0[0], self.0[1])
    }

    pub fn ant_direction(&self) -> f64 {
        self.0[2]
    }

    pub fn has_food(&self) -> bool {
        self.0[3] != 0.0
    }

    /// Raw nearest-food slot; `(0, 0)` means no food is left.
    pub fn nearest_food(&self) -> Point {
        Point::new(self.0[4], self.0[5])
    }

    /// Raw strongest-pheromone slot; `(0, 0)` means none is in range.
    pub fn strongest_pheromone(&self) -> Point {
        Point::new(self.0[6], self.0[7])
    }

    pub fn colony_position(&self) -> Point {
        Point::new(self.0[8], self.0[9])
    }
}

impl From<Observation> for [f64; OBSERVATION_LEN] {
    fn from(obs: Observation) -> Self {
        obs.0
    }
}
