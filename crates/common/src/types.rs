use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A position in window coordinates.
pub type Point = DVec2;

/// Energy every ant starts an episode with.
pub const ANT_INITIAL_ENERGY: f64 = 100.0;

/// Strength of a freshly dropped pheromone.
pub const PHEROMONE_DEPOSIT: f64 = 1.0;

/// Index of a colony in the world's colony list.
///
/// Ants and pheromones carry the id of the colony they belong to; it never
/// changes for the lifetime of an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColonyId(pub usize);

impl ColonyId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for ColonyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "colony#{}", self.0)
    }
}

/// A pile of food that ants carry home one unit at a time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FoodSource {
    pub position: Point,
    pub amount: u32,
}

impl FoodSource {
    pub fn new(position: Point, amount: u32) -> Self {
        Self { position, amount }
    }

    pub fn is_depleted(&self) -> bool {
        self.amount == 0
    }

    /// Remove one unit. Returns `false` (and leaves the source untouched) when empty.
    pub fn take_one(&mut self) -> bool {
        if self.amount == 0 {
            return false;
        }
        self.amount -= 1;
        true
    }
}

/// A colony-tagged scent marker that fades every tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pheromone {
    pub position: Point,
    pub strength: f64,
    pub colony_id: ColonyId,
}

impl Pheromone {
    /// A full-strength marker at `position`.
    pub fn deposit(position: Point, colony_id: ColonyId) -> Self {
        Self {
            position,
            strength: PHEROMONE_DEPOSIT,
            colony_id,
        }
    }
}

/// A single forager.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ant {
    pub position: Point,
    /// Heading in radians.
    pub direction: f64,
    pub colony_id: ColonyId,
    pub has_food: bool,
    /// Stored but not consumed by any rule.
    pub energy: f64,
}

impl Ant {
    /// A fresh ant standing at its nest, empty-handed.
    pub fn spawn(position: Point, direction: f64, colony_id: ColonyId) -> Self {
        Self {
            position,
            direction,
            colony_id,
            has_food: false,
            energy: ANT_INITIAL_ENERGY,
        }
    }

    /// Unit vector along the ant's heading.
    pub fn heading(&self) -> DVec2 {
        DVec2::new(self.direction.cos(), self.direction.sin())
    }
}

/// A nest. Its position is fixed for the episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Colony {
    pub position: Point,
    pub food_collected: u32,
    /// Set at reset, never decremented (there is no death model).
    pub ants_alive: u32,
}

impl Colony {
    pub fn new(position: Point, ants_alive: u32) -> Self {
        Self {
            position,
            food_collected: 0,
            ants_alive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawned_ant_is_empty_handed() {
        let ant = Ant::spawn(DVec2::new(10.0, 20.0), 0.5, ColonyId(1));
        assert!(!ant.has_food);
        assert_eq!(ant.energy, ANT_INITIAL_ENERGY);
        assert_eq!(ant.colony_id, ColonyId(1));
    }

    #[test]
    fn heading_points_along_direction() {
        let ant = Ant::spawn(DVec2::ZERO, std::f64::consts::FRAC_PI_2, ColonyId(0));
        let h = ant.heading();
        assert!(h.x.abs() < 1e-12);
        assert!((h.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn take_one_stops_at_zero() {
        let mut food = FoodSource::new(DVec2::ZERO, 1);
        assert!(food.take_one());
        assert!(food.is_depleted());
        assert!(!food.take_one());
        assert_eq!(food.amount, 0);
    }

    #[test]
    fn deposited_pheromone_is_full_strength() {
        let p = Pheromone::deposit(DVec2::new(1.0, 1.0), ColonyId(0));
        assert_eq!(p.strength, 1.0);
    }

    #[test]
    fn colony_starts_with_nothing_collected() {
        let c = Colony::new(DVec2::new(200.0, 300.0), 50);
        assert_eq!(c.food_collected, 0);
        assert_eq!(c.ants_alive, 50);
    }
}
