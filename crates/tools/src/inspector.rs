use antcolony_common::{ColonyId, Point};
use antcolony_kernel::World;
use serde::Serialize;

/// World inspector for developer tooling.
///
/// Provides read-only queries against the world state for debugging and
/// episode reports.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the world state.
    pub fn summary(world: &World) -> WorldSummary {
        let ants = world.ants().iter().flatten();
        WorldSummary {
            tick: world.tick(),
            colonies: world.colonies().len(),
            ants: ants.clone().count(),
            ants_carrying: ants.filter(|a| a.has_food).count(),
            food_sources: world.food_sources().len(),
            food_remaining: world
                .food_sources()
                .iter()
                .map(|f| u64::from(f.amount))
                .sum(),
            food_collected: world.colonies().iter().map(|c| c.food_collected).collect(),
            pheromones: world.pheromones().len(),
        }
    }

    /// Details of one colony, or `None` if the id is out of range.
    pub fn colony(world: &World, id: ColonyId) -> Option<ColonyInfo> {
        let colony = world.colonies().get(id.index())?;
        let ants = world.ants().get(id.index())?;
        Some(ColonyInfo {
            id,
            position: colony.position,
            food_collected: colony.food_collected,
            ants: ants.len(),
            ants_carrying: ants.iter().filter(|a| a.has_food).count(),
            pheromones: world
                .pheromones()
                .iter()
                .filter(|p| p.colony_id == id)
                .count(),
        })
    }

    /// Details of every colony, in id order.
    pub fn colonies(world: &World) -> Vec<ColonyInfo> {
        (0..world.colonies().len())
            .filter_map(|i| Self::colony(world, ColonyId(i)))
            .collect()
    }
}

/// Summary of world state for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSummary {
    pub tick: u64,
    pub colonies: usize,
    pub ants: usize,
    pub ants_carrying: usize,
    /// Food sources placed at reset, including depleted ones.
    pub food_sources: usize,
    pub food_remaining: u64,
    /// Per colony, in id order.
    pub food_collected: Vec<u32>,
    pub pheromones: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: tick={} colonies={} ants={} carrying={} food_sources={} food_remaining={} collected={:?} pheromones={}",
            self.tick,
            self.colonies,
            self.ants,
            self.ants_carrying,
            self.food_sources,
            self.food_remaining,
            self.food_collected,
            self.pheromones,
        )
    }
}

/// Detailed info about a single colony.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColonyInfo {
    pub id: ColonyId,
    pub position: Point,
    pub food_collected: u32,
    pub ants: usize,
    pub ants_carrying: usize,
    pub pheromones: usize,
}

impl std::fmt::Display for ColonyInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} pos=({:.2}, {:.2}) collected={} ants={} carrying={} pheromones={}",
            self.id,
            self.position.x,
            self.position.y,
            self.food_collected,
            self.ants,
            self.ants_carrying,
            self.pheromones,
        )
    }
}
