use std::collections::VecDeque;
use std::f64::consts::TAU;

use antcolony_common::{
    Ant, Bounds, Colony, ColonyId, FoodSource, Pheromone, Point, normalize_angle,
};
use antcolony_input::Action;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{
    DELIVERY_RADIUS, EnvConfig, FOOD_MARGIN, FOOD_PLACEMENT_ATTEMPTS, PHEROMONE_EVAPORATION,
    PICKUP_RADIUS,
};

/// Oldest events are discarded once the log holds this many.
pub const EVENT_LOG_CAPACITY: usize = 65_536;

/// A record of something that happened to the world.
///
/// Events are informational: the world never reads them back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WorldEvent {
    /// The world was repopulated. `food_sources` is the realized count.
    Reset {
        seed: Option<u64>,
        food_sources: usize,
    },
    /// Ants dropped `count` pheromones during the action phase.
    PheromonesDropped { count: usize },
    /// `count` pheromones fell to the removal threshold and were discarded.
    PheromonesEvaporated { count: usize },
    /// An ant took one unit from the food source at index `source`.
    FoodPickedUp {
        colony: ColonyId,
        ant: usize,
        source: usize,
    },
    /// An ant handed its food to its colony.
    FoodDelivered { colony: ColonyId, ant: usize },
    /// Simulation advanced one tick under `action`.
    Stepped { tick: u64, action: Action },
}

/// The authoritative world state.
///
/// Owns every colony, ant, food source and pheromone plus the RNG stream used
/// to lay out episodes. Ants are stored per colony: `ants()[c]` are the ants
/// of colony `c`, in spawn order. Iteration over colonies and ants is always in
/// index order so that a seeded episode replays identically.
#[derive(Debug, Clone)]
pub struct World {
    config: EnvConfig,
    bounds: Bounds,
    colonies: Vec<Colony>,
    ants: Vec<Vec<Ant>>,
    food_sources: Vec<FoodSource>,
    pheromones: Vec<Pheromone>,
    tick: u64,
    rng: ChaCha8Rng,
    event_log: VecDeque<WorldEvent>,
}

impl World {
    /// Create an empty world. Call [`World::reset`] to populate it.
    ///
    /// The configuration is assumed to be validated.
    pub fn new(config: EnvConfig, rng: ChaCha8Rng) -> Self {
        Self {
            bounds: config.bounds(),
            config,
            colonies: Vec::new(),
            ants: Vec::new(),
            food_sources: Vec::new(),
            pheromones: Vec::new(),
            tick: 0,
            rng,
            event_log: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Ticks since the last reset.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn colonies(&self) -> &[Colony] {
        &self.colonies
    }

    pub fn ants(&self) -> &[Vec<Ant>] {
        &self.ants
    }

    pub fn food_sources(&self) -> &[FoodSource] {
        &self.food_sources
    }

    pub fn pheromones(&self) -> &[Pheromone] {
        &self.pheromones
    }

    /// Mutable access to ants, for building scenarios. Colony sizes cannot change.
    pub fn ants_mut(&mut self) -> impl Iterator<Item = &mut [Ant]> {
        self.ants.iter_mut().map(Vec::as_mut_slice)
    }

    pub fn food_sources_mut(&mut self) -> &mut [FoodSource] {
        &mut self.food_sources
    }

    /// Replace the food layout, for building scenarios.
    pub fn set_food_sources(&mut self, food_sources: Vec<FoodSource>) {
        self.food_sources = food_sources;
    }

    pub fn pheromones_mut(&mut self) -> &mut Vec<Pheromone> {
        &mut self.pheromones
    }

    /// Total food delivered to all colonies since the last reset.
    pub fn total_food_collected(&self) -> u64 {
        self.colonies.iter().map(|c| u64::from(c.food_collected)).sum()
    }

    /// Whether every food source is empty (vacuously true with no sources).
    pub fn all_food_depleted(&self) -> bool {
        self.food_sources.iter().all(FoodSource::is_depleted)
    }

    /// Read-only access to the event log, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &WorldEvent> {
        self.event_log.iter()
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        self.event_log.drain(..).collect()
    }

    fn record(&mut self, event: WorldEvent) {
        if self.event_log.len() == EVENT_LOG_CAPACITY {
            self.event_log.pop_front();
        }
        self.event_log.push_back(event);
    }

    /// Nest position of colony `index`: evenly spaced along the horizontal midline.
    ///
    /// With two colonies this is `width/4` and `3·width/4`.
    pub fn colony_position(&self, index: usize) -> Point {
        let n = self.config.num_colonies as f64;
        let x = (2 * index + 1) as f64 * self.bounds.width / (2.0 * n);
        Point::new(x, self.bounds.height / 2.0)
    }

    /// Repopulate the world.
    ///
    /// `Some(seed)` restarts the RNG stream from `seed`; `None` keeps drawing
    /// from the current stream.
    pub fn reset(&mut self, seed: Option<u64>) {
        let _span = tracing::debug_span!("world_reset", ?seed).entered();
        if let Some(seed) = seed {
            self.rng = ChaCha8Rng::seed_from_u64(seed);
        }

        let ants_per_colony = self.config.max_ants_per_colony;
        self.colonies = (0..self.config.num_colonies)
            .map(|i| Colony::new(self.colony_position(i), ants_per_colony))
            .collect();

        self.ants = Vec::with_capacity(self.colonies.len());
        for (i, colony) in self.colonies.iter().enumerate() {
            let mut colony_ants = Vec::with_capacity(ants_per_colony as usize);
            for _ in 0..ants_per_colony {
                let direction = normalize_angle(self.rng.gen_range(0.0..TAU));
                colony_ants.push(Ant::spawn(colony.position, direction, ColonyId(i)));
            }
            self.ants.push(colony_ants);
        }

        self.food_sources = self.place_food();
        self.pheromones.clear();
        self.tick = 0;
        self.event_log.clear();

        tracing::debug!(
            colonies = self.colonies.len(),
            ants_per_colony,
            food_sources = self.food_sources.len(),
            requested = self.config.max_food_sources,
            "world reset"
        );
        let food_sources = self.food_sources.len();
        self.record(WorldEvent::Reset { seed, food_sources });
    }

    /// Scatter food away from the window edges and from every nest.
    ///
    /// A source that finds no valid spot within the attempt budget is left
    /// out, so fewer than `max_food_sources` may be placed.
    fn place_food(&mut self) -> Vec<FoodSource> {
        let (w, h) = (self.bounds.width, self.bounds.height);
        let min_distance = self.config.min_food_colony_distance;
        let mut placed = Vec::with_capacity(self.config.max_food_sources);

        for index in 0..self.config.max_food_sources {
            let mut spot = None;
            for _ in 0..FOOD_PLACEMENT_ATTEMPTS {
                let candidate = Point::new(
                    self.rng.gen_range(FOOD_MARGIN..w - FOOD_MARGIN),
                    self.rng.gen_range(FOOD_MARGIN..h - FOOD_MARGIN),
                );
                let clear = self
                    .colonies
                    .iter()
                    .all(|c| candidate.distance(c.position) >= min_distance);
                if clear {
                    spot = Some(candidate);
                    break;
                }
            }
            match spot {
                Some(position) => {
                    placed.push(FoodSource::new(position, self.config.max_food_per_source))
                }
                None => tracing::warn!(
                    index,
                    attempts = FOOD_PLACEMENT_ATTEMPTS,
                    "no valid position for food source, leaving it out"
                ),
            }
        }
        placed
    }

    /// Advance the simulation by one tick with `action` applied to every ant.
    pub fn step(&mut self, action: Action) {
        let _span = tracing::trace_span!("world_step", tick = self.tick, ?action).entered();
        self.apply_action(action);
        self.evaporate_pheromones();
        self.resolve_food();
        self.tick += 1;
        self.record(WorldEvent::Stepped {
            tick: self.tick,
            action,
        });
    }

    fn apply_action(&mut self, action: Action) {
        let speed = self.config.ant_speed;
        let turn = self.config.turn_angle;
        let bounds = self.bounds;
        let mut dropped = 0;

        for ant in self.ants.iter_mut().flatten() {
            match action {
                Action::MoveForward => ant.position += ant.heading() * speed,
                Action::TurnLeft => ant.direction -= turn,
                Action::TurnRight => ant.direction += turn,
                Action::DropPheromone => {
                    self.pheromones.push(Pheromone::deposit(ant.position, ant.colony_id));
                    dropped += 1;
                }
                Action::Noop => {}
            }
            ant.position = bounds.wrap(ant.position);
            ant.direction = normalize_angle(ant.direction);
        }

        if dropped > 0 {
            self.record(WorldEvent::PheromonesDropped { count: dropped });
        }
    }

    /// Discard spent pheromones, then weaken the survivors.
    fn evaporate_pheromones(&mut self) {
        let before = self.pheromones.len();
        self.pheromones.retain(|p| p.strength > PHEROMONE_EVAPORATION);
        for p in &mut self.pheromones {
            p.strength -= PHEROMONE_EVAPORATION;
        }
        let count = before - self.pheromones.len();
        if count > 0 {
            self.record(WorldEvent::PheromonesEvaporated { count });
        }
    }

    /// Pick up and deliver food.
    ///
    /// An empty-handed ant takes from the first non-empty source in range, in
    /// list order, not the nearest one.
    fn resolve_food(&mut self) {
        let mut events = Vec::new();

        for (colony_index, colony_ants) in self.ants.iter_mut().enumerate() {
            let colony = &mut self.colonies[colony_index];
            for (ant_index, ant) in colony_ants.iter_mut().enumerate() {
                if !ant.has_food {
                    let source = self.food_sources.iter_mut().enumerate().find(|(_, f)| {
                        f.amount > 0 && f.position.distance(ant.position) < PICKUP_RADIUS
                    });
                    if let Some((source, food)) = source {
                        food.take_one();
                        ant.has_food = true;
                        tracing::trace!(
                            colony = colony_index,
                            ant = ant_index,
                            source,
                            "food picked up"
                        );
                        events.push(WorldEvent::FoodPickedUp {
                            colony: ant.colony_id,
                            ant: ant_index,
                            source,
                        });
                    }
                } else if colony.position.distance(ant.position) < DELIVERY_RADIUS {
                    ant.has_food = false;
                    colony.food_collected += 1;
                    tracing::trace!(colony = colony_index, ant = ant_index, "food delivered");
                    events.push(WorldEvent::FoodDelivered {
                        colony: ant.colony_id,
                        ant: ant_index,
                    });
                }
            }
        }

        for event in events {
            self.record(event);
        }
    }

    /// Compute a deterministic hash of the world state for comparison.
    ///
    /// Covers the tick and every entity in canonical (index) order. The RNG
    /// state and event log are not included.
    pub fn state_hash(&self) -> u64 {
        let mut h: u64 = 0xcbf2_9ce4_8422_2325; // FNV offset basis
        let mix = |h: &mut u64, bytes: &[u8]| {
            for &b in bytes {
                *h ^= b as u64;
                *h = h.wrapping_mul(0x0100_0000_01b3);
            }
        };
        let mix_point = |h: &mut u64, p: Point| {
            mix(h, &p.x.to_le_bytes());
            mix(h, &p.y.to_le_bytes());
        };

        mix(&mut h, &self.tick.to_le_bytes());
        for colony in &self.colonies {
            mix_point(&mut h, colony.position);
            mix(&mut h, &colony.food_collected.to_le_bytes());
            mix(&mut h, &colony.ants_alive.to_le_bytes());
        }
        for ant in self.ants.iter().flatten() {
            mix_point(&mut h, ant.position);
            mix(&mut h, &ant.direction.to_le_bytes());
            mix(&mut h, &(ant.colony_id.0 as u64).to_le_bytes());
            mix(&mut h, &[ant.has_food as u8]);
            mix(&mut h, &ant.energy.to_le_bytes());
        }
        for food in &self.food_sources {
            mix_point(&mut h, food.position);
            mix(&mut h, &food.amount.to_le_bytes());
        }
        for p in &self.pheromones {
            mix_point(&mut h, p.position);
            mix(&mut h, &p.strength.to_le_bytes());
            mix(&mut h, &(p.colony_id.0 as u64).to_le_bytes());
        }
        h
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> EnvConfig {
        EnvConfig {
            max_ants_per_colony: 3,
            max_food_sources: 5,
            ..EnvConfig::default()
        }
    }

    fn seeded_world(seed: u64) -> World {
        let mut w = World::new(small_config(), ChaCha8Rng::seed_from_u64(0));
        w.reset(Some(seed));
        w
    }

    #[test]
    fn reset_places_two_colonies_on_midline() {
        let w = seeded_world(1);
        assert_eq!(w.colonies().len(), 2);
        assert_eq!(w.colonies()[0].position, Point::new(200.0, 300.0));
        assert_eq!(w.colonies()[1].position, Point::new(600.0, 300.0));
    }

    #[test]
    fn reset_spawns_ants_at_their_nest() {
        let w = seeded_world(1);
        assert_eq!(w.ants().len(), 2);
        for (i, colony_ants) in w.ants().iter().enumerate() {
            assert_eq!(colony_ants.len(), 3);
            for ant in colony_ants {
                assert_eq!(ant.position, w.colonies()[i].position);
                assert_eq!(ant.colony_id, ColonyId(i));
                assert!(!ant.has_food);
                assert_eq!(ant.energy, 100.0);
            }
        }
    }

    #[test]
    fn food_respects_margin_and_colony_distance() {
        let w = seeded_world(9);
        assert!(w.food_sources().len() <= 5);
        for food in w.food_sources() {
            assert!(food.position.x >= FOOD_MARGIN && food.position.x < 750.0);
            assert!(food.position.y >= FOOD_MARGIN && food.position.y < 550.0);
            for colony in w.colonies() {
                assert!(food.position.distance(colony.position) >= 100.0);
            }
            assert_eq!(food.amount, 100);
        }
    }

    #[test]
    fn unplaceable_food_is_left_out() {
        let config = EnvConfig {
            min_food_colony_distance: 10_000.0,
            ..small_config()
        };
        let mut w = World::new(config, ChaCha8Rng::seed_from_u64(0));
        w.reset(Some(3));
        assert!(w.food_sources().is_empty());
        assert!(w.all_food_depleted());
    }

    #[test]
    fn colonies_spread_evenly_for_larger_counts() {
        let config = EnvConfig {
            num_colonies: 4,
            ..small_config()
        };
        let w = World::new(config, ChaCha8Rng::seed_from_u64(0));
        assert_eq!(w.colony_position(0).x, 100.0);
        assert_eq!(w.colony_position(3).x, 700.0);
    }

    #[test]
    fn step_increments_tick() {
        let mut w = seeded_world(1);
        w.step(Action::Noop);
        w.step(Action::Noop);
        w.step(Action::Noop);
        assert_eq!(w.tick(), 3);
    }

    #[test]
    fn drop_then_evaporate_in_same_tick() {
        let mut w = seeded_world(1);
        w.step(Action::DropPheromone);
        assert_eq!(w.pheromones().len(), 6);
        for p in w.pheromones() {
            assert!((p.strength - 0.999).abs() < 1e-12);
        }
    }

    #[test]
    fn spent_pheromones_are_removed_before_decay() {
        let mut w = seeded_world(1);
        w.pheromones_mut().extend([
            Pheromone {
                position: Point::new(1.0, 1.0),
                strength: 0.001,
                colony_id: ColonyId(0),
            },
            Pheromone {
                position: Point::new(2.0, 2.0),
                strength: 0.5,
                colony_id: ColonyId(1),
            },
        ]);
        w.step(Action::Noop);
        assert_eq!(w.pheromones().len(), 1);
        assert!((w.pheromones()[0].strength - 0.499).abs() < 1e-12);
        assert!(
            w.events()
                .any(|e| *e == WorldEvent::PheromonesEvaporated { count: 1 })
        );
    }

    #[test]
    fn first_source_in_list_wins_pickup() {
        let mut w = seeded_world(1);
        for colony_ants in w.ants_mut() {
            for ant in colony_ants {
                ant.has_food = true;
            }
        }
        if let Some(colony_ants) = w.ants_mut().next() {
            colony_ants[0].has_food = false;
            colony_ants[0].position = Point::new(50.0, 50.0);
        }
        // Both sources are in range; the farther one comes first in the list.
        w.set_food_sources(vec![
            FoodSource::new(Point::new(58.0, 50.0), 5),
            FoodSource::new(Point::new(51.0, 50.0), 5),
        ]);
        w.step(Action::Noop);
        assert!(w.ants()[0][0].has_food);
        assert_eq!(w.food_sources()[0].amount, 4);
        assert_eq!(w.food_sources()[1].amount, 5);
    }

    #[test]
    fn deterministic_replay_same_seed() {
        let mut w1 = seeded_world(42);
        let mut w2 = seeded_world(42);
        for i in 0..200 {
            let action = Action::ALL[i % Action::COUNT];
            w1.step(action);
            w2.step(action);
        }
        assert_eq!(w1.state_hash(), w2.state_hash());
    }

    #[test]
    fn different_seeds_diverge() {
        let w1 = seeded_world(1);
        let w2 = seeded_world(2);
        assert_ne!(w1.state_hash(), w2.state_hash());
    }

    #[test]
    fn events_are_recorded() {
        let mut w = seeded_world(1);
        w.step(Action::DropPheromone);
        let events = w.drain_events();
        // reset + drop + step
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], WorldEvent::Reset { seed: Some(1), .. }));
        assert_eq!(events[1], WorldEvent::PheromonesDropped { count: 6 });
        assert_eq!(
            events[2],
            WorldEvent::Stepped {
                tick: 1,
                action: Action::DropPheromone
            }
        );
        assert_eq!(w.events().count(), 0);
    }

    #[test]
    fn full_event_log_drops_oldest_first() {
        let mut w = seeded_world(1);
        // Idle ants sit on their nests, so each tick records exactly one `Stepped`.
        let steps = EVENT_LOG_CAPACITY as u64 + 5;
        for _ in 0..steps {
            w.step(Action::Noop);
        }
        assert_eq!(w.events().count(), EVENT_LOG_CAPACITY);
        // The reset entry and ticks 1..=5 were pushed out.
        assert_eq!(
            w.events().next(),
            Some(&WorldEvent::Stepped {
                tick: 6,
                action: Action::Noop
            })
        );
        assert_eq!(
            w.events().last(),
            Some(&WorldEvent::Stepped {
                tick: steps,
                action: Action::Noop
            })
        );
    }

    #[test]
    fn reset_clears_previous_episode() {
        let mut w = seeded_world(1);
        w.step(Action::DropPheromone);
        w.reset(None);
        assert_eq!(w.tick(), 0);
        assert!(w.pheromones().is_empty());
        assert_eq!(w.events().count(), 1);
    }
}
