use std::f64::consts::FRAC_PI_2;

use antcolony_common::{Point, angle_between};
use antcolony_input::Action;
use antcolony_kernel::Observation;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{Policy, PolicyError};

/// Tuning knobs of [`ForagerPolicy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForagerParams {
    /// Chance of steering toward a visible pheromone while searching.
    pub follow_probability: f64,
    /// Chance of marking the trail on the way home, once lined up with the nest.
    pub carrying_drop_probability: f64,
    /// Random-walk chance of marking the trail while searching.
    pub searching_drop_probability: f64,
    pub left_probability: f64,
    pub right_probability: f64,
    /// Food and trails this far away or farther are ignored.
    pub vision_range: f64,
    /// Full width of the field of view in radians, centred on the heading.
    pub vision_angle: f64,
    /// Headings within this many radians of the target count as lined up.
    pub angle_tolerance: f64,
}

impl ForagerParams {
    /// Sticks to trails: follows pheromones 80% of the time.
    pub fn trail_follower() -> Self {
        Self {
            follow_probability: 0.80,
            carrying_drop_probability: 1.0 / 20.0,
            searching_drop_probability: 0.10,
            left_probability: 0.25,
            right_probability: 0.25,
            vision_range: 50.0,
            vision_angle: FRAC_PI_2,
            angle_tolerance: 0.1,
        }
    }

    /// Wanders more: follows pheromones 40% of the time and turns often.
    pub fn explorer() -> Self {
        Self {
            follow_probability: 0.40,
            carrying_drop_probability: 1.0 / 10.0,
            searching_drop_probability: 0.05,
            left_probability: 0.40,
            right_probability: 0.40,
            vision_range: 50.0,
            vision_angle: FRAC_PI_2,
            angle_tolerance: 0.1,
        }
    }

    pub fn validate(&self) -> Result<(), PolicyError> {
        for (name, value) in [
            ("follow_probability", self.follow_probability),
            ("carrying_drop_probability", self.carrying_drop_probability),
            ("searching_drop_probability", self.searching_drop_probability),
            ("left_probability", self.left_probability),
            ("right_probability", self.right_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(PolicyError::InvalidProbability { name, value });
            }
        }
        for (name, value) in [
            ("vision_range", self.vision_range),
            ("vision_angle", self.vision_angle),
            ("angle_tolerance", self.angle_tolerance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PolicyError::InvalidDistance { name, value });
            }
        }
        Ok(())
    }
}

/// A hand-written forager: go home when carrying, head for food in sight,
/// otherwise follow trails or wander.
#[derive(Debug, Clone)]
pub struct ForagerPolicy {
    name: &'static str,
    params: ForagerParams,
    rng: ChaCha8Rng,
}

impl ForagerPolicy {
    pub fn new(params: ForagerParams, seed: u64) -> Result<Self, PolicyError> {
        params.validate()?;
        Ok(Self {
            name: "forager",
            params,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn trail_follower(seed: u64) -> Self {
        Self {
            name: "trail-follower",
            params: ForagerParams::trail_follower(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn explorer(seed: u64) -> Self {
        Self {
            name: "explorer",
            params: ForagerParams::explorer(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Turn toward `target`, or `None` when already lined up (or standing on it).
    fn steer(&self, obs: &Observation, target: Point) -> Option<Action> {
        let offset = target - obs.ant_position();
        if offset.length_squared() == 0.0 {
            return None;
        }
        let diff = angle_between(obs.ant_direction(), offset.y.atan2(offset.x));
        if diff > self.params.angle_tolerance {
            Some(Action::TurnRight)
        } else if diff < -self.params.angle_tolerance {
            Some(Action::TurnLeft)
        } else {
            None
        }
    }

    /// Inside the field of view: closer than `vision_range` and no more than
    /// half of `vision_angle` off the heading.
    fn in_view(&self, obs: &Observation, target: Point) -> bool {
        let offset = target - obs.ant_position();
        let distance = offset.length();
        if distance == 0.0 || distance >= self.params.vision_range {
            return false;
        }
        let off_heading = angle_between(obs.ant_direction(), offset.y.atan2(offset.x));
        off_heading.abs() <= self.params.vision_angle / 2.0
    }

    fn visible_food(&self, obs: &Observation) -> Option<Point> {
        let food = obs.nearest_food();
        (food != Point::ZERO && self.in_view(obs, food)).then_some(food)
    }

    fn visible_trail(&self, obs: &Observation) -> Option<Point> {
        let trail = obs.strongest_pheromone();
        (trail != Point::ZERO && self.in_view(obs, trail)).then_some(trail)
    }
}

impl Policy for ForagerPolicy {
    fn name(&self) -> &str {
        self.name
    }

    fn act(&mut self, obs: &Observation) -> Action {
        let p = self.params;

        if obs.has_food() {
            if let Some(turn) = self.steer(obs, obs.colony_position()) {
                return turn;
            }
            if self.rng.gen_bool(p.carrying_drop_probability) {
                return Action::DropPheromone;
            }
            return Action::MoveForward;
        }

        if let Some(food) = self.visible_food(obs) {
            return self.steer(obs, food).unwrap_or(Action::MoveForward);
        }

        if self.rng.gen_bool(p.follow_probability) {
            if let Some(trail) = self.visible_trail(obs) {
                return self.steer(obs, trail).unwrap_or(Action::MoveForward);
            }
        }

        if self.rng.gen_bool(p.searching_drop_probability) {
            Action::DropPheromone
        } else if self.rng.gen_bool(p.left_probability) {
            Action::TurnLeft
        } else if self.rng.gen_bool(p.right_probability) {
            Action::TurnRight
        } else {
            Action::MoveForward
        }
    }
}
