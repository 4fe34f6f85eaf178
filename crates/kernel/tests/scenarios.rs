use antcolony_common::{FoodSource, Pheromone, Point};
use antcolony_kernel::{Action, AntColonyEnv, EnvConfig, Environment};

/// One colony with a single ant: the reference ant.
fn lone_ant_env(seed: u64) -> AntColonyEnv {
    AntColonyEnv::new(EnvConfig {
        num_colonies: 1,
        max_ants_per_colony: 1,
        seed: Some(seed),
        ..EnvConfig::default()
    })
    .unwrap()
}

fn place_ant(env: &mut AntColonyEnv, position: Point, direction: f64, has_food: bool) {
    for colony_ants in env.world_mut().ants_mut() {
        for ant in colony_ants {
            ant.position = position;
            ant.direction = direction;
            ant.has_food = has_food;
        }
    }
}

#[test]
fn ant_picks_up_food_it_walks_into() {
    let mut env = lone_ant_env(1);
    place_ant(&mut env, Point::new(100.0, 100.0), 0.0, false);
    env.world_mut()
        .set_food_sources(vec![FoodSource::new(Point::new(105.0, 100.0), 1)]);

    let step = env.step(Action::MoveForward);

    let ant = env.world().ants()[0][0];
    assert_eq!(ant.position, Point::new(101.0, 100.0));
    assert!(ant.has_food);
    assert_eq!(env.world().food_sources()[0].amount, 0);
    assert!(step.observation.has_food());
    assert!(step.terminated);
    assert_eq!(step.reward, 0.0);
}

#[test]
fn food_out_of_reach_is_left_alone() {
    let mut env = lone_ant_env(1);
    place_ant(&mut env, Point::new(100.0, 100.0), 0.0, false);
    env.world_mut()
        .set_food_sources(vec![FoodSource::new(Point::new(111.0, 100.0), 1)]);

    let step = env.step(Action::TurnLeft);

    assert!(!env.world().ants()[0][0].has_food);
    assert_eq!(env.world().food_sources()[0].amount, 1);
    assert!(!step.terminated);
}

#[test]
fn food_exactly_at_pickup_radius_is_out_of_reach() {
    let mut env = lone_ant_env(1);
    place_ant(&mut env, Point::new(100.0, 100.0), 0.0, false);
    env.world_mut()
        .set_food_sources(vec![FoodSource::new(Point::new(110.0, 100.0), 1)]);

    let step = env.step(Action::Noop);

    assert!(!env.world().ants()[0][0].has_food);
    assert_eq!(env.world().food_sources()[0].amount, 1);
    assert!(!step.terminated);
}

#[test]
fn carrying_ant_delivers_near_its_colony() {
    let mut env = lone_ant_env(1);
    let nest = env.world().colonies()[0].position;
    place_ant(&mut env, nest + Point::new(15.0, 0.0), 0.0, true);

    let step = env.step(Action::Noop);

    assert!(!env.world().ants()[0][0].has_food);
    assert_eq!(env.world().colonies()[0].food_collected, 1);
    assert_eq!(step.reward, 1.0);
}

#[test]
fn carrying_ant_far_from_colony_keeps_its_food() {
    let mut env = lone_ant_env(1);
    let nest = env.world().colonies()[0].position;
    place_ant(&mut env, nest + Point::new(25.0, 0.0), 0.0, true);

    env.step(Action::Noop);

    assert!(env.world().ants()[0][0].has_food);
    assert_eq!(env.world().colonies()[0].food_collected, 0);
}

#[test]
fn carrier_exactly_at_delivery_radius_keeps_its_food() {
    let mut env = lone_ant_env(1);
    let nest = env.world().colonies()[0].position;
    place_ant(&mut env, nest + Point::new(20.0, 0.0), 0.0, true);

    let step = env.step(Action::Noop);

    assert!(env.world().ants()[0][0].has_food);
    assert_eq!(env.world().colonies()[0].food_collected, 0);
    assert_eq!(step.reward, 0.0);
}

#[test]
fn ants_only_deliver_to_their_own_colony() {
    let mut env = AntColonyEnv::new(EnvConfig {
        max_ants_per_colony: 1,
        seed: Some(2),
        ..EnvConfig::default()
    })
    .unwrap();
    let other_nest = env.world().colonies()[1].position;
    if let Some(first_colony) = env.world_mut().ants_mut().next() {
        first_colony[0].position = other_nest;
        first_colony[0].has_food = true;
    }

    let step = env.step(Action::Noop);

    assert!(env.world().ants()[0][0].has_food);
    assert_eq!(step.reward, 0.0);
}

#[test]
fn reward_is_cumulative() {
    let mut env = lone_ant_env(1);
    let nest = env.world().colonies()[0].position;

    place_ant(&mut env, nest, 0.0, true);
    assert_eq!(env.step(Action::Noop).reward, 1.0);
    place_ant(&mut env, nest, 0.0, true);
    assert_eq!(env.step(Action::Noop).reward, 2.0);
    // Nothing delivered this tick, the total stays.
    assert_eq!(env.step(Action::Noop).reward, 2.0);
}

#[test]
fn reset_with_same_seed_reproduces_layout() {
    let mut env = AntColonyEnv::new(EnvConfig::default()).unwrap();

    env.reset(Some(7));
    let colonies = env.world().colonies().to_vec();
    let food = env.world().food_sources().to_vec();
    let hash = env.world().state_hash();

    for _ in 0..25 {
        env.step(Action::MoveForward);
    }
    env.reset(Some(7));

    assert_eq!(env.world().colonies(), colonies.as_slice());
    assert_eq!(env.world().food_sources(), food.as_slice());
    assert_eq!(env.world().state_hash(), hash);
}

#[test]
fn reset_without_seed_continues_the_stream() {
    let mut env = AntColonyEnv::new(EnvConfig {
        seed: Some(7),
        ..EnvConfig::default()
    })
    .unwrap();
    let first = env.world().food_sources().to_vec();
    env.reset(None);
    assert_ne!(env.world().food_sources(), first.as_slice());
}

#[test]
fn dropped_pheromone_fades_out_after_999_more_ticks() {
    let mut env = lone_ant_env(3);

    env.step(Action::DropPheromone);
    let pheromones = env.world().pheromones();
    assert_eq!(pheromones.len(), 1);
    assert!((pheromones[0].strength - 0.999).abs() < 1e-12);

    for _ in 0..998 {
        env.step(Action::Noop);
    }
    assert_eq!(env.world().pheromones().len(), 1);

    env.step(Action::Noop);
    assert!(env.world().pheromones().is_empty());
}

#[test]
fn observation_reports_nearest_food_and_strongest_pheromone() {
    let mut env = lone_ant_env(4);
    place_ant(&mut env, Point::new(300.0, 300.0), 0.0, false);
    env.world_mut().set_food_sources(vec![
        FoodSource::new(Point::new(500.0, 300.0), 3),
        FoodSource::new(Point::new(300.0, 380.0), 3),
        FoodSource::new(Point::new(310.0, 340.0), 0),
    ]);
    let colony = env.world().ants()[0][0].colony_id;
    env.world_mut().pheromones_mut().extend([
        Pheromone {
            position: Point::new(320.0, 300.0),
            strength: 0.4,
            colony_id: colony,
        },
        Pheromone {
            position: Point::new(330.0, 300.0),
            strength: 0.7,
            colony_id: colony,
        },
        // Stronger but out of vision range.
        Pheromone {
            position: Point::new(360.0, 300.0),
            strength: 0.9,
            colony_id: colony,
        },
    ]);

    let obs = env.step(Action::Noop).observation;

    assert_eq!(obs.nearest_food(), Point::new(300.0, 380.0));
    assert_eq!(obs.strongest_pheromone(), Point::new(330.0, 300.0));
    assert_eq!(obs.colony_position(), env.world().colonies()[0].position);
}

#[test]
fn observation_sentinels_when_nothing_is_visible() {
    let mut env = lone_ant_env(4);
    env.world_mut().set_food_sources(vec![FoodSource::new(Point::new(90.0, 90.0), 0)]);

    let step = env.step(Action::Noop);

    assert_eq!(step.observation.nearest_food(), Point::ZERO);
    assert_eq!(step.observation.strongest_pheromone(), Point::ZERO);
    assert!(step.terminated);
}

#[test]
fn equal_strength_pheromones_keep_the_first() {
    let mut env = lone_ant_env(4);
    place_ant(&mut env, Point::new(300.0, 300.0), 0.0, false);
    let colony = env.world().ants()[0][0].colony_id;
    env.world_mut().pheromones_mut().extend([
        Pheromone {
            position: Point::new(310.0, 300.0),
            strength: 0.5,
            colony_id: colony,
        },
        Pheromone {
            position: Point::new(305.0, 300.0),
            strength: 0.5,
            colony_id: colony,
        },
    ]);

    let obs = env.step(Action::Noop).observation;

    assert_eq!(obs.strongest_pheromone(), Point::new(310.0, 300.0));
}

#[test]
fn other_colony_pheromones_are_invisible() {
    let mut env = AntColonyEnv::new(EnvConfig {
        max_ants_per_colony: 1,
        seed: Some(8),
        ..EnvConfig::default()
    })
    .unwrap();
    let reference = env.world().ants()[0][0];
    let foreign = env.world().ants()[1][0].colony_id;
    env.world_mut().pheromones_mut().push(Pheromone {
        position: reference.position + Point::new(5.0, 0.0),
        strength: 1.0,
        colony_id: foreign,
    });

    let obs = env.step(Action::Noop).observation;

    assert_eq!(obs.strongest_pheromone(), Point::ZERO);
}

#[test]
fn moving_off_the_right_edge_wraps_to_the_left() {
    let mut env = lone_ant_env(5);
    place_ant(&mut env, Point::new(799.5, 10.0), 0.0, false);
    env.world_mut().set_food_sources(Vec::new());

    env.step(Action::MoveForward);

    let pos = env.world().ants()[0][0].position;
    assert!((pos.x - 0.5).abs() < 1e-9);
    assert_eq!(pos.y, 10.0);
}

#[test]
fn turning_wraps_heading_into_range() {
    let mut env = lone_ant_env(5);
    let turn = env.config().turn_angle;
    place_ant(&mut env, Point::new(10.0, 10.0), std::f64::consts::PI - 0.01, false);

    env.step(Action::TurnRight);

    let direction = env.world().ants()[0][0].direction;
    let expected = std::f64::consts::PI - 0.01 + turn - std::f64::consts::TAU;
    assert!((direction - expected).abs() < 1e-9);
}
