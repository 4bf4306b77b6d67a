use swarm_common::{Behavior, CollisionKind, ObstacleBehavior, Rect, SceneConfig, SimParams, Vec2};
use swarm_engine::authoring::{
    add_creature, add_dynamic_target, add_static_target, clear_all, create_obstacle, create_swarm,
    create_win_condition, set_behavior_all, set_speed_all, SnapshotGallery,
};
use swarm_engine::rng::ConstRng;
use swarm_engine::scene::build_world;
use swarm_engine::SwarmSimulation;

const FRAME_MS: f32 = 1000.0 / 60.0;

#[test]
fn authored_world_runs_and_completes_its_goal() {
    let params = SimParams::default();
    let mut sim = SwarmSimulation::with_rng(params.clone(), ConstRng::half());
    let mut world = swarm_common::World::new();

    let runners = create_swarm(&mut world, sim.rng_mut(), &params, "runners", None, Behavior::Wander, 2.0, 0);
    add_creature(&mut world, runners, 100.0, 100.0, 0.0, 0.0).unwrap();
    create_obstacle(&mut world, "post", Rect::new(600.0, 0.0, 10.0, 10.0), ObstacleBehavior::Static, CollisionKind::Solid);
    let goal = create_win_condition(&mut world, "Reached the flag", vec![runners]);
    add_static_target(&mut world, goal, Rect::new(180.0, 60.0, 80.0, 80.0)).unwrap();

    set_behavior_all(&mut world, Behavior::ChaseMouse);
    set_speed_all(&mut world, 4.0);
    sim.set_pointer_position(&mut world, 220.0, 100.0);

    let mut fired = Vec::new();
    for _ in 0..100 {
        fired.extend(sim.advance(&mut world, FRAME_MS).completed);
    }
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].message, "Reached the flag");
    assert!(world.win_conditions[goal].completed);
}

#[test]
fn restoring_a_snapshot_rewinds_the_world() {
    let params = SimParams::default();
    let mut sim = SwarmSimulation::seeded(params.clone(), 21);
    let mut world = swarm_common::World::new();
    create_swarm(&mut world, sim.rng_mut(), &params, "flock", None, Behavior::Wander, 1.5, 8);

    let mut gallery = SnapshotGallery::new();
    gallery.save("start", &world);
    for _ in 0..30 {
        sim.advance(&mut world, FRAME_MS);
    }
    assert_ne!(gallery.restore("start").unwrap(), world);

    world = gallery.restore("start").unwrap();
    assert_eq!(world.creature_count(), 8);
    assert!(world.swarms[0].creatures.iter().all(|c| c.personality.is_none()));

    clear_all(&mut world);
    assert_eq!(world.creature_count(), 0);
    assert_eq!(gallery.restore("start").unwrap().creature_count(), 8);
}

#[test]
fn dynamic_target_added_by_hand_tracks_its_creature() {
    let mut world = swarm_common::World::new();
    let prey = world.add_swarm("prey", Behavior::ChaseMouse, 2.0);
    let mouse = world.add_creature(prey, Vec2::new(100.0, 500.0), Vec2::ZERO).unwrap();
    let cats = world.add_swarm("cats", Behavior::ChaseMouse, 2.0);
    world.add_creature(cats, Vec2::new(700.0, 500.0), Vec2::ZERO);

    let goal = create_win_condition(&mut world, "Caught", vec![cats]);
    add_dynamic_target(&mut world, goal, mouse, 15.0).unwrap();

    // Everyone chases the pointer; the prey starts on it and stays put.
    let mut sim = SwarmSimulation::with_rng(SimParams::default(), ConstRng::half());
    sim.set_pointer_position(&mut world, 100.0, 500.0);

    let completed = (0..800).any(|_| !sim.advance(&mut world, FRAME_MS).completed.is_empty());
    assert!(completed);
    assert_eq!(world.win_conditions[goal].targets[0].rect.center(), Vec2::new(100.0, 500.0));
}

#[test]
fn scene_file_builds_a_runnable_world() {
    let config = SceneConfig::from_toml_str(
        r#"
        [arena]
        width = 300.0
        height = 200.0

        [timing]
        total_ticks = 10

        [[swarms]]
        name = "moths"
        behavior = "orbit-mouse"
        speed = 1.0
        count = 5

        [[win_conditions]]
        swarms = ["moths"]
        targets = [{ x = 0.0, y = 0.0 }]
        "#,
    )
    .unwrap();

    let mut sim = SwarmSimulation::seeded(config.sim_params(), config.initial_conditions.seed);
    let mut world = build_world(&config, sim.rng_mut()).unwrap();
    assert_eq!(world.win_conditions[0].message, "You win!");
    assert_eq!(world.win_conditions[0].targets[0].rect, Rect::new(0.0, 0.0, 80.0, 80.0));

    for _ in 0..config.timing.total_ticks {
        sim.advance(&mut world, config.timing.frame_ms);
    }
    assert_eq!(sim.current_tick(), 10);
    for c in world.swarms.iter().flat_map(|s| s.creatures.iter()) {
        assert!(c.pos.x >= 0.0 && c.pos.x <= 300.0 && c.pos.y >= 0.0 && c.pos.y <= 200.0);
    }
}
