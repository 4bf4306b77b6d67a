//! Property tests for the steering and collision rules.

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use swarm_common::{Behavior, Creature, CreatureId, Obstacle, ObstacleBehavior, Rect, SimParams, Target, Vec2, WinCondition, World};
use swarm_engine::behavior::{flee, wander};
use swarm_engine::collision::resolve_obstacle_collisions;
use swarm_engine::kinematics::{integrate, limit_speed, wrap_position};
use swarm_engine::personality::ensure_personality;
use swarm_engine::win::evaluate_win_conditions;

/// Finite coordinates with two decimals.
fn coord(range: std::ops::Range<i32>) -> impl Strategy<Value = f32> {
    range.prop_map(|v| v as f32 * 0.01)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn speed_never_exceeds_limit(vx in coord(-100_000..100_000), vy in coord(-100_000..100_000), max in coord(1..10_000)) {
        let mut c = Creature::new(CreatureId(0), Vec2::ZERO, Vec2::new(vx, vy));
        limit_speed(&mut c, max);
        prop_assert!(c.vel.length() <= max * (1.0 + 1e-5) + 1e-6);
    }

    #[test]
    fn integrated_positions_stay_in_bounds(
        x in coord(0..80_000),
        y in coord(0..60_000),
        vx in coord(-5_000..5_000),
        vy in coord(-5_000..5_000),
    ) {
        let params = SimParams::default();
        let mut c = Creature::new(CreatureId(0), Vec2::new(x, y), Vec2::new(vx, vy));
        integrate(&mut c);
        let p = wrap_position(c.pos, &params);
        prop_assert!(p.x >= 0.0 && p.x <= params.world_width);
        prop_assert!(p.y >= 0.0 && p.y <= params.world_height);
    }

    #[test]
    fn personality_is_assigned_once(seed in any::<u64>(), other in any::<u64>()) {
        let mut c = Creature::new(CreatureId(3), Vec2::ZERO, Vec2::ZERO);
        let first = *ensure_personality(&mut c, &mut StdRng::seed_from_u64(seed));
        let second = *ensure_personality(&mut c, &mut StdRng::seed_from_u64(other));
        prop_assert_eq!(first, second);
        prop_assert_eq!(c.personality, Some(first));
    }

    #[test]
    fn flee_beyond_radius_matches_wander(
        seed in any::<u64>(),
        angle in 0.0f32..std::f32::consts::TAU,
        distance in 150.0f32..500.0,
        speed in 0.5f32..5.0,
    ) {
        let params = SimParams::default();
        let pos = Vec2::new(400.0, 300.0);
        let pointer = pos + Vec2::new(angle.cos(), angle.sin()).scale(distance);
        // Rounding can land a hair under the radius when `distance` is 150.
        prop_assume!((pos - pointer).length() >= params.flee_radius);

        let mut c = Creature::new(CreatureId(0), pos, Vec2::new(0.3, -0.2));
        let personality = *ensure_personality(&mut c, &mut StdRng::seed_from_u64(seed));

        let (mut fled_vel, mut fled_p) = (c.vel, personality);
        flee(pos, &mut fled_vel, &mut fled_p, speed, pointer, params.flee_radius, &mut StdRng::seed_from_u64(seed ^ 1));

        let (mut wander_vel, mut wander_p) = (c.vel, personality);
        wander(&mut wander_vel, &mut wander_p, speed * 0.3, &mut StdRng::seed_from_u64(seed ^ 1));

        prop_assert_eq!(fled_vel, wander_vel);
        prop_assert_eq!(fled_p, wander_p);
    }

    #[test]
    fn win_condition_completes_at_most_once(inside in prop::collection::vec(any::<bool>(), 1..40)) {
        let mut world = World::new();
        let swarm = world.add_swarm("s", Behavior::Wander, 1.0);
        world.add_creature(swarm, Vec2::ZERO, Vec2::ZERO);
        let mut win = WinCondition::new("done", vec![swarm]);
        win.targets.push(Target::fixed(Rect::new(100.0, 100.0, 50.0, 50.0)));
        world.win_conditions.push(win);

        let mut events = 0;
        let mut seen_completed = false;
        for step in inside {
            world.swarms[0].creatures[0].pos = if step { Vec2::new(120.0, 120.0) } else { Vec2::new(10.0, 10.0) };
            events += evaluate_win_conditions(&mut world).len();
            if seen_completed {
                prop_assert!(world.win_conditions[0].completed);
            }
            seen_completed = world.win_conditions[0].completed;
        }
        prop_assert!(events <= 1);
        prop_assert_eq!(events == 1, seen_completed);
    }

    #[test]
    fn vertical_overlap_only_zeroes_vy(
        x in coord(6_000..34_000),
        depth in coord(1..500),
        vx in coord(-500..500),
        vy in coord(1..500),
    ) {
        let params = SimParams::default();
        // Wide, tall slab: the creature's box pokes a few units into its top edge.
        let slab = Obstacle::new(Rect::new(0.0, 100.0, 400.0, 200.0), ObstacleBehavior::Static);
        let y = 100.0 - params.half_creature_size() + depth;
        let mut c = Creature::new(CreatureId(0), Vec2::new(x, y), Vec2::new(vx, vy));

        prop_assert_eq!(resolve_obstacle_collisions(&mut c, &[slab], &params), 1);
        prop_assert_eq!(c.vel.x, vx);
        prop_assert_eq!(c.vel.y, 0.0);
        prop_assert_eq!(c.pos.x, x);
        prop_assert_eq!(c.pos.y, 90.0);
    }
}
