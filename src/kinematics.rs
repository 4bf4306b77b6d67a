use swarm_common::{Creature, SimParams, Vec2};

/// Returns `vel` rescaled to `max_speed` if it is faster, keeping its direction.
/// A zero velocity is returned untouched.
pub fn limit_velocity(vel: Vec2, max_speed: f32) -> Vec2 {
    let current_speed = vel.length();
    if current_speed > max_speed && current_speed > 0.0 {
        vel.scale(max_speed / current_speed)
    } else {
        vel
    }
}

/// Caps the creature's speed at `max_speed`.
pub fn limit_speed(creature: &mut Creature, max_speed: f32) {
    creature.vel = limit_velocity(creature.vel, max_speed);
}

/// Moves the creature by one tick's worth of velocity.
pub fn integrate(creature: &mut Creature) {
    creature.pos += creature.vel;
}

/// Wraps a coordinate that left `[0, bound]` to the opposite edge.
#[inline(always)]
fn wrap_axis(value: f32, bound: f32) -> f32 {
    if value < 0.0 {
        bound
    } else if value > bound {
        0.0
    } else {
        value
    }
}

/// Toroidal boundary: leaving one side re-enters at the other. Never clamps.
pub fn wrap_position(pos: Vec2, params: &SimParams) -> Vec2 {
    Vec2::new(
        wrap_axis(pos.x, params.world_width),
        wrap_axis(pos.y, params.world_height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use swarm_common::CreatureId;

    fn creature_with_velocity(vx: f32, vy: f32) -> Creature {
        Creature::new(CreatureId(0), Vec2::ZERO, Vec2::new(vx, vy))
    }

    #[test]
    fn limit_speed_preserves_direction() {
        let mut c = creature_with_velocity(6.0, 8.0);
        limit_speed(&mut c, 5.0);
        assert_relative_eq!(c.vel.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(c.vel.y, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn limit_speed_ignores_slow_and_still_creatures() {
        let mut slow = creature_with_velocity(1.0, 1.0);
        limit_speed(&mut slow, 5.0);
        assert_eq!(slow.vel, Vec2::new(1.0, 1.0));

        let mut still = creature_with_velocity(0.0, 0.0);
        limit_speed(&mut still, 0.0);
        assert_eq!(still.vel, Vec2::ZERO);
    }

    #[test]
    fn wrap_jumps_to_opposite_edge() {
        let params = SimParams::for_arena(800.0, 600.0);
        assert_eq!(wrap_position(Vec2::new(-0.5, 300.0), &params), Vec2::new(800.0, 300.0));
        assert_eq!(wrap_position(Vec2::new(800.5, 600.1), &params), Vec2::new(0.0, 0.0));
        assert_eq!(wrap_position(Vec2::new(800.0, 0.0), &params), Vec2::new(800.0, 0.0));
    }
}
