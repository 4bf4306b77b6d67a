use swarm_common::{Obstacle, ObstacleBehavior, SimParams};

const ROTATION_DEG_PER_TICK: f32 = 2.0;
const MOVE_UNITS_PER_TICK: f32 = 0.5;

/// Advances one obstacle by a tick according to its behavior.
pub fn advance_obstacle(obstacle: &mut Obstacle, params: &SimParams) {
    match obstacle.behavior {
        ObstacleBehavior::Static => {}
        ObstacleBehavior::Rotating => {
            // Cosmetic: the collision rectangle stays axis-aligned.
            obstacle.rotation += ROTATION_DEG_PER_TICK;
        }
        ObstacleBehavior::Moving => {
            if obstacle.move_direction == 0.0 {
                obstacle.move_direction = 1.0;
            }
            obstacle.rect.x += obstacle.move_direction * MOVE_UNITS_PER_TICK;
            if obstacle.rect.x > params.world_width - obstacle.rect.width || obstacle.rect.x < 0.0 {
                obstacle.move_direction = -obstacle.move_direction;
            }
        }
    }
}

pub fn advance_obstacles(obstacles: &mut [Obstacle], params: &SimParams) {
    for obstacle in obstacles.iter_mut() {
        advance_obstacle(obstacle, params);
    }
}
