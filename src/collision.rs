use log::trace;
use swarm_common::{CollisionKind, Creature, Obstacle, Rect, SimParams, Vec2};

/// Side of an obstacle a creature was pushed out through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// The creature's square hit-box, centered on its position.
pub fn creature_box(pos: Vec2, params: &SimParams) -> Rect {
    Rect::centered(pos, params.creature_size, params.creature_size)
}

/// Separating-axis test for two axis-aligned rectangles. Touching edges count as overlap.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    !(a.right() < b.left() || a.left() > b.right() || a.bottom() < b.top() || a.top() > b.bottom())
}

/// Picks the side with the smallest penetration. On ties the order is
/// left, right, top, bottom.
pub fn penetration_side(creature: &Rect, obstacle: &Rect) -> Side {
    let overlaps = [
        (Side::Left, creature.right() - obstacle.left()),
        (Side::Right, obstacle.right() - creature.left()),
        (Side::Top, creature.bottom() - obstacle.top()),
        (Side::Bottom, obstacle.bottom() - creature.top()),
    ];

    let mut best = overlaps[0];
    for candidate in &overlaps[1..] {
        if candidate.1 < best.1 {
            best = *candidate;
        }
    }
    best.0
}

/// Pushes the creature out of the obstacle on the side of least penetration and
/// zeroes only the velocity component along that axis.
pub fn resolve_solid(creature: &mut Creature, obstacle: &Rect, params: &SimParams) -> Side {
    let half = params.half_creature_size();
    let side = penetration_side(&creature_box(creature.pos, params), obstacle);

    match side {
        Side::Left => {
            creature.pos.x = obstacle.left() - half;
            creature.vel.x = 0.0;
        }
        Side::Right => {
            creature.pos.x = obstacle.right() + half;
            creature.vel.x = 0.0;
        }
        Side::Top => {
            creature.pos.y = obstacle.top() - half;
            creature.vel.y = 0.0;
        }
        Side::Bottom => {
            creature.pos.y = obstacle.bottom() + half;
            creature.vel.y = 0.0;
        }
    }
    side
}

/// Tests the creature against every obstacle in list order and resolves each hit
/// immediately, so a later obstacle sees the position left by an earlier one.
/// Returns the number of collisions resolved.
pub fn resolve_obstacle_collisions(
    creature: &mut Creature,
    obstacles: &[Obstacle],
    params: &SimParams,
) -> usize {
    let mut resolved = 0;
    for obstacle in obstacles {
        if !intersects(&creature_box(creature.pos, params), &obstacle.rect) {
            continue;
        }
        let side = match obstacle.collision {
            CollisionKind::Solid => resolve_solid(creature, &obstacle.rect, params),
        };
        trace!(
            "Creature {:?} hit obstacle '{}' on its {:?} side, now at ({:.2}, {:.2})",
            creature.id, obstacle.label, side, creature.pos.x, creature.pos.y
        );
        resolved += 1;
    }
    resolved
}
