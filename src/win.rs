//! Win-condition evaluation.
//!
//! A condition is either pending or completed. The only transition is
//! pending -> completed, taken the first tick any creature of a bound swarm
//! is inside any of the condition's targets. Completed conditions are
//! skipped from then on, so the completion event fires exactly once.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use swarm_common::{Swarm, Target, TargetKind, Vec2, WinCondition, WinKind, World};

/// Emitted once, on the tick a win condition completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinEvent {
    /// Position of the condition in `World::win_conditions`.
    pub index: usize,
    pub message: String,
}

/// Re-centers every dynamic target on the creature it tracks. Targets whose
/// creature no longer exists keep their last position.
pub fn refresh_dynamic_targets(targets: &mut [Target], swarms: &[Swarm]) {
    for target in targets.iter_mut() {
        let TargetKind::Dynamic { creature } = target.kind else {
            continue;
        };
        match swarms.iter().find_map(|s| s.creature(creature)) {
            Some(tracked) => {
                target.rect.x = tracked.pos.x - target.rect.width / 2.0;
                target.rect.y = tracked.pos.y - target.rect.height / 2.0;
            }
            None => debug!("Target tracks creature {:?}, which no longer exists.", creature),
        }
    }
}

/// Point containment: a circle of radius `width / 2` for dynamic targets,
/// the rectangle itself for static ones.
pub fn creature_in_target(pos: Vec2, target: &Target) -> bool {
    match target.kind {
        TargetKind::Dynamic { .. } => pos.distance(target.rect.center()) <= target.radius(),
        TargetKind::Static => target.rect.contains(pos),
    }
}

fn any_creature_reached(win: &WinCondition, swarms: &[Swarm]) -> bool {
    win.swarms
        .iter()
        .filter_map(|id| swarms.iter().find(|s| s.id == *id))
        .flat_map(|s| s.creatures.iter())
        .any(|c| win.targets.iter().any(|t| creature_in_target(c.pos, t)))
}

/// Evaluates one condition. Returns the completion event on the tick it completes.
pub fn evaluate_win_condition(index: usize, win: &mut WinCondition, swarms: &[Swarm]) -> Option<WinEvent> {
    if win.completed {
        return None;
    }

    match win.kind {
        WinKind::ReachTarget => {
            refresh_dynamic_targets(&mut win.targets, swarms);
            if !any_creature_reached(win, swarms) {
                return None;
            }
        }
    }

    win.completed = true;
    info!("Win condition {} completed: {}", index, win.message);
    Some(WinEvent { index, message: win.message.clone() })
}

/// Evaluates every pending condition in world order.
pub fn evaluate_win_conditions(world: &mut World) -> Vec<WinEvent> {
    let World { swarms, win_conditions, .. } = world;
    let swarms: &[Swarm] = swarms;
    win_conditions
        .iter_mut()
        .enumerate()
        .filter_map(|(i, win)| evaluate_win_condition(i, win, swarms))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use swarm_common::{Behavior, CreatureId, Rect};

    fn world_with_runner(at: Vec2) -> (World, CreatureId) {
        let mut world = World::new();
        let swarm = world.add_swarm("runners", Behavior::Wander, 1.0);
        let id = world.add_creature(swarm, at, Vec2::ZERO).unwrap();
        let mut win = WinCondition::new("Made it!", vec![swarm]);
        win.targets.push(Target::fixed(Rect::new(100.0, 100.0, 50.0, 50.0)));
        world.win_conditions.push(win);
        (world, id)
    }

    #[test]
    fn static_target_uses_inclusive_rectangle() {
        let t = Target::fixed(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(creature_in_target(Vec2::new(10.0, 10.0), &t));
        assert!(!creature_in_target(Vec2::new(10.01, 5.0), &t));
    }

    #[test]
    fn dynamic_target_uses_circle() {
        let t = Target::tracking(CreatureId(0), Vec2::new(0.0, 0.0), 10.0);
        assert!(creature_in_target(Vec2::new(6.0, 8.0), &t));
        // Inside the bounding square but outside the circle.
        assert!(!creature_in_target(Vec2::new(9.0, 9.0), &t));
    }

    #[test]
    fn completes_once_and_stays_completed() {
        let (mut world, _) = world_with_runner(Vec2::new(120.0, 120.0));
        let events = evaluate_win_conditions(&mut world);
        assert_eq!(events, vec![WinEvent { index: 0, message: "Made it!".into() }]);
        assert!(world.win_conditions[0].completed);

        assert!(evaluate_win_conditions(&mut world).is_empty());
        world.swarms[0].creatures[0].pos = Vec2::ZERO;
        assert!(evaluate_win_conditions(&mut world).is_empty());
        assert!(world.win_conditions[0].completed);
    }

    #[test]
    fn pending_while_nobody_is_inside() {
        let (mut world, _) = world_with_runner(Vec2::new(10.0, 10.0));
        assert!(evaluate_win_conditions(&mut world).is_empty());
        assert!(!world.win_conditions[0].completed);
    }

    #[test]
    fn dynamic_target_follows_its_creature() {
        let mut world = World::new();
        let prey = world.add_swarm("prey", Behavior::Wander, 1.0);
        let prey_id = world.add_creature(prey, Vec2::new(300.0, 300.0), Vec2::ZERO).unwrap();
        let hunters = world.add_swarm("hunters", Behavior::ChaseMouse, 1.0);
        world.add_creature(hunters, Vec2::new(10.0, 10.0), Vec2::ZERO);

        let mut win = WinCondition::new("Caught", vec![hunters]);
        win.targets.push(Target::tracking(prey_id, Vec2::new(500.0, 500.0), 15.0));
        world.win_conditions.push(win);

        assert!(evaluate_win_conditions(&mut world).is_empty());
        assert_eq!(world.win_conditions[0].targets[0].rect.center(), Vec2::new(300.0, 300.0));

        world.swarms[0].creatures[0].pos = Vec2::new(20.0, 10.0);
        assert_eq!(evaluate_win_conditions(&mut world).len(), 1);
    }

    #[test]
    fn target_of_removed_creature_keeps_last_position() {
        let mut targets = vec![Target::tracking(CreatureId(42), Vec2::new(5.0, 5.0), 2.0)];
        refresh_dynamic_targets(&mut targets, &[]);
        assert_eq!(targets[0].rect.center(), Vec2::new(5.0, 5.0));
    }
}
