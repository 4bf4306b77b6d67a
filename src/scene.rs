use crate::authoring::random_creature_state;
use anyhow::{anyhow, Result};
use log::info;
use rand::Rng;
use swarm_common::{
    Obstacle, Rect, SceneConfig, SwarmId, Target, TargetConfig, Vec2, WinCondition, World,
};

/// Builds the initial world described by a scene configuration.
///
/// Explicit creatures come first in each swarm, followed by `count` random ones,
/// so dynamic targets can address creatures by index.
pub fn build_world<R: Rng + ?Sized>(config: &SceneConfig, rng: &mut R) -> Result<World> {
    let params = config.sim_params();
    let mut world = World::new();

    for swarm_cfg in &config.swarms {
        let id = world.add_swarm(swarm_cfg.name.as_str(), swarm_cfg.behavior, swarm_cfg.speed);
        if let Some(swarm) = world.swarm_mut(id) {
            swarm.label = swarm_cfg.label.clone();
        }
        for c in &swarm_cfg.creatures {
            world.add_creature(id, Vec2::new(c.x, c.y), Vec2::new(c.vx, c.vy));
        }
        for _ in 0..swarm_cfg.count {
            let (pos, vel) = random_creature_state(rng, &params);
            world.add_creature(id, pos, vel);
        }
    }

    for o in &config.obstacles {
        let mut obstacle = Obstacle::new(Rect::new(o.x, o.y, o.width, o.height), o.behavior);
        obstacle.label = o.label.clone();
        obstacle.collision = o.collision;
        world.obstacles.push(obstacle);
    }

    for (i, win_cfg) in config.win_conditions.iter().enumerate() {
        let swarms = win_cfg
            .swarms
            .iter()
            .map(|name| swarm_id(&world, name))
            .collect::<Result<Vec<SwarmId>>>()?;

        let mut win = WinCondition::new(win_cfg.message.as_str(), swarms);
        win.kind = win_cfg.kind;
        for target in &win_cfg.targets {
            let target = match target {
                TargetConfig::Static { x, y, width, height } => Target::fixed(Rect::new(*x, *y, *width, *height)),
                TargetConfig::Dynamic { swarm, creature, radius } => {
                    let tracked = world
                        .swarm(swarm_id(&world, swarm)?)
                        .and_then(|s| s.creatures.get(*creature))
                        .ok_or_else(|| anyhow!("win condition {}: swarm '{}' has no creature {}", i, swarm, creature))?;
                    Target::tracking(tracked.id, tracked.pos, *radius)
                }
            };
            win.targets.push(target);
        }
        world.win_conditions.push(win);
    }

    info!(
        "Built world: {} swarm(s), {} creature(s), {} obstacle(s), {} win condition(s).",
        world.swarms.len(),
        world.creature_count(),
        world.obstacles.len(),
        world.win_conditions.len()
    );
    Ok(world)
}

fn swarm_id(world: &World, name: &str) -> Result<SwarmId> {
    world
        .swarm_by_name(name)
        .map(|s| s.id)
        .ok_or_else(|| anyhow!("unknown swarm '{}'", name))
}
