//! Authoring operations applied between ticks: spawning and editing swarms,
//! obstacles and goals, plus a gallery of named world snapshots.

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use rand::Rng;
use swarm_common::{
    Behavior, CollisionKind, CreatureId, Obstacle, ObstacleBehavior, Rect, SimParams, Swarm,
    SwarmId, Target, Vec2, WinCondition, World,
};

/// Uniform position inside the arena and a velocity with each component in `[-1, 1)`.
pub fn random_creature_state<R: Rng + ?Sized>(rng: &mut R, params: &SimParams) -> (Vec2, Vec2) {
    let pos = Vec2::new(
        rng.random::<f32>() * params.world_width,
        rng.random::<f32>() * params.world_height,
    );
    let vel = Vec2::new(
        (rng.random::<f32>() - 0.5) * 2.0,
        (rng.random::<f32>() - 0.5) * 2.0,
    );
    (pos, vel)
}

/// Creates a swarm of `count` randomly placed creatures.
#[allow(clippy::too_many_arguments)]
pub fn create_swarm<R: Rng + ?Sized>(
    world: &mut World,
    rng: &mut R,
    params: &SimParams,
    name: &str,
    label: Option<String>,
    behavior: Behavior,
    speed: f32,
    count: u32,
) -> SwarmId {
    let id = world.add_swarm(name, behavior, speed);
    if let Some(swarm) = world.swarm_mut(id) {
        swarm.label = label;
    }
    for _ in 0..count {
        let (pos, vel) = random_creature_state(rng, params);
        world.add_creature(id, pos, vel);
    }
    info!("Created swarm '{}' ({}, speed {}) with {} creature(s).", name, behavior, speed, count);
    id
}

/// Adds one creature to an existing swarm.
pub fn add_creature(world: &mut World, swarm: SwarmId, x: f32, y: f32, vx: f32, vy: f32) -> Option<CreatureId> {
    let id = world.add_creature(swarm, Vec2::new(x, y), Vec2::new(vx, vy));
    if id.is_none() {
        warn!("Cannot add creature: swarm {:?} does not exist.", swarm);
    }
    id
}

/// Appends an obstacle and returns its index.
pub fn create_obstacle(
    world: &mut World,
    label: &str,
    rect: Rect,
    behavior: ObstacleBehavior,
    collision: CollisionKind,
) -> usize {
    let mut obstacle = Obstacle::new(rect, behavior);
    obstacle.label = label.to_string();
    obstacle.collision = collision;
    world.obstacles.push(obstacle);
    debug!("Created {:?} obstacle '{}' at {:?}.", behavior, label, rect);
    world.obstacles.len() - 1
}

/// Appends a pending reach-target condition and returns its index.
pub fn create_win_condition(world: &mut World, message: &str, swarms: Vec<SwarmId>) -> usize {
    world.win_conditions.push(WinCondition::new(message, swarms));
    world.win_conditions.len() - 1
}

pub fn add_static_target(world: &mut World, win_index: usize, rect: Rect) -> Result<()> {
    let win = world
        .win_conditions
        .get_mut(win_index)
        .ok_or_else(|| anyhow!("no win condition at index {}", win_index))?;
    win.targets.push(Target::fixed(rect));
    Ok(())
}

/// Adds a circular target of `radius` that follows `creature`.
pub fn add_dynamic_target(world: &mut World, win_index: usize, creature: CreatureId, radius: f32) -> Result<()> {
    let at = world
        .creature(creature)
        .map(|c| c.pos)
        .ok_or_else(|| anyhow!("creature {:?} does not exist", creature))?;
    let win = world
        .win_conditions
        .get_mut(win_index)
        .ok_or_else(|| anyhow!("no win condition at index {}", win_index))?;
    win.targets.push(Target::tracking(creature, at, radius));
    Ok(())
}

/// Switches every swarm to `behavior`. Returns the number of swarms changed.
pub fn set_behavior_all(world: &mut World, behavior: Behavior) -> usize {
    for swarm in world.swarms.iter_mut() {
        swarm.behavior = behavior;
    }
    world.swarms.len()
}

/// Sets every swarm's base speed. Returns the number of swarms changed.
pub fn set_speed_all(world: &mut World, speed: f32) -> usize {
    for swarm in world.swarms.iter_mut() {
        swarm.speed = speed;
    }
    world.swarms.len()
}

pub fn remove_swarm(world: &mut World, id: SwarmId) -> Option<Swarm> {
    let index = world.swarms.iter().position(|s| s.id == id)?;
    Some(world.swarms.remove(index))
}

/// Removes every creature but keeps the (now empty) swarms.
pub fn clear_creatures(world: &mut World) -> usize {
    let removed = world.creature_count();
    for swarm in world.swarms.iter_mut() {
        swarm.creatures.clear();
    }
    info!("Cleared {} creature(s).", removed);
    removed
}

/// Removes every creature, swarm and obstacle. Win conditions stay.
pub fn clear_all(world: &mut World) {
    let creatures = clear_creatures(world);
    info!(
        "Cleared {} creature(s), {} swarm(s), {} obstacle(s).",
        creatures,
        world.swarms.len(),
        world.obstacles.len()
    );
    world.swarms.clear();
    world.obstacles.clear();
}

/// Named copies of whole worlds.
#[derive(Debug, Default, Clone)]
pub struct SnapshotGallery {
    saved: Vec<(String, World)>,
}

impl SnapshotGallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a deep copy of `world` under `name`, replacing any earlier save of that name.
    pub fn save(&mut self, name: &str, world: &World) {
        match self.saved.iter_mut().find(|(n, _)| n == name) {
            Some((_, saved)) => *saved = world.clone(),
            None => self.saved.push((name.to_string(), world.clone())),
        }
        info!("Saved snapshot '{}' ({} creature(s)).", name, world.creature_count());
    }

    /// Returns a fresh copy of the world saved under `name`.
    pub fn restore(&self, name: &str) -> Result<World> {
        self.saved
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, w)| w.clone())
            .ok_or_else(|| anyhow!("snapshot '{}' not found", name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.saved.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }
}
