use crate::behavior::{apply_behavior, PointerState};
use crate::collision::resolve_obstacle_collisions;
use crate::kinematics::{integrate, wrap_position};
use crate::obstacle::advance_obstacles;
use crate::personality::ensure_personality;
use crate::rng::create_rng;
use crate::win::{evaluate_win_conditions, WinEvent};
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::Rng;
use swarm_common::{
    Behavior, Creature, CreatureRecord, MouseTarget, SimParams, TickSnapshot, Vec2, World,
};

/// What happened during one call to [`SwarmSimulation::advance`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Number of ticks completed, including this one.
    pub tick: u64,
    /// Win conditions that completed on this tick, in world order.
    pub completed: Vec<WinEvent>,
    /// Creature/obstacle overlaps resolved on this tick.
    pub collisions: usize,
    /// Mouse targets that expired on this tick.
    pub expired_mouse_targets: usize,
}

/// Ages every mouse target by one tick and drops the ones whose life ran out.
/// Returns how many were dropped.
pub fn decay_mouse_targets(targets: &mut Vec<MouseTarget>) -> usize {
    let before = targets.len();
    for target in targets.iter_mut() {
        target.life -= 1;
    }
    targets.retain(|t| t.life > 0);
    before - targets.len()
}

/// Runs the per-creature part of a tick: personality, steering, integration, wrap.
/// Obstacle collisions are resolved by the caller afterwards.
pub fn update_creature<R: Rng + ?Sized>(
    creature: &mut Creature,
    behavior: Behavior,
    speed: f32,
    pointer: &PointerState<'_>,
    params: &SimParams,
    rng: &mut R,
) {
    ensure_personality(creature, rng);
    apply_behavior(behavior, creature, speed, pointer, params, rng);
    integrate(creature);
    creature.pos = wrap_position(creature.pos, params);
}

/// Drives the world forward one frame at a time.
///
/// Every magnitude is per tick: the elapsed time handed to [`advance`](Self::advance)
/// is recorded but never scales motion, so simulation speed follows the frame rate.
pub struct SwarmSimulation<R: Rng = StdRng> {
    params: SimParams,
    /// Single random source for personalities and jitter.
    rng: R,
    /// Number of ticks completed so far.
    current_tick: u64,
    /// Sum of the elapsed times reported by the driver.
    elapsed_ms: f64,
    /// Include every creature's state in recorded snapshots.
    record_creatures: bool,
    recorded_snapshots: Vec<TickSnapshot>,
}

impl SwarmSimulation<StdRng> {
    /// Creates a simulation whose randomness comes from a seeded `StdRng`.
    pub fn seeded(params: SimParams, seed: u64) -> Self {
        Self::with_rng(params, create_rng(seed))
    }
}

impl<R: Rng> SwarmSimulation<R> {
    /// Creates a simulation drawing from the given random source.
    pub fn with_rng(params: SimParams, rng: R) -> Self {
        Self {
            params,
            rng,
            current_tick: 0,
            elapsed_ms: 0.0,
            record_creatures: false,
            recorded_snapshots: Vec::new(),
        }
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    pub fn current_tick(&self) -> u64 {
        self.current_tick
    }

    /// The shared random source, e.g. for spawning creatures between ticks.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    pub fn set_record_creatures(&mut self, enabled: bool) {
        self.record_creatures = enabled;
    }

    /// Updates the cursor position read by chase, flee and orbit.
    ///
    /// Pointer input lives in the world, so this only forwards to
    /// [`World::set_pointer_position`]. It sits here so a driver can feed every
    /// input through the simulation it advances.
    pub fn set_pointer_position(&self, world: &mut World, x: f32, y: f32) {
        world.set_pointer_position(x, y);
    }

    /// Drops a fresh mouse target for seek-targets creatures. Forwards to
    /// [`World::add_mouse_target`], like [`set_pointer_position`](Self::set_pointer_position).
    pub fn add_mouse_target(&self, world: &mut World, x: f32, y: f32) {
        world.add_mouse_target(x, y);
        debug!("Added mouse target at ({:.1}, {:.1}); {} live.", x, y, world.mouse_targets.len());
    }

    /// Advances the world by one tick.
    ///
    /// Order: mouse-target decay, then every creature of every swarm (steer,
    /// integrate, wrap, collide), then obstacles, then win conditions.
    pub fn advance(&mut self, world: &mut World, elapsed_ms: f32) -> TickReport {
        let expired_mouse_targets = decay_mouse_targets(&mut world.mouse_targets);
        if expired_mouse_targets > 0 {
            debug!("{} mouse target(s) expired.", expired_mouse_targets);
        }

        // --- Creatures ---
        let mut collisions = 0;
        {
            let World { swarms, obstacles, mouse_targets, pointer, .. } = &mut *world;
            let pointer = PointerState { position: *pointer, mouse_targets: mouse_targets.as_slice() };

            for swarm in swarms.iter_mut() {
                let (behavior, speed) = (swarm.behavior, swarm.speed);
                for creature in swarm.creatures.iter_mut() {
                    update_creature(creature, behavior, speed, &pointer, &self.params, &mut self.rng);
                    collisions += resolve_obstacle_collisions(creature, obstacles, &self.params);
                }
            }
        }

        // --- Obstacles ---
        advance_obstacles(&mut world.obstacles, &self.params);

        // --- Win conditions ---
        let completed = evaluate_win_conditions(world);

        self.current_tick += 1;
        self.elapsed_ms += f64::from(elapsed_ms);
        trace!(
            "Tick {} done: {} creatures, {} collisions, {} mouse targets",
            self.current_tick,
            world.creature_count(),
            collisions,
            world.mouse_targets.len()
        );

        TickReport {
            tick: self.current_tick,
            completed,
            collisions,
            expired_mouse_targets,
        }
    }

    /// Captures the current world state into the snapshot list.
    pub fn record_snapshot(&mut self, world: &World) {
        let creatures = self.record_creatures.then(|| {
            world
                .swarms
                .iter()
                .flat_map(|s| {
                    s.creatures.iter().map(move |c| CreatureRecord {
                        swarm: s.id,
                        id: c.id,
                        x: c.pos.x,
                        y: c.pos.y,
                        vx: c.vel.x,
                        vy: c.vel.y,
                    })
                })
                .collect()
        });

        let snapshot = TickSnapshot {
            tick: self.current_tick,
            elapsed_ms: self.elapsed_ms,
            creature_count: world.creature_count() as u32,
            live_mouse_targets: world.mouse_targets.len() as u32,
            completed_win_conditions: world
                .win_conditions
                .iter()
                .filter(|w| w.completed)
                .map(|w| w.message.clone())
                .collect(),
            creatures,
        };
        debug!(
            "Recorded snapshot at tick {} ({} creatures).",
            snapshot.tick, snapshot.creature_count
        );
        self.recorded_snapshots.push(snapshot);
    }

    pub fn recorded_snapshots(&self) -> &[TickSnapshot] {
        &self.recorded_snapshots
    }
}

/// Final `(x, y)` of every creature, in swarm order.
pub fn final_positions(world: &World) -> Vec<Vec2> {
    world
        .swarms
        .iter()
        .flat_map(|s| s.creatures.iter().map(|c| c.pos))
        .collect()
}
