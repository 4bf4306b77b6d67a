//! Steering behaviors.
//!
//! Each behavior only writes the creature's velocity (and, for wander, the
//! wander state in its personality). Integration and boundary wrap happen
//! afterwards in the tick orchestrator.

use crate::kinematics::limit_velocity;
use rand::Rng;
use swarm_common::{angle_to_vec, Behavior, Creature, MouseTarget, Personality, SimParams, Vec2};

// Wander
const WANDER_MIN_INTERVAL: f32 = 60.0; // ticks
const WANDER_INTERVAL_SPAN: f32 = 120.0; // ticks
const WANDER_TURN_SCALE: f32 = 2.0;
const WANDER_DRIFT_SCALE: f32 = 0.01;
const WANDER_MIN_PERSISTENCE: f32 = 0.75;
const WANDER_MOMENTUM: f32 = 0.02;
const WANDER_SPEED_CAP: f32 = 1.8;

// Pointer-driven behaviors
const CHASE_SPEED: f32 = 0.5;
const CHASE_JITTER: f32 = 0.3;
const FLEE_JITTER: f32 = 0.5;
const FLEE_IDLE_SPEED: f32 = 0.3;
const ORBIT_SPEED: f32 = 0.6;
const ORBIT_FAR_DISTANCE: f32 = 100.0;
const ORBIT_FAR_PULL: f32 = 0.008;
const ORBIT_NEAR_PULL: f32 = 0.003;
const ORBIT_WOBBLE: f32 = 0.1;
const SEEK_JITTER: f32 = 0.05;
const SEEK_IDLE_SPEED: f32 = 0.5;

/// Read-only pointer input for one tick.
#[derive(Debug, Clone, Copy)]
pub struct PointerState<'a> {
    pub position: Vec2,
    pub mouse_targets: &'a [MouseTarget],
}

/// Symmetric random offset in `[-scale/2, scale/2)`.
#[inline(always)]
fn jitter<R: Rng + ?Sized>(rng: &mut R, scale: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * scale
}

/// Adds independent jitter on each axis, x first.
#[inline(always)]
fn add_jitter<R: Rng + ?Sized>(vel: &mut Vec2, rng: &mut R, scale: f32) {
    vel.x += jitter(rng, scale);
    vel.y += jitter(rng, scale);
}

/// Sets the creature's velocity according to `behavior`.
///
/// Creatures without a personality are left untouched; run
/// [`ensure_personality`](crate::personality::ensure_personality) first.
pub fn apply_behavior<R: Rng + ?Sized>(
    behavior: Behavior,
    creature: &mut Creature,
    speed: f32,
    pointer: &PointerState<'_>,
    params: &SimParams,
    rng: &mut R,
) {
    let Creature { pos, vel, personality, .. } = creature;
    let Some(personality) = personality.as_mut() else {
        return;
    };

    match behavior {
        Behavior::Wander => wander(vel, personality, speed, rng),
        Behavior::ChaseMouse => chase(*pos, vel, personality, speed, pointer.position, rng),
        Behavior::FleeMouse => flee(*pos, vel, personality, speed, pointer.position, params.flee_radius, rng),
        Behavior::OrbitMouse => orbit(*pos, vel, personality, speed, pointer.position, rng),
        Behavior::SeekTargets => seek_targets(*pos, vel, personality, speed, pointer.mouse_targets, rng),
    }
}

/// Smooth, slowly drifting heading with occasional re-headings.
pub fn wander<R: Rng + ?Sized>(vel: &mut Vec2, p: &mut Personality, speed: f32, rng: &mut R) {
    p.wander_timer += 1;

    let threshold = WANDER_MIN_INTERVAL + rng.random::<f32>() * WANDER_INTERVAL_SPAN;
    if p.wander_timer as f32 > threshold {
        p.wander_angle += jitter(rng, p.jitteriness * WANDER_TURN_SCALE);
        p.wander_timer = 0;
    }
    p.wander_angle += jitter(rng, p.jitteriness * WANDER_DRIFT_SCALE);

    let target = angle_to_vec(p.wander_angle).scale(speed * p.speed_variation);
    let persistence = (p.direction_persistence * 0.9).max(WANDER_MIN_PERSISTENCE);
    *vel = vel.scale(persistence) + target.scale(1.0 - persistence);
    add_jitter(vel, rng, WANDER_MOMENTUM);

    *vel = limit_velocity(*vel, speed * WANDER_SPEED_CAP);
}

/// Heads straight for the pointer at half speed.
pub fn chase<R: Rng + ?Sized>(
    pos: Vec2,
    vel: &mut Vec2,
    p: &Personality,
    speed: f32,
    pointer: Vec2,
    rng: &mut R,
) {
    if let Some(dir) = (pointer - pos).try_normalize() {
        *vel = dir.scale(speed * CHASE_SPEED * p.speed_variation);
    }
    add_jitter(vel, rng, p.jitteriness * CHASE_JITTER);
}

/// Runs directly away from a nearby pointer, otherwise wanders slowly.
pub fn flee<R: Rng + ?Sized>(
    pos: Vec2,
    vel: &mut Vec2,
    p: &mut Personality,
    speed: f32,
    pointer: Vec2,
    flee_radius: f32,
    rng: &mut R,
) {
    let away = pos - pointer;
    let distance = away.length();

    if distance < flee_radius && distance > 0.0 {
        *vel = away.scale(speed * p.speed_variation / distance);
        add_jitter(vel, rng, p.jitteriness * FLEE_JITTER);
    } else {
        wander(vel, p, speed * FLEE_IDLE_SPEED, rng);
    }
}

/// Circles the pointer: tangential motion plus a pull toward the pointer
/// that is stronger while far away.
pub fn orbit<R: Rng + ?Sized>(
    pos: Vec2,
    vel: &mut Vec2,
    p: &Personality,
    speed: f32,
    pointer: Vec2,
    rng: &mut R,
) {
    let radial = pos - pointer;
    let distance = radial.length();
    if distance <= 0.0 {
        return;
    }

    let tangent = radial.scale(1.0 / distance).perpendicular();
    let pull = if distance > ORBIT_FAR_DISTANCE { ORBIT_FAR_PULL } else { ORBIT_NEAR_PULL };

    *vel = tangent.scale(speed * ORBIT_SPEED * p.speed_variation) + (pointer - pos).scale(pull);
    add_jitter(vel, rng, p.jitteriness * ORBIT_WOBBLE);
}

/// Index of the mouse target closest to `pos`; the first one wins ties.
pub fn closest_mouse_target(pos: Vec2, targets: &[MouseTarget]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, target) in targets.iter().enumerate() {
        let d = target.pos.distance(pos);
        let closer = match best {
            None => true,
            Some((_, best_d)) => d < best_d,
        };
        if closer {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Heads for the closest mouse target, or wanders at half speed when there is none.
pub fn seek_targets<R: Rng + ?Sized>(
    pos: Vec2,
    vel: &mut Vec2,
    p: &mut Personality,
    speed: f32,
    targets: &[MouseTarget],
    rng: &mut R,
) {
    let Some(closest) = closest_mouse_target(pos, targets) else {
        wander(vel, p, speed * SEEK_IDLE_SPEED, rng);
        return;
    };

    if let Some(dir) = (targets[closest].pos - pos).try_normalize() {
        *vel = dir.scale(speed * p.speed_variation);
        add_jitter(vel, rng, p.jitteriness * SEEK_JITTER);
    }
}
