//! The in-memory world model handed to the engine once per tick.
//!
//! Everything here is plain data: the engine mutates it, collaborators
//! (persistence, rendering, authoring) read and write it between ticks.

use crate::vecmath::Vec2;
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle for a swarm. Never reused within one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SwarmId(pub u32);

/// Stable handle for a creature. Never reused within one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CreatureId(pub u32);

/// Steering behavior shared by every creature of a swarm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Behavior {
    #[default]
    Wander,
    #[serde(alias = "chase")]
    ChaseMouse,
    #[serde(alias = "flee")]
    FleeMouse,
    #[serde(alias = "orbit")]
    OrbitMouse,
    SeekTargets,
}

impl Behavior {
    /// Parses a canonical or legacy short behavior name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "wander" => Some(Behavior::Wander),
            "chase-mouse" | "chase" => Some(Behavior::ChaseMouse),
            "flee-mouse" | "flee" => Some(Behavior::FleeMouse),
            "orbit-mouse" | "orbit" => Some(Behavior::OrbitMouse),
            "seek-targets" => Some(Behavior::SeekTargets),
            _ => None,
        }
    }

    /// Like [`Behavior::from_name`], but unknown names fall back to `wander`.
    pub fn normalize(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            warn!("Unknown behavior '{}', falling back to wander.", name);
            Behavior::Wander
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::Wander => "wander",
            Behavior::ChaseMouse => "chase-mouse",
            Behavior::FleeMouse => "flee-mouse",
            Behavior::OrbitMouse => "orbit-mouse",
            Behavior::SeekTargets => "seek-targets",
        }
    }
}

impl fmt::Display for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-creature random traits. Assigned once, never re-rolled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    /// Scales every random perturbation, in `[0.5, 1.0]`.
    pub jitteriness: f32,
    /// Multiplier on the swarm speed, in `[0.8, 1.2]`.
    pub speed_variation: f32,
    /// Velocity smoothing used by wander, in `[0.7, 1.0]`.
    pub direction_persistence: f32,
    /// Preferred wander heading in radians. Free-running, not wrapped.
    pub wander_angle: f32,
    /// Ticks since the last wander re-heading.
    pub wander_timer: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub pos: Vec2,
    pub vel: Vec2,
    #[serde(default)]
    pub personality: Option<Personality>,
}

impl Creature {
    pub fn new(id: CreatureId, pos: Vec2, vel: Vec2) -> Self {
        Creature { id, pos, vel, personality: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swarm {
    pub id: SwarmId,
    pub name: String,
    /// Cosmetic marker for renderers, e.g. an emoji.
    #[serde(default)]
    pub label: Option<String>,
    pub behavior: Behavior,
    /// Base speed magnitude, positive.
    pub speed: f32,
    pub creatures: Vec<Creature>,
}

impl Swarm {
    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.iter().find(|c| c.id == id)
    }
}

/// Axis-aligned rectangle; `(x, y)` is the top-left corner, `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Rect { x, y, width, height }
    }

    /// A `width` x `height` rectangle centered on `center`.
    pub fn centered(center: Vec2, width: f32, height: f32) -> Self {
        Rect::new(center.x - width / 2.0, center.y - height / 2.0, width, height)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleBehavior {
    #[default]
    Static,
    Rotating,
    Moving,
}

/// How a creature reacts on contact. Only solid contact exists so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionKind {
    #[default]
    Solid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    #[serde(default)]
    pub label: String,
    pub rect: Rect,
    #[serde(default)]
    pub behavior: ObstacleBehavior,
    #[serde(default)]
    pub collision: CollisionKind,
    /// Degrees. Cosmetic only, never affects `rect`.
    #[serde(default)]
    pub rotation: f32,
    /// `+1.0` or `-1.0`; horizontal heading of a moving obstacle.
    #[serde(default = "default_move_direction")]
    pub move_direction: f32,
}

fn default_move_direction() -> f32 {
    1.0
}

impl Obstacle {
    pub fn new(rect: Rect, behavior: ObstacleBehavior) -> Self {
        Obstacle {
            label: String::new(),
            rect,
            behavior,
            collision: CollisionKind::Solid,
            rotation: 0.0,
            move_direction: default_move_direction(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WinKind {
    #[default]
    #[serde(rename = "reach-target")]
    ReachTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Fixed rectangle, point-in-rectangle containment.
    Static,
    /// Re-centered on `creature` every tick, circular containment of radius `width / 2`.
    Dynamic { creature: CreatureId },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub rect: Rect,
    pub kind: TargetKind,
}

impl Target {
    pub fn fixed(rect: Rect) -> Self {
        Target { rect, kind: TargetKind::Static }
    }

    /// A circular target of `radius` tracking `creature`, initially centered on `at`.
    pub fn tracking(creature: CreatureId, at: Vec2, radius: f32) -> Self {
        Target {
            rect: Rect::centered(at, radius * 2.0, radius * 2.0),
            kind: TargetKind::Dynamic { creature },
        }
    }

    pub fn radius(&self) -> f32 {
        self.rect.width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinCondition {
    #[serde(default)]
    pub kind: WinKind,
    pub message: String,
    /// Flips false -> true once and stays there.
    #[serde(default)]
    pub completed: bool,
    /// Swarms whose creatures count toward this condition.
    pub swarms: Vec<SwarmId>,
    pub targets: Vec<Target>,
}

impl WinCondition {
    pub fn new(message: impl Into<String>, swarms: Vec<SwarmId>) -> Self {
        WinCondition {
            kind: WinKind::ReachTarget,
            message: message.into(),
            completed: false,
            swarms,
            targets: Vec::new(),
        }
    }
}

/// Short-lived point of interest created by a click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MouseTarget {
    pub pos: Vec2,
    pub life: i32,
}

impl MouseTarget {
    pub const INITIAL_LIFE: i32 = 100;

    pub fn new(pos: Vec2) -> Self {
        MouseTarget { pos, life: Self::INITIAL_LIFE }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "WorldRecord")]
pub struct World {
    pub swarms: Vec<Swarm>,
    pub obstacles: Vec<Obstacle>,
    pub win_conditions: Vec<WinCondition>,
    pub mouse_targets: Vec<MouseTarget>,
    /// Last known cursor position.
    pub pointer: Vec2,
    next_swarm_id: u32,
    next_creature_id: u32,
}

/// Serialized form of [`World`]. The id counters may be missing or stale.
#[derive(Deserialize)]
struct WorldRecord {
    swarms: Vec<Swarm>,
    obstacles: Vec<Obstacle>,
    win_conditions: Vec<WinCondition>,
    mouse_targets: Vec<MouseTarget>,
    pointer: Vec2,
    #[serde(default)]
    next_swarm_id: u32,
    #[serde(default)]
    next_creature_id: u32,
}

impl From<WorldRecord> for World {
    fn from(record: WorldRecord) -> Self {
        let mut world = World {
            swarms: record.swarms,
            obstacles: record.obstacles,
            win_conditions: record.win_conditions,
            mouse_targets: record.mouse_targets,
            pointer: record.pointer,
            next_swarm_id: record.next_swarm_id,
            next_creature_id: record.next_creature_id,
        };
        world.reindex();
        world
    }
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves the id counters past every id already in the world, so handles
    /// handed out afterwards never collide with existing ones.
    pub fn reindex(&mut self) {
        let next_swarm = self.swarms.iter().map(|s| s.id.0 + 1).max().unwrap_or(0);
        let next_creature = self
            .swarms
            .iter()
            .flat_map(|s| s.creatures.iter())
            .map(|c| c.id.0 + 1)
            .max()
            .unwrap_or(0);
        self.next_swarm_id = self.next_swarm_id.max(next_swarm);
        self.next_creature_id = self.next_creature_id.max(next_creature);
    }

    pub fn set_pointer_position(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    pub fn add_mouse_target(&mut self, x: f32, y: f32) {
        self.mouse_targets.push(MouseTarget::new(Vec2::new(x, y)));
    }

    /// Appends an empty swarm and returns its handle.
    pub fn add_swarm(&mut self, name: impl Into<String>, behavior: Behavior, speed: f32) -> SwarmId {
        let id = SwarmId(self.next_swarm_id);
        self.next_swarm_id += 1;
        self.swarms.push(Swarm {
            id,
            name: name.into(),
            label: None,
            behavior,
            speed,
            creatures: Vec::new(),
        });
        id
    }

    /// Appends a creature to `swarm`. Returns `None` if the swarm does not exist.
    pub fn add_creature(&mut self, swarm: SwarmId, pos: Vec2, vel: Vec2) -> Option<CreatureId> {
        let id = CreatureId(self.next_creature_id);
        let swarm = self.swarm_mut(swarm)?;
        swarm.creatures.push(Creature::new(id, pos, vel));
        self.next_creature_id += 1;
        Some(id)
    }

    pub fn swarm(&self, id: SwarmId) -> Option<&Swarm> {
        self.swarms.iter().find(|s| s.id == id)
    }

    pub fn swarm_mut(&mut self, id: SwarmId) -> Option<&mut Swarm> {
        self.swarms.iter_mut().find(|s| s.id == id)
    }

    pub fn swarm_by_name(&self, name: &str) -> Option<&Swarm> {
        self.swarms.iter().find(|s| s.name == name)
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.swarms.iter().find_map(|s| s.creature(id))
    }

    pub fn creature_count(&self) -> usize {
        self.swarms.iter().map(|s| s.creatures.len()).sum()
    }
}
