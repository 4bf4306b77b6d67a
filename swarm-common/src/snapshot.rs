use crate::world::{CreatureId, SwarmId};
use serde::{Deserialize, Serialize};

/// Position and velocity of one creature at snapshot time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatureRecord {
    pub swarm: SwarmId,
    pub id: CreatureId,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

/// A snapshot of the world state at a specific tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickSnapshot {
    /// Number of ticks completed when the snapshot was taken.
    pub tick: u64,
    /// Sum of the elapsed times reported by the driver so far (milliseconds).
    pub elapsed_ms: f64,
    pub creature_count: u32,
    pub live_mouse_targets: u32,
    /// Messages of every win condition completed so far, in world order.
    pub completed_win_conditions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")] // Don't write "creatures": null
    pub creatures: Option<Vec<CreatureRecord>>,
}
