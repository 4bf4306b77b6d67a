use serde::{Deserialize, Serialize};

/// Simulation parameters derived from the configuration, used on every tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    // Arena
    pub world_width: f32,
    pub world_height: f32,

    // Creature geometry
    pub creature_size: f32, // Side of the square collision box
    pub flee_radius: f32,   // Pointer distance below which flee-mouse runs away

    // Time
    pub frame_ms: f32, // Nominal elapsed time forwarded by the driver, not used for scaling
}

impl SimParams {
    pub const DEFAULT_CREATURE_SIZE: f32 = 20.0;
    pub const DEFAULT_FLEE_RADIUS: f32 = 150.0;

    /// Parameters for an arena of the given size with the stock creature constants.
    pub fn for_arena(world_width: f32, world_height: f32) -> Self {
        SimParams {
            world_width,
            world_height,
            creature_size: Self::DEFAULT_CREATURE_SIZE,
            flee_radius: Self::DEFAULT_FLEE_RADIUS,
            frame_ms: 1000.0 / 60.0,
        }
    }

    pub fn half_creature_size(&self) -> f32 {
        self.creature_size / 2.0
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self::for_arena(800.0, 600.0)
    }
}
