pub mod config;
pub mod sim_params;
pub mod snapshot;
pub mod vecmath;
pub mod world;

// Re-export key types for easier use by dependent crates
pub use config::{
    ArenaConfig, CreatureConfig, InitialConditions, InputEvent, InputKind, ObstacleConfig,
    OutputConfig, SceneConfig, SwarmConfig, TargetConfig, TimingConfig, WinConditionConfig,
};
pub use sim_params::SimParams;
pub use snapshot::{CreatureRecord, TickSnapshot};
pub use vecmath::{angle_to_vec, Vec2};
pub use world::{
    Behavior, CollisionKind, Creature, CreatureId, MouseTarget, Obstacle, ObstacleBehavior,
    Personality, Rect, Swarm, SwarmId, Target, TargetKind, WinCondition, WinKind, World,
};
