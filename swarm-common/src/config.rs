use crate::sim_params::SimParams;
use crate::world::{Behavior, CollisionKind, ObstacleBehavior, WinKind};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

// Arena dimensions in world units
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

// Configuration for the headless driver loop
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TimingConfig {
    pub total_ticks: u64,
    #[serde(default = "default_frame_ms")]
    pub frame_ms: f32, // Forwarded to the engine as elapsed time
    #[serde(default = "default_record_interval")]
    pub record_interval_ticks: u64,
}

fn default_frame_ms() -> f32 {
    1000.0 / 60.0
}

fn default_record_interval() -> u64 {
    60
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct InitialConditions {
    #[serde(default)]
    pub seed: u64,
}

// An explicitly placed creature
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CreatureConfig {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub vx: f32,
    #[serde(default)]
    pub vy: f32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SwarmConfig {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub behavior: Behavior,
    pub speed: f32,
    /// Creatures spawned at random on top of the explicit `creatures` list.
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub creatures: Vec<CreatureConfig>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ObstacleConfig {
    #[serde(default)]
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub behavior: ObstacleBehavior,
    #[serde(default)]
    pub collision: CollisionKind,
}

/// A win-condition target: either tracks a creature (by swarm name and
/// index within that swarm) or is a fixed rectangle.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum TargetConfig {
    Dynamic {
        swarm: String,
        creature: usize,
        radius: f32,
    },
    Static {
        x: f32,
        y: f32,
        #[serde(default = "default_target_size")]
        width: f32,
        #[serde(default = "default_target_size")]
        height: f32,
    },
}

fn default_target_size() -> f32 {
    80.0
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WinConditionConfig {
    #[serde(rename = "type", default)]
    pub kind: WinKind,
    #[serde(default = "default_win_message")]
    pub message: String,
    /// Names of the swarms whose creatures count.
    pub swarms: Vec<String>,
    #[serde(default)]
    pub targets: Vec<TargetConfig>,
}

fn default_win_message() -> String {
    "You win!".to_string()
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Move,
    Click,
}

// Scripted pointer input, applied before the given tick runs
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct InputEvent {
    pub tick: u64,
    pub kind: InputKind,
    pub x: f32,
    pub y: f32,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    pub base_filename: String,
    #[serde(default)]
    pub save_positions: bool,
    #[serde(default = "default_true")]
    pub save_snapshots: bool,
    #[serde(default)]
    pub save_creatures_in_snapshot: bool,
    pub format: Option<String>, // Output format: "json", "bincode", "messagepack"
}

fn default_true() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            base_filename: "swarm".to_string(),
            save_positions: false,
            save_snapshots: true,
            save_creatures_in_snapshot: false,
            format: None,
        }
    }
}

// Main scene configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SceneConfig {
    pub arena: ArenaConfig,
    pub timing: TimingConfig,
    #[serde(default)]
    pub initial_conditions: InitialConditions,
    #[serde(default)]
    pub swarms: Vec<SwarmConfig>,
    #[serde(default)]
    pub obstacles: Vec<ObstacleConfig>,
    #[serde(default)]
    pub win_conditions: Vec<WinConditionConfig>,
    #[serde(default)]
    pub input: Vec<InputEvent>,
    #[serde(default)]
    pub output: OutputConfig,
}

impl SceneConfig {
    /// Loads and validates the scene configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read config file '{}'", path_ref.display()))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid scene in '{}'", path_ref.display()))
    }

    /// Parses and validates a scene from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(text).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(self.arena.width > 0.0 && self.arena.height > 0.0) {
            anyhow::bail!(
                "arena must have positive size, got {}x{}",
                self.arena.width,
                self.arena.height
            );
        }

        let mut names = HashSet::new();
        for swarm in &self.swarms {
            if !(swarm.speed > 0.0) {
                anyhow::bail!("swarm '{}' must have a positive speed", swarm.name);
            }
            if !names.insert(swarm.name.as_str()) {
                anyhow::bail!("duplicate swarm name '{}'", swarm.name);
            }
        }

        for obstacle in &self.obstacles {
            if obstacle.width < 0.0 || obstacle.height < 0.0 {
                anyhow::bail!("obstacle '{}' has a negative size", obstacle.label);
            }
        }

        for (i, win) in self.win_conditions.iter().enumerate() {
            for name in &win.swarms {
                if !names.contains(name.as_str()) {
                    anyhow::bail!("win condition {} refers to unknown swarm '{}'", i, name);
                }
            }
            for target in &win.targets {
                if let TargetConfig::Dynamic { swarm, creature, radius } = target {
                    let Some(cfg) = self.swarms.iter().find(|s| &s.name == swarm) else {
                        anyhow::bail!("win condition {} tracks a creature of unknown swarm '{}'", i, swarm);
                    };
                    let population = cfg.creatures.len() + cfg.count as usize;
                    if *creature >= population {
                        anyhow::bail!(
                            "win condition {} tracks creature {} but swarm '{}' only has {}",
                            i, creature, swarm, population
                        );
                    }
                    if !(*radius > 0.0) {
                        anyhow::bail!("win condition {} has a non-positive target radius", i);
                    }
                }
            }
        }

        Ok(())
    }

    /// Converts the configuration into the parameters used at runtime.
    pub fn sim_params(&self) -> SimParams {
        SimParams {
            frame_ms: self.timing.frame_ms,
            ..SimParams::for_arena(self.arena.width, self.arena.height)
        }
    }
}
