//! Headless swarm steering engine.
//!
//! Swarms of creatures steer by a named behavior (wander, chase, flee, orbit,
//! seek-targets), bounce off axis-aligned obstacles and can complete
//! reach-target win conditions. [`simulation::SwarmSimulation`] advances a
//! [`World`] one tick at a time.

pub mod authoring;
pub mod behavior;
pub mod collision;
pub mod kinematics;
pub mod obstacle;
pub mod personality;
pub mod rng;
pub mod scene;
pub mod simulation;
pub mod win;

pub use simulation::{SwarmSimulation, TickReport};
pub use win::WinEvent;

pub use swarm_common::{self as common, Behavior, SimParams, World};
