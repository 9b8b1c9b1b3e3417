//! Festival Game Logic
//!
//! The host layer around the movement physics:
//!
//! - Raw key/touch booleans smoothed into per-tick input
//! - The follow camera the controller steers against
//! - Level data: collision brushes, spawn point, void and camera volumes
//! - The tick-driven simulation wiring everything together
//!
//! # Tick order
//!
//! ```text
//! RawInput ──► InputNormalizer ──► CharacterController ──► void recovery
//!                                                              │
//!                                           camera follow ◄────┘
//! ```
//!
//! One [`Simulation::tick`] runs that pipeline exactly once; there are no
//! registered callbacks and no other entry points into the state.

pub mod camera;
pub mod input;
pub mod level;
pub mod player;
pub mod simulation;

pub use camera::CameraRig;
pub use input::{InputNormalizer, RawInput};
pub use level::{CameraZone, Level, SpawnPoint};
pub use player::Player;
pub use simulation::{SetupError, Simulation, SimulationConfig};

// Re-export physics types for convenience
pub use festival_physics::{
    AnimationState, CameraFrame, CharacterController, CharacterState, ContentFlags,
    ControllerConfig, InputState, SceneWorld, SurfaceFlags,
};
