//! Character movement.
//!
//! The controller consumes a smoothed [`InputState`] and a camera frame each
//! tick, and owns the mutable [`CharacterState`] it advances.

mod config;
mod controller;
mod dash;
mod state;

pub use config::ControllerConfig;
pub use controller::CharacterController;
pub use dash::DashState;
pub use state::{AnimationState, CameraFrame, CharacterState, InputState};
