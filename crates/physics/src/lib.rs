//! Festival Physics
//!
//! Deterministic movement physics for a small 3D platformer. The crate is
//! split into two systems:
//!
//! - **Collision**: a static world of flagged brushes with ray and sweep
//!   queries plus a collide-and-slide move primitive.
//! - **Movement**: the character controller that turns smoothed input into
//!   camera-relative motion, gravity, jumps, air dashes, and an animation
//!   state.
//!
//! # Design principles
//!
//! 1. **Determinism**: same inputs and delta times always produce the same
//!    state, so a simulation can be replayed tick for tick.
//! 2. **No hidden callbacks**: the host calls [`CharacterController::update`]
//!    once per tick; nothing runs behind its back.
//! 3. **Read-only environment**: the controller never mutates the collision
//!    world, only the [`CharacterState`] it owns.

pub mod collision;
pub mod movement;

pub use collision::{BodyShape, ContentFlags, RayHit, SceneWorld, SurfaceFlags};
pub use movement::{
    AnimationState, CameraFrame, CharacterController, CharacterState, ControllerConfig, DashState,
    InputState,
};
