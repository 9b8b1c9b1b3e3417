//! Character state and per-tick input structures.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use super::dash::DashState;

/// Visual state selected by the controller each tick.
///
/// Consumed by an animation-binding layer; the controller itself never
/// touches animation clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationState {
    /// Standing still on the ground.
    #[default]
    Idle,
    /// Moving under directional input.
    Run,
    /// Rising after a jump.
    Jump,
    /// Descending toward a landing.
    Land,
    /// Mid-air dash.
    Dash,
}

/// Per-tick snapshot of normalized player input.
///
/// Produced by the input normalizer from raw key and touch booleans. The
/// `*_axis` fields snap between -1, 0, and 1 the moment a key changes; the
/// smoothed fields ease toward them so movement ramps instead of stepping.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Smoothed strafe input in `[-1, 1]`, positive is right.
    pub horizontal: f32,

    /// Smoothed forward input in `[-1, 1]`, positive is forward.
    pub vertical: f32,

    /// Raw strafe direction: -1, 0, or 1.
    pub horizontal_axis: f32,

    /// Raw forward direction: -1, 0, or 1.
    pub vertical_axis: f32,

    /// Jump input is held this tick.
    pub jump_held: bool,

    /// Dash input is held this tick.
    pub dash_held: bool,
}

impl InputState {
    /// Whether any directional input is held.
    #[inline]
    pub fn has_direction(&self) -> bool {
        self.horizontal_axis != 0.0 || self.vertical_axis != 0.0
    }

    /// Combined input magnitude, clamped so diagonals are not faster.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        (self.horizontal.abs() + self.vertical.abs()).min(1.0)
    }
}

/// Planar movement basis supplied by the follow camera each tick.
///
/// The controller steers relative to this frame, so "forward" always means
/// away from the camera regardless of where the rig has swung.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CameraFrame {
    /// Unit vector the camera looks along, flattened to the ground plane.
    pub forward: Vec3,

    /// Unit vector to the camera's right, flattened to the ground plane.
    pub right: Vec3,

    /// Camera yaw in radians. Zero looks along +Z.
    pub yaw: f32,
}

impl CameraFrame {
    /// Build a planar frame from a yaw angle.
    pub fn from_yaw(yaw: f32) -> Self {
        let (sin_yaw, cos_yaw) = yaw.sin_cos();
        Self {
            forward: Vec3::new(sin_yaw, 0.0, cos_yaw),
            right: Vec3::new(cos_yaw, 0.0, -sin_yaw),
            yaw,
        }
    }
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self::from_yaw(0.0)
    }
}

/// Complete movement state for the character.
///
/// Owned and mutated exclusively by the character controller. Everything a
/// collaborator needs (camera follow, animation binding, recovery) is read
/// from here after the tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterState {
    /// World position of the feet.
    pub position: Vec3,

    /// Facing orientation. Yaw only; the controller never pitches or rolls
    /// the body.
    pub orientation: Quat,

    /// Accumulated vertical motion (units per tick). Only `y` is
    /// meaningful; it is clamped to `-jump_force` every tick.
    pub gravity: Vec3,

    /// Whether the character is standing on ground this tick.
    pub grounded: bool,

    /// Last position at which the character was grounded. Fall recovery
    /// teleports back here.
    pub last_ground_pos: Vec3,

    /// Jump charges remaining, 0 or 1. Restored on landing.
    pub jump_charges: u32,

    /// Air-dash state machine.
    pub dash: DashState,

    /// Descending after the apex of a jump.
    pub falling: bool,

    /// A jump was started and the character has not landed since.
    pub jumped: bool,

    /// Animation selected for this tick.
    pub animation: AnimationState,
}

impl Default for CharacterState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            gravity: Vec3::ZERO,
            grounded: false,
            last_ground_pos: Vec3::ZERO,
            jump_charges: 0,
            dash: DashState::default(),
            falling: false,
            jumped: false,
            animation: AnimationState::Idle,
        }
    }
}

impl CharacterState {
    /// Create a state with the feet at `position`.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            last_ground_pos: position,
            ..Default::default()
        }
    }

    /// Current vertical velocity (units per tick, negative is down).
    #[inline]
    pub fn vertical_velocity(&self) -> f32 {
        self.gravity.y
    }

    /// Whether an air dash is currently active.
    #[inline]
    pub fn is_dashing(&self) -> bool {
        self.dash.is_active()
    }
}
