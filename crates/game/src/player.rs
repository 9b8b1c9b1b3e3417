//! The player entity.
//!
//! A thin wrapper around the physics [`CharacterState`]. Collaborators
//! (camera follow, animation binding, HUD) read through these accessors;
//! only the character controller writes the state during a tick.

use festival_physics::{AnimationState, CharacterState};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// The playable character.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    /// Movement state owned by the character controller during ticks.
    pub state: CharacterState,
}

impl Player {
    /// Create a player with a fresh character state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feet position in world space.
    #[inline]
    pub fn position(&self) -> Vec3 {
        self.state.position
    }

    /// Facing orientation.
    #[inline]
    pub fn orientation(&self) -> Quat {
        self.state.orientation
    }

    /// Animation selected for the current tick.
    #[inline]
    pub fn animation(&self) -> AnimationState {
        self.state.animation
    }

    /// Standing on ground.
    #[inline]
    pub fn grounded(&self) -> bool {
        self.state.grounded
    }

    /// Descending after a jump apex.
    #[inline]
    pub fn falling(&self) -> bool {
        self.state.falling
    }

    /// Mid-jump, not yet landed.
    #[inline]
    pub fn jumped(&self) -> bool {
        self.state.jumped
    }

    /// Air dash in progress.
    #[inline]
    pub fn is_dashing(&self) -> bool {
        self.state.is_dashing()
    }

    /// Teleport back to the last grounded position.
    ///
    /// The safety net for geometry gaps: motion stops, fall flags clear,
    /// and the next tick's ground rays take over from there.
    pub fn recover_to_last_ground(&mut self) {
        self.state.position = self.state.last_ground_pos;
        self.state.gravity = Vec3::ZERO;
        self.state.falling = false;
        self.state.jumped = false;
    }
}
