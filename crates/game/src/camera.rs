//! Follow camera rig.
//!
//! The rig is a point that trails the character plus a yaw the view hangs
//! off. The controller never sees the rig itself, only the planar
//! [`CameraFrame`] it exposes, so presentation stays decoupled from the
//! physics tick.

use std::f32::consts::{PI, TAU};

use festival_physics::CameraFrame;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Fraction of the distance to the focus the root covers per tick.
const FOLLOW_SMOOTHING: f32 = 0.4;

/// Fraction of the remaining yaw delta covered per tick when a camera zone
/// retargets the rig.
const YAW_SMOOTHING: f32 = 0.05;

/// Height of the focus point above the character's feet.
const FOCUS_HEIGHT: f32 = 2.0;

/// Downward tilt of the view in radians. Chosen so the framing matches the
/// shipped game.
const VIEW_TILT: f32 = 0.593_411_95;

/// Third-person follow camera.
///
/// Starts behind the character (yaw of pi) and eases toward wherever the
/// character goes. Level camera zones can retarget the yaw; the rig swings
/// around smoothly rather than snapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRig {
    root_position: Vec3,
    yaw: f32,
    target_yaw: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self {
            root_position: Vec3::ZERO,
            yaw: PI,
            target_yaw: PI,
        }
    }
}

impl CameraRig {
    /// Create a rig looking at the character from behind.
    pub fn new() -> Self {
        Self::default()
    }

    /// The planar movement basis for this tick.
    pub fn frame(&self) -> CameraFrame {
        CameraFrame::from_yaw(self.yaw)
    }

    /// Move the rig's focus directly onto the character, skipping the ease.
    /// Used once at spawn so the first frames do not swing in from origin.
    pub fn snap_to(&mut self, character_position: Vec3) {
        self.root_position = character_position + Vec3::new(0.0, FOCUS_HEIGHT, 0.0);
    }

    /// Ease toward the character and toward the target yaw. Called once per
    /// tick, after the controller has moved the character.
    pub fn follow(&mut self, character_position: Vec3) {
        let focus = character_position + Vec3::new(0.0, FOCUS_HEIGHT, 0.0);
        self.root_position = self.root_position.lerp(focus, FOLLOW_SMOOTHING);
        self.yaw += shortest_angle_delta(self.yaw, self.target_yaw) * YAW_SMOOTHING;
    }

    /// Ask the rig to swing to a new yaw over the coming ticks.
    pub fn set_target_yaw(&mut self, yaw: f32) {
        self.target_yaw = yaw;
    }

    /// Current position of the follow root.
    pub fn root_position(&self) -> Vec3 {
        self.root_position
    }

    /// Current yaw in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Fixed downward tilt of the view.
    pub fn tilt(&self) -> f32 {
        VIEW_TILT
    }
}

/// Signed shortest rotation from one angle to another, in `[-pi, pi]`.
fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    let mut delta = (to - from) % TAU;
    if delta > PI {
        delta -= TAU;
    } else if delta < -PI {
        delta += TAU;
    }
    delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rig_starts_behind_the_character() {
        let rig = CameraRig::new();
        let frame = rig.frame();
        // Yaw pi looks along -Z.
        assert!((frame.forward + Vec3::Z).length() < 1.0e-6);
        assert!((frame.yaw - PI).abs() < 1.0e-6);
    }

    #[test]
    fn follow_eases_toward_the_focus() {
        let mut rig = CameraRig::new();
        let character = Vec3::new(10.0, 0.0, 5.0);

        rig.follow(character);
        let after_one = rig.root_position();
        // One tick covers 40% of the way.
        assert!((after_one - Vec3::new(4.0, 0.8, 2.0)).length() < 1.0e-4);

        for _ in 0..40 {
            rig.follow(character);
        }
        let focus = character + Vec3::new(0.0, FOCUS_HEIGHT, 0.0);
        assert!((rig.root_position() - focus).length() < 0.01);
    }

    #[test]
    fn snap_skips_the_ease() {
        let mut rig = CameraRig::new();
        rig.snap_to(Vec3::new(3.0, 1.0, -2.0));
        assert_eq!(rig.root_position(), Vec3::new(3.0, 3.0, -2.0));
    }

    #[test]
    fn yaw_swings_toward_target() {
        let mut rig = CameraRig::new();
        rig.set_target_yaw(PI / 2.0);

        for _ in 0..200 {
            rig.follow(Vec3::ZERO);
        }
        assert!((rig.yaw() - PI / 2.0).abs() < 0.01);
    }

    #[test]
    fn yaw_takes_the_short_way_around() {
        // From just below a full turn to just above zero the short path
        // crosses the wrap point instead of unwinding backwards.
        let delta = shortest_angle_delta(TAU - 0.1, 0.1);
        assert!((delta - 0.2).abs() < 1.0e-4);

        let delta = shortest_angle_delta(0.1, TAU - 0.1);
        assert!((delta + 0.2).abs() < 1.0e-4);
    }
}
