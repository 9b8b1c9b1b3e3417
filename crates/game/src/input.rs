//! Input normalization.
//!
//! Raw key and touch state arrives as booleans, one per direction plus jump
//! and dash. The normalizer turns those into the smoothed [`InputState`]
//! snapshot the controller consumes: the raw axes snap between -1, 0, and 1
//! immediately, while the smoothed values ease toward them so the character
//! accelerates into and out of movement instead of stepping.

use festival_physics::InputState;
use serde::{Deserialize, Serialize};

/// Exponential smoothing factor applied to each axis every tick.
///
/// The smoothed value closes 20% of the remaining gap per tick, so release
/// and re-press feel symmetric and convergence is geometric.
pub const AXIS_SMOOTHING: f32 = 0.2;

/// Raw pressed-state for one tick.
///
/// Keyboard and touch controls both fill this in; the normalizer does not
/// care which device a flag came from.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RawInput {
    /// Move away from the camera.
    pub up: bool,
    /// Move toward the camera.
    pub down: bool,
    /// Strafe left.
    pub left: bool,
    /// Strafe right.
    pub right: bool,
    /// Jump is held.
    pub jump: bool,
    /// Dash is held.
    pub dash: bool,
}

impl RawInput {
    /// Whether any directional key is held.
    pub fn any_direction(&self) -> bool {
        self.up || self.down || self.left || self.right
    }
}

/// Converts raw booleans into smoothed per-tick input.
///
/// Owns the smoothed axis values, the only input data that persists across
/// ticks. While paused, every key reads as released, so the axes snap to
/// zero and no action flags pass through.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputNormalizer {
    horizontal: f32,
    vertical: f32,
    paused: bool,
}

impl InputNormalizer {
    /// Create a normalizer with both axes at rest.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gate all input. Axes reset the next time `sample` runs.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Whether input is currently gated.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Advance the smoothing by one tick and produce the input snapshot.
    ///
    /// Opposing keys do not cancel: up wins over down and left wins over
    /// right, matching how the shipped controls resolved them.
    pub fn sample(&mut self, raw: &RawInput) -> InputState {
        let vertical_axis = if raw.up && !self.paused {
            self.vertical = lerp(self.vertical, 1.0, AXIS_SMOOTHING);
            1.0
        } else if raw.down && !self.paused {
            self.vertical = lerp(self.vertical, -1.0, AXIS_SMOOTHING);
            -1.0
        } else {
            self.vertical = 0.0;
            0.0
        };

        let horizontal_axis = if raw.left && !self.paused {
            self.horizontal = lerp(self.horizontal, -1.0, AXIS_SMOOTHING);
            -1.0
        } else if raw.right && !self.paused {
            self.horizontal = lerp(self.horizontal, 1.0, AXIS_SMOOTHING);
            1.0
        } else {
            self.horizontal = 0.0;
            0.0
        };

        InputState {
            horizontal: self.horizontal,
            vertical: self.vertical,
            horizontal_axis,
            vertical_axis,
            jump_held: raw.jump && !self.paused,
            dash_held: raw.dash && !self.paused,
        }
    }
}

fn lerp(from: f32, to: f32, amount: f32) -> f32 {
    from + (to - from) * amount
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hold_up() -> RawInput {
        RawInput {
            up: true,
            ..Default::default()
        }
    }

    #[test]
    fn held_axis_converges_geometrically() {
        let mut normalizer = InputNormalizer::new();

        let mut input = normalizer.sample(&hold_up());
        assert_eq!(input.vertical_axis, 1.0);
        assert!((input.vertical - 0.2).abs() < 1.0e-6);

        for _ in 0..29 {
            input = normalizer.sample(&hold_up());
        }
        // After thirty ticks the smoothed value is within a hundredth of
        // full deflection but never exactly there.
        assert!(input.vertical > 0.99);
        assert!(input.vertical < 1.0);
    }

    #[test]
    fn release_snaps_axis_to_zero() {
        let mut normalizer = InputNormalizer::new();
        for _ in 0..10 {
            normalizer.sample(&hold_up());
        }

        let input = normalizer.sample(&RawInput::default());
        assert_eq!(input.vertical, 0.0);
        assert_eq!(input.vertical_axis, 0.0);
    }

    #[test]
    fn horizontal_and_vertical_are_independent() {
        let mut normalizer = InputNormalizer::new();
        let raw = RawInput {
            up: true,
            right: true,
            ..Default::default()
        };

        let input = normalizer.sample(&raw);
        assert_eq!(input.vertical_axis, 1.0);
        assert_eq!(input.horizontal_axis, 1.0);
        assert!(input.vertical > 0.0);
        assert!(input.horizontal > 0.0);

        // Dropping one axis does not disturb the other.
        let input = normalizer.sample(&hold_up());
        assert_eq!(input.horizontal, 0.0);
        assert!(input.vertical > input.horizontal);
    }

    #[test]
    fn opposing_keys_favor_up_and_left() {
        let mut normalizer = InputNormalizer::new();
        let raw = RawInput {
            up: true,
            down: true,
            left: true,
            right: true,
            ..Default::default()
        };

        let input = normalizer.sample(&raw);
        assert_eq!(input.vertical_axis, 1.0);
        assert_eq!(input.horizontal_axis, -1.0);
    }

    #[test]
    fn action_flags_are_level_triggered() {
        let mut normalizer = InputNormalizer::new();
        let raw = RawInput {
            jump: true,
            dash: true,
            ..Default::default()
        };

        // Held flags stay true every tick; edge detection is the
        // controller's job.
        for _ in 0..3 {
            let input = normalizer.sample(&raw);
            assert!(input.jump_held);
            assert!(input.dash_held);
        }

        let input = normalizer.sample(&RawInput::default());
        assert!(!input.jump_held);
        assert!(!input.dash_held);
    }

    #[test]
    fn pause_gates_everything() {
        let mut normalizer = InputNormalizer::new();
        for _ in 0..10 {
            normalizer.sample(&hold_up());
        }

        normalizer.set_paused(true);
        let raw = RawInput {
            up: true,
            jump: true,
            dash: true,
            ..Default::default()
        };
        let input = normalizer.sample(&raw);

        assert_eq!(input.vertical, 0.0);
        assert_eq!(input.vertical_axis, 0.0);
        assert!(!input.jump_held);
        assert!(!input.dash_held);

        normalizer.set_paused(false);
        let input = normalizer.sample(&raw);
        assert_eq!(input.vertical_axis, 1.0);
        assert!(input.jump_held);
    }
}
