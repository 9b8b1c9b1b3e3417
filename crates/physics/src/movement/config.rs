//! Movement configuration.
//!
//! All tunables for the character controller live here. The defaults are
//! the shipped game feel; note the mixed units. Planar speed and the jump
//! impulse are displacements per simulation tick, while gravity accumulates
//! scaled by the tick's delta time, so the host runs a fixed step.

use serde::{Deserialize, Serialize};

use crate::collision::BodyShape;

/// Configuration for the character controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    // ========================================================================
    // Movement
    // ========================================================================
    /// Planar movement speed (units per tick at full input).
    pub player_speed: f32,

    /// Upward impulse applied on jump (units per tick). Also bounds the
    /// terminal fall speed: accumulated gravity is clamped to its negation.
    pub jump_force: f32,

    /// Gravity acceleration (units per second, negative is down).
    pub gravity: f32,

    /// Turn rate gain for facing interpolation (per second).
    pub rotation_rate: f32,

    // ========================================================================
    // Dash
    // ========================================================================
    /// Planar speed multiplier while a dash is active.
    pub dash_factor: f32,

    /// How many ticks a dash lasts.
    pub dash_ticks: u32,

    // ========================================================================
    // Ground and slope sensing
    // ========================================================================
    /// Height above the feet where the downward rays start.
    pub ground_ray_lift: f32,

    /// Length of the direct downward ground ray.
    pub ground_ray_length: f32,

    /// Planar offset of the four slope-sensing rays.
    pub slope_ray_offset: f32,

    /// Length of the slope-sensing rays. Longer than the ground ray so a
    /// ramp falling away under the character is still seen.
    pub slope_ray_length: f32,

    // ========================================================================
    // Body
    // ========================================================================
    /// Capsule radius used for collision resolution.
    pub body_radius: f32,

    /// Capsule height used for collision resolution.
    pub body_height: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            player_speed: 0.45,
            jump_force: 0.80,
            gravity: -2.8,
            rotation_rate: 10.0,

            dash_factor: 2.5,
            dash_ticks: 10,

            ground_ray_lift: 0.5,
            ground_ray_length: 0.6,
            slope_ray_offset: 0.25,
            slope_ray_length: 1.5,

            body_radius: 0.5,
            body_height: 2.0,
        }
    }
}

impl ControllerConfig {
    /// The collision body described by this configuration.
    pub fn body(&self) -> BodyShape {
        BodyShape::Capsule {
            radius: self.body_radius,
            height: self.body_height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = ControllerConfig::default();
        assert!(config.player_speed > 0.0);
        assert!(config.jump_force > 0.0);
        assert!(config.gravity < 0.0);
        assert!(config.dash_factor > 1.0);
        assert!(config.dash_ticks > 0);
        // The ground ray must reach below the feet to find the floor.
        assert!(config.ground_ray_length > config.ground_ray_lift);
    }

    #[test]
    fn body_matches_config() {
        let config = ControllerConfig::default();
        match config.body() {
            BodyShape::Capsule { radius, height } => {
                assert_eq!(radius, config.body_radius);
                assert_eq!(height, config.body_height);
            }
            other => panic!("unexpected body shape: {:?}", other),
        }
    }
}
