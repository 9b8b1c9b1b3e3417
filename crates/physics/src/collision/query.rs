//! Query result and shape types for collision queries.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::flags::{ContentFlags, SurfaceFlags};

/// How close to vertical a hit normal must be to count as flat ground.
const UPRIGHT_NORMAL_EPSILON: f32 = 1.0e-4;

/// Result of a ray query that hit something.
///
/// A miss is represented by `Option::None`, never by a sentinel position,
/// so "no ground below" can never be confused with ground at the origin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RayHit {
    /// World-space point where the ray struck the surface.
    pub point: Vec3,

    /// Surface normal at the hit, pointing away from the surface.
    pub normal: Vec3,

    /// Distance from the ray origin to the hit point.
    pub distance: f32,

    /// Content flags of the brush that was hit.
    pub contents: ContentFlags,

    /// Surface flags of the face that was hit.
    pub surface: SurfaceFlags,
}

impl RayHit {
    /// Whether the hit surface faces straight up.
    ///
    /// Slope handling keys off this: a stair surface only counts as a slope
    /// when its normal is tilted away from world up.
    #[inline]
    pub fn normal_is_up(&self) -> bool {
        self.normal.y >= 1.0 - UPRIGHT_NORMAL_EPSILON
    }

    /// Whether the hit landed on a stair or ramp surface.
    #[inline]
    pub fn is_stair(&self) -> bool {
        self.surface.contains(SurfaceFlags::STAIR)
    }
}

/// Result of sweeping a body through the world.
#[derive(Debug, Clone, Copy)]
pub struct SweepResult {
    /// Fraction of the requested motion that was completed, in `[0, 1]`.
    pub fraction: f32,

    /// Body position at the end of the sweep.
    pub end_position: Vec3,

    /// Normal of the blocking surface, if the sweep was cut short.
    pub normal: Option<Vec3>,
}

impl SweepResult {
    /// A sweep that completed the full motion without touching anything.
    pub fn clear(end_position: Vec3) -> Self {
        Self {
            fraction: 1.0,
            end_position,
            normal: None,
        }
    }

    /// Whether the sweep was blocked before completing the motion.
    #[inline]
    pub fn blocked(&self) -> bool {
        self.fraction < 1.0
    }
}

/// Collision body used for sweeps and overlap tests.
///
/// Positions always refer to the bottom-center of the shape (the feet), the
/// same point the character controller tracks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum BodyShape {
    /// A vertical capsule, the usual character body.
    Capsule {
        /// Radius of the cylinder and both end caps.
        radius: f32,
        /// Total height from the bottom cap to the top cap.
        height: f32,
    },

    /// An axis-aligned box, for simple volumes.
    Box {
        /// Half-size along each axis.
        half_extents: Vec3,
    },
}

impl BodyShape {
    /// Height of the shape.
    pub fn height(&self) -> f32 {
        match self {
            Self::Capsule { height, .. } => *height,
            Self::Box { half_extents } => half_extents.y * 2.0,
        }
    }

    /// Widest horizontal extent of the shape.
    pub fn radius(&self) -> f32 {
        match self {
            Self::Capsule { radius, .. } => *radius,
            Self::Box { half_extents } => half_extents.x.max(half_extents.z),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upright_normal_detection() {
        let flat = RayHit {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            distance: 0.5,
            contents: ContentFlags::SOLID,
            surface: SurfaceFlags::NONE,
        };
        assert!(flat.normal_is_up());

        let tilted = RayHit {
            normal: Vec3::new(0.0, 0.9, 0.435).normalize(),
            ..flat
        };
        assert!(!tilted.normal_is_up());
    }

    #[test]
    fn stair_surface_detection() {
        let hit = RayHit {
            point: Vec3::ZERO,
            normal: Vec3::Y,
            distance: 0.5,
            contents: ContentFlags::SOLID,
            surface: SurfaceFlags::STAIR,
        };
        assert!(hit.is_stair());
    }

    #[test]
    fn sweep_clear_is_not_blocked() {
        let sweep = SweepResult::clear(Vec3::new(1.0, 0.0, 0.0));
        assert!(!sweep.blocked());
        assert_eq!(sweep.end_position, Vec3::new(1.0, 0.0, 0.0));
        assert!(sweep.normal.is_none());
    }

    #[test]
    fn body_shape_dimensions() {
        let capsule = BodyShape::Capsule {
            radius: 0.5,
            height: 2.0,
        };
        assert_eq!(capsule.height(), 2.0);
        assert_eq!(capsule.radius(), 0.5);

        let boxy = BodyShape::Box {
            half_extents: Vec3::new(0.3, 1.0, 0.6),
        };
        assert_eq!(boxy.height(), 2.0);
        assert_eq!(boxy.radius(), 0.6);
    }
}
