//! Content and surface flags for collision filtering.
//!
//! Brushes carry an explicit pair of flags instead of being looked up by
//! name. Queries filter on content flags; surface flags describe how the
//! character may interact with a surface it touched.

use serde::{Deserialize, Serialize};

/// Content flags describe what kind of volume a brush is.
///
/// Movement traces pass a mask so they only collide with what matters to
/// them. The void volume never blocks movement; it is found with overlap
/// queries instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ContentFlags(pub u32);

impl ContentFlags {
    /// Empty space.
    pub const EMPTY: Self = Self(0);

    /// Solid, walkable world geometry. Blocks movement and ground rays.
    pub const SOLID: Self = Self(1 << 0);

    /// The fall-recovery region below the playfield. Non-blocking.
    pub const VOID: Self = Self(1 << 1);

    /// Mask used by every character movement and ground query.
    pub const MASK_WALKABLE: Self = Self(Self::SOLID.0);

    /// Check if all of the given flags are set.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given flags are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }
}

impl std::ops::BitOr for ContentFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Surface flags describe properties of the face a query hit.
///
/// The controller treats a tilted hit on a [`SurfaceFlags::STAIR`] surface
/// as standing ground even when the direct downward ray misses, so ramps
/// and stair runs never put the character into a falling state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SurfaceFlags(pub u32);

impl SurfaceFlags {
    /// No special properties.
    pub const NONE: Self = Self(0);

    /// Stair or ramp surface. Sloped hits still count as ground.
    pub const STAIR: Self = Self(1 << 0);

    /// Check if all of the given flags are set.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl std::ops::BitOr for SurfaceFlags {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_flag_operations() {
        let combined = ContentFlags::SOLID | ContentFlags::VOID;
        assert!(combined.contains(ContentFlags::SOLID));
        assert!(combined.contains(ContentFlags::VOID));
        assert!(combined.intersects(ContentFlags::SOLID));
        assert!(!ContentFlags::EMPTY.intersects(combined));
    }

    #[test]
    fn walkable_mask_excludes_the_void() {
        let mask = ContentFlags::MASK_WALKABLE;
        assert!(mask.contains(ContentFlags::SOLID));
        assert!(!mask.intersects(ContentFlags::VOID));
    }

    #[test]
    fn surface_stair_flag() {
        let surface = SurfaceFlags::STAIR;
        assert!(surface.contains(SurfaceFlags::STAIR));
        assert!(SurfaceFlags::NONE.contains(SurfaceFlags::NONE));
        assert!(!SurfaceFlags::NONE.contains(SurfaceFlags::STAIR));
    }
}
