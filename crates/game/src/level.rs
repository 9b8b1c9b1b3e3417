//! Level data: collision geometry, spawn point, and tagged volumes.
//!
//! Everything the simulation needs from a level is resolved here at load
//! time. Nothing is looked up by name during the tick; the void region and
//! camera zones are explicit volumes, and stair surfaces carry a flag on
//! their brushes.

use festival_physics::{ContentFlags, SceneWorld, SurfaceFlags};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Where the character enters the level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Feet position in world space.
    pub position: Vec3,

    /// Initial facing yaw in radians.
    pub facing: f32,
}

/// A volume that retargets the follow camera while the character is inside.
///
/// Levels place these at corners and vista points so the camera swings to a
/// better angle without any scripting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraZone {
    /// Center of the box volume.
    pub center: Vec3,

    /// Half-size of the box volume.
    pub half_extents: Vec3,

    /// Yaw the camera should swing to while inside.
    pub target_yaw: f32,
}

impl CameraZone {
    /// Whether a point is inside the volume.
    pub fn contains(&self, point: Vec3) -> bool {
        let delta = point - self.center;
        delta.x.abs() <= self.half_extents.x
            && delta.y.abs() <= self.half_extents.y
            && delta.z.abs() <= self.half_extents.z
    }
}

/// A playable level.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Static collision world.
    pub world: SceneWorld,

    /// Character spawn point. Required to start a simulation.
    pub spawn: Option<SpawnPoint>,

    /// Camera retargeting volumes.
    pub camera_zones: Vec<CameraZone>,
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            world: SceneWorld::new(),
            spawn: None,
            camera_zones: Vec::new(),
        }
    }

    /// The festival grounds: plaza, stage with a stair ramp, a scattering
    /// of obstacles, and the recovery void underneath everything.
    pub fn festival_grounds() -> Self {
        let mut level = Self::new("festival_grounds", "Festival Grounds");

        // Plaza slab, top face at y = 0.
        level.world.add_box(
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(30.0, 1.0, 30.0),
            ContentFlags::SOLID,
            SurfaceFlags::NONE,
        );

        // Stage platform at the north end, one unit up.
        level.world.add_box(
            Vec3::new(0.0, 0.5, -20.0),
            Vec3::new(6.0, 0.5, 4.0),
            ContentFlags::SOLID,
            SurfaceFlags::NONE,
        );

        // Stair ramp from the plaza onto the stage.
        level.world.add_ramp(
            Vec3::new(0.0, 0.2, -14.5),
            Vec3::new(3.0, 0.3, 2.5),
            0.2,
            ContentFlags::SOLID,
            SurfaceFlags::STAIR,
        );

        // Lantern posts along the plaza edge.
        for x in [-8.0, 8.0] {
            level.world.add_box(
                Vec3::new(x, 1.0, 4.0),
                Vec3::new(0.6, 1.0, 0.6),
                ContentFlags::SOLID,
                SurfaceFlags::NONE,
            );
        }

        // Recovery void well below anywhere the character can stand. It is
        // wider than the plaza so walking off any edge eventually enters it.
        level.world.add_box(
            Vec3::new(0.0, -9.0, 0.0),
            Vec3::new(60.0, 2.0, 60.0),
            ContentFlags::VOID,
            SurfaceFlags::NONE,
        );

        level.spawn = Some(SpawnPoint {
            position: Vec3::new(0.0, 0.0, 10.0),
            facing: std::f32::consts::PI,
        });

        // Swing the camera around to face the stage head-on.
        level.camera_zones.push(CameraZone {
            center: Vec3::new(0.0, 2.0, -19.0),
            half_extents: Vec3::new(7.0, 4.0, 6.0),
            target_yaw: 0.0,
        });

        level
    }

    /// Yaw requested by the first camera zone containing `position`, if any.
    pub fn camera_yaw_at(&self, position: Vec3) -> Option<f32> {
        self.camera_zones
            .iter()
            .find(|zone| zone.contains(position))
            .map(|zone| zone.target_yaw)
    }
}
