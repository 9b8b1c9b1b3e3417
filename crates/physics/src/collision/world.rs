//! The static collision world.
//!
//! Levels register their geometry once at load time; afterwards the world
//! is immutable and every query is read-only, so it can be shared freely
//! with anything that needs to look at the environment.

use glam::Vec3;
use parry3d::math::{Isometry, Point, Real, Vector};
use parry3d::query::{contact, Ray, RayCast};
use parry3d::shape::SharedShape;

use super::flags::{ContentFlags, SurfaceFlags};
use super::query::{BodyShape, RayHit, SweepResult};

/// Penetration deeper than this counts as overlapping. A body resting flush
/// against a surface is not "inside" it.
const PENETRATION_SLOP: f32 = 1.0e-4;

/// Upper bound on coarse sweep samples for a single motion.
const MAX_SWEEP_SAMPLES: usize = 64;

/// Bisection steps when pinning down the exact blocking point.
const SWEEP_REFINE_STEPS: usize = 12;

/// How many blocking planes a single move may slide along.
const MAX_SLIDE_PASSES: usize = 4;

/// One piece of static collision geometry.
#[derive(Debug, Clone)]
pub struct Brush {
    /// Unique identifier within the world.
    pub id: u32,
    /// The collision shape.
    shape: SharedShape,
    /// Position and orientation in world space.
    transform: Isometry<Real>,
    /// Content flags used for query filtering.
    pub contents: ContentFlags,
    /// Surface flags reported back on ray hits.
    pub surface: SurfaceFlags,
}

/// The collision world: a flat list of flagged brushes.
///
/// Immutable once level loading finishes. Queries walk every brush; the
/// worlds involved are a few dozen brushes at most, which keeps the walk
/// cheaper than maintaining an acceleration structure would be.
#[derive(Debug, Default)]
pub struct SceneWorld {
    brushes: Vec<Brush>,
    next_id: u32,
}

impl SceneWorld {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an axis-aligned box brush.
    ///
    /// `center` and `half_extents` are in world space. Returns the brush id.
    pub fn add_box(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        contents: ContentFlags,
        surface: SurfaceFlags,
    ) -> u32 {
        self.push_brush(
            SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z),
            Isometry::translation(center.x, center.y, center.z),
            contents,
            surface,
        )
    }

    /// Add a box brush pitched about the world X axis.
    ///
    /// This is how ramps and stair runs are modeled; their top faces report
    /// tilted normals, which is what slope detection keys off.
    pub fn add_ramp(
        &mut self,
        center: Vec3,
        half_extents: Vec3,
        pitch: f32,
        contents: ContentFlags,
        surface: SurfaceFlags,
    ) -> u32 {
        self.push_brush(
            SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z),
            Isometry::new(
                Vector::new(center.x, center.y, center.z),
                Vector::x() * pitch,
            ),
            contents,
            surface,
        )
    }

    fn push_brush(
        &mut self,
        shape: SharedShape,
        transform: Isometry<Real>,
        contents: ContentFlags,
        surface: SurfaceFlags,
    ) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        self.brushes.push(Brush {
            id,
            shape,
            transform,
            contents,
            surface,
        });
        id
    }

    /// Number of brushes in the world.
    pub fn brush_count(&self) -> usize {
        self.brushes.len()
    }

    /// Whether any brush carries one of the given content flags.
    pub fn has_contents(&self, mask: ContentFlags) -> bool {
        self.brushes.iter().any(|b| mask.intersects(b.contents))
    }

    /// Cast a ray and return the closest filtered hit.
    ///
    /// Returns `None` when nothing within `max_distance` matches the mask.
    /// A degenerate direction also returns `None`.
    pub fn raycast(
        &self,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        mask: ContentFlags,
    ) -> Option<RayHit> {
        let dir = direction.normalize_or_zero();
        if dir.length_squared() < 0.5 {
            return None;
        }

        let ray = Ray::new(
            Point::new(origin.x, origin.y, origin.z),
            Vector::new(dir.x, dir.y, dir.z),
        );

        let mut closest: Option<RayHit> = None;
        for brush in &self.brushes {
            if !mask.intersects(brush.contents) {
                continue;
            }

            let Some(hit) =
                brush
                    .shape
                    .cast_ray_and_get_normal(&brush.transform, &ray, max_distance, true)
            else {
                continue;
            };

            let distance = hit.time_of_impact;
            if closest.as_ref().map_or(true, |c| distance < c.distance) {
                closest = Some(RayHit {
                    point: origin + dir * distance,
                    normal: Vec3::new(hit.normal.x, hit.normal.y, hit.normal.z),
                    distance,
                    contents: brush.contents,
                    surface: brush.surface,
                });
            }
        }

        closest
    }

    /// Check whether a body at `position` penetrates any matching brush.
    ///
    /// Resting flush against a surface does not count; the body has to
    /// actually be inside the volume.
    pub fn overlaps(&self, position: Vec3, body: BodyShape, mask: ContentFlags) -> bool {
        let shape = body_collider(body);
        let transform = body_transform(position, body);

        for brush in &self.brushes {
            if !mask.intersects(brush.contents) {
                continue;
            }
            if let Ok(Some(c)) = contact(&transform, &*shape, &brush.transform, &*brush.shape, 0.0)
            {
                if c.dist < -PENETRATION_SLOP {
                    return true;
                }
            }
        }

        false
    }

    /// Sweep a body from `start` to `end`, stopping at the first blocker.
    ///
    /// The motion is sampled coarsely first so thin geometry cannot be
    /// skipped, then the exact blocking point is refined by bisection.
    pub fn sweep(&self, start: Vec3, end: Vec3, body: BodyShape, mask: ContentFlags) -> SweepResult {
        let delta = end - start;
        let distance = delta.length();
        if distance < 1.0e-6 {
            return SweepResult::clear(start);
        }

        if self.overlaps(start, body, mask) {
            // Already stuck before moving. Report a zero-length sweep with a
            // push-out normal so the caller can stop cleanly.
            return SweepResult {
                fraction: 0.0,
                end_position: start,
                normal: Some(self.push_out_normal(start, body, mask, delta / distance)),
            };
        }

        // Sample tightly enough that nothing thinner than half the body can
        // slip between two samples.
        let step = (body.radius() * 0.5).max(0.05);
        let samples = ((distance / step).ceil() as usize).clamp(1, MAX_SWEEP_SAMPLES);

        let mut clear_t = 0.0_f32;
        let mut blocked_t = None;
        for i in 1..=samples {
            let t = i as f32 / samples as f32;
            if self.overlaps(start + delta * t, body, mask) {
                blocked_t = Some(t);
                break;
            }
            clear_t = t;
        }

        let Some(mut hi) = blocked_t else {
            return SweepResult::clear(end);
        };

        let mut lo = clear_t;
        for _ in 0..SWEEP_REFINE_STEPS {
            let mid = (lo + hi) * 0.5;
            if self.overlaps(start + delta * mid, body, mask) {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        SweepResult {
            fraction: lo,
            end_position: start + delta * lo,
            normal: Some(self.push_out_normal(start + delta * hi, body, mask, delta / distance)),
        }
    }

    /// Move a body by `displacement`, sliding along whatever it hits.
    ///
    /// The blocked part of the motion is projected onto each blocking plane
    /// in turn, so the body glides along walls and slopes instead of
    /// sticking to them. Returns the resolved position.
    pub fn move_with_collisions(
        &self,
        start: Vec3,
        body: BodyShape,
        displacement: Vec3,
        mask: ContentFlags,
    ) -> Vec3 {
        let mut position = start;
        let mut remaining = displacement;

        for _ in 0..MAX_SLIDE_PASSES {
            if remaining.length_squared() < 1.0e-10 {
                break;
            }

            let sweep = self.sweep(position, position + remaining, body, mask);
            position = sweep.end_position;
            if !sweep.blocked() {
                break;
            }
            let Some(normal) = sweep.normal else {
                break;
            };

            // Keep only the along-surface component of what is left.
            let leftover = remaining * (1.0 - sweep.fraction);
            remaining = leftover - normal * leftover.dot(normal);
        }

        position
    }

    /// Direction that pushes a penetrating body back out of the world.
    ///
    /// Falls back to opposing the motion horizontally, then to world up,
    /// when the contact solver cannot produce a direction.
    fn push_out_normal(
        &self,
        position: Vec3,
        body: BodyShape,
        mask: ContentFlags,
        motion_dir: Vec3,
    ) -> Vec3 {
        let shape = body_collider(body);
        let transform = body_transform(position, body);

        let mut push = Vec3::ZERO;
        for brush in &self.brushes {
            if !mask.intersects(brush.contents) {
                continue;
            }
            if let Ok(Some(c)) = contact(&transform, &*shape, &brush.transform, &*brush.shape, 0.0)
            {
                let depth = -c.dist;
                if depth > 0.0 {
                    push += Vec3::new(c.normal2.x, c.normal2.y, c.normal2.z) * depth;
                }
            }
        }

        if push.length_squared() > 1.0e-8 {
            return push.normalize();
        }

        let horizontal = Vec3::new(-motion_dir.x, 0.0, -motion_dir.z);
        if horizontal.length_squared() > 0.1 {
            horizontal.normalize()
        } else {
            Vec3::Y
        }
    }
}

/// Build the parry collider for a body shape.
fn body_collider(body: BodyShape) -> SharedShape {
    match body {
        BodyShape::Capsule { radius, height } => {
            let cylinder_half_height = (height - 2.0 * radius).max(0.0) / 2.0;
            SharedShape::capsule_y(cylinder_half_height, radius)
        }
        BodyShape::Box { half_extents } => {
            SharedShape::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }
    }
}

/// Transform placing a bottom-centered body at `position`.
fn body_transform(position: Vec3, body: BodyShape) -> Isometry<Real> {
    let lift = body.height() / 2.0;
    Isometry::translation(position.x, position.y + lift, position.z)
}
