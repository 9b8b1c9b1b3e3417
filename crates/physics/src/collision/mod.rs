//! Collision world and queries.
//!
//! The environment is a set of static, flag-tagged brushes. The character
//! controller only ever reads from it: downward rays for ground and slope
//! detection, sweeps for collide-and-slide movement, and overlap tests for
//! trigger volumes.

mod flags;
mod query;
mod world;

pub use flags::{ContentFlags, SurfaceFlags};
pub use query::{BodyShape, RayHit, SweepResult};
pub use world::SceneWorld;
