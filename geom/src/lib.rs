//! 2D geometry primitives in world-space meters: points, angles, distances, line segments, and a
//! spatial index for finding the closest polylines to a point.

pub use crate::angle::Angle;
pub use crate::bounds::Bounds;
pub use crate::distance::Distance;
pub use crate::find_closest::FindClosest;
pub use crate::line::Line;
pub use crate::pt::Pt2D;

mod angle;
mod bounds;
mod distance;
mod find_closest;
mod line;
mod pt;

/// Some geometry breaks down for segments or offsets smaller than this.
pub const EPSILON_DIST: Distance = Distance::const_meters(0.0001);
