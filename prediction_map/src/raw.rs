//! The loader-facing description of a lane network. Whatever parses the HD map produces one of
//! these; `RoadNetwork::create_from_raw` validates it and builds everything queries need.

use serde::{Deserialize, Serialize};

use geom::Pt2D;

use crate::NO_TURN;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLaneNetwork {
    pub name: String,
    pub lanes: Vec<RawLane>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawLane {
    pub id: String,
    pub waypoints: Vec<RawWaypoint>,
    #[serde(default = "default_turn_type")]
    pub turn_type: i32,
    #[serde(default)]
    pub predecessors: Vec<String>,
    #[serde(default)]
    pub successors: Vec<String>,
    #[serde(default)]
    pub left_neighbors: Vec<String>,
    #[serde(default)]
    pub right_neighbors: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawWaypoint {
    /// Arc length in meters
    pub s: f64,
    pub x: f64,
    pub y: f64,
    /// Radians, counter-clockwise from the positive x axis
    pub heading: f64,
    pub left_width: f64,
    pub right_width: f64,
}

fn default_turn_type() -> i32 {
    NO_TURN
}

impl RawLane {
    /// Samples a lane from bare centerline points with constant widths, the way a map without
    /// explicit samples would be loaded. Arc length accumulates the straight-line distance between
    /// points. Each waypoint takes the heading of the segment leaving it, and the last waypoint
    /// keeps the heading of the last segment.
    pub fn from_centerline<I: Into<String>>(
        id: I,
        pts: &[Pt2D],
        left_width: f64,
        right_width: f64,
    ) -> RawLane {
        let mut waypoints = Vec::with_capacity(pts.len());
        let mut dist_along = 0.0;
        for (idx, pt) in pts.iter().enumerate() {
            if idx > 0 {
                dist_along += pts[idx - 1].raw_dist_to(*pt);
            }
            let heading = if idx + 1 < pts.len() {
                pt.angle_to(pts[idx + 1])
            } else if idx > 0 {
                pts[idx - 1].angle_to(*pt)
            } else {
                geom::Angle::ZERO
            };
            waypoints.push(RawWaypoint {
                s: dist_along,
                x: pt.x(),
                y: pt.y(),
                heading: heading.radians(),
                left_width,
                right_width,
            });
        }

        RawLane {
            id: id.into(),
            waypoints,
            turn_type: NO_TURN,
            predecessors: Vec::new(),
            successors: Vec::new(),
            left_neighbors: Vec::new(),
            right_neighbors: Vec::new(),
        }
    }
}
