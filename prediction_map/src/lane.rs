use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use geom::{Angle, Distance, Line, Pt2D};

use crate::raw::RawLane;

/// Lanes are identified by the string IDs of the HD map they came from. Only equality and
/// ordering mean anything.
#[derive(Clone, Debug, Eq, Hash, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LaneID(pub String);

impl LaneID {
    pub fn new<I: Into<String>>(id: I) -> LaneID {
        LaneID(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LaneID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Lane {}", self.0)
    }
}

impl Borrow<str> for LaneID {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// One sample of a lane's centerline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    /// Arc length from the start of the lane
    pub dist_along: Distance,
    pub pt: Pt2D,
    /// Always normalized to (-pi, pi]
    pub heading: Angle,
    pub left_width: Distance,
    pub right_width: Distance,
}

/// A position and heading on some lane's centerline.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathPoint {
    pub pt: Pt2D,
    pub heading: Angle,
}

impl PathPoint {
    /// Shifts the point perpendicular to its heading. Positive offsets move left. The heading
    /// doesn't change.
    pub fn shift_left(&self, offset: Distance) -> PathPoint {
        let (sin, cos) = self.heading.sin_cos();
        let l = offset.inner_meters();
        PathPoint {
            pt: self.pt.offset(-sin * l, cos * l),
            heading: self.heading,
        }
    }
}

/// What to do when asking about a distance before the start or past the end of a lane. Heading
/// and width always freeze at the boundary sample; only the position depends on the policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundaryExtrapolation {
    /// Continue in a straight line along the heading of the first or last waypoint.
    StraightLine,
    /// Stay at the first or last waypoint.
    Clamp,
}

impl Default for BoundaryExtrapolation {
    fn default() -> Self {
        BoundaryExtrapolation::StraightLine
    }
}

/// Where some distance along a lane falls relative to its waypoints.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Sample {
    BeforeStart,
    AfterEnd,
    /// Exactly on a waypoint
    At(usize),
    /// Between waypoint idx and idx + 1, with the fraction of the way there
    Between(usize, f64),
}

/// A lane of the HD map: a centerline sampled by waypoints, plus directed edges to other lanes.
/// None of the edges are assumed to be symmetric.
#[derive(Clone, Debug)]
pub struct Lane {
    pub id: LaneID,
    waypoints: Vec<Waypoint>,
    // segments[i] goes from waypoints[i] to waypoints[i + 1]
    segments: Vec<Line>,
    /// An opaque code from the map schema. See `TurnType` for the usual values.
    pub turn_code: i32,

    pub predecessors: BTreeSet<LaneID>,
    pub successors: BTreeSet<LaneID>,
    pub left_neighbors: BTreeSet<LaneID>,
    pub right_neighbors: BTreeSet<LaneID>,
}

impl Lane {
    /// Validates the raw lane. Malformed geometry is an error here, so that queries never have to
    /// deal with it.
    pub fn new(raw: &RawLane) -> Result<Lane> {
        if raw.id.is_empty() {
            bail!("A lane has an empty ID");
        }
        if raw.waypoints.len() < 2 {
            bail!(
                "Lane {} has {} waypoints; it needs at least 2",
                raw.id,
                raw.waypoints.len()
            );
        }

        let mut waypoints = Vec::with_capacity(raw.waypoints.len());
        for (idx, wp) in raw.waypoints.iter().enumerate() {
            let values = [wp.s, wp.x, wp.y, wp.heading, wp.left_width, wp.right_width];
            if values.iter().any(|x| !x.is_finite()) {
                bail!("Lane {} waypoint {} has a non-finite value: {:?}", raw.id, idx, wp);
            }
            if wp.left_width < 0.0 || wp.right_width < 0.0 {
                bail!("Lane {} waypoint {} has a negative width", raw.id, idx);
            }
            waypoints.push(Waypoint {
                dist_along: Distance::meters(wp.s),
                pt: Pt2D::new(wp.x, wp.y),
                heading: Angle::new_rads(wp.heading).normalized(),
                left_width: Distance::meters(wp.left_width),
                right_width: Distance::meters(wp.right_width),
            });
        }

        if waypoints[0].dist_along != Distance::ZERO {
            bail!(
                "Lane {} starts at {}, not 0",
                raw.id,
                waypoints[0].dist_along
            );
        }
        let mut segments = Vec::with_capacity(waypoints.len() - 1);
        for (idx, pair) in waypoints.windows(2).enumerate() {
            if pair[1].dist_along <= pair[0].dist_along {
                bail!(
                    "Lane {} waypoint {} doesn't increase in distance: {} then {}",
                    raw.id,
                    idx + 1,
                    pair[0].dist_along,
                    pair[1].dist_along
                );
            }
            match Line::new(pair[0].pt, pair[1].pt) {
                Some(line) => segments.push(line),
                None => bail!(
                    "Lane {} waypoints {} and {} are at the same position {}",
                    raw.id,
                    idx,
                    idx + 1,
                    pair[0].pt
                ),
            }
        }

        let to_ids = |ids: &Vec<String>| ids.iter().cloned().map(LaneID).collect();
        Ok(Lane {
            id: LaneID(raw.id.clone()),
            waypoints,
            segments,
            turn_code: raw.turn_type,
            predecessors: to_ids(&raw.predecessors),
            successors: to_ids(&raw.successors),
            left_neighbors: to_ids(&raw.left_neighbors),
            right_neighbors: to_ids(&raw.right_neighbors),
        })
    }

    pub fn waypoints(&self) -> &Vec<Waypoint> {
        &self.waypoints
    }

    pub fn first_pt(&self) -> Pt2D {
        self.waypoints[0].pt
    }

    pub fn last_pt(&self) -> Pt2D {
        self.last_waypoint().pt
    }

    fn last_waypoint(&self) -> &Waypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }

    /// The arc length of the last waypoint.
    pub fn length(&self) -> Distance {
        self.last_waypoint().dist_along
    }

    /// The centerline points, in order.
    pub fn center_pts(&self) -> Vec<Pt2D> {
        self.waypoints.iter().map(|wp| wp.pt).collect()
    }

    fn locate(&self, dist_along: Distance) -> Sample {
        if dist_along < self.waypoints[0].dist_along {
            return Sample::BeforeStart;
        }
        if dist_along > self.length() {
            return Sample::AfterEnd;
        }
        // The first waypoint at or past dist_along. Exists, since dist_along <= length.
        let idx = self
            .waypoints
            .partition_point(|wp| wp.dist_along < dist_along);
        if self.waypoints[idx].dist_along == dist_along {
            return Sample::At(idx);
        }
        // dist_along is strictly past the first waypoint, so idx >= 1
        let lower = &self.waypoints[idx - 1];
        let upper = &self.waypoints[idx];
        let fraction = (dist_along - lower.dist_along).inner_meters()
            / (upper.dist_along - lower.dist_along).inner_meters();
        Sample::Between(idx - 1, fraction)
    }

    /// The centerline position at some arc length. Inside the lane, this linearly interpolates
    /// between waypoints. Outside, it follows the extrapolation policy.
    pub fn position_at(&self, dist_along: Distance, policy: BoundaryExtrapolation) -> Pt2D {
        match self.locate(dist_along) {
            Sample::At(idx) => self.waypoints[idx].pt,
            Sample::Between(idx, fraction) => self.segments[idx].percent_along(fraction),
            Sample::BeforeStart => {
                let first = &self.waypoints[0];
                match policy {
                    BoundaryExtrapolation::StraightLine => first
                        .pt
                        .project_away(dist_along - first.dist_along, first.heading),
                    BoundaryExtrapolation::Clamp => first.pt,
                }
            }
            Sample::AfterEnd => {
                let last = self.last_waypoint();
                match policy {
                    BoundaryExtrapolation::StraightLine => last
                        .pt
                        .project_away(dist_along - last.dist_along, last.heading),
                    BoundaryExtrapolation::Clamp => last.pt,
                }
            }
        }
    }

    /// The heading at some arc length. Between waypoints, this rotates the shorter way from one
    /// heading to the next. Outside the lane, it's the heading of the nearest end.
    pub fn heading_at(&self, dist_along: Distance) -> Angle {
        match self.locate(dist_along) {
            Sample::At(idx) => self.waypoints[idx].heading,
            Sample::Between(idx, fraction) => self.waypoints[idx]
                .heading
                .interpolate(self.waypoints[idx + 1].heading, fraction),
            Sample::BeforeStart => self.waypoints[0].heading,
            Sample::AfterEnd => self.last_waypoint().heading,
        }
    }

    /// The (left, right) widths at some arc length, clamped to the nearest end outside the lane.
    pub fn widths_at(&self, dist_along: Distance) -> (Distance, Distance) {
        match self.locate(dist_along) {
            Sample::At(idx) => (
                self.waypoints[idx].left_width,
                self.waypoints[idx].right_width,
            ),
            Sample::Between(idx, fraction) => {
                let lower = &self.waypoints[idx];
                let upper = &self.waypoints[idx + 1];
                (
                    lerp(lower.left_width, upper.left_width, fraction),
                    lerp(lower.right_width, upper.right_width, fraction),
                )
            }
            Sample::BeforeStart => (self.waypoints[0].left_width, self.waypoints[0].right_width),
            Sample::AfterEnd => {
                let last = self.last_waypoint();
                (last.left_width, last.right_width)
            }
        }
    }

    pub fn total_width_at(&self, dist_along: Distance) -> Distance {
        let (left, right) = self.widths_at(dist_along);
        left + right
    }

    pub fn path_point_at(&self, dist_along: Distance, policy: BoundaryExtrapolation) -> PathPoint {
        PathPoint {
            pt: self.position_at(dist_along, policy),
            heading: self.heading_at(dist_along),
        }
    }

    /// Finds the Frenet coordinates (s, l) of a point relative to this lane.
    ///
    /// The point is projected onto every segment of the centerline. The first segment extends
    /// backwards and the last segment forwards as rays, so points beyond either end get an `s`
    /// outside [0, length]. The foot closest to the point wins; on ties, the earlier segment.
    /// `l` is positive when the point is left of the direction of travel.
    ///
    /// Panics if `pt` isn't finite. Check with `Pt2D::is_finite` first.
    pub fn project_pt(&self, pt: Pt2D) -> (Distance, Distance) {
        if !pt.is_finite() {
            panic!("Can't project {} onto {}", pt, self.id);
        }
        let last_idx = self.segments.len() - 1;
        // (distance to the foot, segment index, distance along the segment)
        let mut best: Option<(f64, usize, f64)> = None;
        for (idx, segment) in self.segments.iter().enumerate() {
            let (foot, along) = segment.project_pt(pt, idx == 0, idx == last_idx);
            let dist = foot.raw_dist_to(pt);
            if best.map(|(best_dist, _, _)| dist < best_dist).unwrap_or(true) {
                best = Some((dist, idx, along));
            }
        }
        // There's always at least one segment
        let (_, idx, along) = best.unwrap_or((0.0, 0, 0.0));

        let segment = &self.segments[idx];
        let seg_length = segment.length().inner_meters();
        let lower = &self.waypoints[idx];
        let upper = &self.waypoints[idx + 1];
        let s = if along < 0.0 {
            lower.dist_along.inner_meters() + along
        } else if along > seg_length {
            upper.dist_along.inner_meters() + (along - seg_length)
        } else {
            lower.dist_along.inner_meters()
                + along / seg_length * (upper.dist_along - lower.dist_along).inner_meters()
        };
        let l = segment.signed_offset_of_pt(pt);
        (Distance::meters(s), Distance::meters(l))
    }

    /// The shortest distance from the point to the centerline, without extending either end.
    pub fn dist_to_centerline(&self, pt: Pt2D) -> Distance {
        self.segments
            .iter()
            .map(|segment| segment.dist_to_pt(pt))
            .min()
            .unwrap_or(Distance::ZERO)
    }

    /// True if the point projects within [0, length] and lies within the lane's width on the side
    /// it's on. A non-finite point is never on a lane.
    pub fn contains_pt(&self, pt: Pt2D) -> bool {
        if !pt.is_finite() {
            debug!("{} can't contain {}", self.id, pt);
            return false;
        }
        let (s, l) = self.project_pt(pt);
        if s < Distance::ZERO || s > self.length() {
            return false;
        }
        let (left, right) = self.widths_at(s);
        if l >= Distance::ZERO {
            l <= left
        } else {
            -l <= right
        }
    }
}

fn lerp(from: Distance, to: Distance, fraction: f64) -> Distance {
    from + (to - from) * fraction
}
