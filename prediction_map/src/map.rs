//! The queries the prediction module makes against the road network, all in one place.

use std::sync::Arc;

use geom::{Angle, Distance, Pt2D};

use crate::topology::{is_related, Relation};
use crate::{spatial, Lane, LaneID, MapConfig, MapError, PathPoint, RoadNetwork, NO_TURN};

/// Chords between the first and last waypoint shorter than this can't say whether a point is
/// alongside the lane.
pub const MIN_CHORD_LENGTH: Distance = Distance::const_meters(1.0e-3);

/// Read-only queries over a shared `RoadNetwork`. Cheap to clone; every clone sees the same
/// network.
#[derive(Clone)]
pub struct PredictionMap {
    network: Arc<RoadNetwork>,
    config: MapConfig,
}

impl PredictionMap {
    pub fn new(network: Arc<RoadNetwork>, config: MapConfig) -> PredictionMap {
        PredictionMap { network, config }
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn lane_by_id(&self, id: &str) -> Option<&Lane> {
        self.network.lane_by_id(id)
    }

    pub fn all_lanes(&self) -> &Vec<Lane> {
        self.network.all_lanes()
    }

    pub fn num_lanes(&self) -> usize {
        self.network.num_lanes()
    }

    pub fn lane_ids(&self) -> impl Iterator<Item = &LaneID> {
        self.network.lane_ids()
    }

    pub fn position_on_lane(&self, lane: &Lane, s: Distance) -> Pt2D {
        lane.position_at(s, self.config.boundary_extrapolation)
    }

    pub fn heading_on_lane(&self, lane: &Lane, s: Distance) -> Angle {
        lane.heading_at(s)
    }

    pub fn lane_total_width(&self, lane: &Lane, s: Distance) -> Distance {
        lane.total_width_at(s)
    }

    /// The centerline point and heading at `s`. None if there's no lane.
    pub fn projection_from_lane(&self, lane: Option<&Lane>, s: Distance) -> Option<PathPoint> {
        lane.map(|lane| lane.path_point_at(s, self.config.boundary_extrapolation))
    }

    /// Frenet coordinates (s, l) of a point relative to the lane. l is positive to the left.
    /// Panics if the point isn't finite.
    pub fn get_projection(&self, pt: Pt2D, lane: &Lane) -> (Distance, Distance) {
        lane.project_pt(pt)
    }

    /// The lane's heading where the point projects onto it. Panics if the point isn't finite.
    pub fn path_heading(&self, lane: &Lane, pt: Pt2D) -> Angle {
        let (s, _) = lane.project_pt(pt);
        lane.heading_at(s)
    }

    /// The point at (s, l) relative to a lane, with the centerline heading at s. The lateral
    /// offset doesn't change the heading.
    pub fn smooth_point_from_lane(
        &self,
        id: &str,
        s: Distance,
        l: Distance,
    ) -> Result<(Pt2D, Angle), MapError> {
        let lane = self
            .lane_by_id(id)
            .ok_or_else(|| MapError::LaneNotFound(id.to_string()))?;
        let shifted = lane
            .path_point_at(s, self.config.boundary_extrapolation)
            .shift_left(l);
        Ok((shifted.pt, shifted.heading))
    }

    /// Lanes within `radius` of the point whose heading matches, and that continue from one of
    /// the previous lanes. With no previous lanes, there's no continuity requirement.
    pub fn on_lane(
        &self,
        prev_lanes: &[&Lane],
        pt: Pt2D,
        heading: Angle,
        radius: Distance,
    ) -> Vec<&Lane> {
        self.on_lane_within(prev_lanes, pt, heading, radius, false)
    }

    /// Like `on_lane`, but if `require_containment` is set, the point must also lie within the
    /// lane's width.
    pub fn on_lane_within(
        &self,
        prev_lanes: &[&Lane],
        pt: Pt2D,
        heading: Angle,
        radius: Distance,
        require_containment: bool,
    ) -> Vec<&Lane> {
        let lanes = spatial::on_lane(
            &self.network,
            prev_lanes,
            pt,
            heading,
            radius,
            self.config.max_lane_angle_diff(),
            require_containment,
        );
        debug!(
            "on_lane({}, {}) found {} lanes with {} previous",
            pt,
            radius,
            lanes.len(),
            prev_lanes.len()
        );
        lanes
    }

    pub fn nearby_lanes_by_current_lanes(
        &self,
        pt: Pt2D,
        heading: Angle,
        radius: Distance,
        current_lanes: &[&Lane],
    ) -> Vec<&Lane> {
        spatial::nearby_lanes_by_current_lanes(
            &self.network,
            pt,
            heading,
            radius,
            current_lanes,
            self.config.max_lane_angle_diff(),
        )
    }

    /// Is there any lane within `radius` going roughly the direction of `heading`?
    pub fn has_nearby_lane(&self, pt: Pt2D, heading: Angle, radius: Distance) -> bool {
        !spatial::lanes_within(
            &self.network,
            pt,
            Some(heading),
            radius,
            self.config.max_lane_angle_diff(),
        )
        .is_empty()
    }

    /// The closest lane within `radius` going roughly the direction of `heading`.
    pub fn nearest_lane(&self, pt: Pt2D, heading: Angle, radius: Distance) -> Option<&Lane> {
        spatial::lanes_within(
            &self.network,
            pt,
            Some(heading),
            radius,
            self.config.max_lane_angle_diff(),
        )
        .into_iter()
        .next()
        .map(|(lane, _)| lane)
    }

    pub fn is_point_on_lane(&self, lane: &Lane, pt: Pt2D) -> bool {
        lane.contains_pt(pt)
    }

    /// A rough check that ignores the lane's curvature: does the point project onto the straight
    /// chord from the lane's first waypoint to its last? False for unknown lanes.
    pub fn is_projection_approximate_within_lane(&self, pt: Pt2D, id: &str) -> bool {
        let lane = match self.lane_by_id(id) {
            Some(lane) => lane,
            None => return false,
        };
        let start = lane.first_pt();
        let end = lane.last_pt();
        let chord_length = start.raw_dist_to(end);
        if chord_length < MIN_CHORD_LENGTH.inner_meters() {
            return false;
        }
        let projection = ((pt.x() - start.x()) * (end.x() - start.x())
            + (pt.y() - start.y()) * (end.y() - start.y()))
            / chord_length;
        (0.0..=chord_length).contains(&projection)
    }

    pub fn is_identical_lane(&self, lane: Option<&Lane>, references: &[&Lane]) -> bool {
        is_related(Relation::Identical, lane, references)
    }

    pub fn is_successor_lane(&self, lane: Option<&Lane>, references: &[&Lane]) -> bool {
        is_related(Relation::Successor, lane, references)
    }

    pub fn is_predecessor_lane(&self, lane: Option<&Lane>, references: &[&Lane]) -> bool {
        is_related(Relation::Predecessor, lane, references)
    }

    pub fn is_left_neighbor_lane(&self, lane: Option<&Lane>, references: &[&Lane]) -> bool {
        is_related(Relation::LeftNeighbor, lane, references)
    }

    pub fn is_right_neighbor_lane(&self, lane: Option<&Lane>, references: &[&Lane]) -> bool {
        is_related(Relation::RightNeighbor, lane, references)
    }

    /// The lane's turn code, or `NO_TURN` if there's no such lane. Never fails.
    pub fn lane_turn_type(&self, id: &str) -> i32 {
        self.lane_by_id(id)
            .map(|lane| lane.turn_code)
            .unwrap_or(NO_TURN)
    }
}
