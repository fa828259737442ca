//! Radius searches for lanes near a point.

use std::collections::BTreeSet;

use geom::{Angle, Distance, Pt2D};

use crate::topology::{is_related, Relation};
use crate::{Lane, LaneID, RoadNetwork};

/// Every lane whose centerline passes within `radius` of `pt`, with the distance to it. If a
/// heading is given, the lane's heading where `pt` projects onto it must be within
/// `max_angle_diff` of it. Sorted by distance, then by ID.
pub fn lanes_within<'a>(
    network: &'a RoadNetwork,
    pt: Pt2D,
    heading: Option<Angle>,
    radius: Distance,
    max_angle_diff: Angle,
) -> Vec<(&'a Lane, Distance)> {
    let mut results = Vec::new();
    if !pt.is_finite() {
        debug!("No lanes are near {}", pt);
        return results;
    }
    for (idx, _, dist) in network.closest().all_within(pt, radius) {
        let lane = match network.get_l(idx) {
            Some(lane) => lane,
            None => continue,
        };
        if let Some(heading) = heading {
            let (s, _) = lane.project_pt(pt);
            if !lane.heading_at(s).approx_eq(heading, max_angle_diff) {
                continue;
            }
        }
        results.push((lane, dist));
    }
    sort_nearest_first(&mut results);
    results
}

/// Lanes near `pt` that match `heading`, and that continue from one of the previous lanes (the
/// same lane, or one of their successors). If `require_containment` is set, `pt` must also lie
/// within the lane's width.
pub fn on_lane<'a>(
    network: &'a RoadNetwork,
    prev_lanes: &[&Lane],
    pt: Pt2D,
    heading: Angle,
    radius: Distance,
    max_angle_diff: Angle,
    require_containment: bool,
) -> Vec<&'a Lane> {
    lanes_within(network, pt, Some(heading), radius, max_angle_diff)
        .into_iter()
        .filter(|(lane, _)| {
            is_related(Relation::Identical, Some(*lane), prev_lanes)
                || is_related(Relation::Successor, Some(*lane), prev_lanes)
        })
        .filter(|(lane, _)| !require_containment || lane.contains_pt(pt))
        .map(|(lane, _)| lane)
        .collect()
}

/// With current lanes, finds their left and right neighbors where `pt` projects inside the
/// neighbor's length and within `radius` of its centerline. Without current lanes, falls back to
/// every lane within `radius` that matches `heading`. Either way, nearest first, ties by ID.
pub fn nearby_lanes_by_current_lanes<'a>(
    network: &'a RoadNetwork,
    pt: Pt2D,
    heading: Angle,
    radius: Distance,
    current_lanes: &[&Lane],
    max_angle_diff: Angle,
) -> Vec<&'a Lane> {
    if !pt.is_finite() {
        debug!("No lanes are near {}", pt);
        return Vec::new();
    }
    if current_lanes.is_empty() {
        return lanes_within(network, pt, Some(heading), radius, max_angle_diff)
            .into_iter()
            .map(|(lane, _)| lane)
            .collect();
    }

    let mut seen: BTreeSet<&LaneID> = BTreeSet::new();
    let mut results = Vec::new();
    for current in current_lanes {
        for id in current
            .left_neighbors
            .iter()
            .chain(current.right_neighbors.iter())
        {
            if seen.contains(id) {
                continue;
            }
            let neighbor = match network.lane_by_id(id.as_str()) {
                Some(lane) => lane,
                None => continue,
            };
            let (s, l) = neighbor.project_pt(pt);
            if s < Distance::ZERO || s >= neighbor.length() || l.abs() > radius {
                continue;
            }
            seen.insert(id);
            results.push((neighbor, neighbor.dist_to_centerline(pt)));
        }
    }
    sort_nearest_first(&mut results);
    results.into_iter().map(|(lane, _)| lane).collect()
}

fn sort_nearest_first(lanes: &mut [(&Lane, Distance)]) {
    lanes.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id)));
}
