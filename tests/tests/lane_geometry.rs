use std::sync::Arc;

use geom::{Angle, Distance, Pt2D};
use prediction_map::{status_code, BoundaryExtrapolation, MapConfig, MapError, PredictionMap};
use tests::{network, prediction_map};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}

fn close_pt(pt: Pt2D, x: f64, y: f64) -> bool {
    close(pt.x(), x) && close(pt.y(), y)
}

#[test]
fn projection_onto_lane() {
    let map = prediction_map();
    let l20 = map.lane_by_id("l20").unwrap();

    let (s, l) = map.get_projection(Pt2D::new(110.0, 299.0), l20);
    assert!(close(s.inner_meters(), 10.0));
    assert!(close(l.inner_meters(), -1.0));

    // On the bent part
    let (s, l) = map.get_projection(Pt2D::new(144.0, 303.0), l20);
    assert!(close(s.inner_meters(), 45.0));
    assert!(close(l.inner_meters(), 0.0));

    // Behind the start, the first segment keeps going backwards
    let (s, l) = map.get_projection(Pt2D::new(95.0, 301.0), l20);
    assert!(close(s.inner_meters(), -5.0));
    assert!(close(l.inner_meters(), 1.0));
}

#[test]
fn projection_round_trips() {
    let map = prediction_map();
    let l20 = map.lane_by_id("l20").unwrap();
    for pt in [Pt2D::new(120.0, 300.0), Pt2D::new(144.0, 303.0)] {
        let (s, _) = map.get_projection(pt, l20);
        let back = map.projection_from_lane(Some(l20), s).unwrap();
        assert!(close_pt(back.pt, pt.x(), pt.y()), "{} came back as {}", pt, back.pt);
    }
    assert!(map.projection_from_lane(None, Distance::meters(10.0)).is_none());
}

#[test]
fn extrapolating_past_the_end() {
    let map = prediction_map();
    let l20 = map.lane_by_id("l20").unwrap();
    let end = l20.length();
    assert_eq!(end, Distance::meters(50.0));

    assert_eq!(
        map.heading_on_lane(l20, Distance::meters(1000.0)),
        map.heading_on_lane(l20, end)
    );
    // 950m past (148, 306), heading along (0.8, 0.6)
    let pt = map.position_on_lane(l20, Distance::meters(1000.0));
    assert!(close_pt(pt, 908.0, 876.0), "got {}", pt);

    let before = map.position_on_lane(l20, Distance::meters(-10.0));
    assert!(close_pt(before, 90.0, 300.0), "got {}", before);
    assert_eq!(
        map.heading_on_lane(l20, Distance::meters(-10.0)),
        Angle::ZERO
    );
}

#[test]
fn clamped_extrapolation() -> anyhow::Result<()> {
    let config = MapConfig {
        boundary_extrapolation: BoundaryExtrapolation::Clamp,
        ..Default::default()
    };
    let map = PredictionMap::new(Arc::new(network()?), config);
    let l20 = map.lane_by_id("l20").unwrap();
    assert_eq!(
        map.position_on_lane(l20, Distance::meters(1000.0)),
        Pt2D::new(148.0, 306.0)
    );
    assert_eq!(
        map.position_on_lane(l20, Distance::meters(-3.0)),
        Pt2D::new(100.0, 300.0)
    );
    Ok(())
}

#[test]
fn headings() {
    let map = prediction_map();
    let l20 = map.lane_by_id("l20").unwrap();
    let bend = (6.0f64).atan2(8.0);

    assert_eq!(map.heading_on_lane(l20, Distance::meters(5.0)), Angle::ZERO);
    // Rotates over the segment leading up to the bend
    assert!(close(
        map.heading_on_lane(l20, Distance::meters(25.0)).radians(),
        bend / 2.0
    ));
    assert!(close(
        map.path_heading(l20, Pt2D::new(144.0, 303.0)).radians(),
        bend
    ));
}

#[test]
fn widths() {
    let map = prediction_map();
    let l20 = map.lane_by_id("l20").unwrap();
    assert_eq!(
        map.lane_total_width(l20, Distance::meters(10.0)),
        Distance::meters(3.5)
    );
    assert_eq!(
        map.lane_total_width(l20, Distance::meters(45.0)),
        Distance::meters(3.75)
    );
    assert_eq!(
        map.lane_total_width(l20, Distance::meters(45.0)),
        map.lane_total_width(l20, Distance::meters(45.0))
    );
    assert_eq!(
        map.lane_total_width(l20, Distance::meters(1000.0)),
        Distance::meters(4.0)
    );
}

#[test]
fn smooth_points() {
    let map = prediction_map();

    let (pt, heading) = map
        .smooth_point_from_lane("l20", Distance::meters(10.0), Distance::ZERO)
        .unwrap();
    assert!(close_pt(pt, 110.0, 300.0));
    assert_eq!(heading, Angle::ZERO);

    let (pt, heading) = map
        .smooth_point_from_lane("l20", Distance::meters(10.0), Distance::meters(2.0))
        .unwrap();
    assert!(close_pt(pt, 110.0, 302.0));
    assert_eq!(heading, Angle::ZERO);

    let (pt, _) = map
        .smooth_point_from_lane("l20", Distance::meters(10.0), Distance::meters(-1.0))
        .unwrap();
    assert!(close_pt(pt, 110.0, 299.0));

    let missing = map.smooth_point_from_lane("l500", Distance::meters(10.0), Distance::ZERO);
    assert_eq!(missing, Err(MapError::LaneNotFound("l500".to_string())));
    assert_eq!(status_code(&missing), -1);
}

#[test]
fn points_on_lanes() {
    let map = prediction_map();
    let l20 = map.lane_by_id("l20").unwrap();
    assert!(map.is_point_on_lane(l20, Pt2D::new(110.0, 301.0)));
    assert!(map.is_point_on_lane(l20, Pt2D::new(110.0, 298.5)));
    assert!(!map.is_point_on_lane(l20, Pt2D::new(110.0, 302.0)));
    assert!(!map.is_point_on_lane(l20, Pt2D::new(90.0, 300.0)));

    assert!(map.is_projection_approximate_within_lane(Pt2D::new(120.0, 300.0), "l20"));
    assert!(map.is_projection_approximate_within_lane(Pt2D::new(120.0, 350.0), "l20"));
    assert!(!map.is_projection_approximate_within_lane(Pt2D::new(90.0, 300.0), "l20"));
    assert!(!map.is_projection_approximate_within_lane(Pt2D::new(200.0, 300.0), "l20"));
    assert!(!map.is_projection_approximate_within_lane(Pt2D::new(120.0, 300.0), "nope"));
}
