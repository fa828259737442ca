//! A small hand-built lane network shared by the integration tests.
//!
//! Three parallel eastbound lanes, from south to north:
//!
//! - `l20` along y = 300 from x = 100 to 140, then bending north-east to (148, 306)
//! - `l21` along y = 303.5 from x = 100 to 140, fed by `l18` and feeding `l99`
//! - `l22` along y = 308 from x = 100 to 140
//!
//! `l10` and `l5` are far away and unrelated to anything.

use std::sync::Arc;

use anyhow::{Context, Result};

use abstutil::Timer;
use geom::Pt2D;
use prediction_map::raw::{RawLane, RawLaneNetwork};
use prediction_map::{MapConfig, PredictionMap, RoadNetwork};

/// Every lane is this wide on each side, except where noted.
pub const HALF_WIDTH: f64 = 1.75;

pub fn raw_network() -> RawLaneNetwork {
    let mut l20 = lane(
        "l20",
        &[(100.0, 300.0), (110.0, 300.0), (140.0, 300.0), (148.0, 306.0)],
    );
    // The lane widens towards its end
    l20.waypoints[3].left_width = 2.0;
    l20.waypoints[3].right_width = 2.0;
    l20.left_neighbors = ids(&["l21"]);

    let mut l21 = lane("l21", &[(100.0, 303.5), (140.0, 303.5)]);
    l21.left_neighbors = ids(&["l22"]);
    l21.right_neighbors = ids(&["l20"]);
    l21.predecessors = ids(&["l18"]);
    l21.successors = ids(&["l99"]);

    let mut l22 = lane("l22", &[(100.0, 308.0), (140.0, 308.0)]);
    l22.right_neighbors = ids(&["l21"]);

    let mut l18 = lane("l18", &[(60.0, 303.5), (100.0, 303.5)]);
    l18.successors = ids(&["l21"]);

    let mut l99 = lane("l99", &[(140.0, 303.5), (180.0, 303.5)]);
    l99.predecessors = ids(&["l21"]);

    let l10 = lane("l10", &[(500.0, 500.0), (540.0, 500.0)]);

    let mut l5 = lane("l5", &[(500.0, 600.0), (540.0, 600.0)]);
    l5.turn_type = 3;

    RawLaneNetwork {
        name: "three parallel lanes".to_string(),
        lanes: vec![l20, l21, l22, l18, l99, l10, l5],
    }
}

pub fn network() -> Result<RoadNetwork> {
    RoadNetwork::create_from_raw(raw_network(), &mut Timer::throwaway())
        .context("building the test network")
}

/// Queries over the test network with the default config.
pub fn prediction_map() -> PredictionMap {
    abstutil::logger::setup_for_tests();
    match network() {
        Ok(network) => PredictionMap::new(Arc::new(network), MapConfig::default()),
        Err(err) => panic!("{:#}", err),
    }
}

/// A path under the system temp directory that no other test uses.
pub fn scratch_path(name: &str) -> String {
    std::env::temp_dir()
        .join(format!("prediction_map_tests_{}_{}", std::process::id(), name))
        .to_string_lossy()
        .into_owned()
}

fn lane(id: &str, pts: &[(f64, f64)]) -> RawLane {
    let pts: Vec<Pt2D> = pts.iter().map(|(x, y)| Pt2D::new(*x, *y)).collect();
    RawLane::from_centerline(id, &pts, HALF_WIDTH, HALF_WIDTH)
}

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| id.to_string()).collect()
}
