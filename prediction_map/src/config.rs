use std::f64::consts::FRAC_PI_2;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use abstutil::Timer;
use geom::Angle;

use crate::BoundaryExtrapolation;

/// Lanes whose heading differs from the query heading by more than this aren't considered
/// matches in radius searches.
pub const DEFAULT_MAX_LANE_ANGLE_DIFF: f64 = FRAC_PI_2;

/// If set, overrides the map file from the config.
pub const MAP_FILE_ENV_VAR: &str = "PREDICTION_MAP_FILE";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// The serialized `RawLaneNetwork`. Read as JSON if it ends with `.json`, otherwise bincode.
    pub map_file: String,
    /// In radians. Used by `on_lane` and `nearby_lanes_by_current_lanes` to compare the query
    /// heading against the lane's heading at the projected point.
    pub max_lane_angle_diff: f64,
    pub boundary_extrapolation: BoundaryExtrapolation,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            map_file: "data/maps/lanes.bin".to_string(),
            max_lane_angle_diff: DEFAULT_MAX_LANE_ANGLE_DIFF,
            boundary_extrapolation: BoundaryExtrapolation::StraightLine,
        }
    }
}

impl MapConfig {
    pub fn new<I: Into<String>>(map_file: I) -> MapConfig {
        MapConfig {
            map_file: map_file.into(),
            ..Default::default()
        }
    }

    /// Reads a JSON config. Missing fields take their defaults.
    pub fn load(path: &str) -> Result<MapConfig> {
        let mut timer = Timer::new(format!("load config {}", path));
        abstutil::maybe_read_json(path, &mut timer)
    }

    /// The defaults, except for the map file if the environment overrides it.
    pub fn from_env() -> MapConfig {
        let mut cfg = MapConfig::default();
        cfg.apply_env();
        cfg
    }

    pub fn apply_env(&mut self) {
        if let Ok(path) = std::env::var(MAP_FILE_ENV_VAR) {
            if !path.is_empty() {
                info!("Using map file {} from {}", path, MAP_FILE_ENV_VAR);
                self.map_file = path;
            }
        }
    }

    pub fn max_lane_angle_diff(&self) -> Angle {
        Angle::new_rads(self.max_lane_angle_diff)
    }
}
