//! Lane geometry and topology queries for the prediction module: where things are along a lane,
//! which lanes are near a point, and how lanes connect.
//!
//! A `RoadNetwork` is built once from a `RawLaneNetwork` and never changes. `PredictionMap`
//! answers queries over it, and `MapHandle` loads it the first time it's needed.

#[macro_use]
extern crate log;

mod config;
mod error;
mod handle;
mod lane;
mod map;
mod network;
pub mod raw;
mod spatial;
mod topology;
mod turn;

pub use crate::config::{MapConfig, DEFAULT_MAX_LANE_ANGLE_DIFF, MAP_FILE_ENV_VAR};
pub use crate::error::{status_code, MapError};
pub use crate::handle::MapHandle;
pub use crate::lane::{BoundaryExtrapolation, Lane, LaneID, PathPoint, Waypoint};
pub use crate::map::{PredictionMap, MIN_CHORD_LENGTH};
pub use crate::network::{LaneIdx, RoadNetwork};
pub use crate::topology::{is_related, Relation};
pub use crate::turn::{TurnType, NO_TURN};
