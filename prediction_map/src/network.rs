use std::collections::BTreeMap;

use anyhow::{bail, Context, Result};

use abstutil::{basename, prettyprint_usize, Timer};
use geom::{Bounds, FindClosest};

use crate::raw::RawLaneNetwork;
use crate::{Lane, LaneID};

/// An index into `RoadNetwork`'s lanes. Only meaningful for the network that produced it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct LaneIdx(pub usize);

/// Every lane of the map, plus a spatial index over their centerlines. Built once and never
/// changed, so any number of threads can query it at once.
pub struct RoadNetwork {
    name: String,
    lanes: Vec<Lane>,
    ids: BTreeMap<LaneID, LaneIdx>,
    closest: FindClosest<LaneIdx>,
}

impl RoadNetwork {
    /// Reads a `RawLaneNetwork` from a file and builds the network from it.
    pub fn load(path: &str, timer: &mut Timer) -> Result<RoadNetwork> {
        timer.start("load raw lanes");
        let raw: Result<RawLaneNetwork> = abstutil::read_object(path, timer);
        timer.stop("load raw lanes");
        let mut raw = raw.with_context(|| format!("reading lanes from {}", path))?;
        if raw.name.is_empty() {
            raw.name = basename(path);
        }
        RoadNetwork::create_from_raw(raw, timer).with_context(|| format!("building {}", path))
    }

    /// Validates every lane, then indexes them. Any malformed lane fails the whole network.
    pub fn create_from_raw(raw: RawLaneNetwork, timer: &mut Timer) -> Result<RoadNetwork> {
        let mut network = RoadNetwork {
            name: raw.name,
            lanes: Vec::with_capacity(raw.lanes.len()),
            ids: BTreeMap::new(),
            closest: FindClosest::new(),
        };

        timer.start("validate lanes");
        for raw_lane in &raw.lanes {
            let lane = match Lane::new(raw_lane) {
                Ok(lane) => lane,
                Err(err) => {
                    timer.stop("validate lanes");
                    return Err(err);
                }
            };
            let idx = LaneIdx(network.lanes.len());
            if network.ids.insert(lane.id.clone(), idx).is_some() {
                timer.stop("validate lanes");
                bail!("{} is defined more than once", lane.id);
            }
            network.lanes.push(lane);
        }
        timer.stop("validate lanes");

        let mut dangling = 0;
        for lane in &network.lanes {
            for id in lane
                .predecessors
                .iter()
                .chain(lane.successors.iter())
                .chain(lane.left_neighbors.iter())
                .chain(lane.right_neighbors.iter())
            {
                if !network.ids.contains_key(id) {
                    debug!("{} refers to missing {}", lane.id, id);
                    dangling += 1;
                }
            }
        }
        if dangling > 0 {
            timer.warn(format!(
                "{} edges between lanes refer to lanes that aren't in {}; they'll be ignored",
                prettyprint_usize(dangling),
                network.name
            ));
        }

        timer.start("build spatial index");
        for (idx, lane) in network.lanes.iter().enumerate() {
            network.closest.add(LaneIdx(idx), &lane.center_pts());
        }
        timer.stop("build spatial index");

        timer.note(format!(
            "{} has {} lanes with {} centerline segments",
            network.name,
            prettyprint_usize(network.lanes.len()),
            prettyprint_usize(network.closest.len())
        ));
        Ok(network)
    }

    pub fn get_name(&self) -> &String {
        &self.name
    }

    /// Looking up an unknown ID is normal; it just returns None.
    pub fn lane_by_id(&self, id: &str) -> Option<&Lane> {
        self.ids.get(id).and_then(|idx| self.get_l(*idx))
    }

    pub fn get_l(&self, idx: LaneIdx) -> Option<&Lane> {
        self.lanes.get(idx.0)
    }

    pub fn all_lanes(&self) -> &Vec<Lane> {
        &self.lanes
    }

    pub fn num_lanes(&self) -> usize {
        self.lanes.len()
    }

    /// All lane IDs, sorted.
    pub fn lane_ids(&self) -> impl Iterator<Item = &LaneID> {
        self.ids.keys()
    }

    pub fn get_bounds(&self) -> &Bounds {
        self.closest.get_bounds()
    }

    pub(crate) fn closest(&self) -> &FindClosest<LaneIdx> {
        &self.closest
    }
}
