use std::collections::BTreeMap;
use std::fmt::Debug;

use geo::prelude::{ClosestPoint, EuclideanDistance};
use rstar::{RTree, RTreeObject, AABB};

use crate::{Bounds, Distance, Pt2D};

/// One segment of some polyline, tagged with the key of the polyline.
struct IndexedSegment<K> {
    key: K,
    line: geo::Line<f64>,
}

impl<K> RTreeObject for IndexedSegment<K> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.line.start.x, self.line.start.y],
            [self.line.end.x, self.line.end.y],
        )
    }
}

/// A spatial index over polylines. Every segment gets its own entry in an R-tree, so a radius
/// query only looks at segments whose bounding box overlaps the search square, then measures the
/// exact distance to each.
pub struct FindClosest<K> {
    tree: RTree<IndexedSegment<K>>,
    bounds: Bounds,
}

impl<K> FindClosest<K>
where
    K: Clone + Ord + Debug,
{
    pub fn new() -> FindClosest<K> {
        FindClosest {
            tree: RTree::new(),
            bounds: Bounds::new(),
        }
    }

    /// Indexes every segment of the polyline `pts` under `key`. A single point is indexed as a
    /// zero-length segment.
    pub fn add(&mut self, key: K, pts: &[Pt2D]) {
        let segments: Vec<(Pt2D, Pt2D)> = if pts.len() == 1 {
            vec![(pts[0], pts[0])]
        } else {
            pts.windows(2).map(|pair| (pair[0], pair[1])).collect()
        };
        for (pt1, pt2) in segments {
            self.bounds.update(pt1);
            self.bounds.update(pt2);
            self.tree.insert(IndexedSegment {
                key: key.clone(),
                line: geo::Line::new((pt1.x(), pt1.y()), (pt2.x(), pt2.y())),
            });
        }
    }

    /// The number of indexed segments.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Covers everything indexed so far.
    pub fn get_bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Finds every key with some segment within `max_dist_away` of the query point. Each key
    /// appears once, with the closest point on its geometry and the distance to it. Sorted by
    /// distance, then by key.
    pub fn all_within(&self, query_pt: Pt2D, max_dist_away: Distance) -> Vec<(K, Pt2D, Distance)> {
        let query_geom = query_pt.to_geo();
        let envelope = Bounds::around(query_pt, max_dist_away).as_envelope();

        let mut best: BTreeMap<K, (Pt2D, Distance)> = BTreeMap::new();
        for segment in self.tree.locate_in_envelope_intersecting(&envelope) {
            let pt = match segment.line.closest_point(&query_geom) {
                geo::Closest::SinglePoint(pt) | geo::Closest::Intersection(pt) => pt,
                geo::Closest::Indeterminate => continue,
            };
            let dist = Distance::meters(pt.euclidean_distance(&query_geom));
            if dist > max_dist_away {
                continue;
            }
            match best.get(&segment.key) {
                Some((_, existing)) if *existing <= dist => {}
                _ => {
                    best.insert(segment.key.clone(), (pt.into(), dist));
                }
            }
        }

        let mut results: Vec<(K, Pt2D, Distance)> = best
            .into_iter()
            .map(|(key, (pt, dist))| (key, pt, dist))
            .collect();
        results.sort_by(|a, b| a.2.cmp(&b.2).then_with(|| a.0.cmp(&b.0)));
        results
    }
}

impl<K> Default for FindClosest<K>
where
    K: Clone + Ord + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}
