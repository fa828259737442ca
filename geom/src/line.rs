use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D, EPSILON_DIST};

/// A line segment between two distinct points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line(Pt2D, Pt2D);

impl Line {
    /// Returns None if the points are closer than `EPSILON_DIST`.
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Option<Line> {
        if pt1.raw_dist_to(pt2) < EPSILON_DIST.inner_meters() {
            return None;
        }
        Some(Line(pt1, pt2))
    }

    pub fn pt1(&self) -> Pt2D {
        self.0
    }

    pub fn pt2(&self) -> Pt2D {
        self.1
    }

    pub fn length(&self) -> Distance {
        self.0.dist_to(self.1)
    }

    fn unit_vector(&self) -> (f64, f64) {
        let len = self.0.raw_dist_to(self.1);
        ((self.1.x() - self.0.x()) / len, (self.1.y() - self.0.y()) / len)
    }

    /// Linear interpolation between the endpoints. The percent isn't clamped, so values outside
    /// [0, 1] extend the line.
    pub fn percent_along(&self, percent: f64) -> Pt2D {
        Pt2D::new(
            self.0.x() + percent * (self.1.x() - self.0.x()),
            self.0.y() + percent * (self.1.y() - self.0.y()),
        )
    }

    /// The signed distance from pt1 to the perpendicular foot of `pt` on the infinite line.
    /// Negative when the foot lies behind pt1.
    pub fn unbounded_dist_along_of_pt(&self, pt: Pt2D) -> f64 {
        let (ux, uy) = self.unit_vector();
        ux * (pt.x() - self.0.x()) + uy * (pt.y() - self.0.y())
    }

    /// The signed perpendicular distance from the infinite line to `pt`. Positive means `pt` is
    /// to the left, looking from pt1 to pt2.
    pub fn signed_offset_of_pt(&self, pt: Pt2D) -> f64 {
        let (ux, uy) = self.unit_vector();
        ux * (pt.y() - self.0.y()) - uy * (pt.x() - self.0.x())
    }

    /// Projects `pt` onto this line. The foot is clamped to the segment, except that
    /// `extend_back` lets it run before pt1 and `extend_fwd` lets it run past pt2. Returns the
    /// foot and its distance along from pt1 (negative if before pt1).
    pub fn project_pt(&self, pt: Pt2D, extend_back: bool, extend_fwd: bool) -> (Pt2D, f64) {
        let len = self.0.raw_dist_to(self.1);
        let mut along = self.unbounded_dist_along_of_pt(pt);
        if along < 0.0 && !extend_back {
            along = 0.0;
        }
        if along > len && !extend_fwd {
            along = len;
        }
        (self.percent_along(along / len), along)
    }

    /// The shortest distance from `pt` to any point on the segment.
    pub fn dist_to_pt(&self, pt: Pt2D) -> Distance {
        let (foot, _) = self.project_pt(pt, false, false);
        foot.dist_to(pt)
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line::new({}, {})", self.0, self.1)
    }
}
