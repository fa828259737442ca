use std::f64::consts::{PI, TAU};
use std::fmt;

use serde::{Deserialize, Serialize};

/// An angle, stored in radians. Measured counter-clockwise from the positive x axis.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle(f64);

impl Angle {
    pub const ZERO: Angle = Angle(0.0);

    /// Create an angle in radians. The value isn't normalized.
    pub fn new_rads(rads: f64) -> Angle {
        Angle(rads)
    }

    /// Create an angle in degrees. The value isn't normalized.
    pub fn degrees(degs: f64) -> Angle {
        Angle(degs.to_radians())
    }

    /// The raw value in radians, exactly as it was created.
    pub fn radians(self) -> f64 {
        self.0
    }

    /// The value in radians, wrapped into (-pi, pi].
    pub fn normalized_radians(self) -> f64 {
        let mut rads = self.0 % TAU;
        if rads > PI {
            rads -= TAU;
        } else if rads <= -PI {
            rads += TAU;
        }
        rads
    }

    pub fn normalized(self) -> Angle {
        Angle(self.normalized_radians())
    }

    /// The signed rotation from self to other along the shorter way around, in (-pi, pi].
    /// Positive means counter-clockwise.
    pub fn shortest_rotation_towards(self, other: Angle) -> Angle {
        Angle(other.normalized_radians() - self.normalized_radians()).normalized()
    }

    /// True if the two angles differ by no more than `tolerance` along the shorter way around.
    pub fn approx_eq(self, other: Angle, tolerance: Angle) -> bool {
        self.shortest_rotation_towards(other).radians().abs() <= tolerance.radians().abs()
    }

    /// Interpolates from self towards other along the shorter way around. `fraction` of 0 gives
    /// self, 1 gives other. The result is normalized.
    pub fn interpolate(self, other: Angle, fraction: f64) -> Angle {
        let from = self.normalized_radians();
        let rotation = self.shortest_rotation_towards(other).radians();
        Angle(from + rotation * fraction).normalized()
    }

    pub fn sin_cos(self) -> (f64, f64) {
        self.0.sin_cos()
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Angle({} rads)", self.0)
    }
}
