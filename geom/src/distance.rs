use std::{cmp, fmt, ops};

use serde::{Deserialize, Serialize};

/// A signed length in meters: arc length along a lane, a lateral offset, or a search radius.
///
/// The value is kept exactly as computed. Asking the same question twice gives the same bits.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Distance(f64);

// Never NaN or infinite, so a total order is fine
impl Eq for Distance {}

#[allow(clippy::derive_ord_xor_partial_ord)]
impl Ord for Distance {
    fn cmp(&self, other: &Distance) -> cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Distance {
    pub const ZERO: Distance = Distance::const_meters(0.0);

    /// Panics on NaN or infinity. Map data is validated before it gets here, so this only fires
    /// on a bug.
    pub fn meters(value: f64) -> Distance {
        if !value.is_finite() {
            panic!("Distance::meters({}) isn't finite", value);
        }
        Distance(value)
    }

    /// For constants. Nothing is checked.
    pub const fn const_meters(value: f64) -> Distance {
        Distance(value)
    }

    pub fn abs(self) -> Distance {
        Distance(self.0.abs())
    }

    pub fn inner_meters(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}m", self.0)
    }
}

impl Default for Distance {
    fn default() -> Distance {
        Distance::ZERO
    }
}

impl ops::Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Distance) -> Distance {
        Distance::meters(self.0 + rhs.0)
    }
}

impl ops::Sub for Distance {
    type Output = Distance;

    fn sub(self, rhs: Distance) -> Distance {
        Distance::meters(self.0 - rhs.0)
    }
}

impl ops::Neg for Distance {
    type Output = Distance;

    fn neg(self) -> Distance {
        Distance(-self.0)
    }
}

impl ops::Mul<f64> for Distance {
    type Output = Distance;

    fn mul(self, factor: f64) -> Distance {
        Distance::meters(self.0 * factor)
    }
}
