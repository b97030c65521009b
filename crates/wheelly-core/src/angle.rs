//! Compass bearings represented as unit complex numbers.
//!
//! Storing `(cos, sin)` instead of a bare radian/degree float keeps repeated
//! composition (heading + turn, bearing + offset) exact to floating-point
//! rounding rather than accumulating normalization error across thousands of
//! reaction ticks — the same reason rotation is usually represented as a
//! unit complex number or quaternion rather than a raw angle in any rotation
//! pipeline.
//!
//! Convention: 0° is north, positive angles turn clockwise, range is the
//! half-open interval `(-180°, 180°]`.

use std::fmt;

/// A compass bearing, stored as `(cos, sin)` of the angle from north.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle {
    cos: f64,
    sin: f64,
}

impl Angle {
    /// North, i.e. zero bearing.
    pub const ZERO: Angle = Angle { cos: 1.0, sin: 0.0 };

    /// Build from a value already known to be a unit `(cos, sin)` pair.
    /// Does not renormalize — callers computing a rotation product should
    /// prefer [`Angle::compose`] instead of calling this directly.
    pub fn from_cos_sin(cos: f64, sin: f64) -> Self {
        Self { cos, sin }
    }

    pub fn from_degrees(deg: f64) -> Self {
        let rad = deg.to_radians();
        Self { cos: rad.cos(), sin: rad.sin() }
    }

    pub fn from_radians(rad: f64) -> Self {
        Self { cos: rad.cos(), sin: rad.sin() }
    }

    /// Degrees from north, normalized to `(-180, 180]`.
    pub fn to_degrees(self) -> f64 {
        self.to_radians().to_degrees()
    }

    /// Radians from north, normalized to `(-π, π]`.
    pub fn to_radians(self) -> f64 {
        self.sin.atan2(self.cos)
    }

    pub fn cos(self) -> f64 {
        self.cos
    }

    pub fn sin(self) -> f64 {
        self.sin
    }

    /// `self` rotated by `other` — complex multiplication of the two unit
    /// vectors.  Composing two bearings this way never needs a modulo
    /// normalization step; `atan2` in [`Angle::to_degrees`] handles wraparound
    /// once, on demand, instead of after every intermediate sum.
    pub fn compose(self, other: Angle) -> Angle {
        Angle {
            cos: self.cos * other.cos - self.sin * other.sin,
            sin: self.sin * other.cos + self.cos * other.sin,
        }
    }

    /// The bearing that undoes `self`: `self.compose(self.inverse())` is
    /// [`Angle::ZERO`].
    pub fn inverse(self) -> Angle {
        Angle { cos: self.cos, sin: -self.sin }
    }

    /// Shortest signed angular difference `self - other`, in degrees, in
    /// `(-180, 180]`. Positive means `self` is clockwise of `other`.
    pub fn difference_degrees(self, other: Angle) -> f64 {
        self.compose(other.inverse()).to_degrees()
    }
}

impl Default for Angle {
    fn default() -> Self {
        Angle::ZERO
    }
}

impl PartialEq for Angle {
    /// Bearings compare equal if they resolve to the same degree reading;
    /// this tolerates the ULP-level noise that `compose`/`inverse` round
    /// trips introduce without requiring callers to hand-pick an epsilon.
    fn eq(&self, other: &Self) -> bool {
        (self.to_degrees() - other.to_degrees()).abs() < 1e-9
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°", self.to_degrees())
    }
}
