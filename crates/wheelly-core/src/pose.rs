//! Planar geometry: world-frame points and robot poses.
//!
//! Positions are `f64` metres.  The radar grid is city-block scale (a few
//! metres across at `cellSize` resolution), so `f32` would be plenty, but
//! `f64` is used throughout so that accumulated dead-reckoning drift over a
//! long run doesn't show up as quantization error in tests before it shows
//! up as real drift.

use crate::Angle;

/// A point in the robot's planar world frame, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self - other).norm()
    }

    #[inline]
    pub fn norm(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Compass bearing from `self` to `other`, north-up clockwise-positive.
    pub fn bearing_to(self, other: Point) -> Angle {
        let d = other - self;
        // North-up, clockwise-positive: swap the usual atan2(y, x) argument
        // order so that "north" (dy > 0, dx = 0) resolves to zero degrees.
        Angle::from_radians(d.x.atan2(d.y))
    }

    /// The point `distance` metres away from `self` along `bearing`.
    pub fn project(self, bearing: Angle, distance: f64) -> Point {
        Point { x: self.x + bearing.sin() * distance, y: self.y + bearing.cos() * distance }
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

/// The robot's planar position and heading.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub heading: Angle,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: Angle) -> Self {
        Self { x, y, heading }
    }

    #[inline]
    pub fn location(self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// A world-frame point `distance` metres away along `relative_bearing`
    /// measured from this pose's own heading — e.g. a sensor reading at
    /// `sensorDir` relative to the chassis.
    pub fn project(self, relative_bearing: Angle, distance: f64) -> Point {
        self.location().project(self.heading.compose(relative_bearing), distance)
    }
}
