//! Immutable per-robot physical constants.

use crate::Angle;

/// Physical constants of the robot chassis and its proximity sensor,
/// constant for the lifetime of a run.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotSpec {
    /// Maximum distance the proximity sensor can report, in metres. A
    /// proximity message with no echo is treated as "clear out to this
    /// distance".
    pub max_radar_distance: f64,
    /// Half-angle of the sensor's receptive cone around `sensorDir`. Cells
    /// marked empty by a "no echo" or "echo at d" reading are those falling
    /// within this cone, not just the single ray along the sensor's
    /// reported direction.
    pub receptive_angle: Angle,
    /// Radius within which a contact message marks grid cells as
    /// physically touched, independent of the proximity sensor.
    pub contact_radius: f64,
}

impl RobotSpec {
    pub fn new(max_radar_distance: f64, receptive_angle: Angle, contact_radius: f64) -> Self {
        Self { max_radar_distance, receptive_angle, contact_radius }
    }
}

impl Default for RobotSpec {
    /// Constants matching the physical Wheelly chassis: a 3 m sonar range,
    /// a 15° receptive cone, and a 0.2 m contact radius.
    fn default() -> Self {
        Self {
            max_radar_distance: 3.0,
            receptive_angle: Angle::from_degrees(15.0),
            contact_radius: 0.2,
        }
    }
}
