//! The telemetry vocabulary produced by the robot link and consumed by the
//! world modeller.
//!
//! Every message carries the [`Millis`](crate::Millis) at which the robot
//! (or bridge) observed the event, not the time it was received locally —
//! the world modeller applies messages in embedded-timestamp order, so a
//! message with no meaningful timestamp has no place here.

use crate::{Angle, Millis, Point, Pose};

/// Speed of sound used to turn an echo delay into a one-way distance.
pub const SPEED_OF_SOUND_M_PER_S: f64 = 340.0;

/// A single proximity (ultrasonic) sensor reading.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProximityMessage {
    pub time: Millis,
    /// Sensor direction relative to the chassis heading at emission time.
    pub sensor_dir: Angle,
    /// Echo round-trip delay in microseconds; `None` means no echo was
    /// detected out to the sensor's maximum range.
    pub echo_delay_us: Option<u32>,
    /// Robot pose at the moment the ping was emitted.
    pub pose_at_emit: Pose,
}

impl ProximityMessage {
    /// One-way distance to the echo, derived from the round-trip delay.
    /// `None` if no echo was received.
    pub fn distance_m(&self) -> Option<f64> {
        self.echo_delay_us
            .map(|us| (us as f64 * 1e-6 * SPEED_OF_SOUND_M_PER_S) / 2.0)
    }

    /// World-frame point the echo bounced off, if any.
    pub fn echo_point(&self) -> Option<Point> {
        self.distance_m().map(|d| self.pose_at_emit.project(self.sensor_dir, d))
    }
}

/// A drivetrain/odometry telemetry sample.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MotionMessage {
    pub time: Millis,
    pub pose: Pose,
    pub left_pps: i32,
    pub right_pps: i32,
    pub halt: bool,
    pub imu_yaw: Angle,
}

/// A bumper/contact sensor reading.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContactMessage {
    pub time: Millis,
    pub pose: Pose,
    pub front_clear: bool,
    pub rear_clear: bool,
    pub can_move_forward: bool,
    pub can_move_backward: bool,
}

/// A labelled-object observation from the camera pipeline.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CameraEvent {
    pub time: Millis,
    pub label: String,
    /// Bearing to the object, relative to chassis heading at observation
    /// time.
    pub bearing: Angle,
    /// Distance to the object, if the vision pipeline estimated one.
    pub distance: Option<f64>,
    pub pose_at_observation: Pose,
}

impl CameraEvent {
    /// World-frame position of the observed marker, if a distance estimate
    /// is available.
    pub fn world_point(&self) -> Option<Point> {
        self.distance.map(|d| self.pose_at_observation.project(self.bearing, d))
    }
}

/// A battery/supply telemetry sample.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SupplyMessage {
    pub time: Millis,
    pub voltage_mv: u32,
}

/// Acknowledgement of a clock-sync or status request, correlated by token.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AckMessage {
    pub time: Millis,
    pub token: u32,
}

/// The union of telemetry kinds the robot link can emit, in the order the
/// world modeller is willing to apply them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    Motion(MotionMessage),
    Proximity(ProximityMessage),
    Contact(ContactMessage),
    Camera(CameraEvent),
    Supply(SupplyMessage),
    Ack(AckMessage),
}

impl Message {
    /// The embedded timestamp, used to order messages independent of
    /// arrival order.
    pub fn time(&self) -> Millis {
        match self {
            Message::Motion(m) => m.time,
            Message::Proximity(m) => m.time,
            Message::Contact(m) => m.time,
            Message::Camera(m) => m.time,
            Message::Supply(m) => m.time,
            Message::Ack(m) => m.time,
        }
    }
}

impl From<MotionMessage> for Message {
    fn from(m: MotionMessage) -> Self {
        Message::Motion(m)
    }
}

impl From<ProximityMessage> for Message {
    fn from(m: ProximityMessage) -> Self {
        Message::Proximity(m)
    }
}

impl From<ContactMessage> for Message {
    fn from(m: ContactMessage) -> Self {
        Message::Contact(m)
    }
}

impl From<CameraEvent> for Message {
    fn from(m: CameraEvent) -> Self {
        Message::Camera(m)
    }
}

impl From<SupplyMessage> for Message {
    fn from(m: SupplyMessage) -> Self {
        Message::Supply(m)
    }
}

impl From<AckMessage> for Message {
    fn from(m: AckMessage) -> Self {
        Message::Ack(m)
    }
}
