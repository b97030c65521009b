//! Fused robot kinematic/safety status, updated from motion, contact, and
//! supply telemetry.

use wheelly_core::{Angle, ContactMessage, Millis, MotionMessage, Pose, SupplyMessage};

/// The robot's latest known pose, drivetrain state, and contact safety
/// flags, fused from the most recent telemetry of each kind.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RobotStatus {
    pub pose: Pose,
    pub left_pps: i32,
    pub right_pps: i32,
    pub halted: bool,
    pub imu_yaw: Angle,
    pub front_clear: bool,
    pub rear_clear: bool,
    pub can_move_forward: bool,
    pub can_move_backward: bool,
    pub voltage_mv: u32,
    pub last_motion_ts: Option<Millis>,
    pub last_contact_ts: Option<Millis>,
}

impl Default for RobotStatus {
    /// Boots halted, with both contact directions assumed clear until the
    /// first contact message says otherwise.
    fn default() -> Self {
        Self {
            pose: Pose::default(),
            left_pps: 0,
            right_pps: 0,
            halted: true,
            imu_yaw: Angle::ZERO,
            front_clear: true,
            rear_clear: true,
            can_move_forward: true,
            can_move_backward: true,
            voltage_mv: 0,
            last_motion_ts: None,
            last_contact_ts: None,
        }
    }
}

impl RobotStatus {
    pub fn apply_motion(&mut self, m: &MotionMessage) {
        self.pose = m.pose;
        self.left_pps = m.left_pps;
        self.right_pps = m.right_pps;
        self.halted = m.halt;
        self.imu_yaw = m.imu_yaw;
        self.last_motion_ts = Some(m.time);
    }

    pub fn apply_contact(&mut self, m: &ContactMessage) {
        self.pose = m.pose;
        self.front_clear = m.front_clear;
        self.rear_clear = m.rear_clear;
        self.can_move_forward = m.can_move_forward;
        self.can_move_backward = m.can_move_backward;
        self.last_contact_ts = Some(m.time);
    }

    pub fn apply_supply(&mut self, m: &SupplyMessage) {
        self.voltage_mv = m.voltage_mv;
    }

    /// `true` if no contact telemetry has arrived within `max_age_ms` —
    /// the contact-derived fields should not be trusted.
    pub fn contact_is_stale(&self, now: Millis, max_age_ms: i64) -> bool {
        match self.last_contact_ts {
            Some(ts) => now.since(ts) > max_age_ms,
            None => true,
        }
    }
}
