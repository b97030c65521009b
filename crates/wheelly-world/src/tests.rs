//! Unit tests for wheelly-world.

#[cfg(test)]
mod status {
    use wheelly_core::{Angle, ContactMessage, Millis, MotionMessage, Pose};

    use crate::RobotStatus;

    #[test]
    fn default_is_halted_and_clear() {
        let status = RobotStatus::default();
        assert!(status.halted);
        assert!(status.front_clear);
        assert!(status.rear_clear);
    }

    #[test]
    fn apply_motion_updates_pose_and_speed() {
        let mut status = RobotStatus::default();
        status.apply_motion(&MotionMessage {
            time: Millis(100),
            pose: Pose::new(1.0, 2.0, Angle::ZERO),
            left_pps: 10,
            right_pps: 12,
            halt: false,
            imu_yaw: Angle::ZERO,
        });
        assert_eq!(status.pose.x, 1.0);
        assert!(!status.halted);
        assert_eq!(status.last_motion_ts, Some(Millis(100)));
    }

    #[test]
    fn apply_contact_updates_flags_and_timestamp() {
        let mut status = RobotStatus::default();
        status.apply_contact(&ContactMessage {
            time: Millis(50),
            pose: Pose::default(),
            front_clear: false,
            rear_clear: true,
            can_move_forward: false,
            can_move_backward: true,
        });
        assert!(!status.front_clear);
        assert!(!status.can_move_forward);
        assert_eq!(status.last_contact_ts, Some(Millis(50)));
    }

    #[test]
    fn contact_is_stale_without_messages() {
        let status = RobotStatus::default();
        assert!(status.contact_is_stale(Millis(1_000), 500));
    }
}

#[cfg(test)]
mod markers {
    use wheelly_core::{Angle, CameraEvent, Millis, Pose};

    use crate::{MarkerDecay, MarkerSet};

    fn event(label: &str, time: i64, distance: Option<f64>) -> CameraEvent {
        CameraEvent {
            time: Millis(time),
            label: label.to_string(),
            bearing: Angle::ZERO,
            distance,
            pose_at_observation: Pose::default(),
        }
    }

    #[test]
    fn observe_creates_new_marker() {
        let mut set = MarkerSet::new();
        set.observe(&event("box", 0, Some(1.0)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.markers()[0].observations, 1);
    }

    #[test]
    fn observe_merges_within_radius_same_label() {
        let mut set = MarkerSet::new();
        set.observe(&event("box", 0, Some(1.0)));
        set.observe(&event("box", 10, Some(1.05)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.markers()[0].observations, 2);
        assert_eq!(set.markers()[0].last_seen, Millis(10));
    }

    #[test]
    fn observe_ignores_event_without_distance() {
        let mut set = MarkerSet::new();
        set.observe(&event("box", 0, None));
        assert!(set.is_empty());
    }

    #[test]
    fn clean_purges_stale_markers() {
        let mut set = MarkerSet::new();
        set.observe(&event("box", 0, Some(1.0)));
        let decay = MarkerDecay { decay_ms: 100, clean_decay_ms: 200 };
        set.clean(Millis(50), decay);
        assert_eq!(set.len(), 1);
        set.clean(Millis(500), decay);
        assert!(set.is_empty());
    }

    #[test]
    fn nearest_respects_annulus_and_label() {
        let mut set = MarkerSet::new();
        set.observe(&event("near", 0, Some(0.5)));
        set.observe(&event("far", 0, Some(2.0)));
        let decay = MarkerDecay::default();
        let found = set.nearest(wheelly_core::Point::ORIGIN, None, 0.2, 3.0, Millis(0), decay).unwrap();
        assert_eq!(found.label, "near");
        assert!(set.nearest(wheelly_core::Point::ORIGIN, Some("far"), 0.2, 1.0, Millis(0), decay).is_none());
    }
}

#[cfg(test)]
mod modeller {
    use wheelly_core::{Angle, ContactMessage, Message, Millis, Point, Pose, ProximityMessage};

    use crate::modeller::ModellerConfig;
    use crate::WorldModeller;

    fn modeller() -> WorldModeller {
        WorldModeller::new(ModellerConfig::default(), 80, 80, 0.05, Point::ORIGIN).unwrap()
    }

    #[test]
    fn rejects_zero_sectors() {
        let config = ModellerConfig { n_sectors: 0, ..ModellerConfig::default() };
        assert!(WorldModeller::new(config, 10, 10, 0.1, Point::ORIGIN).is_err());
    }

    #[test]
    fn step_fuses_motion_message() {
        let mut m = modeller();
        let messages = vec![Message::Motion(wheelly_core::MotionMessage {
            time: Millis(0),
            pose: Pose::new(0.5, 0.5, Angle::ZERO),
            left_pps: 0,
            right_pps: 0,
            halt: false,
            imu_yaw: Angle::ZERO,
        })];
        let world = m.step(&messages, Millis(0));
        assert_eq!(world.robot_status.pose.x, 0.5);
    }

    #[test]
    fn step_front_blocked_from_close_proximity() {
        let mut m = modeller();
        let messages = vec![Message::Proximity(ProximityMessage {
            time: Millis(0),
            sensor_dir: Angle::ZERO,
            echo_delay_us: Some((0.1 / 340.0 * 2.0 * 1e6) as u32),
            pose_at_emit: Pose::default(),
        })];
        let world = m.step(&messages, Millis(0));
        assert!(world.front_blocked);
        assert!(!world.rear_blocked);
        assert!(!world.blocked);
    }

    #[test]
    fn step_clears_when_obstacle_recedes() {
        let mut m = modeller();
        let close = vec![Message::Proximity(ProximityMessage {
            time: Millis(0),
            sensor_dir: Angle::ZERO,
            echo_delay_us: Some((0.1 / 340.0 * 2.0 * 1e6) as u32),
            pose_at_emit: Pose::default(),
        })];
        m.step(&close, Millis(0));
        let far = vec![Message::Proximity(ProximityMessage {
            time: Millis(1),
            sensor_dir: Angle::ZERO,
            echo_delay_us: Some((1.0 / 340.0 * 2.0 * 1e6) as u32),
            pose_at_emit: Pose::default(),
        })];
        let world = m.step(&far, Millis(1));
        assert!(!world.front_blocked);
    }

    #[test]
    fn blocked_both_sides_from_contact() {
        let mut m = modeller();
        let messages = vec![Message::Contact(ContactMessage {
            time: Millis(0),
            pose: Pose::default(),
            front_clear: false,
            rear_clear: false,
            can_move_forward: false,
            can_move_backward: false,
        })];
        let world = m.step(&messages, Millis(0));
        assert!(world.front_blocked);
        assert!(world.rear_blocked);
        assert!(world.blocked);
        assert!(!world.can_move_forward());
        assert!(!world.can_move_backward());
    }

    #[test]
    fn reset_purges_radar_and_markers() {
        let mut m = modeller();
        let messages = vec![Message::Proximity(ProximityMessage {
            time: Millis(0),
            sensor_dir: Angle::ZERO,
            echo_delay_us: Some(1000),
            pose_at_emit: Pose::default(),
        })];
        m.step(&messages, Millis(0));
        m.reset();
        let world = m.step(&[], Millis(1));
        assert!(!world.front_blocked);
        assert!(world.markers.is_empty());
    }
}
