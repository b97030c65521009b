//! Unit tests for wheelly-core primitives.

#[cfg(test)]
mod ids {
    use crate::StateId;

    #[test]
    fn index_roundtrip() {
        let id = StateId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(StateId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(StateId(0) < StateId(1));
    }

    #[test]
    fn invalid_sentinel_is_max() {
        assert_eq!(StateId::default(), StateId::INVALID);
        assert_eq!(StateId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(StateId(7).to_string(), "StateId(7)");
    }
}

#[cfg(test)]
mod angle {
    use crate::Angle;

    #[test]
    fn zero_is_north() {
        assert_eq!(Angle::ZERO.to_degrees(), 0.0);
    }

    #[test]
    fn compose_inverse_is_zero() {
        for deg in [0.0, 12.5, 90.0, -45.0, 179.9, -179.9] {
            let a = Angle::from_degrees(deg);
            let roundtrip = a.compose(a.inverse());
            assert!(
                roundtrip.to_degrees().abs() < 1e-9,
                "compose(a, inverse(a)) should be ~0, got {}",
                roundtrip.to_degrees()
            );
        }
    }

    #[test]
    fn compose_adds_degrees() {
        let a = Angle::from_degrees(30.0);
        let b = Angle::from_degrees(45.0);
        assert!((a.compose(b).to_degrees() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn wraps_past_180() {
        let a = Angle::from_degrees(170.0);
        let b = Angle::from_degrees(20.0);
        // 190 normalizes into (-180, 180] as -170.
        assert!((a.compose(b).to_degrees() - -170.0).abs() < 1e-9);
    }

    #[test]
    fn difference_is_signed_and_shortest() {
        let a = Angle::from_degrees(10.0);
        let b = Angle::from_degrees(350.0); // == -10 degrees
        assert!((a.difference_degrees(b) - 20.0).abs() < 1e-9);
    }
}

#[cfg(test)]
mod pose {
    use crate::{Angle, Point, Pose};

    #[test]
    fn zero_distance() {
        let p = Point::new(1.0, 2.0);
        assert!(p.distance(p) < 1e-12);
    }

    #[test]
    fn bearing_to_north_is_zero() {
        let origin = Point::ORIGIN;
        let north = Point::new(0.0, 5.0);
        assert!(origin.bearing_to(north).to_degrees().abs() < 1e-9);
    }

    #[test]
    fn bearing_to_east_is_90() {
        let origin = Point::ORIGIN;
        let east = Point::new(5.0, 0.0);
        assert!((origin.bearing_to(east).to_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn project_then_bearing_roundtrips() {
        let origin = Point::ORIGIN;
        let bearing = Angle::from_degrees(37.0);
        let far = origin.project(bearing, 10.0);
        assert!((origin.bearing_to(far).to_degrees() - 37.0).abs() < 1e-6);
        assert!((origin.distance(far) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn pose_project_accounts_for_heading() {
        let pose = Pose::new(0.0, 0.0, Angle::from_degrees(90.0));
        // A sensor aimed "forward" relative to a robot facing east points east.
        let p = pose.project(Angle::ZERO, 1.0);
        assert!((p.x - 1.0).abs() < 1e-9);
        assert!(p.y.abs() < 1e-9);
    }
}

#[cfg(test)]
mod time {
    use crate::{Deadline, Millis};

    #[test]
    fn millis_arithmetic() {
        let t = Millis(10);
        assert_eq!(t.plus(5), Millis(15));
        assert_eq!(Millis(15).since(Millis(10)), 5);
        assert_eq!(Millis(15) - Millis(10), 5);
    }

    #[test]
    fn before_and_at_or_after() {
        assert!(Millis(5).before(Millis(10)));
        assert!(!Millis(10).before(Millis(10)));
        assert!(Millis(10).at_or_after(Millis(10)));
        assert!(!Millis(9).at_or_after(Millis(10)));
    }

    #[test]
    fn deadline_fires_once_per_period() {
        let mut d = Deadline::starting_at(Millis(100), 50);
        assert!(!d.poll(Millis(50)));
        assert!(d.poll(Millis(100)));
        assert!(!d.poll(Millis(120)));
        assert!(d.poll(Millis(150)));
        assert_eq!(d.next(), Millis(200));
    }

    #[test]
    fn deadline_does_not_double_fire_after_a_late_poll() {
        let mut d = Deadline::starting_at(Millis(0), 100);
        assert!(d.poll(Millis(250))); // one missed period coalesces
        assert_eq!(d.next(), Millis(100));
        assert!(d.poll(Millis(250)));
        assert_eq!(d.next(), Millis(200));
    }
}

#[cfg(test)]
mod message {
    use crate::{Angle, Millis, Pose, ProximityMessage};

    #[test]
    fn no_echo_has_no_distance() {
        let m = ProximityMessage {
            time: Millis(0),
            sensor_dir: Angle::ZERO,
            echo_delay_us: None,
            pose_at_emit: Pose::default(),
        };
        assert_eq!(m.distance_m(), None);
        assert_eq!(m.echo_point(), None);
    }

    #[test]
    fn echo_delay_converts_to_distance() {
        // 1 m round trip at 340 m/s is ~5882 microseconds round-trip delay
        // for a one-way distance of 1 m (2 m round trip).
        let round_trip_us = (2.0 / 340.0 * 1e6) as u32;
        let m = ProximityMessage {
            time: Millis(0),
            sensor_dir: Angle::ZERO,
            echo_delay_us: Some(round_trip_us),
            pose_at_emit: Pose::default(),
        };
        let d = m.distance_m().unwrap();
        assert!((d - 1.0).abs() < 0.01, "got {d}");
    }
}

#[cfg(test)]
mod link_status {
    use crate::LinkStatus;

    #[test]
    fn can_move() {
        assert!(!LinkStatus::Connecting.can_move());
        assert!(LinkStatus::Connected.can_move());
        assert!(LinkStatus::Degraded.can_move());
        assert!(!LinkStatus::Failed.can_move());
    }

    #[test]
    fn display() {
        assert_eq!(LinkStatus::Connected.to_string(), "connected");
        assert_eq!(LinkStatus::Failed.to_string(), "failed");
    }
}
