//! Unit tests for wheelly-link.

#[cfg(test)]
mod codec {
    use wheelly_core::Millis;

    use crate::codec::{self, Frame};
    use crate::LinkError;

    #[test]
    fn encodes_motor_command() {
        assert_eq!(codec::encode_motors(100, -50, Millis(1234)), "mt 1234 100 -50\n");
    }

    #[test]
    fn clamps_motor_command() {
        assert_eq!(codec::encode_motors(300, -300, Millis(0)), "mt 0 255 -255\n");
    }

    #[test]
    fn encodes_scan_and_status() {
        assert_eq!(codec::encode_scan(-30), "sc -30\n");
        assert_eq!(codec::encode_query_status(), "qs\n");
    }

    #[test]
    fn encodes_clock() {
        assert_eq!(codec::encode_clock(42), "ck 42\n");
    }

    #[test]
    fn decodes_clock_ack() {
        let frame = codec::decode_line("ck 42 100 103").unwrap();
        assert_eq!(frame, Frame::ClockAck { token: 42, t0: Millis(100), t1: Millis(103) });
    }

    #[test]
    fn decodes_motion_telemetry() {
        let frame = codec::decode_line("mot 10 1.0 2.0 0.0 50 50 0 1.5").unwrap();
        match frame {
            Frame::Telemetry(wheelly_core::Message::Motion(m)) => {
                assert_eq!(m.time, Millis(10));
                assert_eq!(m.left_pps, 50);
                assert!(!m.halt);
            }
            other => panic!("expected motion telemetry, got {other:?}"),
        }
    }

    #[test]
    fn decodes_proximity_with_no_echo() {
        let frame = codec::decode_line("prox 10 0.0 -1 0 0 0").unwrap();
        match frame {
            Frame::Telemetry(wheelly_core::Message::Proximity(m)) => {
                assert_eq!(m.echo_delay_us, None);
                assert_eq!(m.distance_m(), None);
            }
            other => panic!("expected proximity telemetry, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_tag() {
        assert!(matches!(codec::decode_line("bogus 1 2 3"), Err(LinkError::Protocol(_))));
    }

    #[test]
    fn rejects_truncated_line() {
        assert!(matches!(codec::decode_line("mt"), Err(LinkError::Protocol(_))));
    }
}

#[cfg(test)]
mod deadline_queue {
    use wheelly_core::Millis;

    use crate::DeadlineQueue;

    #[test]
    fn drains_only_due_entries() {
        let mut q = DeadlineQueue::new();
        q.push(Millis(100), "a");
        q.push(Millis(100), "b");
        q.push(Millis(200), "c");

        assert_eq!(q.len(), 3);
        let due = q.drain_due(Millis(150));
        assert_eq!(due, vec!["a", "b"]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_deadline(), Some(Millis(200)));
    }

    #[test]
    fn drain_due_is_inclusive_of_now() {
        let mut q = DeadlineQueue::new();
        q.push(Millis(100), "a");
        assert_eq!(q.drain_due(Millis(100)), vec!["a"]);
    }

    #[test]
    fn empty_when_nothing_pushed() {
        let q: DeadlineQueue<()> = DeadlineQueue::new();
        assert!(q.is_empty());
        assert_eq!(q.next_deadline(), None);
    }

    #[test]
    fn clear_drops_everything() {
        let mut q = DeadlineQueue::new();
        q.push(Millis(1), "a");
        q.clear();
        assert!(q.is_empty());
    }
}

#[cfg(test)]
mod telemetry_queue {
    use wheelly_core::{Millis, SupplyMessage};

    use crate::TelemetryQueue;

    fn supply(mv: u32) -> wheelly_core::Message {
        SupplyMessage { time: Millis(0), voltage_mv: mv }.into()
    }

    #[test]
    fn drains_in_push_order_under_capacity() {
        let q = TelemetryQueue::new(4);
        q.push(supply(1));
        q.push(supply(2));
        assert_eq!(q.take_overflow_count(), 0);
        let drained = q.drain();
        assert_eq!(drained.len(), 2);
    }

    #[test]
    fn overflow_drops_oldest_and_counts_it() {
        let q = TelemetryQueue::new(2);
        q.push(supply(1));
        q.push(supply(2));
        q.push(supply(3)); // queue full at push time: 1 is dropped

        let drained = q.drain();
        assert!(matches!(drained.as_slice(), [a, b] if matches!(a, wheelly_core::Message::Supply(m) if m.voltage_mv == 2) && matches!(b, wheelly_core::Message::Supply(m) if m.voltage_mv == 3)));
        assert_eq!(q.take_overflow_count(), 1);
        assert_eq!(q.take_overflow_count(), 0, "count resets after being taken");
    }
}

#[cfg(test)]
mod retry {
    use crate::retry::{FixedRetries, NoRetries, RetryPolicy};
    use crate::LinkError;

    #[test]
    fn fixed_retries_stops_after_max() {
        let policy = FixedRetries { max: 3 };
        assert!(policy.should_retry(1, &LinkError::Timeout));
        assert!(policy.should_retry(3, &LinkError::Timeout));
        assert!(!policy.should_retry(4, &LinkError::Timeout));
    }

    #[test]
    fn fixed_retries_never_retries_protocol_errors() {
        let policy = FixedRetries::default();
        assert!(!policy.should_retry(1, &LinkError::Protocol("bad".into())));
    }

    #[test]
    fn no_retries_always_false() {
        assert!(!NoRetries.should_retry(1, &LinkError::Timeout));
    }
}

#[cfg(test)]
mod fake_link {
    use wheelly_core::{Message, Millis};

    use crate::{FakeLink, LinkError, RobotLink};

    #[test]
    fn records_sent_commands() {
        let mut link = FakeLink::new();
        link.connect().unwrap();
        link.send_motors(100, 100, Millis(500)).unwrap();
        link.send_scan(-30).unwrap();
        assert_eq!(link.sent, vec!["mt 500 100 100\n", "sc -30\n"]);
    }

    #[test]
    fn rejects_commands_before_connect() {
        let mut link = FakeLink::new();
        assert!(matches!(link.send_query_status(), Err(LinkError::TransportClosed)));
    }

    #[test]
    fn injected_telemetry_line_is_parsed_on_drain() {
        let mut link = FakeLink::new();
        link.connect().unwrap();
        link.push_line("sup 10 7400");
        let messages = link.drain_messages();
        assert_eq!(messages.len(), 1);
        assert!(matches!(messages[0], Message::Supply(_)));
    }

    #[test]
    fn injected_clock_ack_is_separate_from_telemetry() {
        let mut link = FakeLink::new();
        link.connect().unwrap();
        link.push_line("ck 7 100 104");
        assert!(link.drain_messages().is_empty());
        assert_eq!(link.take_clock_ack(), Some((7, Millis(100), Millis(104))));
    }

    #[test]
    fn fail_next_sends_injects_transient_error() {
        let mut link = FakeLink::new();
        link.connect().unwrap();
        link.fail_next_sends = 1;
        assert!(matches!(link.send_scan(0), Err(LinkError::Timeout)));
        assert!(link.send_scan(0).is_ok());
    }

    #[test]
    fn overflowing_the_inbound_queue_is_counted() {
        let mut link = FakeLink::with_queue_capacity(1);
        link.connect().unwrap();
        link.push_line("sup 1 7000");
        link.push_line("sup 2 7000");

        let drained = link.drain_messages();
        assert_eq!(drained.len(), 1);
        assert_eq!(link.take_overflow_count(), 1);
    }
}
