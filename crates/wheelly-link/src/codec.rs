//! The line-oriented ASCII wire protocol.
//!
//! # Outbound commands
//!
//! | Meaning      | Line                              |
//! |--------------|------------------------------------|
//! | Query status | `qs`                               |
//! | Scan         | `sc <deg>`                          |
//! | Motors       | `mt <validToMs> <left> <right>`     |
//! | Clock        | `ck <token>`                        |
//!
//! `left`/`right` are signed integers in `[-255, 255]`.
//!
//! # Inbound telemetry
//!
//! Every line is prefixed by a source tag; fields are whitespace-separated.
//! Telemetry is pushed asynchronously on the same channel as command
//! replies — a reader must not assume one line per command.
//!
//! | Tag     | Fields                                                         |
//! |---------|------------------------------------------------------------------|
//! | `mot`   | `time x y headingDeg leftPps rightPps halt imuYawDeg`            |
//! | `prox`  | `time sensorDirDeg echoDelayUs x y headingDeg` (`echoDelayUs = -1` ⇒ no echo) |
//! | `cont`  | `time x y headingDeg frontClear rearClear canFwd canBack`        |
//! | `cam`   | `time label bearingDeg distanceMm x y headingDeg` (`distanceMm = -1` ⇒ unknown) |
//! | `sup`   | `time voltageMv`                                                  |
//! | `ck`    | `token t0 t1` (clock-sync reply)                                  |

use wheelly_core::{
    Angle, CameraEvent, ContactMessage, Message, Millis, MotionMessage, Pose, ProximityMessage,
    SupplyMessage,
};

use crate::{LinkError, LinkResult};

// ── Outbound encoding ─────────────────────────────────────────────────────────

pub fn encode_query_status() -> String {
    "qs\n".to_string()
}

pub fn encode_scan(deg: i32) -> String {
    format!("sc {deg}\n")
}

/// `left`/`right` are clamped to `[-255, 255]` — the wire format has no
/// representation for anything wider.
pub fn encode_motors(left: i32, right: i32, valid_to: Millis) -> String {
    format!("mt {} {} {}\n", valid_to.0, left.clamp(-255, 255), right.clamp(-255, 255))
}

pub fn encode_halt(valid_to: Millis) -> String {
    encode_motors(0, 0, valid_to)
}

pub fn encode_clock(token: u32) -> String {
    format!("ck {token}\n")
}

/// Either a clock-sync reply (`ck <token> <t0> <t1>`) or a piece of
/// telemetry.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    Telemetry(Message),
    ClockAck { token: u32, t0: Millis, t1: Millis },
}

// ── Inbound decoding ──────────────────────────────────────────────────────────

/// Parse one line of wire traffic into a [`Frame`].
///
/// Returns [`LinkError::Protocol`] for malformed payloads — an unrecognized
/// tag, a missing field, or a field that doesn't parse as its expected type.
pub fn decode_line(line: &str) -> LinkResult<Frame> {
    let mut fields = line.trim().split_whitespace();
    let tag = fields.next().ok_or_else(|| LinkError::Protocol("empty line".into()))?;

    match tag {
        "ck" => {
            let token = next_u32(&mut fields, "ck.token")?;
            let t0 = Millis(next_i64(&mut fields, "ck.t0")?);
            let t1 = Millis(next_i64(&mut fields, "ck.t1")?);
            Ok(Frame::ClockAck { token, t0, t1 })
        }
        "mot" => {
            let time = Millis(next_i64(&mut fields, "mot.time")?);
            let pose = next_pose(&mut fields, "mot")?;
            let left_pps = next_i32(&mut fields, "mot.leftPps")?;
            let right_pps = next_i32(&mut fields, "mot.rightPps")?;
            let halt = next_bool(&mut fields, "mot.halt")?;
            let imu_yaw = Angle::from_degrees(next_f64(&mut fields, "mot.imuYaw")?);
            Ok(Frame::Telemetry(
                MotionMessage { time, pose, left_pps, right_pps, halt, imu_yaw }.into(),
            ))
        }
        "prox" => {
            let time = Millis(next_i64(&mut fields, "prox.time")?);
            let sensor_dir = Angle::from_degrees(next_f64(&mut fields, "prox.sensorDir")?);
            let echo_delay = next_i64(&mut fields, "prox.echoDelayUs")?;
            let pose_at_emit = next_pose(&mut fields, "prox")?;
            Ok(Frame::Telemetry(
                ProximityMessage {
                    time,
                    sensor_dir,
                    echo_delay_us: if echo_delay < 0 { None } else { Some(echo_delay as u32) },
                    pose_at_emit,
                }
                .into(),
            ))
        }
        "cont" => {
            let time = Millis(next_i64(&mut fields, "cont.time")?);
            let pose = next_pose(&mut fields, "cont")?;
            let front_clear = next_bool(&mut fields, "cont.frontClear")?;
            let rear_clear = next_bool(&mut fields, "cont.rearClear")?;
            let can_move_forward = next_bool(&mut fields, "cont.canFwd")?;
            let can_move_backward = next_bool(&mut fields, "cont.canBack")?;
            Ok(Frame::Telemetry(
                ContactMessage {
                    time,
                    pose,
                    front_clear,
                    rear_clear,
                    can_move_forward,
                    can_move_backward,
                }
                .into(),
            ))
        }
        "cam" => {
            let time = Millis(next_i64(&mut fields, "cam.time")?);
            let label = fields
                .next()
                .ok_or_else(|| LinkError::Protocol("cam.label missing".into()))?
                .to_string();
            let bearing = Angle::from_degrees(next_f64(&mut fields, "cam.bearing")?);
            let distance_mm = next_i64(&mut fields, "cam.distanceMm")?;
            let pose_at_observation = next_pose(&mut fields, "cam")?;
            Ok(Frame::Telemetry(
                CameraEvent {
                    time,
                    label,
                    bearing,
                    distance: if distance_mm < 0 { None } else { Some(distance_mm as f64 / 1000.0) },
                    pose_at_observation,
                }
                .into(),
            ))
        }
        "sup" => {
            let time = Millis(next_i64(&mut fields, "sup.time")?);
            let voltage_mv = next_u32(&mut fields, "sup.voltage")?;
            Ok(Frame::Telemetry(SupplyMessage { time, voltage_mv }.into()))
        }
        other => Err(LinkError::Protocol(format!("unknown telemetry tag {other:?}"))),
    }
}

// ── Field parsing helpers ─────────────────────────────────────────────────────

fn next_pose<'a>(fields: &mut impl Iterator<Item = &'a str>, ctx: &str) -> LinkResult<Pose> {
    let x = next_f64(fields, &format!("{ctx}.x"))?;
    let y = next_f64(fields, &format!("{ctx}.y"))?;
    let heading = Angle::from_degrees(next_f64(fields, &format!("{ctx}.heading"))?);
    Ok(Pose { x, y, heading })
}

fn next_f64<'a>(fields: &mut impl Iterator<Item = &'a str>, field: &str) -> LinkResult<f64> {
    fields
        .next()
        .ok_or_else(|| LinkError::Protocol(format!("{field} missing")))?
        .parse()
        .map_err(|_| LinkError::Protocol(format!("{field} not a number")))
}

fn next_i64<'a>(fields: &mut impl Iterator<Item = &'a str>, field: &str) -> LinkResult<i64> {
    fields
        .next()
        .ok_or_else(|| LinkError::Protocol(format!("{field} missing")))?
        .parse()
        .map_err(|_| LinkError::Protocol(format!("{field} not an integer")))
}

fn next_i32<'a>(fields: &mut impl Iterator<Item = &'a str>, field: &str) -> LinkResult<i32> {
    Ok(next_i64(fields, field)? as i32)
}

fn next_u32<'a>(fields: &mut impl Iterator<Item = &'a str>, field: &str) -> LinkResult<u32> {
    fields
        .next()
        .ok_or_else(|| LinkError::Protocol(format!("{field} missing")))?
        .parse()
        .map_err(|_| LinkError::Protocol(format!("{field} not an unsigned integer")))
}

fn next_bool<'a>(fields: &mut impl Iterator<Item = &'a str>, field: &str) -> LinkResult<bool> {
    match fields.next() {
        Some("1") | Some("true") => Ok(true),
        Some("0") | Some("false") => Ok(false),
        Some(_) => Err(LinkError::Protocol(format!("{field} not a bool"))),
        None => Err(LinkError::Protocol(format!("{field} missing"))),
    }
}
