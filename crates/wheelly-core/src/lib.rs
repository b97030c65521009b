//! `wheelly-core` — foundational types for the Wheelly robot control core.
//!
//! This crate is a dependency of every other `wheelly-*` crate.  It
//! intentionally has no `wheelly-*` dependencies and minimal external ones
//! (only `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `StateId` — arena index for state-machine nodes       |
//! | [`angle`]       | `Angle` — (cos, sin) compass bearing                  |
//! | [`pose`]        | `Point`, `Pose` — planar geometry                     |
//! | [`time`]        | `Millis`, `Clock`, `MonotonicClock`, `Deadline`        |
//! | [`robot_spec`]  | `RobotSpec` — immutable per-robot constants           |
//! | [`message`]     | `Message` — the telemetry vocabulary shared by every  |
//! |                 | crate that consumes robot telemetry                   |
//! | [`link_status`] | `LinkStatus` — connection health shared by link/sim    |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod angle;
pub mod error;
pub mod ids;
pub mod link_status;
pub mod message;
pub mod pose;
pub mod robot_spec;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use angle::Angle;
pub use error::{CoreError, CoreResult};
pub use ids::StateId;
pub use link_status::LinkStatus;
pub use message::{AckMessage, CameraEvent, ContactMessage, Message, MotionMessage, ProximityMessage, SupplyMessage};
pub use pose::{Point, Pose};
pub use robot_spec::RobotSpec;
pub use time::{Clock, Deadline, Millis, MonotonicClock};
