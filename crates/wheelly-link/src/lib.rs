//! `wheelly-link` — the line-oriented serial wire protocol, the
//! [`RobotLink`] trait, and command validity/retry tracking.
//!
//! # Crate layout
//!
//! | Module           | Contents                                               |
//! |------------------|----------------------------------------------------------|
//! | [`codec`]        | Outbound command encoding, inbound telemetry decoding  |
//! | [`protocol`]     | `RobotLink` trait, `FakeLink` test double              |
//! | [`deadline_queue`]| `DeadlineQueue` (`BTreeMap<Millis, _>`)                |
//! | [`queue`]        | `TelemetryQueue` — bounded inbound hand-off            |
//! | [`retry`]        | `RetryPolicy`, `FixedRetries`, `NoRetries`              |
//! | [`error`]        | `LinkError`, `LinkResult<T>`                            |

pub mod codec;
pub mod deadline_queue;
pub mod error;
pub mod protocol;
pub mod queue;
pub mod retry;

#[cfg(test)]
mod tests;

pub use codec::Frame;
pub use deadline_queue::DeadlineQueue;
pub use error::{LinkError, LinkResult};
pub use protocol::{FakeLink, RobotLink};
pub use queue::TelemetryQueue;
pub use retry::{FixedRetries, NoRetries, RetryPolicy};
