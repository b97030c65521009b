//! `wheelly-world` — fuses telemetry into the radar/polar maps and label
//! markers, and derives the reactive safety predicates the agent reads.
//!
//! # Crate layout
//!
//! | Module       | Contents                                               |
//! |--------------|---------------------------------------------------------|
//! | [`motion`]   | `RobotStatus` — fused pose/drivetrain/contact telemetry |
//! | [`markers`]  | `LabelMarker`, `MarkerDecay`, `MarkerSet`              |
//! | [`modeller`] | `ModellerConfig`, `WorldModel`, `WorldModeller`         |
//! | [`error`]    | `WorldError`, `WorldResult<T>`                         |

pub mod error;
pub mod markers;
pub mod modeller;
pub mod motion;

#[cfg(test)]
mod tests;

pub use error::{WorldError, WorldResult};
pub use markers::{LabelMarker, MarkerDecay, MarkerSet};
pub use modeller::{ModellerConfig, WorldModel, WorldModeller};
pub use motion::RobotStatus;
