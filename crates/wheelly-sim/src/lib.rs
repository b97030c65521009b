//! `wheelly-sim` — the reaction-loop controller (C9): couples the world
//! modeller, the state machine interpreter, and a robot link.
//!
//! # Reaction loop
//!
//! ```text
//! every reaction_interval_ms:
//!   ① Pull    — drain telemetry from the link; apply any clock-sync offset;
//!               sort by embedded timestamp.
//!   ② Model   — WorldModeller::step(messages, now) → WorldModel.
//!   ③ Act     — Interpreter::step(ctx) → StepResult { commands, event? }.
//!   ④ Dispatch — send each command over the link, retrying transient
//!               timeouts up to three times; on exhaustion the link degrades
//!               (or fails, after three consecutive misses) rather than
//!               aborting the tick. A `ClearMap` command is applied directly
//!               to the modeller instead of going over the wire.
//! ```
//!
//! # Cargo features
//!
//! None — the controller is single-threaded by design (see the
//! concurrency notes in the crate's design ledger).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wheelly_agent::Flow;
//! use wheelly_core::Millis;
//! use wheelly_link::FakeLink;
//! use wheelly_sim::{ControllerBuilder, NoopObserver};
//! use wheelly_states::StateCatalog;
//!
//! let flow = Flow::load_yaml(include_str!("flow.yaml"))?;
//! let mut controller = ControllerBuilder::new(FakeLink::new(), flow, StateCatalog::standard())
//!     .build(Millis(0))?;
//! controller.step(Millis(0))?;
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod observer;


pub use builder::ControllerBuilder;
pub use controller::Controller;
pub use error::{SimError, SimResult};
pub use observer::{ControllerObserver, NoopObserver};
