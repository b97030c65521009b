//! Fluent builder for constructing a [`Controller`].

use wheelly_agent::{Blackboard, Flow, Interpreter, StepContext};
use wheelly_core::{Millis, Point};
use wheelly_link::{FixedRetries, RetryPolicy, RobotLink};
use wheelly_states::StateCatalog;
use wheelly_world::{ModellerConfig, WorldModeller};

use crate::{Controller, SimError, SimResult};

/// Fluent builder for [`Controller<L>`].
///
/// # Required inputs
///
/// - a [`RobotLink`] implementation (a real serial bridge or [`FakeLink`][wheelly_link::FakeLink])
/// - the [`Flow`] to drive
/// - a [`StateCatalog`] that can build every class the flow names
///
/// # Optional inputs (have defaults)
///
/// | Method                      | Default                                  |
/// |-----------------------------|-------------------------------------------|
/// | `.modeller_config(c)`       | [`ModellerConfig::default`]                |
/// | `.grid(w, h, cell, origin)` | `60 × 60` cells of `0.1 m`, centred on `(3, 3)` |
/// | `.reaction_interval_ms(n)`  | `300`                                      |
/// | `.command_interval_ms(n)`   | `600`                                      |
/// | `.slack_ms(n)`              | `100`                                      |
/// | `.retry(policy)`            | [`FixedRetries`] with `max: 3`              |
///
/// # Example
///
/// ```rust,ignore
/// let mut controller = ControllerBuilder::new(link, flow, StateCatalog::standard())
///     .reaction_interval_ms(300)
///     .build(Millis(0))?;
/// controller.run(&clock, Millis(60_000), &mut NoopObserver)?;
/// ```
pub struct ControllerBuilder<L: RobotLink> {
    link: L,
    flow: Flow,
    catalog: StateCatalog,
    modeller_config: ModellerConfig,
    grid_width: usize,
    grid_height: usize,
    cell_size: f64,
    origin: Point,
    reaction_interval_ms: i64,
    command_interval_ms: i64,
    slack_ms: i64,
    retry: Box<dyn RetryPolicy>,
}

impl<L: RobotLink> ControllerBuilder<L> {
    pub fn new(link: L, flow: Flow, catalog: StateCatalog) -> Self {
        Self {
            link,
            flow,
            catalog,
            modeller_config: ModellerConfig::default(),
            grid_width: 60,
            grid_height: 60,
            cell_size: 0.1,
            origin: Point::new(3.0, 3.0),
            reaction_interval_ms: 300,
            command_interval_ms: 600,
            slack_ms: 100,
            retry: Box::new(FixedRetries::default()),
        }
    }

    pub fn modeller_config(mut self, config: ModellerConfig) -> Self {
        self.modeller_config = config;
        self
    }

    /// Override the radar grid's shape. `origin` is the world point mapped
    /// to grid cell `(0, 0)`.
    pub fn grid(mut self, width: usize, height: usize, cell_size: f64, origin: Point) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self.cell_size = cell_size;
        self.origin = origin;
        self
    }

    pub fn reaction_interval_ms(mut self, ms: i64) -> Self {
        self.reaction_interval_ms = ms;
        self
    }

    pub fn command_interval_ms(mut self, ms: i64) -> Self {
        self.command_interval_ms = ms;
        self
    }

    pub fn slack_ms(mut self, ms: i64) -> Self {
        self.slack_ms = ms;
        self
    }

    pub fn retry(mut self, retry: Box<dyn RetryPolicy>) -> Self {
        self.retry = retry;
        self
    }

    /// Validate inputs, build the modeller and interpreter, connect the
    /// link, and return a ready-to-run [`Controller`].
    ///
    /// `now` seeds the reaction deadline and is the timestamp used for the
    /// flow's initial `onInit`/`onEntry` hooks.
    pub fn build(self, now: Millis) -> SimResult<Controller<L>> {
        if self.reaction_interval_ms <= 0 {
            return Err(SimError::ConfigInvalid("reaction_interval_ms must be positive".into()));
        }

        let mut modeller =
            WorldModeller::new(self.modeller_config, self.grid_width, self.grid_height, self.cell_size, self.origin)?;
        let behaviors = self.catalog.build_all(&self.flow)?;

        let mut blackboard = Blackboard::new();
        let interpreter = {
            let world = modeller.step(&[], now);
            let mut ctx = StepContext::new(&world, &mut blackboard, now);
            Interpreter::new(self.flow, behaviors, &mut ctx)?
        };

        let mut link = self.link;
        link.connect()?;

        Ok(Controller::from_parts(
            link,
            modeller,
            blackboard,
            interpreter,
            now,
            self.reaction_interval_ms,
            self.command_interval_ms,
            self.slack_ms,
            self.retry,
        ))
    }
}
