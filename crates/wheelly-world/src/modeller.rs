//! The world modeller: fuses telemetry into the radar/polar maps and marker
//! set, and derives the safety predicates the agent reads each step.

use wheelly_core::{Message, Millis, Point, RobotSpec};
use wheelly_radar::{Persistence, PolarMap, RadarMap};

use crate::error::{WorldError, WorldResult};
use crate::markers::{MarkerDecay, MarkerSet};
use crate::motion::RobotStatus;

/// Tunables for one [`WorldModeller`] instance. Everything here is a
/// per-run constant; nothing changes after construction.
#[derive(Copy, Clone, Debug)]
pub struct ModellerConfig {
    pub robot_spec: RobotSpec,
    pub persistence: Persistence,
    pub marker_decay: MarkerDecay,
    /// Minimum interval between successive `clean` passes over the radar
    /// grid and marker set.
    pub radar_clean_interval_ms: i64,
    pub n_sectors: usize,
    pub min_radar_distance: f64,
    pub front_arc_deg: f64,
    pub rear_arc_deg: f64,
    pub safe_distance: f64,
}

impl Default for ModellerConfig {
    fn default() -> Self {
        Self {
            robot_spec: RobotSpec::default(),
            persistence: Persistence::default(),
            marker_decay: MarkerDecay::default(),
            radar_clean_interval_ms: 5_000,
            n_sectors: 24,
            min_radar_distance: 0.05,
            front_arc_deg: 90.0,
            rear_arc_deg: 90.0,
            safe_distance: 0.4,
        }
    }
}

/// A read-only snapshot of the world, valid for the duration of one
/// reaction step. Borrows the modeller's radar grid and marker set rather
/// than cloning them — callers must not retain it past the step that
/// produced it.
#[derive(Debug)]
pub struct WorldModel<'a> {
    pub spec: RobotSpec,
    pub robot_status: RobotStatus,
    pub radar: &'a RadarMap,
    pub markers: &'a MarkerSet,
    pub polar: PolarMap,
    pub path: Option<Vec<Point>>,
    pub front_blocked: bool,
    pub rear_blocked: bool,
    pub blocked: bool,
}

impl<'a> WorldModel<'a> {
    /// Same map the modeller mutates; exposed under this name for callers
    /// that want the raw grid rather than the derived polar view.
    pub fn grid_map(&self) -> &RadarMap {
        self.radar
    }

    pub fn can_move_forward(&self) -> bool {
        self.robot_status.can_move_forward
    }

    pub fn can_move_backward(&self) -> bool {
        self.robot_status.can_move_backward
    }
}

/// Fuses telemetry into a radar map, polar map, and marker set, and derives
/// the reactive safety predicates from them each step.
pub struct WorldModeller {
    config: ModellerConfig,
    radar: RadarMap,
    markers: MarkerSet,
    status: RobotStatus,
    last_clean: Millis,
}

impl WorldModeller {
    pub fn new(
        config: ModellerConfig,
        grid_width: usize,
        grid_height: usize,
        cell_size: f64,
        origin: Point,
    ) -> WorldResult<Self> {
        if config.n_sectors == 0 {
            return Err(WorldError::Config("n_sectors must be nonzero".into()));
        }
        Ok(Self {
            radar: RadarMap::new(grid_width, grid_height, cell_size, origin).with_persistence(config.persistence),
            markers: MarkerSet::new(),
            status: RobotStatus::default(),
            last_clean: Millis(i64::MIN),
            config,
        })
    }

    pub fn radar(&self) -> &RadarMap {
        &self.radar
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn status(&self) -> RobotStatus {
        self.status
    }

    /// Apply `messages` (assumed already in embedded-timestamp order — see
    /// spec §5) to the radar map, marker set, and fused status, then
    /// recompute the polar map and safety predicates.
    pub fn step(&mut self, messages: &[Message], now: Millis) -> WorldModel<'_> {
        for message in messages {
            self.apply(message, now);
        }

        if now.since(self.last_clean) >= self.config.radar_clean_interval_ms {
            self.radar.clean(now);
            self.markers.clean(now, self.config.marker_decay);
            self.last_clean = now;
        }

        let polar = PolarMap::compute(
            &self.radar,
            self.status.pose,
            self.config.n_sectors,
            self.config.min_radar_distance,
            self.config.robot_spec.max_radar_distance,
            now,
        );
        let front_blocked = polar.front_blocked(self.config.front_arc_deg, self.config.safe_distance);
        let rear_blocked = polar.rear_blocked(self.config.rear_arc_deg, self.config.safe_distance);
        let blocked = front_blocked && rear_blocked;

        WorldModel {
            spec: self.config.robot_spec,
            robot_status: self.status,
            radar: &self.radar,
            markers: &self.markers,
            polar,
            path: None,
            front_blocked,
            rear_blocked,
            blocked,
        }
    }

    fn apply(&mut self, message: &Message, now: Millis) {
        match message {
            Message::Motion(m) => self.status.apply_motion(m),
            Message::Proximity(m) => {
                let world_bearing = m.pose_at_emit.heading.compose(m.sensor_dir);
                self.radar.apply_proximity(
                    m.pose_at_emit.location(),
                    world_bearing,
                    m.distance_m(),
                    m.time,
                    &self.config.robot_spec,
                );
            }
            Message::Contact(m) => {
                self.status.apply_contact(m);
                if !m.front_clear {
                    self.radar.apply_contact(m.pose.location(), m.pose.heading, now, &self.config.robot_spec);
                }
                if !m.rear_clear {
                    let rear = m.pose.heading.compose(wheelly_core::Angle::from_degrees(180.0));
                    self.radar.apply_contact(m.pose.location(), rear, now, &self.config.robot_spec);
                }
            }
            Message::Camera(m) => self.markers.observe(m),
            Message::Supply(m) => self.status.apply_supply(m),
            Message::Ack(_) => {}
        }
    }

    /// Wipe the radar grid and marker set immediately — used by the
    /// map-clearing state.
    pub fn reset(&mut self) {
        self.radar.purge();
        self.markers.purge();
    }
}
