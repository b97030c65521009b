//! The occupancy grid ("radar map") and its per-cell persistence model.
//!
//! # Data layout
//!
//! `RadarMap` is a dense `W × H` grid of `cellSize`-metre cells, stored as a
//! flat `Vec<RadarCell>` in row-major order and addressed by integer offsets
//! `(i, j)` from a fixed world origin. The grid is **never translated** when
//! the robot moves — decay and re-observation are what make the window track
//! the robot, not bulk-shifting the array. This mirrors the CSR road graph's
//! "flat array addressed by integer index, topology computed not stored"
//! layout, just over a regular grid instead of a sparse adjacency list.

use wheelly_core::{Angle, Millis, Point, RobotSpec};

use crate::error::{RadarError, RadarResult};

// ── RadarCell ─────────────────────────────────────────────────────────────────

/// The persistence classification of a single grid cell at a point in time.
///
/// Ordered so that `contact < hindered < empty < unknown` — smaller variants
/// are the higher-priority ("worse for safety") classification, matching the
/// priority the polar map uses when multiple cells compete for one sector.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    Contact,
    Hindered,
    Empty,
    Unknown,
}

/// How long each kind of observation remains trusted before `clean` erases
/// it.
#[derive(Copy, Clone, Debug)]
pub struct Persistence {
    pub echo_persistence_ms: i64,
    pub contact_persistence_ms: i64,
}

impl Default for Persistence {
    fn default() -> Self {
        Self { echo_persistence_ms: 2_000, contact_persistence_ms: 1_000 }
    }
}

/// One grid cell's raw timestamps.
///
/// Invariant: timestamps only ever move forward — `update`/`clean` never
/// write a timestamp older than what's already stored for that field.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadarCell {
    pub echo_ts: Option<Millis>,
    pub empty_ts: Option<Millis>,
    pub contact_ts: Option<Millis>,
}

impl RadarCell {
    /// Classify this cell at `now` given `persistence`.
    ///
    /// - **Contact** if `contact_ts` is within `contact_persistence_ms`.
    /// - **Empty** if `empty_ts > echo_ts` and within `echo_persistence_ms`.
    /// - **Hindered** if `echo_ts` is within `echo_persistence_ms`.
    /// - **Unknown** otherwise.
    pub fn state_of(&self, now: Millis, persistence: Persistence) -> CellState {
        if let Some(ts) = self.contact_ts {
            if now.since(ts) <= persistence.contact_persistence_ms {
                return CellState::Contact;
            }
        }
        match (self.echo_ts, self.empty_ts) {
            (Some(echo), Some(empty)) if empty > echo => {
                if now.since(empty) <= persistence.echo_persistence_ms {
                    CellState::Empty
                } else {
                    CellState::Unknown
                }
            }
            (Some(echo), _) => {
                if now.since(echo) <= persistence.echo_persistence_ms {
                    CellState::Hindered
                } else {
                    CellState::Unknown
                }
            }
            (None, Some(empty)) => {
                if now.since(empty) <= persistence.echo_persistence_ms {
                    CellState::Empty
                } else {
                    CellState::Unknown
                }
            }
            (None, None) => CellState::Unknown,
        }
    }

    /// Clear fields whose age exceeds their respective persistence,
    /// bounding memory/garbage forever rather than growing stale data.
    pub fn clean(&mut self, now: Millis, persistence: Persistence) {
        if let Some(ts) = self.echo_ts {
            if now.since(ts) > persistence.echo_persistence_ms {
                self.echo_ts = None;
            }
        }
        if let Some(ts) = self.empty_ts {
            if now.since(ts) > persistence.echo_persistence_ms {
                self.empty_ts = None;
            }
        }
        if let Some(ts) = self.contact_ts {
            if now.since(ts) > persistence.contact_persistence_ms {
                self.contact_ts = None;
            }
        }
    }

    /// Record an echo (hindered) observation, respecting the forward-only
    /// timestamp invariant.
    fn mark_echo(&mut self, now: Millis) {
        if self.echo_ts.is_none_or(|ts| now >= ts) {
            self.echo_ts = Some(now);
        }
    }

    fn mark_empty(&mut self, now: Millis) {
        if self.empty_ts.is_none_or(|ts| now >= ts) {
            self.empty_ts = Some(now);
        }
    }

    fn mark_contact(&mut self, now: Millis) {
        if self.contact_ts.is_none_or(|ts| now >= ts) {
            self.contact_ts = Some(now);
        }
    }
}

// ── RadarMap ──────────────────────────────────────────────────────────────────

/// A fixed-size rectangular occupancy grid centered on a world origin.
#[derive(Debug)]
pub struct RadarMap {
    width: usize,
    height: usize,
    cell_size: f64,
    origin: Point,
    cells: Vec<RadarCell>,
    persistence: Persistence,
}

impl RadarMap {
    /// Build a `width × height` grid of `cell_size`-metre cells, centered at
    /// `origin`.
    pub fn new(width: usize, height: usize, cell_size: f64, origin: Point) -> Self {
        Self {
            width,
            height,
            cell_size,
            origin,
            cells: vec![RadarCell::default(); width * height],
            persistence: Persistence::default(),
        }
    }

    pub fn with_persistence(mut self, persistence: Persistence) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn persistence(&self) -> Persistence {
        self.persistence
    }

    // ── Coordinate transforms ─────────────────────────────────────────────

    /// The integer grid offset containing world point `p`, or `None` if `p`
    /// falls outside the grid's extent.
    pub fn cell_of(&self, p: Point) -> Option<(i32, i32)> {
        let half_w = self.width as f64 * self.cell_size / 2.0;
        let half_h = self.height as f64 * self.cell_size / 2.0;
        let local_x = p.x - self.origin.x + half_w;
        let local_y = p.y - self.origin.y + half_h;
        if local_x < 0.0 || local_y < 0.0 {
            return None;
        }
        let i = (local_x / self.cell_size) as i32;
        let j = (local_y / self.cell_size) as i32;
        if i < 0 || j < 0 || i as usize >= self.width || j as usize >= self.height {
            return None;
        }
        Some((i, j))
    }

    /// World-frame centre point of cell `(i, j)`.
    pub fn center(&self, i: i32, j: i32) -> Point {
        let half_w = self.width as f64 * self.cell_size / 2.0;
        let half_h = self.height as f64 * self.cell_size / 2.0;
        Point {
            x: self.origin.x - half_w + (i as f64 + 0.5) * self.cell_size,
            y: self.origin.y - half_h + (j as f64 + 0.5) * self.cell_size,
        }
    }

    fn index(&self, i: i32, j: i32) -> Option<usize> {
        if i < 0 || j < 0 || i as usize >= self.width || j as usize >= self.height {
            return None;
        }
        Some(j as usize * self.width + i as usize)
    }

    pub fn cell(&self, i: i32, j: i32) -> RadarResult<&RadarCell> {
        self.index(i, j)
            .map(|idx| &self.cells[idx])
            .ok_or(RadarError::OutOfBounds(i, j))
    }

    pub fn state_of(&self, i: i32, j: i32, now: Millis) -> RadarResult<CellState> {
        self.cell(i, j).map(|c| c.state_of(now, self.persistence))
    }

    /// Cells whose centre lies within the annulus `[r_min, r_max]` of
    /// `centre`, together with their grid offset.
    pub fn cells_within(
        &self,
        centre: Point,
        r_min: f64,
        r_max: f64,
    ) -> impl Iterator<Item = (i32, i32, &RadarCell)> + '_ {
        let cells_radius = (r_max / self.cell_size).ceil() as i32 + 1;
        let (ci, cj) = self.cell_of(centre).unwrap_or((0, 0));
        (-cells_radius..=cells_radius).flat_map(move |dj| {
            (-cells_radius..=cells_radius).filter_map(move |di| {
                let i = ci + di;
                let j = cj + dj;
                let idx = self.index(i, j)?;
                let cell = &self.cells[idx];
                let d = centre.distance(self.center(i, j));
                (d >= r_min && d <= r_max).then_some((i, j, cell))
            })
        })
    }

    // ── Updates ────────────────────────────────────────────────────────────

    /// Apply a proximity reading: an echo at `distance` (if `Some`) marks the
    /// struck cell hindered and every cell on the open ray up to it empty,
    /// within `spec.receptive_angle`; no echo marks the entire cone up to
    /// `spec.max_radar_distance` empty.
    pub fn apply_proximity(
        &mut self,
        robot: Point,
        sensor_dir: Angle,
        distance: Option<f64>,
        now: Millis,
        spec: &RobotSpec,
    ) {
        let max_d = distance.unwrap_or(spec.max_radar_distance);
        self.sweep_cone_empty(robot, sensor_dir, spec.receptive_angle, max_d, now);
        if let Some(d) = distance {
            if let Some((i, j)) = self.cell_of(robot.project(sensor_dir, d)) {
                if let Some(idx) = self.index(i, j) {
                    self.cells[idx].mark_echo(now);
                }
            }
        }
    }

    /// Mark every cell within `spec.contact_radius` of `robot`, on the
    /// indicated side, as contact.
    pub fn apply_contact(&mut self, robot: Point, side: Angle, now: Millis, spec: &RobotSpec) {
        self.sweep_cone_contact(robot, side, Angle::from_degrees(90.0), spec.contact_radius, now);
    }

    /// Mark every cell centre within `half_angle` of `bearing` from `robot`,
    /// out to `max_d`, as empty at `now` — stopping just short of `max_d` so
    /// a subsequent echo mark at exactly `max_d` is not immediately
    /// overwritten by the same sweep.
    fn sweep_cone_empty(&mut self, robot: Point, bearing: Angle, half_angle: Angle, max_d: f64, now: Millis) {
        self.for_each_cell_in_cone(robot, bearing, half_angle, max_d, |cell| cell.mark_empty(now));
    }

    fn sweep_cone_contact(&mut self, robot: Point, bearing: Angle, half_angle: Angle, max_d: f64, now: Millis) {
        self.for_each_cell_in_cone(robot, bearing, half_angle, max_d, |cell| cell.mark_contact(now));
    }

    fn for_each_cell_in_cone(
        &mut self,
        robot: Point,
        bearing: Angle,
        half_angle: Angle,
        max_d: f64,
        mut mark: impl FnMut(&mut RadarCell),
    ) {
        let cells_radius = (max_d / self.cell_size).ceil() as i32 + 1;
        let (ci, cj) = match self.cell_of(robot) {
            Some(c) => c,
            None => return,
        };
        let half_deg = half_angle.to_degrees().abs();
        for dj in -cells_radius..=cells_radius {
            for di in -cells_radius..=cells_radius {
                let i = ci + di;
                let j = cj + dj;
                let Some(idx) = self.index(i, j) else { continue };
                let center = self.center(i, j);
                let d = robot.distance(center);
                if d > max_d {
                    continue;
                }
                let cell_bearing = robot.bearing_to(center);
                if cell_bearing.difference_degrees(bearing).abs() <= half_deg {
                    mark(&mut self.cells[idx]);
                }
            }
        }
    }

    /// No-op pass letting callers treat `decay` and `clean` uniformly in a
    /// ticker table; aged timestamps are already handled on read by
    /// `state_of`.
    pub fn decay(&mut self, _now: Millis) {}

    /// Zero fields older than their persistence across the whole grid.
    /// Intended to run on `radarCleanInterval`, not every tick.
    pub fn clean(&mut self, now: Millis) {
        let persistence = self.persistence;
        for cell in &mut self.cells {
            cell.clean(now, persistence);
        }
    }

    /// Remove every observation from every cell — used by the `ClearMap`
    /// state.
    pub fn purge(&mut self) {
        for cell in &mut self.cells {
            *cell = RadarCell::default();
        }
    }
}
