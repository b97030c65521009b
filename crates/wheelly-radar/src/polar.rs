//! The derived N-sector polar view and the safety predicates computed from
//! it.

use wheelly_core::{Angle, Millis, Point, Pose};

use crate::grid::{CellState, RadarMap};

/// The classification of one polar sector.
///
/// `Labelled` is never produced by [`PolarMap::compute`] directly — it is
/// layered on afterward by the world modeller from marker data — but lives
/// here so sectors have one shared type regardless of which layer populated
/// them.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SectorState {
    Contact,
    Hindered,
    Labelled,
    Empty,
    Unknown,
}

impl From<CellState> for SectorState {
    fn from(s: CellState) -> Self {
        match s {
            CellState::Contact => SectorState::Contact,
            CellState::Hindered => SectorState::Hindered,
            CellState::Empty => SectorState::Empty,
            CellState::Unknown => SectorState::Unknown,
        }
    }
}

/// One angular slice of the polar view.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sector {
    pub state: SectorState,
    /// Populated for `Hindered`/`Labelled`/`Contact`/`Empty` sectors — the
    /// radius at which the winning classification was found.
    pub distance: Option<f64>,
}

impl Sector {
    fn unknown() -> Self {
        Self { state: SectorState::Unknown, distance: None }
    }
}

/// The N-sector polar view around the robot's current pose, recomputed each
/// step from the radar map.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PolarMap {
    sectors: Vec<Sector>,
}

impl PolarMap {
    /// Number of equi-angular sectors.
    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }

    pub fn sector(&self, index: usize) -> Sector {
        self.sectors[index]
    }

    pub fn sectors(&self) -> &[Sector] {
        &self.sectors
    }

    /// Bearing that sector 0 (and hence every sector) is centred on,
    /// relative to the pose `compute` was called with — sector 0 always
    /// points robot-forward.
    pub fn sector_bearing(&self, index: usize, pose_heading: Angle) -> Angle {
        let width_deg = 360.0 / self.sectors.len() as f64;
        pose_heading.compose(Angle::from_degrees(width_deg * index as f64))
    }

    /// Recompute the polar view from `grid` around `pose`.
    ///
    /// For each of `n_sectors` equi-angular sectors, scans grid cells whose
    /// centre lies in `[r_min, r_max]` and within the sector, and keeps the
    /// classification at the smallest radius, breaking ties on
    /// classification priority (`Contact` beats `Hindered` beats `Empty`
    /// beats `Unknown` — see [`SectorState`]'s derived `Ord`).
    pub fn compute(
        grid: &RadarMap,
        pose: Pose,
        n_sectors: usize,
        r_min: f64,
        r_max: f64,
        now: Millis,
    ) -> Self {
        let width_deg = 360.0 / n_sectors as f64;
        let mut sectors = vec![Sector::unknown(); n_sectors];

        for (i, j, cell) in grid.cells_within(pose.location(), r_min, r_max) {
            let center = grid.center(i, j);
            let d = pose.location().distance(center);
            // bearing_to(center) - heading, normalized into [0, 360).
            let rel_bearing = -pose.heading.difference_degrees(pose.location().bearing_to(center));
            let sector_idx = ((rel_bearing.rem_euclid(360.0) / width_deg) as usize).min(n_sectors - 1);

            let state: SectorState = cell.state_of(now, grid.persistence()).into();
            let slot = &mut sectors[sector_idx];
            // Priority first (a worse class always wins), radius breaks ties
            // within the same class.
            let candidate_is_better = match slot.distance {
                None => true,
                Some(best_d) => (state, d) < (slot.state, best_d),
            };
            if candidate_is_better {
                *slot = Sector { state, distance: Some(d) };
            }
        }

        Self { sectors }
    }

    /// `true` if any sector within `±front_arc` of forward (sector 0) has a
    /// hindered/contact distance below `safe_distance`.
    pub fn front_blocked(&self, front_arc_deg: f64, safe_distance: f64) -> bool {
        self.arc_blocked(0.0, front_arc_deg, safe_distance)
    }

    /// Symmetric to [`PolarMap::front_blocked`], centred on the rear
    /// (180°).
    pub fn rear_blocked(&self, rear_arc_deg: f64, safe_distance: f64) -> bool {
        self.arc_blocked(180.0, rear_arc_deg, safe_distance)
    }

    pub fn blocked(&self, front_arc_deg: f64, rear_arc_deg: f64, safe_distance: f64) -> bool {
        self.front_blocked(front_arc_deg, safe_distance) && self.rear_blocked(rear_arc_deg, safe_distance)
    }

    fn arc_blocked(&self, center_deg: f64, arc_deg: f64, safe_distance: f64) -> bool {
        let width_deg = 360.0 / self.sectors.len() as f64;
        self.sectors.iter().enumerate().any(|(i, s)| {
            let sector_center = i as f64 * width_deg;
            let delta = angular_distance_deg(sector_center, center_deg);
            delta <= arc_deg / 2.0
                && matches!(s.state, SectorState::Hindered | SectorState::Contact)
                && s.distance.is_some_and(|d| d < safe_distance)
        })
    }
}

fn angular_distance_deg(a: f64, b: f64) -> f64 {
    let raw = (a - b).rem_euclid(360.0);
    raw.min(360.0 - raw)
}
