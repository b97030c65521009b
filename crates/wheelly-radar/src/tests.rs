//! Unit tests for wheelly-radar.

#[cfg(test)]
mod cell {
    use wheelly_core::Millis;

    use crate::{CellState, Persistence, RadarCell};

    const P: Persistence = Persistence { echo_persistence_ms: 1000, contact_persistence_ms: 500 };

    #[test]
    fn unknown_by_default() {
        let cell = RadarCell::default();
        assert_eq!(cell.state_of(Millis(0), P), CellState::Unknown);
    }

    #[test]
    fn hindered_within_persistence() {
        let mut cell = RadarCell::default();
        cell.clean(Millis(0), P); // no-op; exercises the public surface
        cell.echo_ts = Some(Millis(0));
        assert_eq!(cell.state_of(Millis(900), P), CellState::Hindered);
        assert_eq!(cell.state_of(Millis(1100), P), CellState::Unknown);
    }

    #[test]
    fn empty_when_empty_ts_newer_than_echo() {
        let mut cell = RadarCell::default();
        cell.echo_ts = Some(Millis(0));
        cell.empty_ts = Some(Millis(100));
        assert_eq!(cell.state_of(Millis(200), P), CellState::Empty);
    }

    #[test]
    fn contact_overrides_everything_while_active() {
        let mut cell = RadarCell::default();
        cell.echo_ts = Some(Millis(0));
        cell.contact_ts = Some(Millis(0));
        assert_eq!(cell.state_of(Millis(100), P), CellState::Contact);
        assert_eq!(cell.state_of(Millis(600), P), CellState::Hindered);
    }

    #[test]
    fn clean_clears_aged_fields() {
        let mut cell = RadarCell::default();
        cell.echo_ts = Some(Millis(0));
        cell.clean(Millis(2000), P);
        assert_eq!(cell.echo_ts, None);
    }
}

#[cfg(test)]
mod grid {
    use wheelly_core::{Angle, Millis, Point, RobotSpec};

    use crate::{CellState, RadarMap};

    fn spec() -> RobotSpec {
        RobotSpec { max_radar_distance: 3.0, receptive_angle: Angle::from_degrees(10.0), contact_radius: 0.3 }
    }

    #[test]
    fn cell_of_and_center_roundtrip() {
        let map = RadarMap::new(20, 20, 0.1, Point::ORIGIN);
        let (i, j) = map.cell_of(Point::new(0.05, 0.05)).unwrap();
        let center = map.center(i, j);
        assert!((center.x - 0.05).abs() < 0.1);
        assert!((center.y - 0.05).abs() < 0.1);
    }

    #[test]
    fn out_of_bounds_point_has_no_cell() {
        let map = RadarMap::new(10, 10, 0.1, Point::ORIGIN);
        assert!(map.cell_of(Point::new(100.0, 100.0)).is_none());
    }

    #[test]
    fn proximity_echo_marks_hindered_and_clears_path() {
        let mut map = RadarMap::new(60, 60, 0.1, Point::ORIGIN);
        map.apply_proximity(Point::ORIGIN, Angle::ZERO, Some(1.0), Millis(0), &spec());

        let echo_cell = map.cell_of(Point::new(0.0, 1.0)).unwrap();
        assert_eq!(map.state_of(echo_cell.0, echo_cell.1, Millis(0)).unwrap(), CellState::Hindered);

        let near_cell = map.cell_of(Point::new(0.0, 0.3)).unwrap();
        assert_eq!(map.state_of(near_cell.0, near_cell.1, Millis(0)).unwrap(), CellState::Empty);
    }

    #[test]
    fn proximity_no_echo_clears_full_cone() {
        let mut map = RadarMap::new(80, 80, 0.1, Point::ORIGIN);
        map.apply_proximity(Point::ORIGIN, Angle::ZERO, None, Millis(0), &spec());
        let far_cell = map.cell_of(Point::new(0.0, 2.9)).unwrap();
        assert_eq!(map.state_of(far_cell.0, far_cell.1, Millis(0)).unwrap(), CellState::Empty);
    }

    #[test]
    fn contact_marks_nearby_cells() {
        let mut map = RadarMap::new(20, 20, 0.1, Point::ORIGIN);
        map.apply_contact(Point::ORIGIN, Angle::ZERO, Millis(0), &spec());
        let (i, j) = map.cell_of(Point::new(0.0, 0.1)).unwrap();
        assert_eq!(map.state_of(i, j, Millis(0)).unwrap(), CellState::Contact);
    }

    #[test]
    fn clean_resets_entire_grid() {
        let mut map = RadarMap::new(10, 10, 0.1, Point::ORIGIN);
        map.apply_proximity(Point::ORIGIN, Angle::ZERO, Some(0.2), Millis(0), &spec());
        map.clean(Millis(10_000));
        let (i, j) = map.cell_of(Point::new(0.0, 0.2)).unwrap();
        assert_eq!(map.state_of(i, j, Millis(10_000)).unwrap(), CellState::Unknown);
    }

    #[test]
    fn purge_clears_everything_immediately() {
        let mut map = RadarMap::new(10, 10, 0.1, Point::ORIGIN);
        map.apply_proximity(Point::ORIGIN, Angle::ZERO, Some(0.2), Millis(0), &spec());
        map.purge();
        let (i, j) = map.cell_of(Point::new(0.0, 0.2)).unwrap();
        assert_eq!(map.state_of(i, j, Millis(0)).unwrap(), CellState::Unknown);
    }

    #[test]
    fn cells_within_respects_annulus() {
        let map = RadarMap::new(40, 40, 0.1, Point::ORIGIN);
        let count_all: Vec<_> = map.cells_within(Point::ORIGIN, 0.0, 1.0).collect();
        let count_far: Vec<_> = map.cells_within(Point::ORIGIN, 0.9, 1.0).collect();
        assert!(count_far.len() < count_all.len());
    }
}

#[cfg(test)]
mod polar {
    use wheelly_core::{Angle, Millis, Point, Pose, RobotSpec};

    use crate::{PolarMap, RadarMap, SectorState};

    fn spec() -> RobotSpec {
        RobotSpec { max_radar_distance: 3.0, receptive_angle: Angle::from_degrees(10.0), contact_radius: 0.3 }
    }

    #[test]
    fn all_unknown_on_empty_grid() {
        let grid = RadarMap::new(40, 40, 0.1, Point::ORIGIN);
        let polar = PolarMap::compute(&grid, Pose::default(), 24, 0.1, 3.0, Millis(0));
        assert!(polar.sectors().iter().all(|s| s.state == SectorState::Unknown));
    }

    #[test]
    fn forward_echo_shows_up_in_sector_zero() {
        let mut grid = RadarMap::new(80, 80, 0.05, Point::ORIGIN);
        grid.apply_proximity(Point::ORIGIN, Angle::ZERO, Some(1.0), Millis(0), &spec());
        let polar = PolarMap::compute(&grid, Pose::default(), 24, 0.1, 3.0, Millis(0));
        assert_eq!(polar.sector(0).state, SectorState::Hindered);
    }

    #[test]
    fn front_blocked_when_close_obstacle_ahead() {
        let mut grid = RadarMap::new(80, 80, 0.05, Point::ORIGIN);
        grid.apply_proximity(Point::ORIGIN, Angle::ZERO, Some(0.1), Millis(0), &spec());
        let polar = PolarMap::compute(&grid, Pose::default(), 24, 0.01, 3.0, Millis(0));
        assert!(polar.front_blocked(60.0, 0.4));
        assert!(!polar.rear_blocked(60.0, 0.4));
        assert!(!polar.blocked(60.0, 60.0, 0.4));
    }

    #[test]
    fn front_clears_when_obstacle_recedes() {
        let mut grid = RadarMap::new(80, 80, 0.05, Point::ORIGIN);
        grid.apply_proximity(Point::ORIGIN, Angle::ZERO, Some(0.1), Millis(0), &spec());
        grid.apply_proximity(Point::ORIGIN, Angle::ZERO, Some(1.0), Millis(1), &spec());
        let polar = PolarMap::compute(&grid, Pose::default(), 24, 0.01, 3.0, Millis(1));
        assert!(!polar.front_blocked(60.0, 0.4));
    }
}
