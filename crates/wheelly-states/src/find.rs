//! `FindLabel`/`FindUnknown`/`FindRefresh`: bounded scans over the radar
//! grid that each produce a path of candidate waypoints.

use wheelly_agent::{AgentResult, StateBehavior, StateFactory, StateNode, StepContext, StepResult, Value};
use wheelly_core::{Millis, Point};
use wheelly_radar::{CellState, RadarMap};

use crate::params::{integer, number};

#[derive(Clone, Copy, PartialEq)]
enum FindKind {
    /// Cells currently classified `Unknown` adjacent to at least one
    /// `Empty` cell — the exploration frontier.
    Unknown,
    /// Cells not classified `Unknown` — candidates due for a fresh look,
    /// farthest first since those are the ones the sensor cone covers last.
    Refresh,
}

struct FindConfig {
    kind: FindKind,
    min_radius: f64,
    max_radius: f64,
    min_goals: usize,
    max_search_ms: i64,
}

impl FindConfig {
    fn from_params(node: &StateNode, kind: FindKind) -> Self {
        Self {
            kind,
            min_radius: number(&node.params, "min_radius", 0.3),
            max_radius: number(&node.params, "max_radius", 2.5),
            min_goals: integer(&node.params, "min_goals", 1).max(1) as usize,
            max_search_ms: integer(&node.params, "max_search_time_ms", 1_000),
        }
    }
}

struct FindState {
    config: FindConfig,
    entered_at: Millis,
}

impl StateBehavior for FindState {
    fn entry(&mut self, ctx: &mut StepContext<'_>) {
        self.entered_at = ctx.now;
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> StepResult {
        let grid = ctx.world.grid_map();
        let robot = ctx.world.robot_status.pose.location();
        let mut candidates: Vec<(f64, Point)> = grid
            .cells_within(robot, self.config.min_radius, self.config.max_radius)
            .filter(|(i, j, cell)| matches(self.config.kind, cell.state_of(ctx.now, grid.persistence()), *i, *j, grid, ctx.now))
            .map(|(i, j, _)| {
                let center = grid.center(i, j);
                (robot.distance(center), center)
            })
            .collect();

        candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
        candidates.dedup_by(|a, b| a.1.distance(b.1) < grid.cell_size());

        if candidates.len() >= self.config.min_goals {
            let path: Vec<Point> = candidates.into_iter().map(|(_, p)| p).collect();
            ctx.blackboard.put("nav.path", Value::Path(path));
            return StepResult::with_event("completed");
        }

        if ctx.now.since(self.entered_at) >= self.config.max_search_ms {
            return StepResult::with_event("notFound");
        }

        StepResult::none()
    }
}

fn matches(kind: FindKind, state: CellState, i: i32, j: i32, grid: &RadarMap, now: Millis) -> bool {
    match kind {
        FindKind::Unknown => state == CellState::Unknown && has_empty_neighbor(grid, i, j, now),
        FindKind::Refresh => state != CellState::Unknown,
    }
}

/// `true` if any of the 8 neighbors of `(i, j)` is currently classified
/// `Empty` — the test for "on the exploration frontier" rather than buried
/// inside unexplored territory.
fn has_empty_neighbor(grid: &RadarMap, i: i32, j: i32, now: Millis) -> bool {
    (-1..=1).any(|dj| {
        (-1..=1).any(|di| {
            (di != 0 || dj != 0) && grid.state_of(i + di, j + dj, now).is_ok_and(|s| s == CellState::Empty)
        })
    })
}

macro_rules! find_factory {
    ($factory:ident, $class:literal, $kind:expr) => {
        pub struct $factory;

        impl StateFactory for $factory {
            fn class(&self) -> &str {
                $class
            }

            fn build(&self, node: &StateNode) -> AgentResult<Box<dyn StateBehavior>> {
                Ok(Box::new(FindState { config: FindConfig::from_params(node, $kind), entered_at: Millis::ZERO }))
            }
        }
    };
}

find_factory!(FindUnknownFactory, "FindUnknown", FindKind::Unknown);
find_factory!(FindRefreshFactory, "FindRefresh", FindKind::Refresh);

/// `FindLabel` targets a known marker rather than scanning the grid — it
/// shares the bounded-time/`minGoals` contract but its candidate source is
/// the marker set, not cell classification.
pub struct FindLabelFactory;

impl StateFactory for FindLabelFactory {
    fn class(&self) -> &str {
        "FindLabel"
    }

    fn build(&self, node: &StateNode) -> AgentResult<Box<dyn StateBehavior>> {
        Ok(Box::new(FindLabelState {
            label: crate::params::text(&node.params, "label").map(str::to_string),
            max_search_ms: integer(&node.params, "max_search_time_ms", 1_000),
            min_goals: integer(&node.params, "min_goals", 1).max(1) as usize,
            entered_at: Millis::ZERO,
        }))
    }
}

struct FindLabelState {
    label: Option<String>,
    max_search_ms: i64,
    min_goals: usize,
    entered_at: Millis,
}

impl StateBehavior for FindLabelState {
    fn entry(&mut self, ctx: &mut StepContext<'_>) {
        self.entered_at = ctx.now;
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> StepResult {
        let matching: Vec<Point> = ctx
            .world
            .markers
            .markers()
            .iter()
            .filter(|m| self.label.as_deref().is_none_or(|l| m.label == l))
            .map(|m| m.position)
            .collect();

        if matching.len() >= self.min_goals {
            ctx.blackboard.put("nav.path", Value::Path(matching));
            return StepResult::with_event("completed");
        }

        if ctx.now.since(self.entered_at) >= self.max_search_ms {
            return StepResult::with_event("notFound");
        }

        StepResult::none()
    }
}
