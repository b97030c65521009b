//! `ExploringPoint`: picks the next frontier waypoint from the largest
//! contiguous run of empty/unknown sectors.

use wheelly_agent::{AgentResult, StateBehavior, StateFactory, StateNode, StepContext, StepResult, Value};
use wheelly_radar::{PolarMap, SectorState};

use crate::params::number;

pub struct ExploringPointFactory;

impl StateFactory for ExploringPointFactory {
    fn class(&self) -> &str {
        "ExploringPoint"
    }

    fn build(&self, node: &StateNode) -> AgentResult<Box<dyn StateBehavior>> {
        let safe_distance = number(&node.params, "safe_distance", 0.4);
        let max_distance = number(&node.params, "max_distance", 2.5);
        Ok(Box::new(ExploringPointState { safe_distance, max_distance }))
    }
}

struct ExploringPointState {
    safe_distance: f64,
    max_distance: f64,
}

impl StateBehavior for ExploringPointState {
    fn step(&mut self, ctx: &mut StepContext<'_>) -> StepResult {
        let polar = &ctx.world.polar;
        match largest_open_run(polar, self.safe_distance, self.max_distance) {
            Some((start, len)) => {
                let pose = ctx.world.robot_status.pose;
                let mid = start as f64 + (len - 1) as f64 / 2.0;
                let width_deg = 360.0 / polar.len() as f64;
                let bearing = pose.heading.compose(wheelly_core::Angle::from_degrees(mid * width_deg));
                let radius = (self.safe_distance + self.max_distance) / 2.0;
                let target = pose.location().project(bearing, radius);
                ctx.blackboard.put("nav.target", Value::Point(target));
                StepResult::with_event("completed")
            }
            None => StepResult::with_event("notFound"),
        }
    }
}

/// The longest circular run of consecutive sectors that are `Empty` with a
/// discovered radius inside `[safe_distance, max_distance]`, or `Unknown`
/// (no radius has been discovered there at all, so there is nothing to band-
/// check). An `Empty` sector whose nearest free reading falls short of
/// `safe_distance` is excluded — it is known-close ground, not frontier.
/// Returns `(start_index, length)`, or `None` if every sector is occupied.
fn largest_open_run(polar: &PolarMap, safe_distance: f64, max_distance: f64) -> Option<(usize, usize)> {
    let n = polar.len();
    if n == 0 {
        return None;
    }
    let open: Vec<bool> = (0..n)
        .map(|i| {
            let sector = polar.sector(i);
            match sector.state {
                SectorState::Unknown => true,
                SectorState::Empty => sector.distance.is_some_and(|d| d >= safe_distance && d <= max_distance),
                _ => false,
            }
        })
        .collect();
    if open.iter().all(|&o| o) {
        return Some((0, n));
    }
    if !open.iter().any(|&o| o) {
        return None;
    }

    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < n {
        if !open[i] {
            i += 1;
            continue;
        }
        let start = i;
        let mut len = 0;
        while len < n && open[(start + len) % n] {
            len += 1;
        }
        if best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
        i = start + len.max(1);
    }
    best
}
