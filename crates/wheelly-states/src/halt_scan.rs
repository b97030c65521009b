//! `HaltScan`: parks the motors and sweeps the proximity sensor across a
//! fixed arc on a schedule.

use wheelly_agent::{AgentResult, Command, StateBehavior, StateFactory, StateNode, StepContext, StepResult};
use wheelly_core::Deadline;

use crate::params::{integer, number};

pub struct HaltScanFactory;

impl StateFactory for HaltScanFactory {
    fn class(&self) -> &str {
        "HaltScan"
    }

    fn build(&self, node: &StateNode) -> AgentResult<Box<dyn StateBehavior>> {
        let min_dir = number(&node.params, "min_sensor_dir_deg", -90.0);
        let max_dir = number(&node.params, "max_sensor_dir_deg", 90.0);
        let steps = integer(&node.params, "sensor_dir_number", 5).max(1) as usize;
        let scan_interval_ms = integer(&node.params, "scan_interval_ms", 500);
        let timeout_ms = integer(&node.params, "timeout_ms", 3_000);

        let bearings = if steps == 1 {
            vec![(min_dir + max_dir) / 2.0]
        } else {
            (0..steps).map(|i| min_dir + (max_dir - min_dir) * i as f64 / (steps - 1) as f64).collect()
        };

        Ok(Box::new(HaltScanState {
            bearings,
            index: 0,
            scan_interval_ms,
            timeout_ms,
            entered_at: wheelly_core::Millis::ZERO,
            next_scan: Deadline::starting_at(wheelly_core::Millis::ZERO, scan_interval_ms),
        }))
    }
}

struct HaltScanState {
    bearings: Vec<f64>,
    index: usize,
    scan_interval_ms: i64,
    timeout_ms: i64,
    entered_at: wheelly_core::Millis,
    next_scan: Deadline,
}

impl StateBehavior for HaltScanState {
    fn entry(&mut self, ctx: &mut StepContext<'_>) {
        self.index = 0;
        self.entered_at = ctx.now;
        self.next_scan = Deadline::starting_at(ctx.now, self.scan_interval_ms);
    }

    fn step(&mut self, ctx: &mut StepContext<'_>) -> StepResult {
        let mut commands = vec![Command::Motors { left: 0, right: 0, valid_to: ctx.now.plus(self.scan_interval_ms) }];

        if self.next_scan.poll(ctx.now) {
            let deg = self.bearings[self.index % self.bearings.len()];
            self.index += 1;
            commands.push(Command::Scan { deg });
        }

        let event = if ctx.world.blocked {
            Some("blocked".to_string())
        } else if ctx.world.front_blocked {
            Some("frontBlocked".to_string())
        } else if ctx.world.rear_blocked {
            Some("rearBlocked".to_string())
        } else if ctx.now.since(self.entered_at) >= self.timeout_ms {
            Some("timeout".to_string())
        } else {
            None
        };

        StepResult { commands, event }
    }
}
