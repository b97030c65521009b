//! wheelly-demo — drives a [`Controller`] over a [`FakeLink`] for a fixed
//! number of reaction ticks and prints a trace of what it dispatched.
//!
//! No real hardware is involved: telemetry is synthesized each tick and fed
//! straight into the link's inbound queue, the way a test double stands in
//! for a serial bridge. Useful for eyeballing a flow file's behavior without
//! a robot on the bench.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use wheelly_agent::{Flow, StepResult};
use wheelly_core::{LinkStatus, Millis};
use wheelly_link::FakeLink;
use wheelly_sim::{ControllerBuilder, ControllerObserver};
use wheelly_states::StateCatalog;

/// Run a flow file against a simulated robot link for a fixed number of
/// reaction ticks.
#[derive(Parser)]
#[command(name = "wheelly-demo", about = "Drive a Wheelly flow over a fake robot link")]
struct Args {
    /// Path to the flow YAML to load.
    #[arg(long, default_value = "demos/wheelly-demo/flows/explore.yaml")]
    flow: PathBuf,

    /// Number of reaction ticks to run.
    #[arg(long, default_value_t = 40)]
    ticks: u32,

    /// Reaction period, in milliseconds.
    #[arg(long, default_value_t = 300)]
    reaction_interval_ms: i64,
}

/// Prints one line per tick and remembers the link-health transitions it saw.
struct TracePrinter {
    transitions: Vec<(Millis, LinkStatus, LinkStatus)>,
}

impl TracePrinter {
    fn new() -> Self {
        Self { transitions: Vec::new() }
    }
}

impl ControllerObserver for TracePrinter {
    fn on_tick_end(&mut self, now: Millis, result: &StepResult) {
        info!(
            now = now.0,
            commands = result.commands.len(),
            event = result.event.as_deref().unwrap_or("-"),
            "tick"
        );
    }

    fn on_status_change(&mut self, now: Millis, old: LinkStatus, new: LinkStatus) {
        self.transitions.push((now, old, new));
        info!(now = now.0, from = old.as_str(), to = new.as_str(), "link status changed");
    }
}

/// Feeds one synthetic contact reading per tick so `MoveTo`/`MovePath`/
/// `Avoiding` see an always-clear chassis — there's no physical obstacle in
/// this demo, only the flow's own bookkeeping.
fn push_contact(link: &mut FakeLink, now: Millis) {
    link.push_line(format!("cont {} 0.0 0.0 0.0 1 1 1 1", now.0));
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let yaml = std::fs::read_to_string(&args.flow)
        .with_context(|| format!("reading flow file {}", args.flow.display()))?;
    let flow = Flow::load_yaml(&yaml).with_context(|| format!("parsing flow file {}", args.flow.display()))?;

    info!(flow = %args.flow.display(), ticks = args.ticks, reaction_interval_ms = args.reaction_interval_ms, "starting demo");

    let mut link = FakeLink::new();
    push_contact(&mut link, Millis(0));

    let mut controller = ControllerBuilder::new(link, flow, StateCatalog::standard())
        .reaction_interval_ms(args.reaction_interval_ms)
        .build(Millis(0))?;

    controller.sync_clock()?;

    let mut observer = TracePrinter::new();
    let mut sent_before = 0usize;

    for tick in 1..=args.ticks {
        let now = Millis(tick as i64 * args.reaction_interval_ms);
        push_contact(controller.link_mut(), now);

        let before = controller.status();
        observer.on_tick_start(now);
        let result = controller.step(now)?;
        observer.on_tick_end(now, &result);
        if controller.status() != before {
            observer.on_status_change(now, before, controller.status());
        }

        let sent_total = controller.link().sent.len();
        if sent_total > sent_before {
            for line in &controller.link().sent[sent_before..sent_total] {
                println!("  -> {}", line.trim_end());
            }
            sent_before = sent_total;
        }
    }

    let final_now = Millis(args.ticks as i64 * args.reaction_interval_ms);
    controller.stop(final_now, 200)?;
    observer.on_stop(controller.status());

    println!();
    println!("ran {} ticks, ended in state {}, link {}", args.ticks, controller.current_state(), controller.status().as_str());
    println!("{} commands sent over the wire", controller.link().sent.len());
    if !observer.transitions.is_empty() {
        println!("link health changes:");
        for (now, old, new) in &observer.transitions {
            println!("  t={}: {} -> {}", now.0, old.as_str(), new.as_str());
        }
    }

    Ok(())
}
