//! Unit tests for wheelly-states.

use wheelly_agent::{Blackboard, Command, Flow, StateBehavior, StepContext, Value};
use wheelly_core::{Millis, Point};
use wheelly_world::{ModellerConfig, WorldModeller};

use crate::registry::StateCatalog;

fn make_modeller() -> WorldModeller {
    WorldModeller::new(ModellerConfig::default(), 60, 60, 0.1, Point::new(3.0, 3.0)).unwrap()
}

fn flow_with_class(class: &str) -> Flow {
    let yaml = format!("version: 1\nentry: only\nstates:\n  - id: only\n    class: {class}\n");
    Flow::load_yaml(&yaml).unwrap()
}

#[cfg(test)]
mod catalog {
    use super::*;

    #[test]
    fn standard_catalog_covers_every_class() {
        let catalog = StateCatalog::standard();
        for class in [
            "HaltScan",
            "Mapping",
            "Avoiding",
            "ExploringPoint",
            "LabelPoint",
            "MoveTo",
            "MovePath",
            "FindLabel",
            "FindUnknown",
            "FindRefresh",
            "LabelStuck",
            "ClearMap",
        ] {
            assert!(catalog.contains(class), "missing factory for {class}");
        }
    }

    #[test]
    fn build_all_matches_flow_order() {
        let catalog = StateCatalog::standard();
        let flow = flow_with_class("HaltScan");
        let behaviors = catalog.build_all(&flow).unwrap();
        assert_eq!(behaviors.len(), 1);
    }

    #[test]
    fn unknown_class_is_an_error() {
        let catalog = StateCatalog::standard();
        let flow = flow_with_class("NotARealState");
        assert!(catalog.build_all(&flow).is_err());
    }
}

#[cfg(test)]
mod halt_scan {
    use super::*;

    #[test]
    fn emits_timeout_after_configured_interval() {
        let catalog = StateCatalog::standard();
        let yaml = "version: 1\nentry: only\nstates:\n  - id: only\n    class: HaltScan\n    params:\n      timeout_ms: 100\n";
        let flow = Flow::load_yaml(yaml).unwrap();
        let mut behavior = catalog.build(flow.node(flow.entry).unwrap()).unwrap();

        let mut modeller = make_modeller();
        let world = modeller.step(&[], Millis(0));
        let mut bb = Blackboard::new();
        let mut ctx = StepContext::new(&world, &mut bb, Millis(0));
        behavior.entry(&mut ctx);

        let early = behavior.step(&mut ctx);
        assert_eq!(early.event, None);

        let mut ctx_late = StepContext::new(&world, &mut bb, Millis(200));
        let late = behavior.step(&mut ctx_late);
        assert_eq!(late.event.as_deref(), Some("timeout"));
    }

    #[test]
    fn parks_motors_every_tick() {
        let catalog = StateCatalog::standard();
        let flow = flow_with_class("HaltScan");
        let mut behavior = catalog.build(flow.node(flow.entry).unwrap()).unwrap();
        let mut modeller = make_modeller();
        let world = modeller.step(&[], Millis(0));
        let mut bb = Blackboard::new();
        let mut ctx = StepContext::new(&world, &mut bb, Millis(0));
        behavior.entry(&mut ctx);
        let result = behavior.step(&mut ctx);
        assert!(matches!(result.commands[0], Command::Motors { left: 0, right: 0, .. }));
    }
}

#[cfg(test)]
mod avoiding {
    use wheelly_core::{ContactMessage, Message, Pose};

    use super::*;

    fn blocked_world(modeller: &mut wheelly_world::WorldModeller) -> wheelly_world::WorldModel<'_> {
        let messages = vec![Message::Contact(ContactMessage {
            time: Millis(0),
            pose: Pose::default(),
            front_clear: false,
            rear_clear: false,
            can_move_forward: false,
            can_move_backward: false,
        })];
        modeller.step(&messages, Millis(0))
    }

    #[test]
    fn completes_immediately_when_clear() {
        let catalog = StateCatalog::standard();
        let flow = flow_with_class("Avoiding");
        let mut behavior = catalog.build(flow.node(flow.entry).unwrap()).unwrap();
        let mut modeller = make_modeller();
        let world = modeller.step(&[], Millis(0));
        let mut bb = Blackboard::new();
        let mut ctx = StepContext::new(&world, &mut bb, Millis(0));
        let result = behavior.step(&mut ctx);
        assert_eq!(result.event.as_deref(), Some("completed"));
    }

    #[test]
    fn drives_backward_while_blocked_then_times_out_into_not_found() {
        let catalog = StateCatalog::standard();
        let yaml = "version: 1\nentry: only\nstates:\n  - id: only\n    class: Avoiding\n    params:\n      timeout_ms: 100\n      speed_pps: 80\n";
        let flow = Flow::load_yaml(yaml).unwrap();
        let mut behavior = catalog.build(flow.node(flow.entry).unwrap()).unwrap();
        let mut modeller = make_modeller();
        let mut bb = Blackboard::new();
        let world = blocked_world(&mut modeller);

        let mut ctx = StepContext::new(&world, &mut bb, Millis(0));
        behavior.entry(&mut ctx);
        let early = behavior.step(&mut ctx);
        assert_eq!(early.event, None);
        assert!(matches!(early.commands[0], Command::Motors { left: -80, right: -80, .. }));

        let mut ctx_late = StepContext::new(&world, &mut bb, Millis(200));
        let late = behavior.step(&mut ctx_late);
        assert_eq!(late.event.as_deref(), Some("notFound"));
    }
}

#[cfg(test)]
mod exploring_point {
    use super::*;

    #[test]
    fn sets_target_when_fully_open() {
        let catalog = StateCatalog::standard();
        let flow = flow_with_class("ExploringPoint");
        let mut behavior = catalog.build(flow.node(flow.entry).unwrap()).unwrap();
        let mut modeller = make_modeller();
        let world = modeller.step(&[], Millis(0));
        let mut bb = Blackboard::new();
        let mut ctx = StepContext::new(&world, &mut bb, Millis(0));
        let result = behavior.step(&mut ctx);
        assert_eq!(result.event.as_deref(), Some("completed"));
        assert!(matches!(bb.get("nav.target"), Some(Value::Point(_))));
    }
}

#[cfg(test)]
mod move_to {
    use super::*;

    #[test]
    fn no_op_without_a_target() {
        let catalog = StateCatalog::standard();
        let flow = flow_with_class("MoveTo");
        let mut behavior = catalog.build(flow.node(flow.entry).unwrap()).unwrap();
        let mut modeller = make_modeller();
        let world = modeller.step(&[], Millis(0));
        let mut bb = Blackboard::new();
        let mut ctx = StepContext::new(&world, &mut bb, Millis(0));
        let result = behavior.step(&mut ctx);
        assert_eq!(result.event, None);
        assert!(result.commands.is_empty());
    }

    #[test]
    fn completes_within_stop_distance() {
        let catalog = StateCatalog::standard();
        let yaml = "version: 1\nentry: only\nstates:\n  - id: only\n    class: MoveTo\n    params:\n      stop_distance: 0.5\n";
        let flow = Flow::load_yaml(yaml).unwrap();
        let mut behavior = catalog.build(flow.node(flow.entry).unwrap()).unwrap();
        let mut modeller = make_modeller();
        let world = modeller.step(&[], Millis(0));
        let mut bb = Blackboard::new();
        bb.put("nav.target", Value::Point(Point::new(0.01, 0.01)));
        let mut ctx = StepContext::new(&world, &mut bb, Millis(0));
        let result = behavior.step(&mut ctx);
        assert_eq!(result.event.as_deref(), Some("completed"));
    }

    #[test]
    fn drives_toward_a_far_target() {
        let catalog = StateCatalog::standard();
        let flow = flow_with_class("MoveTo");
        let mut behavior = catalog.build(flow.node(flow.entry).unwrap()).unwrap();
        let mut modeller = make_modeller();
        let world = modeller.step(&[], Millis(0));
        let mut bb = Blackboard::new();
        bb.put("nav.target", Value::Point(Point::new(0.0, 5.0)));
        let mut ctx = StepContext::new(&world, &mut bb, Millis(0));
        let result = behavior.step(&mut ctx);
        assert_eq!(result.event, None);
        assert_eq!(result.commands.len(), 1);
    }
}

#[cfg(test)]
mod clear_map {
    use super::*;

    #[test]
    fn issues_command_then_completes() {
        let catalog = StateCatalog::standard();
        let flow = flow_with_class("ClearMap");
        let mut behavior = catalog.build(flow.node(flow.entry).unwrap()).unwrap();
        let mut modeller = make_modeller();
        let world = modeller.step(&[], Millis(0));
        let mut bb = Blackboard::new();
        let mut ctx = StepContext::new(&world, &mut bb, Millis(0));
        behavior.entry(&mut ctx);

        let first = behavior.step(&mut ctx);
        assert_eq!(first.commands, vec![Command::ClearMap]);
        assert_eq!(first.event, None);

        let second = behavior.step(&mut ctx);
        assert_eq!(second.event.as_deref(), Some("completed"));
    }
}

#[cfg(test)]
mod label_stuck {
    use super::*;

    #[test]
    fn no_op_without_a_target() {
        let catalog = StateCatalog::standard();
        let flow = flow_with_class("LabelStuck");
        let mut behavior = catalog.build(flow.node(flow.entry).unwrap()).unwrap();
        let mut modeller = make_modeller();
        let world = modeller.step(&[], Millis(0));
        let mut bb = Blackboard::new();
        let mut ctx = StepContext::new(&world, &mut bb, Millis(0));
        behavior.entry(&mut ctx);
        let result = behavior.step(&mut ctx);
        assert_eq!(result.event, None);
    }

    #[test]
    fn raises_not_found_when_stalled() {
        let catalog = StateCatalog::standard();
        let yaml = "version: 1\nentry: only\nstates:\n  - id: only\n    class: LabelStuck\n    params:\n      window_ms: 100\n      min_progress_m: 1.0\n";
        let flow = Flow::load_yaml(yaml).unwrap();
        let mut behavior = catalog.build(flow.node(flow.entry).unwrap()).unwrap();
        let mut modeller = make_modeller();
        let world = modeller.step(&[], Millis(0));
        let mut bb = Blackboard::new();
        bb.put("nav.target", Value::Point(Point::new(10.0, 10.0)));
        let mut ctx = StepContext::new(&world, &mut bb, Millis(0));
        behavior.entry(&mut ctx);
        behavior.step(&mut ctx);

        let mut ctx_late = StepContext::new(&world, &mut bb, Millis(200));
        let result = behavior.step(&mut ctx_late);
        assert_eq!(result.event.as_deref(), Some("notFound"));
    }
}
