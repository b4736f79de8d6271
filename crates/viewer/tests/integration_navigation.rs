//! Integration tests for full navigation sessions through the harness.

use glam::Vec3;
use mech_viewer_lib::harness::ViewerHarness;
use mech_viewer_lib::layout::LayoutTarget;
use mech_viewer_lib::settings::RingSettings;
use mech_viewer_lib::{NavigationCommands, ViewerEvent};
use shared::{CycleDirection, ViewMode};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

fn exploded_harness() -> ViewerHarness {
    let mut h = ViewerHarness::new().unwrap();
    h.machine.set_explosion(1.0);
    h.settle(2_000).expect("explosion should settle");
    h
}

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-4
}

#[test]
fn test_single_adjust_explodes_partially() {
    let mut h = ViewerHarness::new().unwrap();
    h.machine.adjust_explosion(0.2);
    h.settle(2_000).unwrap();

    assert_eq!(h.machine.mode(), ViewMode::Exploded);
    assert!((h.machine.state().global().current() - 0.2).abs() < 1e-6);
}

#[test]
fn test_select_lays_out_ring() {
    let mut h = exploded_harness();
    assert!(h.machine.select_part("Leftarm"));

    assert_eq!(h.machine.mode(), ViewMode::PartFocus);
    assert_eq!(h.machine.focused_part().map(String::as_str), Some("Leftarm"));
    assert_eq!(h.machine.state().global().target(), 1.0);

    let ring = RingSettings::default();
    let layout = h.machine.layout();
    let arm = h.machine.registry().get("Leftarm").unwrap();
    let LayoutTarget { position, scale } = layout.target("Leftarm").unwrap();
    assert!(close(position, Vec3::from(ring.primary_center) + arm.ring_offset));
    assert_eq!(scale, 1.0);

    let others: Vec<_> = h
        .major_parts()
        .into_iter()
        .filter(|id| id != "Leftarm")
        .collect();
    assert_eq!(others.len(), 6);

    let mut seen = Vec::new();
    for id in &others {
        let t = layout.target(id).unwrap();
        assert_eq!(t.scale, 0.7, "{id}");
        assert!(
            seen.iter().all(|p: &Vec3| !close(*p, t.position)),
            "{id} shares a slot"
        );
        seen.push(t.position);
    }
}

#[test]
fn test_focused_part_reaches_primary_center() {
    let mut h = exploded_harness();
    h.machine.select_part("Head");
    h.settle(2_000).unwrap();

    let head = h.machine.registry().get("Head").unwrap().clone();
    let pose = h.scene_pose("Head").unwrap();
    assert!(close(pose.position, head.ring_offset));
    assert!(close(pose.scale, head.rest.scale));
    let torso = h.scene_pose("Torso").unwrap();
    assert!(close(torso.scale, Vec3::splat(0.7)));
}

#[test]
fn test_go_back_returns_to_rest() {
    let mut h = exploded_harness();
    h.machine.select_part("Leftarm");
    h.settle(2_000).unwrap();

    assert!(h.machine.go_back());
    assert_eq!(h.machine.mode(), ViewMode::Assembled);
    assert!(h.machine.focused_part().is_none());

    let registry = h.machine.registry();
    for id in registry.major_parts() {
        let part = registry.get(id).unwrap();
        let t = h.machine.layout().target(id).unwrap();
        assert!(close(t.position, part.rest.position), "{id}");
        assert_eq!(t.scale, 1.0);
    }

    h.settle(2_000).unwrap();
    for part in h.machine.registry().parts() {
        let pose = h.scene_pose(&part.node_name).unwrap();
        assert!(close(pose.position, part.rest.position), "{}", part.id);
        assert!(close(pose.rotation, part.rest.rotation), "{}", part.id);
    }
}

#[test]
fn test_reexplode_while_returning_stays_continuous() {
    let mut h = exploded_harness();
    h.machine.select_part("Head");
    h.settle(2_000).unwrap();
    assert!(h.machine.go_back());
    h.tick(5);
    h.machine.set_explosion(1.0);
    assert!(h.machine.layout().is_engaged());

    let majors = h.major_parts();
    let mut last: Vec<Vec3> = majors
        .iter()
        .map(|id| h.scene_pose(id).unwrap().position)
        .collect();
    let mut max_head_jump = 0.0f32;
    let mut handoff_jump = None;
    for _ in 0..400 {
        let engaged = h.machine.layout().is_engaged();
        h.tick(1);
        let now: Vec<Vec3> = majors
            .iter()
            .map(|id| h.scene_pose(id).unwrap().position)
            .collect();
        let jumps: Vec<f32> = now.iter().zip(&last).map(|(a, b)| (*a - *b).length()).collect();
        max_head_jump = max_head_jump.max(jumps[0]);
        if engaged && !h.machine.layout().is_engaged() {
            handoff_jump = jumps.iter().copied().reduce(f32::max);
        }
        last = now;
    }

    assert_eq!(majors[0], "Head");
    assert!(max_head_jump < 0.5, "Head jumped {max_head_jump} in one tick");
    let handoff_jump = handoff_jump.expect("layout should hand back to the explosion");
    assert!(handoff_jump < 0.05, "hand-off jumped {handoff_jump}");

    assert_eq!(h.machine.mode(), ViewMode::Exploded);
    assert!(h.machine.is_settled());
    let registry = h.machine.registry();
    for id in registry.major_parts() {
        let part = registry.get(id).unwrap();
        let expected =
            part.rest.position + part.explode_direction * part.explode_distance * 2.0;
        let pose = h.scene_pose(id).unwrap();
        assert!(close(pose.position, expected), "{id}");
        assert_eq!(pose.scale, part.rest.scale);
    }
}

#[test]
fn test_cycle_wraps_around_in_focus() {
    let mut h = exploded_harness();
    h.machine.select_part("Leftarm");
    let count = h.major_parts().len();
    assert_eq!(count, 7);

    let mut visited = HashSet::new();
    for _ in 0..count {
        let id = h.machine.cycle(CycleDirection::Next).unwrap();
        visited.insert(id);
        h.tick(5);
    }
    assert_eq!(h.machine.focused_part().map(String::as_str), Some("Leftarm"));
    assert_eq!(visited.len(), count);
}

#[test]
fn test_drill_explodes_only_focused_children() {
    let mut h = exploded_harness();
    h.machine.select_part("Leftarm");
    h.machine.select_part("Leftarm");
    assert!(h.machine.is_drilled());
    h.settle(2_000).unwrap();

    let hand = h.machine.registry().get("Lefthand").unwrap().clone();
    let expected = hand.rest.position + hand.explode_direction * hand.explode_distance * 1.5;
    assert!(close(h.scene_pose("Lefthand").unwrap().position, expected));

    let other = h.machine.registry().get("Righthand").unwrap().clone();
    assert!(close(
        h.scene_pose("Righthand").unwrap().position,
        other.rest.position
    ));
}

#[test]
fn test_session_event_stream() {
    let mut h = ViewerHarness::new().unwrap();
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    h.machine.on_event(move |e| sink.borrow_mut().push(e.clone()));

    h.machine.set_explosion(1.0);
    h.settle(2_000).unwrap();
    h.machine.select_part("Torso");
    h.settle(2_000).unwrap();
    h.machine.go_back();
    h.settle(2_000).unwrap();

    let events = events.borrow();
    let modes: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            ViewerEvent::ModeChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect();
    assert_eq!(
        modes,
        vec![ViewMode::Exploded, ViewMode::PartFocus, ViewMode::Assembled]
    );
    assert!(events.contains(&ViewerEvent::LayoutSettled));
    assert!(events
        .iter()
        .any(|e| matches!(e, ViewerEvent::ExplosionChanged { global, .. } if *global == 1.0)));
    assert!(matches!(
        events.last(),
        Some(ViewerEvent::ExplosionChanged { .. }) | Some(ViewerEvent::LayoutSettled)
    ));
}

#[test]
fn test_frame_rate_independent_convergence() {
    let mut fast = ViewerHarness::new().unwrap();
    let mut slow = ViewerHarness::new().unwrap();
    fast.machine.set_explosion(1.0);
    slow.machine.set_explosion(1.0);

    // one simulated second at 120 Hz and at 30 Hz
    for _ in 0..120 {
        fast.update(1.0 / 120.0);
    }
    for _ in 0..30 {
        slow.update(1.0 / 30.0);
    }
    let a = fast.machine.state().global().current();
    let b = slow.machine.state().global().current();
    assert!((a - b).abs() < 0.05, "{a} vs {b}");
}
