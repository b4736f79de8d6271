//! Ring layout for part focus.
//!
//! The focused part sits at the primary center. Every other major part sits
//! on the secondary ring at the slot matching its index in the major list,
//! so a part keeps the same slot no matter which part is focused.

mod tracker;

pub use tracker::{LayoutTracker, TrackedTransform};

use std::collections::HashMap;

use glam::Vec3;
use shared::PartId;

use crate::registry::PartRegistry;
use crate::settings::RingSettings;

/// Target position and uniform scale for one part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutTarget {
    pub position: Vec3,
    pub scale: f32,
}

/// Computed targets for one focus selection
#[derive(Debug, Clone, PartialEq)]
pub struct RingLayout {
    pub focused: PartId,
    pub targets: HashMap<PartId, LayoutTarget>,
    /// Slot assigned to each non-focused major part
    pub slots: HashMap<PartId, usize>,
}

impl RingLayout {
    pub fn target(&self, id: &str) -> Option<&LayoutTarget> {
        self.targets.get(id)
    }

    pub fn slot(&self, id: &str) -> Option<usize> {
        self.slots.get(id).copied()
    }
}

/// World position of secondary slot `slot` out of `count`.
///
/// Slot 0 is at the top; slots proceed clockwise seen from +Z.
pub fn slot_position(slot: usize, count: usize, ring: &RingSettings) -> Vec3 {
    let count = count.max(1);
    let angle =
        std::f32::consts::FRAC_PI_2 - slot as f32 * std::f32::consts::TAU / count as f32;
    Vec3::from(ring.secondary_center)
        + Vec3::new(angle.cos(), angle.sin(), 0.0) * ring.secondary_radius
}

/// Compute primary and secondary targets for `focused`
pub fn compute_ring_layout(
    registry: &PartRegistry,
    focused: &str,
    ring: &RingSettings,
) -> RingLayout {
    let count = registry.major_count();
    let mut targets = HashMap::new();
    let mut slots = HashMap::new();

    for (slot, id) in registry.major_parts().iter().enumerate() {
        let offset = registry
            .get(id)
            .map(|p| p.ring_offset)
            .unwrap_or(Vec3::ZERO);

        let target = if id == focused {
            LayoutTarget {
                position: Vec3::from(ring.primary_center) + offset,
                scale: ring.focused_scale,
            }
        } else {
            slots.insert(id.clone(), slot);
            LayoutTarget {
                position: slot_position(slot, count, ring) + offset,
                scale: ring.background_scale,
            }
        };
        targets.insert(id.clone(), target);
    }

    RingLayout {
        focused: focused.to_string(),
        targets,
        slots,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;
    use shared::standard_mech;

    fn registry() -> PartRegistry {
        let schema = standard_mech();
        PartRegistry::from_discovered(&schema, &fixtures::mech_nodes(&schema)).unwrap()
    }

    #[test]
    fn test_slot_zero_is_top() {
        let ring = RingSettings::default();
        let p = slot_position(0, 7, &ring);
        let center = Vec3::from(ring.secondary_center);
        assert!((p - (center + Vec3::Y * ring.secondary_radius)).length() < 1e-5);
    }

    #[test]
    fn test_slots_proceed_clockwise() {
        let ring = RingSettings::default();
        // a quarter turn clockwise from the top lands on +X
        let p = slot_position(1, 4, &ring);
        let center = Vec3::from(ring.secondary_center);
        assert!((p - (center + Vec3::X * ring.secondary_radius)).length() < 1e-5);
    }

    #[test]
    fn test_slots_on_circle() {
        let ring = RingSettings::default();
        let center = Vec3::from(ring.secondary_center);
        for slot in 0..7 {
            let d = (slot_position(slot, 7, &ring) - center).length();
            assert!((d - ring.secondary_radius).abs() < 1e-4);
        }
    }

    #[test]
    fn test_focused_part_at_primary_center() {
        let r = registry();
        let ring = RingSettings::default();
        let layout = compute_ring_layout(&r, "Leftarm", &ring);
        let t = layout.target("Leftarm").unwrap();
        let offset = r.get("Leftarm").unwrap().ring_offset;
        assert_eq!(t.position, Vec3::from(ring.primary_center) + offset);
        assert_eq!(t.scale, 1.0);
        assert_eq!(layout.slot("Leftarm"), None);
    }

    #[test]
    fn test_background_parts_distinct_slots() {
        let r = registry();
        let ring = RingSettings::default();
        let layout = compute_ring_layout(&r, "Leftarm", &ring);
        assert_eq!(layout.slots.len(), 6);
        let mut positions: Vec<Vec3> = Vec::new();
        for id in r.major_parts().iter().filter(|id| *id != "Leftarm") {
            let t = layout.target(id).unwrap();
            assert_eq!(t.scale, 0.7);
            assert!(positions.iter().all(|p| (*p - t.position).length() > 0.1));
            positions.push(t.position);
        }
    }

    #[test]
    fn test_slot_stable_across_focus() {
        let r = registry();
        let ring = RingSettings::default();
        let a = compute_ring_layout(&r, "Head", &ring);
        let b = compute_ring_layout(&r, "Backpack", &ring);
        assert_eq!(a.slot("Leftleg"), b.slot("Leftleg"));
        assert_eq!(a.target("Leftleg"), b.target("Leftleg"));
    }
}
