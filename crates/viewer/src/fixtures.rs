//! Factory functions for creating test data.
//!
//! Provides a synthetic asset for the standard mech: plausible rest poses for
//! every schema part plus a few nodes the registry is expected to ignore.

use glam::Vec3;
use shared::{standard_mech, ChildSpec, DiscoveredNode, MechSchema, PartSpec, RestPose};

use crate::handle::InMemoryAsset;

/// Height of the torso above the ground
const HIP_HEIGHT: f32 = 1.2;

// ── Node factories ──────────────────────────────────────────────

/// Rest pose of a major part: pushed from the hip along its explode direction.
pub fn major_rest(spec: &PartSpec) -> RestPose {
    let dir = Vec3::from(spec.explode_direction).normalize_or_zero();
    RestPose::at((Vec3::new(0.0, HIP_HEIGHT, 0.0) + dir * 0.8).to_array())
}

/// Rest pose of a sub-part, local to its major part.
pub fn child_rest(spec: &ChildSpec) -> RestPose {
    let dir = Vec3::from(spec.explode_direction).normalize_or_zero();
    RestPose::at((dir * 0.3).to_array())
}

/// One discovered node per schema part, in schema order.
pub fn mech_nodes(schema: &MechSchema) -> Vec<DiscoveredNode> {
    let mut nodes = Vec::new();
    for spec in &schema.parts {
        nodes.push(DiscoveredNode::new(
            spec.id.clone(),
            major_rest(spec),
            spec.children.len(),
        ));
        for child in &spec.children {
            nodes.push(DiscoveredNode::new(child.id.clone(), child_rest(child), 1));
        }
    }
    nodes
}

/// Nodes a real export carries that are not parts.
pub fn decorative_nodes() -> Vec<DiscoveredNode> {
    vec![
        DiscoveredNode::new("Armature", RestPose::new(), 24),
        DiscoveredNode::new("Scene_Light", RestPose::at([3.0, 5.0, 2.0]), 0),
        DiscoveredNode::new("Ground", RestPose::new(), 0),
    ]
}

/// Standard mech nodes with decorative extras, as an exporter would emit them.
pub fn standard_nodes() -> Vec<DiscoveredNode> {
    let mut nodes = mech_nodes(&standard_mech());
    nodes.extend(decorative_nodes());
    nodes
}

/// In-memory asset holding the standard mech.
pub fn standard_asset() -> InMemoryAsset {
    InMemoryAsset::from_nodes(standard_nodes())
}

// ── Schema factories ────────────────────────────────────────────

/// A schema with `count` leaf parts named `P0..`, spread around the Y axis.
pub fn ring_schema(count: usize) -> MechSchema {
    let parts = (0..count)
        .map(|i| {
            let angle = i as f32 / count.max(1) as f32 * std::f32::consts::TAU;
            PartSpec {
                id: format!("P{i}"),
                display_name: format!("Part {i}"),
                explode_direction: [angle.cos(), 0.0, angle.sin()],
                explode_distance: 1.0,
                ring_offset: [0.0; 3],
                children: Vec::new(),
            }
        })
        .collect();
    MechSchema {
        version: 1,
        name: format!("Ring{count}"),
        parts,
    }
}
