//! Contracts with the asset provider and renderer.
//!
//! The core never walks a live scene graph. It reads the discovered node list
//! once, then writes poses through flat name -> handle lookups.

use std::collections::HashMap;

use glam::Vec3;
use shared::DiscoveredNode;

use crate::anim::PartPose;

/// Mutable transform of one scene node owned by the renderer
pub trait TransformHandle {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn rotation(&self) -> Vec3;
    fn set_rotation(&mut self, rotation: Vec3);
    fn scale(&self) -> Vec3;
    fn set_scale(&mut self, scale: Vec3);

    /// Write a whole pose
    fn apply_pose(&mut self, pose: &PartPose) {
        self.set_position(pose.position);
        self.set_rotation(pose.rotation);
        self.set_scale(pose.scale);
    }
}

/// Loaded asset as seen by the core
pub trait AssetProvider {
    type Handle: TransformHandle;

    /// Named nodes with their rest poses and child counts
    fn nodes(&self) -> Vec<DiscoveredNode>;

    /// Transform handle for a node name (exact, as listed by `nodes`)
    fn handle_mut(&mut self, name: &str) -> Option<&mut Self::Handle>;
}

/// Plain transform storage
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneNode {
    pub pose: PartPose,
}

impl TransformHandle for SceneNode {
    fn position(&self) -> Vec3 {
        self.pose.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.pose.position = position;
    }

    fn rotation(&self) -> Vec3 {
        self.pose.rotation
    }

    fn set_rotation(&mut self, rotation: Vec3) {
        self.pose.rotation = rotation;
    }

    fn scale(&self) -> Vec3 {
        self.pose.scale
    }

    fn set_scale(&mut self, scale: Vec3) {
        self.pose.scale = scale;
    }
}

/// Asset held entirely in memory (headless hosts, tests, wasm bridge)
#[derive(Debug, Clone, Default)]
pub struct InMemoryAsset {
    nodes: Vec<DiscoveredNode>,
    handles: HashMap<String, SceneNode>,
}

impl InMemoryAsset {
    pub fn from_nodes(nodes: Vec<DiscoveredNode>) -> Self {
        let handles = nodes
            .iter()
            .map(|n| {
                (
                    n.name.clone(),
                    SceneNode {
                        pose: n.rest.into(),
                    },
                )
            })
            .collect();
        Self { nodes, handles }
    }

    pub fn node(&self, name: &str) -> Option<&SceneNode> {
        self.handles.get(name)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl AssetProvider for InMemoryAsset {
    type Handle = SceneNode;

    fn nodes(&self) -> Vec<DiscoveredNode> {
        self.nodes.clone()
    }

    fn handle_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        self.handles.get_mut(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::RestPose;

    #[test]
    fn test_handles_start_at_rest() {
        let asset = InMemoryAsset::from_nodes(vec![DiscoveredNode::new(
            "Head",
            RestPose::at([0.0, 2.0, 0.0]),
            2,
        )]);
        let node = asset.node("Head").unwrap();
        assert_eq!(node.position(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(node.scale(), Vec3::ONE);
    }

    #[test]
    fn test_apply_pose() {
        let mut asset = InMemoryAsset::from_nodes(vec![DiscoveredNode::new(
            "Head",
            RestPose::new(),
            0,
        )]);
        let pose = PartPose {
            position: Vec3::X,
            rotation: Vec3::Y,
            scale: Vec3::splat(0.7),
        };
        asset.handle_mut("Head").unwrap().apply_pose(&pose);
        assert_eq!(asset.node("Head").unwrap().pose, pose);
        assert!(asset.handle_mut("Tail").is_none());
    }
}
