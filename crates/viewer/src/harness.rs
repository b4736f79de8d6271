//! Headless harness for driving the viewer without a renderer.
//!
//! Owns a view-state machine plus an in-memory scene standing in for the
//! loaded asset, so tests and the JSON command loop can run whole sessions.

use shared::{standard_mech, DiscoveredNode, MechSchema, PartId};

use crate::anim::PartPose;
use crate::error::ViewerResult;
use crate::fixtures;
use crate::handle::InMemoryAsset;
use crate::settings::ViewerSettings;
use crate::state::ViewStateMachine;

/// Headless viewer session: state machine plus its scene
pub struct ViewerHarness {
    pub machine: ViewStateMachine,
    pub asset: InMemoryAsset,
    ticks: u64,
}

impl ViewerHarness {
    /// Standard mech with default settings
    pub fn new() -> ViewerResult<Self> {
        Self::with_schema(&standard_mech(), ViewerSettings::default())
    }

    /// Synthesize a scene for `schema` and load it
    pub fn with_schema(schema: &MechSchema, settings: ViewerSettings) -> ViewerResult<Self> {
        let mut nodes = fixtures::mech_nodes(schema);
        nodes.extend(fixtures::decorative_nodes());
        Self::with_nodes(schema, nodes, settings)
    }

    /// Load an explicit set of scene nodes
    pub fn with_nodes(
        schema: &MechSchema,
        nodes: Vec<DiscoveredNode>,
        settings: ViewerSettings,
    ) -> ViewerResult<Self> {
        let asset = InMemoryAsset::from_nodes(nodes);
        let machine = ViewStateMachine::from_asset(schema, &asset, settings)?;
        Ok(Self {
            machine,
            asset,
            ticks: 0,
        })
    }

    // ── Frame loop ────────────────────────────────────────────

    /// Advance `n` reference ticks and write poses into the scene
    pub fn tick(&mut self, n: u32) {
        for _ in 0..n {
            self.machine.tick();
            self.ticks += 1;
        }
        self.sync_scene();
    }

    /// Advance by one frame of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        self.machine.update(dt);
        self.ticks += 1;
        self.sync_scene();
    }

    /// Tick until nothing moves. Returns the number of ticks taken, or
    /// `None` if `max_ticks` ran out first.
    pub fn settle(&mut self, max_ticks: u32) -> Option<u32> {
        for n in 0..max_ticks {
            if self.machine.is_settled() {
                self.sync_scene();
                return Some(n);
            }
            self.machine.tick();
            self.ticks += 1;
        }
        self.sync_scene();
        self.machine.is_settled().then_some(max_ticks)
    }

    /// Push the current poses into the in-memory scene
    pub fn sync_scene(&mut self) -> usize {
        self.machine.apply_to(&mut self.asset)
    }

    // ── Inspection ────────────────────────────────────────────

    /// Total ticks run
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Pose as written into the scene
    pub fn scene_pose(&self, node: &str) -> Option<PartPose> {
        self.asset.node(node).map(|n| n.pose)
    }

    /// Major parts in slot order
    pub fn major_parts(&self) -> Vec<PartId> {
        self.machine.registry().major_parts().to_vec()
    }
}
