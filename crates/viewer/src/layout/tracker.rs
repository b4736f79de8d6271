use std::collections::HashMap;

use glam::Vec3;
use shared::PartId;

use super::{LayoutTarget, RingLayout};
use crate::registry::PartRegistry;
use crate::settings::RingSettings;

/// Current and target transform of one major part
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedTransform {
    pub current: LayoutTarget,
    pub target: LayoutTarget,
}

impl TrackedTransform {
    fn at(position: Vec3, scale: f32) -> Self {
        let t = LayoutTarget { position, scale };
        Self {
            current: t,
            target: t,
        }
    }

    pub fn is_converged(&self) -> bool {
        self.current == self.target
    }
}

/// Interpolates every major part toward its layout target.
///
/// While `engaged`, the tracker owns major-part positions and scales. When
/// released, the explosion path owns them and keeps the tracker in sync.
#[derive(Debug, Clone)]
pub struct LayoutTracker {
    entries: HashMap<PartId, TrackedTransform>,
    settings: RingSettings,
    engaged: bool,
}

impl LayoutTracker {
    /// Every major part at its rest position, scale 1
    pub fn new(registry: &PartRegistry, settings: RingSettings) -> Self {
        let entries = registry
            .major_parts()
            .iter()
            .filter_map(|id| {
                let part = registry.get(id).ok()?;
                Some((id.clone(), TrackedTransform::at(part.rest.position, 1.0)))
            })
            .collect();
        Self {
            entries,
            settings,
            engaged: false,
        }
    }

    pub fn is_engaged(&self) -> bool {
        self.engaged
    }

    /// Hand control back to the explosion path
    pub fn release(&mut self) {
        self.engaged = false;
    }

    /// Start moving toward a ring layout
    pub fn retarget(&mut self, layout: &RingLayout) {
        for (id, target) in &layout.targets {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.target = *target;
            }
        }
        self.engaged = true;
    }

    /// Start moving one part toward `target`, keeping its current transform
    pub fn set_target(&mut self, id: &str, target: LayoutTarget) {
        if let Some(entry) = self.entries.get_mut(id) {
            entry.target = target;
            self.engaged = true;
        }
    }

    /// Pin a part to a transform computed elsewhere
    pub fn sync(&mut self, id: &str, position: Vec3, scale: f32) {
        if let Some(entry) = self.entries.get_mut(id) {
            *entry = TrackedTransform::at(position, scale);
        }
    }

    /// Advance every part by `frame_scale` reference ticks.
    ///
    /// Returns true if any part moved.
    pub fn step(&mut self, frame_scale: f32) -> bool {
        if !frame_scale.is_finite() || frame_scale <= 0.0 {
            return false;
        }
        let factor = if frame_scale == 1.0 {
            self.settings.lerp_factor
        } else {
            1.0 - (1.0 - self.settings.lerp_factor).powf(frame_scale)
        };
        let pos_eps = self.settings.position_epsilon;
        let scale_eps = self.settings.scale_epsilon;

        let mut moved = false;
        for entry in self.entries.values_mut() {
            if entry.is_converged() {
                continue;
            }
            let cur = &mut entry.current;
            let tgt = entry.target;
            cur.position = cur.position.lerp(tgt.position, factor);
            cur.scale += (tgt.scale - cur.scale) * factor;
            if cur.position.distance(tgt.position) < pos_eps
                && (cur.scale - tgt.scale).abs() < scale_eps
            {
                *cur = tgt;
            }
            moved = true;
        }
        moved
    }

    pub fn all_converged(&self) -> bool {
        self.entries.values().all(TrackedTransform::is_converged)
    }

    pub fn get(&self, id: &str) -> Option<&TrackedTransform> {
        self.entries.get(id)
    }

    pub fn current(&self, id: &str) -> Option<LayoutTarget> {
        self.entries.get(id).map(|e| e.current)
    }

    pub fn target(&self, id: &str) -> Option<LayoutTarget> {
        self.entries.get(id).map(|e| e.target)
    }
}
