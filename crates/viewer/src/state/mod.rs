//! View state machine.
//!
//! Tracks whether the mech is assembled, exploded or has one part in focus,
//! owns the explosion smoothers and the ring layout tracker, and derives the
//! pose of every registered part once per tick.

pub mod events;
pub mod selection;
mod transitions;

use std::collections::HashMap;

use shared::{MechSchema, PartId, ViewMode};

use crate::anim::{exploded_position, exploded_rotation, FactorSmoother, PartPose};
use crate::error::{ViewerError, ViewerResult};
use crate::handle::{AssetProvider, TransformHandle};
use crate::layout::{LayoutTarget, LayoutTracker};
use crate::registry::PartRegistry;
use crate::settings::ViewerSettings;

pub use events::{EventBus, ViewerEvent};
pub use selection::SelectionState;

/// Current phase; the focused part only exists inside `PartFocus`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewPhase {
    #[default]
    Assembled,
    Exploded,
    PartFocus {
        part: PartId,
        /// Sub-parts shown and explodable
        drilled: bool,
    },
}

impl ViewPhase {
    pub fn mode(&self) -> ViewMode {
        match self {
            ViewPhase::Assembled => ViewMode::Assembled,
            ViewPhase::Exploded => ViewMode::Exploded,
            ViewPhase::PartFocus { .. } => ViewMode::PartFocus,
        }
    }

    pub fn focused(&self) -> Option<&PartId> {
        match self {
            ViewPhase::PartFocus { part, .. } => Some(part),
            _ => None,
        }
    }

    pub fn is_drilled(&self) -> bool {
        matches!(self, ViewPhase::PartFocus { drilled: true, .. })
    }
}

/// Mutable view state
#[derive(Debug, Clone)]
pub struct ViewState {
    pub(crate) phase: ViewPhase,
    /// Whole-assembly explosion
    pub(crate) global: FactorSmoother,
    /// Sub-assembly explosion of the focused part
    pub(crate) part: FactorSmoother,
    /// Index into the major part list for prev/next cycling
    pub(crate) navigation_index: usize,
    pub(crate) selection: SelectionState,
}

impl ViewState {
    fn new(settings: &ViewerSettings) -> Self {
        let params = settings.smoothing.into();
        Self {
            phase: ViewPhase::Assembled,
            global: FactorSmoother::new(0.0, params),
            part: FactorSmoother::new(0.0, params),
            navigation_index: 0,
            selection: SelectionState::default(),
        }
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    pub fn global(&self) -> &FactorSmoother {
        &self.global
    }

    pub fn part(&self) -> &FactorSmoother {
        &self.part
    }

    pub fn navigation_index(&self) -> usize {
        self.navigation_index
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }
}

/// The view-state and explosion engine. One instance per viewer session,
/// owned by the host loop.
#[derive(Debug)]
pub struct ViewStateMachine {
    registry: PartRegistry,
    settings: ViewerSettings,
    state: ViewState,
    layout: LayoutTracker,
    poses: HashMap<PartId, PartPose>,
    bus: EventBus,
    /// Poses need recomputing on the next tick
    dirty: bool,
}

impl ViewStateMachine {
    pub fn new(registry: PartRegistry, settings: ViewerSettings) -> Self {
        let layout = LayoutTracker::new(&registry, settings.ring);
        let mut machine = Self {
            state: ViewState::new(&settings),
            poses: HashMap::new(),
            bus: EventBus::default(),
            dirty: false,
            registry,
            settings,
            layout,
        };
        machine.recompute_poses();
        machine
    }

    /// Build the registry from a loaded asset and start assembled
    pub fn from_asset<P: AssetProvider>(
        schema: &MechSchema,
        provider: &P,
        settings: ViewerSettings,
    ) -> ViewerResult<Self> {
        let registry = PartRegistry::from_discovered(schema, &provider.nodes())?;
        Ok(Self::new(registry, settings))
    }

    // ── Read surface ──────────────────────────────────────────

    pub fn registry(&self) -> &PartRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &ViewerSettings {
        &self.settings
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn layout(&self) -> &LayoutTracker {
        &self.layout
    }

    pub fn mode(&self) -> ViewMode {
        self.state.phase.mode()
    }

    pub fn focused_part(&self) -> Option<&PartId> {
        self.state.phase.focused()
    }

    pub fn is_drilled(&self) -> bool {
        self.state.phase.is_drilled()
    }

    pub fn hovered_part(&self) -> Option<&PartId> {
        self.state.selection.hovered()
    }

    /// Part under the prev/next pointer
    pub fn highlighted_part(&self) -> Option<&PartId> {
        self.registry
            .major_parts()
            .get(self.state.navigation_index)
    }

    pub fn pose(&self, id: &str) -> Option<&PartPose> {
        self.poses.get(id)
    }

    pub fn poses(&self) -> &HashMap<PartId, PartPose> {
        &self.poses
    }

    /// True when no factor or layout is still moving
    pub fn is_settled(&self) -> bool {
        self.state.global.is_settled()
            && self.state.part.is_settled()
            && self.layout.all_converged()
            && !(self.layout.is_engaged() && self.state.phase.focused().is_none())
            && !self.dirty
    }

    // ── Listeners ─────────────────────────────────────────────

    pub fn on_event(&mut self, listener: impl FnMut(&ViewerEvent) + 'static) {
        self.bus.subscribe(Box::new(listener));
    }

    pub fn on_diagnostic(&mut self, listener: impl FnMut(&ViewerError) + 'static) {
        self.bus.subscribe_diagnostics(Box::new(listener));
    }

    // ── Frame loop ────────────────────────────────────────────

    /// Advance by a frame of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let scale = self.settings.frame_scale(dt);
        self.step(scale);
    }

    /// Advance exactly one reference tick
    pub fn tick(&mut self) {
        self.step(1.0);
    }

    fn step(&mut self, frame_scale: f32) {
        let global_moved = self.state.global.advance(frame_scale);
        let part_moved = self.state.part.advance(frame_scale);
        if global_moved || part_moved {
            self.bus.emit(ViewerEvent::ExplosionChanged {
                global: self.state.global.current(),
                part: self.state.part.current(),
            });
            self.dirty = true;
        }

        if self.layout.is_engaged() {
            let returning = self.state.phase.focused().is_none();
            if returning {
                self.retarget_layout_to_explosion();
            }
            if self.layout.step(frame_scale) {
                self.dirty = true;
            }
            if returning && self.layout.all_converged() && self.state.global.is_settled() {
                self.layout.release();
                self.bus.emit(ViewerEvent::LayoutSettled);
                self.dirty = true;
            }
        }

        if self.dirty {
            self.recompute_poses();
        }
        self.bus.flush();
    }

    /// Derive every pose from rest + current factors + layout
    fn recompute_poses(&mut self) {
        let ex = self.settings.explosion;
        let global = self.state.global.current();
        let part_factor = self.state.part.current();
        let focused = self.state.phase.focused();
        let registry = &self.registry;

        for id in registry.major_parts() {
            let Ok(part) = registry.get(id) else {
                continue;
            };
            let rotation = exploded_rotation(
                part.rest.rotation,
                part.explode_direction,
                global,
                ex.rotation_amount,
                ex.rotation_threshold,
            );

            let (position, scale) = if self.layout.is_engaged() {
                let t = self.layout.current(id).unwrap_or(LayoutTarget {
                    position: part.rest.position,
                    scale: 1.0,
                });
                (t.position, part.rest.scale * t.scale)
            } else {
                let p = exploded_position(
                    part.rest.position,
                    part.explode_direction,
                    part.explode_distance,
                    global,
                    ex.global_distance_scale,
                );
                self.layout.sync(id, p, 1.0);
                (p, part.rest.scale)
            };
            self.poses.insert(
                id.clone(),
                PartPose {
                    position,
                    rotation,
                    scale,
                },
            );

            // Only the focused part's sub-assembly explodes; the rest sit at rest
            let child_factor = if focused == Some(id) { part_factor } else { 0.0 };
            for child_id in registry.children_of(id) {
                let Ok(child) = registry.get(child_id) else {
                    continue;
                };
                self.poses.insert(
                    child_id.clone(),
                    PartPose {
                        position: exploded_position(
                            child.rest.position,
                            child.explode_direction,
                            child.explode_distance,
                            child_factor,
                            ex.part_distance_scale,
                        ),
                        rotation: exploded_rotation(
                            child.rest.rotation,
                            child.explode_direction,
                            child_factor,
                            ex.rotation_amount,
                            ex.rotation_threshold,
                        ),
                        scale: child.rest.scale,
                    },
                );
            }
        }
        self.dirty = false;
    }

    /// Write every pose into the provider's transform handles.
    ///
    /// Returns the number of handles written.
    pub fn apply_to<P: AssetProvider>(&self, provider: &mut P) -> usize {
        let mut written = 0;
        for part in self.registry.parts() {
            let (Some(pose), Some(handle)) =
                (self.poses.get(&part.id), provider.handle_mut(&part.node_name))
            else {
                continue;
            };
            handle.apply_pose(pose);
            written += 1;
        }
        written
    }

    // ── Internal helpers shared with transitions ──────────────

    /// Aim every major part at its explosion pose for the global target.
    ///
    /// Used while parts travel back from a ring layout, so the hand-off to
    /// the explosion path lands where that path will put them.
    pub(crate) fn retarget_layout_to_explosion(&mut self) {
        let ex = self.settings.explosion;
        let global = self.state.global.target();
        for id in self.registry.major_parts() {
            let Ok(part) = self.registry.get(id) else {
                continue;
            };
            let position = exploded_position(
                part.rest.position,
                part.explode_direction,
                part.explode_distance,
                global,
                ex.global_distance_scale,
            );
            self.layout.set_target(id, LayoutTarget { position, scale: 1.0 });
        }
    }

    pub(crate) fn set_phase(&mut self, phase: ViewPhase) {
        let from = self.state.phase.mode();
        let previous = self.state.phase.focused().cloned();
        self.state.phase = phase;
        let to = self.state.phase.mode();
        let current = self.state.phase.focused().cloned();

        if from != to {
            tracing::debug!("View mode {from} -> {to}");
            self.bus.emit(ViewerEvent::ModeChanged { from, to });
        }
        if previous != current {
            tracing::debug!("Focus {:?} -> {:?}", previous, current);
            self.bus.emit(ViewerEvent::FocusChanged { previous, current });
        }
        self.dirty = true;
    }

    pub(crate) fn flush_events(&mut self) {
        self.bus.flush();
    }
}
