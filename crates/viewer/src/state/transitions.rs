//! State transitions behind the navigation commands.
//!
//! None of these flush events; the public command wrappers do that once the
//! whole command has run.

use shared::{CycleDirection, PartId, ViewMode};

use super::{ViewPhase, ViewStateMachine, ViewerEvent};
use crate::error::{not_found, ViewerError};
use crate::layout::compute_ring_layout;

impl ViewStateMachine {
    // ── Explosion factors ─────────────────────────────────────

    /// Nudge whichever factor is active in the current phase
    pub(crate) fn adjust_active_factor(&mut self, delta: f32) -> f32 {
        if !delta.is_finite() {
            return self.active_target();
        }
        if self.state.phase.focused().is_some() {
            self.state.part.nudge(delta)
        } else {
            let value = self.state.global.target() + delta;
            self.set_global_target(value)
        }
    }

    /// Set whichever factor is active in the current phase
    pub(crate) fn set_active_factor(&mut self, value: f32) -> f32 {
        if !value.is_finite() {
            return self.active_target();
        }
        if self.state.phase.focused().is_some() {
            self.state.part.set_target(value)
        } else {
            self.set_global_target(value)
        }
    }

    pub(crate) fn active_target(&self) -> f32 {
        if self.state.phase.focused().is_some() {
            self.state.part.target()
        } else {
            self.state.global.target()
        }
    }

    /// Store a global target and move between Assembled and Exploded
    fn set_global_target(&mut self, value: f32) -> f32 {
        let target = self.state.global.set_target(value);
        let ex = self.settings.explosion;
        match self.mode() {
            ViewMode::Assembled if target > ex.explode_threshold => {
                self.set_phase(ViewPhase::Exploded);
            }
            ViewMode::Exploded if target < ex.assemble_threshold => {
                self.set_phase(ViewPhase::Assembled);
            }
            _ => {}
        }
        target
    }

    // ── Selection ─────────────────────────────────────────────

    /// Select by id (case-insensitive). Unknown ids are a no-op.
    pub(crate) fn select(&mut self, id: &str) -> bool {
        let Some(canonical) = self.registry.resolve(id).cloned() else {
            self.bus.diagnose(not_found(id));
            return false;
        };

        if !self.registry.is_major(&canonical) {
            return self.select_child(canonical);
        }

        match &self.state.phase {
            ViewPhase::PartFocus { part, .. } if *part == canonical => self.drill(),
            ViewPhase::PartFocus { .. } => {
                self.focus_on(canonical);
                true
            }
            ViewPhase::Assembled | ViewPhase::Exploded => {
                let current = self.state.global.current();
                if current <= self.settings.explosion.select_threshold {
                    let err = ViewerError::invalid(
                        self.mode(),
                        format!("cannot focus '{canonical}' before the model is exploded"),
                    );
                    self.bus.diagnose(err);
                    return false;
                }
                self.focus_on(canonical);
                true
            }
        }
    }

    /// Pick a sub-part of the drilled-into focused part
    fn select_child(&mut self, id: PartId) -> bool {
        let parent = self.registry.parent_of(&id);
        let selectable = matches!(
            &self.state.phase,
            ViewPhase::PartFocus { part, drilled: true } if Some(part) == parent
        );
        if !selectable {
            let err = ViewerError::invalid(self.mode(), format!("sub-part '{id}' is not selectable"));
            self.bus.diagnose(err);
            return false;
        }
        if self.state.selection.select_child(id.clone()) {
            self.bus.emit(ViewerEvent::ChildSelected { part: id });
        }
        true
    }

    /// Put a major part at the primary center and the rest on the ring
    pub(crate) fn focus_on(&mut self, id: PartId) {
        self.state.global.set_target(1.0);
        self.state.part.snap(0.0);
        self.state.selection.clear_child();

        if let Some(slot) = self.registry.slot_index(&id) {
            self.state.navigation_index = slot;
        }
        let layout = compute_ring_layout(&self.registry, &id, &self.settings.ring);
        self.layout.retarget(&layout);

        self.set_phase(ViewPhase::PartFocus {
            part: id.clone(),
            drilled: false,
        });
        self.bus.emit(ViewerEvent::NavigationChanged {
            index: self.state.navigation_index,
            part: id,
        });
    }

    /// Re-selection of the focused part: descend into its sub-parts
    fn drill(&mut self) -> bool {
        let ViewPhase::PartFocus { part, drilled } = &self.state.phase else {
            return false;
        };
        let part = part.clone();
        if *drilled {
            return true;
        }

        let has_children = self
            .registry
            .get(&part)
            .map(|p| p.child_count > 0)
            .unwrap_or(false);
        if !has_children {
            let err = ViewerError::invalid(
                self.mode(),
                format!("'{part}' has no sub-parts to drill into"),
            );
            self.bus.diagnose(err);
            return false;
        }

        self.state.phase = ViewPhase::PartFocus {
            part: part.clone(),
            drilled: true,
        };
        self.state.part.set_target(1.0);
        tracing::debug!("Drilled into '{part}'");
        self.bus.emit(ViewerEvent::DrillChanged {
            part,
            drilled: true,
        });
        true
    }

    // ── Back / reset ──────────────────────────────────────────

    /// Pop one level: drill -> focus -> assembled, or collapse the explosion
    pub(crate) fn back(&mut self) -> bool {
        match &self.state.phase {
            ViewPhase::PartFocus {
                part,
                drilled: true,
            } => {
                let part = part.clone();
                self.state.phase = ViewPhase::PartFocus {
                    part: part.clone(),
                    drilled: false,
                };
                self.state.part.set_target(0.0);
                self.state.selection.clear_child();
                self.bus.emit(ViewerEvent::DrillChanged {
                    part,
                    drilled: false,
                });
                true
            }
            ViewPhase::PartFocus { .. } => {
                self.leave_focus();
                true
            }
            ViewPhase::Exploded => {
                self.set_global_target(0.0);
                true
            }
            ViewPhase::Assembled => false,
        }
    }

    /// Drop focus and send every major part back to rest
    fn leave_focus(&mut self) {
        self.state.part.snap(0.0);
        self.state.global.set_target(0.0);
        self.retarget_layout_to_explosion();
        self.clear_selection();
        self.set_phase(ViewPhase::Assembled);
    }

    /// Drop hover and child selection, announcing a hover that went away
    fn clear_selection(&mut self) {
        self.state.selection.clear_child();
        if self.state.selection.set_hovered(None) {
            self.bus.emit(ViewerEvent::HoverChanged { part: None });
        }
    }

    /// Collapse to Assembled from anywhere
    pub(crate) fn reset(&mut self) {
        match self.mode() {
            ViewMode::PartFocus => self.leave_focus(),
            _ => {
                self.state.part.snap(0.0);
                self.clear_selection();
                self.set_global_target(0.0);
            }
        }
    }

    // ── Navigation pointer / hover ────────────────────────────

    /// Move the prev/next pointer; refocuses while in PartFocus
    pub(crate) fn cycle_pointer(&mut self, direction: CycleDirection) -> Option<PartId> {
        let count = self.registry.major_count();
        if count == 0 {
            return None;
        }
        let index = match direction {
            CycleDirection::Next => (self.state.navigation_index + 1) % count,
            CycleDirection::Prev => (self.state.navigation_index + count - 1) % count,
        };
        let id = self.registry.major_parts()[index].clone();

        if self.state.phase.focused().is_some() {
            self.focus_on(id.clone());
        } else {
            self.state.navigation_index = index;
            self.bus.emit(ViewerEvent::NavigationChanged {
                index,
                part: id.clone(),
            });
        }
        Some(id)
    }

    /// Parts input adapters may hover or select right now
    pub(crate) fn interactable(&self) -> Vec<PartId> {
        let majors_open = self.state.phase.focused().is_some()
            || self.state.global.current() > self.settings.explosion.select_threshold;
        let mut ids = if majors_open {
            self.registry.major_parts().to_vec()
        } else {
            Vec::new()
        };
        if let ViewPhase::PartFocus {
            part,
            drilled: true,
        } = &self.state.phase
        {
            ids.extend(self.registry.children_of(part).iter().cloned());
        }
        ids
    }

    pub(crate) fn hover(&mut self, id: Option<&str>) -> bool {
        let canonical = match id {
            None => None,
            Some(name) => {
                let Some(canonical) = self.registry.resolve(name).cloned() else {
                    self.bus.diagnose(not_found(name));
                    return false;
                };
                if !self.interactable().contains(&canonical) {
                    let err =
                        ViewerError::invalid(self.mode(), format!("'{canonical}' is not interactable"));
                    self.bus.diagnose(err);
                    return false;
                }
                Some(canonical)
            }
        };
        if self.state.selection.set_hovered(canonical.clone()) {
            self.bus.emit(ViewerEvent::HoverChanged { part: canonical });
        }
        true
    }
}
