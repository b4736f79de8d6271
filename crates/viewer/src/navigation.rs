//! Command surface for input adapters (keyboard, mouse, gesture).
//!
//! Every command runs synchronously, mutates the view state and delivers the
//! resulting events before returning. None of them fail: unknown ids and
//! meaningless requests come back as `false`/`None` and are reported to the
//! diagnostic listeners.

use shared::{CycleDirection, PartId};

use crate::state::ViewStateMachine;

/// What input adapters may ask the viewer to do
pub trait NavigationCommands {
    /// Nudge the active explosion factor; returns the new (clamped) target
    fn adjust_explosion(&mut self, delta: f32) -> f32;

    /// Set the active explosion factor outright; returns the stored target
    fn set_explosion(&mut self, value: f32) -> f32;

    /// Focus a major part, drill into the focused one, or pick a sub-part
    fn select_part(&mut self, id: &str) -> bool;

    /// Move the navigation pointer; refocuses while a part is focused
    fn cycle(&mut self, direction: CycleDirection) -> Option<PartId>;

    /// Pop one level of focus or collapse the explosion
    fn go_back(&mut self) -> bool;

    /// Annotate the part under the pointer; `None` clears it
    fn set_hovered_part(&mut self, id: Option<&str>) -> bool;

    /// Select whatever is hovered
    fn activate_hovered(&mut self) -> bool;

    /// Select the part under the navigation pointer
    fn activate_highlighted(&mut self) -> bool;

    /// Collapse straight back to the assembled view
    fn reset_view(&mut self);

    /// Parts that may be hovered or selected right now
    fn interactable_parts(&self) -> Vec<PartId>;
}

impl NavigationCommands for ViewStateMachine {
    fn adjust_explosion(&mut self, delta: f32) -> f32 {
        let target = self.adjust_active_factor(delta);
        self.flush_events();
        target
    }

    fn set_explosion(&mut self, value: f32) -> f32 {
        let target = self.set_active_factor(value);
        self.flush_events();
        target
    }

    fn select_part(&mut self, id: &str) -> bool {
        let selected = self.select(id);
        self.flush_events();
        selected
    }

    fn cycle(&mut self, direction: CycleDirection) -> Option<PartId> {
        let id = self.cycle_pointer(direction);
        self.flush_events();
        id
    }

    fn go_back(&mut self) -> bool {
        let changed = self.back();
        self.flush_events();
        changed
    }

    fn set_hovered_part(&mut self, id: Option<&str>) -> bool {
        let accepted = self.hover(id);
        self.flush_events();
        accepted
    }

    fn activate_hovered(&mut self) -> bool {
        match self.hovered_part().cloned() {
            Some(id) => self.select_part(&id),
            None => false,
        }
    }

    fn activate_highlighted(&mut self) -> bool {
        match self.highlighted_part().cloned() {
            Some(id) => self.select_part(&id),
            None => false,
        }
    }

    fn reset_view(&mut self) {
        self.reset();
        self.flush_events();
    }

    fn interactable_parts(&self) -> Vec<PartId> {
        self.interactable()
    }
}
