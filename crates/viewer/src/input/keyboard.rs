//! Keyboard shortcut handling

use serde::{Deserialize, Serialize};
use shared::CycleDirection;

use crate::navigation::NavigationCommands;
use crate::settings::InputSettings;

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Escape,
    Backspace,
    Home,
}

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    AdjustExplosion(f32),
    Cycle(CycleDirection),
    Activate,
    GoBack,
    Reset,
}

/// Map a key to an action
pub fn map_key(key: Key, settings: &InputSettings) -> InputAction {
    match key {
        Key::ArrowUp => InputAction::AdjustExplosion(settings.adjust_step),
        Key::ArrowDown => InputAction::AdjustExplosion(-settings.adjust_step),
        Key::ArrowLeft => InputAction::Cycle(CycleDirection::Prev),
        Key::ArrowRight => InputAction::Cycle(CycleDirection::Next),
        Key::Enter | Key::Space => InputAction::Activate,
        Key::Escape | Key::Backspace => InputAction::GoBack,
        Key::Home => InputAction::Reset,
    }
}

/// Run an action against the viewer. Returns true if it did anything.
pub fn dispatch(viewer: &mut impl NavigationCommands, action: InputAction) -> bool {
    match action {
        InputAction::AdjustExplosion(delta) => {
            viewer.adjust_explosion(delta);
            true
        }
        InputAction::Cycle(direction) => viewer.cycle(direction).is_some(),
        // Enter acts on the hovered part first, then the pointer
        InputAction::Activate => viewer.activate_hovered() || viewer.activate_highlighted(),
        InputAction::GoBack => viewer.go_back(),
        InputAction::Reset => {
            viewer.reset_view();
            true
        }
    }
}

/// Map and dispatch a key press
pub fn handle_key(
    viewer: &mut impl NavigationCommands,
    key: Key,
    settings: &InputSettings,
) -> bool {
    dispatch(viewer, map_key(key, settings))
}
