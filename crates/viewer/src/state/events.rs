//! Observer lists for state changes and diagnostics.
//!
//! Events are queued while a command or tick runs and delivered
//! synchronously, in order, when it finishes.

use serde::Serialize;
use shared::{PartId, ViewMode};

use crate::error::ViewerError;

/// Something the renderer or UI may want to react to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ViewerEvent {
    ModeChanged {
        from: ViewMode,
        to: ViewMode,
    },
    FocusChanged {
        previous: Option<PartId>,
        current: Option<PartId>,
    },
    DrillChanged {
        part: PartId,
        drilled: bool,
    },
    /// A smoothed factor moved (emitted at most once per tick)
    ExplosionChanged {
        global: f32,
        part: f32,
    },
    NavigationChanged {
        index: usize,
        part: PartId,
    },
    HoverChanged {
        part: Option<PartId>,
    },
    ChildSelected {
        part: PartId,
    },
    /// Layout finished moving parts back after leaving focus
    LayoutSettled,
}

pub type EventListener = Box<dyn FnMut(&ViewerEvent)>;
pub type DiagnosticListener = Box<dyn FnMut(&ViewerError)>;

/// Registered listeners plus the pending queue
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<EventListener>,
    diagnostics: Vec<DiagnosticListener>,
    pending: Vec<ViewerEvent>,
}

impl EventBus {
    pub fn subscribe(&mut self, listener: EventListener) {
        self.listeners.push(listener);
    }

    pub fn subscribe_diagnostics(&mut self, listener: DiagnosticListener) {
        self.diagnostics.push(listener);
    }

    pub(crate) fn emit(&mut self, event: ViewerEvent) {
        self.pending.push(event);
    }

    /// Report a swallowed error right away
    pub(crate) fn diagnose(&mut self, error: ViewerError) {
        tracing::debug!("{error}");
        for listener in self.diagnostics.iter_mut() {
            listener(&error);
        }
    }

    /// Deliver queued events in emission order
    pub(crate) fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let events = std::mem::take(&mut self.pending);
        for event in &events {
            for listener in self.listeners.iter_mut() {
                listener(event);
            }
        }
    }

    pub fn pending(&self) -> &[ViewerEvent] {
        &self.pending
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .field("diagnostics", &self.diagnostics.len())
            .field("pending", &self.pending)
            .finish()
    }
}
