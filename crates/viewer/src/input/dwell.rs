//! Timers for gesture-style input: dwell-to-select and idle reset.
//!
//! Both timers are driven by the host loop's frame time and only report
//! when they fire. `PointerTimers` turns that into navigation commands.

use shared::PartId;

use crate::navigation::NavigationCommands;
use crate::settings::InputSettings;

/// Fires once when the same part stays hovered for `threshold` seconds
#[derive(Debug, Clone)]
pub struct DwellSelector {
    threshold: f32,
    part: Option<PartId>,
    elapsed: f32,
    fired: bool,
}

impl DwellSelector {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold: threshold.max(0.0),
            part: None,
            elapsed: 0.0,
            fired: false,
        }
    }

    /// Feed the current hover and frame time; returns the part to select
    /// when the dwell completes.
    pub fn observe(&mut self, hovered: Option<&PartId>, dt: f32) -> Option<PartId> {
        if hovered != self.part.as_ref() {
            self.part = hovered.cloned();
            self.elapsed = 0.0;
            self.fired = false;
        }
        let part = self.part.as_ref()?;
        if self.fired {
            return None;
        }
        self.elapsed += dt.max(0.0);
        if self.elapsed >= self.threshold {
            self.fired = true;
            tracing::debug!("Dwell selected '{part}'");
            return Some(part.clone());
        }
        None
    }

    /// Dwell progress in 0..=1, for a fill indicator
    pub fn progress(&self) -> f32 {
        if self.part.is_none() {
            return 0.0;
        }
        if self.threshold <= 0.0 {
            return 1.0;
        }
        (self.elapsed / self.threshold).min(1.0)
    }

    pub fn reset(&mut self) {
        self.part = None;
        self.elapsed = 0.0;
        self.fired = false;
    }
}

/// Fires once after `timeout` seconds without user activity
#[derive(Debug, Clone)]
pub struct IdleReset {
    timeout: f32,
    idle: f32,
    fired: bool,
}

impl IdleReset {
    pub fn new(timeout: f32) -> Self {
        Self {
            timeout: timeout.max(0.0),
            idle: 0.0,
            fired: false,
        }
    }

    pub fn record_activity(&mut self) {
        self.idle = 0.0;
        self.fired = false;
    }

    /// Advance the idle clock; true exactly once per idle period
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.fired {
            return false;
        }
        self.idle += dt.max(0.0);
        if self.idle >= self.timeout {
            self.fired = true;
            tracing::info!("Idle for {:.0}s, resetting view", self.idle);
            return true;
        }
        false
    }

    pub fn idle_seconds(&self) -> f32 {
        self.idle
    }
}

/// Dwell-select and idle-reset wired to the command surface
#[derive(Debug, Clone)]
pub struct PointerTimers {
    pub dwell: DwellSelector,
    pub idle: IdleReset,
}

impl PointerTimers {
    pub fn new(settings: &InputSettings) -> Self {
        Self {
            dwell: DwellSelector::new(settings.dwell_seconds),
            idle: IdleReset::new(settings.idle_reset_seconds),
        }
    }

    /// Any user input restarts the idle clock
    pub fn record_activity(&mut self) {
        self.idle.record_activity();
    }

    /// Call once per frame before the viewer's own update.
    ///
    /// Selects the dwelled-on part and resets an idle view. Returns true if
    /// either fired.
    pub fn update(
        &mut self,
        viewer: &mut impl NavigationCommands,
        hovered: Option<&PartId>,
        dt: f32,
    ) -> bool {
        let mut fired = false;
        if let Some(part) = self.dwell.observe(hovered, dt) {
            self.idle.record_activity();
            fired |= viewer.select_part(&part);
        }
        if self.idle.tick(dt) {
            self.dwell.reset();
            viewer.reset_view();
            fired = true;
        }
        fired
    }
}
