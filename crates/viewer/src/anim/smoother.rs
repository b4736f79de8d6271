//! Rate-limited exponential smoothing of a 0..1 explosion factor

use crate::settings::SmoothingSettings;

/// Smoothing constants for one reference tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingParams {
    pub coefficient: f32,
    pub max_step: f32,
    pub epsilon: f32,
}

impl Default for SmoothingParams {
    fn default() -> Self {
        SmoothingSettings::default().into()
    }
}

impl From<SmoothingSettings> for SmoothingParams {
    fn from(s: SmoothingSettings) -> Self {
        Self {
            coefficient: s.coefficient,
            max_step: s.max_step,
            epsilon: s.epsilon,
        }
    }
}

/// A factor that chases its target a little every tick.
///
/// `current` never overshoots `target` and snaps onto it exactly once within
/// `epsilon`, so a settled smoother always reads the exact target value.
#[derive(Debug, Clone)]
pub struct FactorSmoother {
    current: f32,
    target: f32,
    /// Value at the last reported change
    reported: f32,
    params: SmoothingParams,
}

impl FactorSmoother {
    pub fn new(initial: f32, params: SmoothingParams) -> Self {
        let initial = initial.clamp(0.0, 1.0);
        Self {
            current: initial,
            target: initial,
            reported: initial,
            params,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Set a new target (clamped to 0..1). Returns the stored target.
    pub fn set_target(&mut self, value: f32) -> f32 {
        self.target = if value.is_nan() {
            self.target
        } else {
            value.clamp(0.0, 1.0)
        };
        self.target
    }

    /// Move the target by `delta`. Returns the stored target.
    pub fn nudge(&mut self, delta: f32) -> f32 {
        self.set_target(self.target + delta)
    }

    /// Jump straight to `value` with no animation
    pub fn snap(&mut self, value: f32) {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        self.current = value;
        self.target = value;
        self.reported = value;
    }

    pub fn is_settled(&self) -> bool {
        self.current == self.target
    }

    /// Advance one reference tick. Returns true when dependents must recompute.
    pub fn tick(&mut self) -> bool {
        self.advance(1.0)
    }

    /// Advance by `frame_scale` reference ticks.
    ///
    /// The step limit scales linearly and the coefficient is compounded, so
    /// convergence takes the same wall time at any frame rate.
    pub fn advance(&mut self, frame_scale: f32) -> bool {
        if !frame_scale.is_finite() || frame_scale <= 0.0 {
            return false;
        }
        let SmoothingParams {
            coefficient,
            max_step,
            epsilon,
        } = self.params;

        if self.current != self.target {
            let coefficient = if frame_scale == 1.0 {
                coefficient
            } else {
                1.0 - (1.0 - coefficient).powf(frame_scale)
            };
            let limit = max_step * frame_scale;
            let delta = ((self.target - self.current) * coefficient).clamp(-limit, limit);
            self.current += delta;
            if (self.current - self.target).abs() < epsilon {
                self.current = self.target;
            }
        }

        let moved = (self.current - self.reported).abs() > epsilon;
        let arrived = self.current == self.target && self.reported != self.target;
        if moved || arrived {
            self.reported = self.current;
            true
        } else {
            false
        }
    }
}

impl Default for FactorSmoother {
    fn default() -> Self {
        Self::new(0.0, SmoothingParams::default())
    }
}
