//! Explosion animation: factor smoothing and per-part pose derivation

pub mod pose;
pub mod smoother;

pub use pose::{exploded_position, exploded_rotation, PartPose};
pub use smoother::{FactorSmoother, SmoothingParams};
