use glam::Vec3;
use serde::{Deserialize, Serialize};
use shared::RestPose;

/// Transform of a part as seen by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartPose {
    pub position: Vec3,
    /// Euler angles (radians)
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl PartPose {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Default for PartPose {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<RestPose> for PartPose {
    fn from(rest: RestPose) -> Self {
        Self {
            position: Vec3::from(rest.position),
            rotation: Vec3::from(rest.rotation),
            scale: Vec3::from(rest.scale),
        }
    }
}

/// Position of a part pushed out along its explode direction.
///
/// `distance_scale` exaggerates the travel; the global and sub-assembly paths
/// use different values.
pub fn exploded_position(
    rest: Vec3,
    direction: Vec3,
    distance: f32,
    factor: f32,
    distance_scale: f32,
) -> Vec3 {
    rest + direction * distance * factor * distance_scale
}

/// Rotation of a part tilted along its explode direction.
///
/// At or below `threshold` the rest rotation is returned exactly.
pub fn exploded_rotation(
    rest: Vec3,
    direction: Vec3,
    factor: f32,
    amount: f32,
    threshold: f32,
) -> Vec3 {
    if factor > threshold {
        rest + direction * factor * amount
    } else {
        rest
    }
}
