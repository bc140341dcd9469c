//! Shared perception model.
//!
//! The vision-cone test used by cameras and patrol enemies, and the
//! proximity-only spotlight test used by drones. All angle handling folds
//! through [0, 2π) so the angular difference is always the minimal angle
//! between two directions, never a wraparound artifact.

use std::f64::consts::{PI, TAU};

use shadowline_core::types::Position;

/// Fold an angle into [0, 2π).
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Minimal angle between two directions, in [0, π].
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(TAU);
    if diff > PI {
        TAU - diff
    } else {
        diff
    }
}

/// Vision-cone test: true iff the target is not hidden, within `range`,
/// and within `field_of_view / 2` of the facing direction. The angular
/// boundary is inclusive; a field of view of 2π is omnidirectional.
pub fn can_see(
    origin: Position,
    facing: f64,
    field_of_view: f64,
    range: f64,
    target: Position,
    target_hidden: bool,
) -> bool {
    if target_hidden {
        return false;
    }

    let distance = origin.range_to(&target);
    if distance > range {
        return false;
    }

    let bearing = origin.bearing_to(&target);
    angular_difference(bearing, normalize_angle(facing)) <= field_of_view / 2.0
}

/// Proximity-only test: true iff the target is not hidden and within
/// `radius`. No angular gate; the drone's spotlight is omnidirectional.
pub fn in_spotlight(origin: Position, radius: f64, target: Position, target_hidden: bool) -> bool {
    if target_hidden {
        return false;
    }
    origin.range_to(&target) <= radius
}
