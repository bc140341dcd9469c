//! Construction options for threat entities, with validation.
//!
//! Out-of-range numeric configuration is rejected here, at construction,
//! rather than surfacing later as silently-wrong detection behavior.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;
use crate::types::Rect;

/// Rejected construction input.
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("detection range must be non-negative, got {0}")]
    NegativeRange(f64),
    #[error("field of view must be within [0, 2π], got {0}")]
    InvalidFieldOfView(f64),
    #[error("rotation limits must satisfy min <= max, got min={min} max={max}")]
    InvalidRotationLimits { min: f64, max: f64 },
    #[error("speed must be positive, got {0}")]
    NonPositiveSpeed(f64),
    #[error("spotlight radius must be non-negative, got {0}")]
    NegativeRadius(f64),
}

/// Bounds of a camera's scan arc (radians).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationLimits {
    pub min: f64,
    pub max: f64,
}

impl Default for RotationLimits {
    fn default() -> Self {
        Self {
            min: CAMERA_ROTATION_MIN,
            max: CAMERA_ROTATION_MAX,
        }
    }
}

/// Surveillance camera construction options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraOptions {
    /// Scan speed in radians per tick.
    pub rotation_speed: f64,
    pub detection_range: f64,
    pub field_of_view: f64,
    pub rotation_limits: RotationLimits,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            rotation_speed: CAMERA_ROTATION_SPEED,
            detection_range: CAMERA_DETECTION_RANGE,
            field_of_view: CAMERA_FIELD_OF_VIEW,
            rotation_limits: RotationLimits::default(),
        }
    }
}

impl CameraOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.rotation_speed <= 0.0 {
            return Err(OptionsError::NonPositiveSpeed(self.rotation_speed));
        }
        if self.detection_range < 0.0 {
            return Err(OptionsError::NegativeRange(self.detection_range));
        }
        if !(0.0..=std::f64::consts::TAU).contains(&self.field_of_view) {
            return Err(OptionsError::InvalidFieldOfView(self.field_of_view));
        }
        if self.rotation_limits.min > self.rotation_limits.max {
            return Err(OptionsError::InvalidRotationLimits {
                min: self.rotation_limits.min,
                max: self.rotation_limits.max,
            });
        }
        Ok(())
    }

    /// Ticks for one bound-to-bound scan leg at this option's speed.
    pub fn half_cycle_ticks(&self) -> u32 {
        let arc = self.rotation_limits.max - self.rotation_limits.min;
        ((arc / self.rotation_speed).ceil() as u32).max(1)
    }
}

/// Drone construction options.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DroneOptions {
    pub speed: f64,
    pub spotlight_radius: f64,
    /// Area the drone searches; the spotlight stays fully inside it.
    pub search_area: Rect,
}

impl Default for DroneOptions {
    fn default() -> Self {
        Self {
            speed: DRONE_SPEED,
            spotlight_radius: DRONE_SPOTLIGHT_RADIUS,
            search_area: Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT),
        }
    }
}

impl DroneOptions {
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.speed <= 0.0 {
            return Err(OptionsError::NonPositiveSpeed(self.speed));
        }
        if self.spotlight_radius < 0.0 {
            return Err(OptionsError::NegativeRadius(self.spotlight_radius));
        }
        Ok(())
    }
}
