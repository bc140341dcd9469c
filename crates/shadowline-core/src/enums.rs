//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Surveillance camera behavioral state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraState {
    /// Oscillating through its scan arc, perceiving normally.
    #[default]
    Scanning,
    /// Frozen in place; perception short-circuits to false.
    Disabled,
}

/// Drone behavioral state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DroneState {
    /// Gliding between random waypoints inside the search area.
    #[default]
    Searching,
    /// Straight-line pursuit at boosted speed.
    Chasing,
}

/// Patrol enemy behavioral state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    /// Cycling through the patrol route at constant speed.
    #[default]
    Patrolling,
    /// Re-aimed pursuit at boosted speed.
    Chasing,
    /// No usable patrol route (fewer than 2 points); stationary.
    Idle,
}

/// Easing applied to a motion intent's interpolation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ease {
    /// Constant-speed travel.
    #[default]
    Linear,
    /// Sine ease-in-out (slow start, slow stop).
    SineInOut,
}

/// Which way a patrol enemy faces. The vision cone is horizontal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HorizontalFacing {
    #[default]
    Right,
    Left,
}

impl HorizontalFacing {
    /// Facing angle in radians (0 = +x, π = -x).
    pub fn angle(&self) -> f64 {
        match self {
            HorizontalFacing::Right => 0.0,
            HorizontalFacing::Left => std::f64::consts::PI,
        }
    }

    /// Facing matching the sign of a horizontal displacement.
    /// Zero displacement keeps the current facing.
    pub fn from_dx(self, dx: f64) -> Self {
        if dx < 0.0 {
            HorizontalFacing::Left
        } else if dx > 0.0 {
            HorizontalFacing::Right
        } else {
            self
        }
    }
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Menu,
    Active,
    Paused,
    GameOver,
}
