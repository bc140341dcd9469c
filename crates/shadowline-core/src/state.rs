//! Game state snapshot: the complete visible state produced each tick.
//!
//! Views carry the computed state a rendering layer needs (positions,
//! facing angles, cone parameters, alert flags) and nothing about how to
//! draw it.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::GameEvent;
use crate::types::{Position, SimTime, Velocity};

/// Complete game state after one tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub player: PlayerView,
    pub cameras: Vec<CameraView>,
    pub drones: Vec<DroneView>,
    pub enemies: Vec<EnemyView>,
    /// Events emitted during this tick (also dispatched through the bus).
    pub events: Vec<GameEvent>,
}

/// The player as visible to the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Position,
    pub velocity: Velocity,
    pub is_hidden: bool,
    pub is_sliding: bool,
    pub on_ground: bool,
    pub lives: u32,
}

/// Surveillance camera state, including its vision-cone geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraView {
    pub threat_id: u32,
    pub position: Position,
    /// Current scan facing (radians).
    pub facing: f64,
    pub field_of_view: f64,
    pub detection_range: f64,
    pub state: CameraState,
    /// Perceiving the player this tick (alert indicator).
    pub alerted: bool,
}

/// Drone state, including its spotlight geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneView {
    pub threat_id: u32,
    pub position: Position,
    pub state: DroneState,
    pub spotlight_radius: f64,
    /// Waypoint currently being traveled toward, if any.
    pub target: Option<Position>,
}

/// Patrol enemy state, including its vision-cone geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyView {
    pub threat_id: u32,
    pub position: Position,
    /// Horizontal cone facing (0 or π).
    pub facing: f64,
    pub field_of_view: f64,
    pub detection_range: f64,
    pub state: EnemyState,
    /// Cone is drawn "hot" while chasing.
    pub cone_hot: bool,
}
