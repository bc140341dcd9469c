//! Events published on the bus for game-level consumers
//! (score, alarms, game-over logic).

use serde::{Deserialize, Serialize};

/// Broadcast notifications emitted by the simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// A threat currently perceives the player. Carries the threat's
    /// position at the moment of detection. Level-triggered: re-emitted
    /// every tick the detection persists.
    PlayerDetected { x: f64, y: f64 },
    /// The player took contact damage.
    PlayerDamage,
}
