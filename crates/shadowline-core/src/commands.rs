//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Movement (held direction until Stop) ---
    MoveLeft,
    MoveRight,
    Stop,
    /// Jump; only takes effect while on the ground.
    Jump,
    /// Slide; only takes effect while on the ground and not already sliding.
    Slide,
    /// Toggle hiding. A hidden player is undetectable and cannot move.
    ToggleHide,

    // --- Threat lifecycle ---
    /// Freeze a camera's scan and short-circuit its perception.
    DisableCamera { camera_id: u32 },
    /// Resume a disabled camera from its frozen facing.
    EnableCamera { camera_id: u32 },
    /// Destroy a threat entity, cancelling any in-flight motion intent.
    /// Idempotent: removing an unknown id is a no-op.
    RemoveThreat { threat_id: u32 },

    // --- Game flow ---
    /// Start a new run from the menu or after a game over.
    StartRun,
    Pause,
    Resume,
    ReturnToMenu,
}
