//! ECS components for hecs entities.
//!
//! Components are plain data structs; game logic lives in systems and in
//! the `shadowline-threat-ai` crate's pure functions.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{Position, Rect};

/// Marks the player entity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerTag;

/// Player condition queried by every threat's perception check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    /// Hidden players are unconditionally undetectable.
    pub is_hidden: bool,
    pub is_sliding: bool,
    /// Ticks left in the current slide.
    pub slide_remaining_ticks: u32,
    /// Standing on the ground plane (enables jumping and sliding).
    pub on_ground: bool,
    pub lives: u32,
    /// Ticks of invulnerability left after the last hit.
    pub damage_cooldown_ticks: u32,
}

impl PlayerState {
    pub fn new(lives: u32) -> Self {
        Self {
            is_hidden: false,
            is_sliding: false,
            slide_remaining_ticks: 0,
            on_ground: true,
            lives,
            damage_cooldown_ticks: 0,
        }
    }
}

/// Held/queued player input, mutated by commands at tick boundaries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerInput {
    /// Held horizontal direction: -1 left, 0 stopped, 1 right.
    pub move_dir: i8,
    /// One-shot jump request, consumed by the player system.
    pub jump_queued: bool,
    /// One-shot slide request, consumed by the player system.
    pub slide_queued: bool,
}

/// Stable identifier for a threat entity, used by lifecycle commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatId(pub u32);

/// Scan oscillator data for a camera: facing sweeps `min` → `max` → `min`
/// with sine ease-in-out, one bound-to-bound leg per `half_cycle_ticks`.
/// The facing angle is a pure function of `phase_ticks`, so freezing the
/// phase freezes the facing without any discontinuity on resume.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScanPattern {
    pub min: f64,
    pub max: f64,
    pub half_cycle_ticks: u32,
    /// Position within the full back-and-forth cycle, in
    /// [0, 2 * half_cycle_ticks).
    pub phase_ticks: u32,
}

/// Stationary oscillating surveillance camera.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraRig {
    pub state: CameraState,
    /// Perceives the player this tick (drives the indicator visual).
    pub alerted: bool,
    pub field_of_view: f64,
    pub detection_range: f64,
    pub scan: ScanPattern,
}

/// Mobile search/pursuit drone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroneUnit {
    pub state: DroneState,
    pub speed: f64,
    /// Omnidirectional detection radius; also the visual spotlight size.
    pub spotlight_radius: f64,
    pub search_area: Rect,
    /// Ticks left waiting at a reached waypoint before picking the next.
    pub wait_remaining_ticks: u32,
}

/// Patrolling enemy with a horizontal vision cone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyUnit {
    pub state: EnemyState,
    pub speed: f64,
    pub detection_range: f64,
    pub field_of_view: f64,
    /// Ordered, cyclic patrol route.
    pub patrol_points: Vec<Position>,
    /// Index of the waypoint currently being traveled toward.
    pub current_point: usize,
    pub facing: HorizontalFacing,
}

/// Declarative request to move an entity to a target over a fixed number
/// of ticks, advanced by the motion system. Replacing or removing the
/// component is cancellation; an entity can hold at most one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MotionIntent {
    pub from: Position,
    pub target: Position,
    pub duration_ticks: u32,
    pub elapsed_ticks: u32,
    pub ease: Ease,
}

impl MotionIntent {
    pub fn new(from: Position, target: Position, duration_ticks: u32, ease: Ease) -> Self {
        Self {
            from,
            target,
            duration_ticks: duration_ticks.max(1),
            elapsed_ticks: 0,
            ease,
        }
    }

    /// The intent has reached its target and will no longer move the entity.
    pub fn is_complete(&self) -> bool {
        self.elapsed_ticks >= self.duration_ticks
    }
}
