//! Threat behavior state machines.
//!
//! Pure functions that compute state transitions and velocity adjustments
//! for threat entities based on their current state and what they perceive.
//! No ECS dependency; operates on plain data.

use std::f64::consts::PI;

use rand::Rng;

use shadowline_core::components::ScanPattern;
use shadowline_core::constants::{CHASE_SPEED_FACTOR, TICK_RATE};
use shadowline_core::enums::{DroneState, Ease, EnemyState, HorizontalFacing};
use shadowline_core::types::{Position, Rect, Velocity};

/// Evaluate an easing curve at `u` in [0, 1].
pub fn ease_value(ease: Ease, u: f64) -> f64 {
    let u = u.clamp(0.0, 1.0);
    match ease {
        Ease::Linear => u,
        Ease::SineInOut => 0.5 * (1.0 - (PI * u).cos()),
    }
}

// --- Camera scan oscillator ---

/// Current facing of a scan pattern. Pure function of the phase: the facing
/// sweeps min → max over the first half cycle and back over the second,
/// sine-eased at both ends.
pub fn scan_facing(scan: &ScanPattern) -> f64 {
    let half = scan.half_cycle_ticks.max(1);
    let phase = scan.phase_ticks % (half * 2);
    let u = if phase < half {
        phase as f64 / half as f64
    } else {
        (half * 2 - phase) as f64 / half as f64
    };
    scan.min + (scan.max - scan.min) * ease_value(Ease::SineInOut, u)
}

/// Advance a scan pattern by one tick, wrapping at the full cycle.
pub fn scan_step(scan: &mut ScanPattern) {
    let cycle = scan.half_cycle_ticks.max(1) * 2;
    scan.phase_ticks = (scan.phase_ticks + 1) % cycle;
}

// --- Pursuit helpers ---

/// Pursuit velocity: unit vector from `from` toward `target`, scaled to the
/// boosted chase speed. Degenerate zero-distance input yields zero velocity.
pub fn chase_velocity(from: Position, target: Position, base_speed: f64) -> Velocity {
    let dx = target.x - from.x;
    let dy = target.y - from.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist < f64::EPSILON {
        return Velocity::new(0.0, 0.0);
    }
    let speed = base_speed * CHASE_SPEED_FACTOR;
    Velocity::new(speed * dx / dist, speed * dy / dist)
}

/// Ticks needed to cover `distance` at `speed`, at least one.
pub fn travel_ticks(distance: f64, speed: f64) -> u32 {
    ((distance / speed) * TICK_RATE as f64).ceil().max(1.0) as u32
}

/// Pick a uniformly random waypoint inside `area` inset by the spotlight
/// radius, so the spotlight never leaves the area.
pub fn pick_search_target(rng: &mut impl Rng, area: Rect, spotlight_radius: f64) -> Position {
    let bounds = area.inset(spotlight_radius);
    if bounds.width <= 0.0 || bounds.height <= 0.0 {
        return bounds.center();
    }
    Position::new(
        rng.gen_range(bounds.x..=bounds.x + bounds.width),
        rng.gen_range(bounds.y..=bounds.y + bounds.height),
    )
}

// --- Drone FSM ---

/// Input to the drone FSM for a single tick.
pub struct DroneContext {
    pub state: DroneState,
    pub position: Position,
    pub speed: f64,
    pub spotlight_radius: f64,
    pub player: Position,
    pub player_hidden: bool,
}

/// Output from the drone FSM.
pub struct DroneUpdate {
    pub new_state: DroneState,
    /// Velocity to apply, if the transition sets one. The drone aims once
    /// at the chase transition and does not re-home afterward.
    pub new_velocity: Option<Velocity>,
    pub detected: bool,
    pub state_changed: bool,
}

/// Evaluate the drone FSM for one tick.
pub fn evaluate_drone(ctx: &DroneContext) -> DroneUpdate {
    let detected = crate::perception::in_spotlight(
        ctx.position,
        ctx.spotlight_radius,
        ctx.player,
        ctx.player_hidden,
    );

    match (ctx.state, detected) {
        (DroneState::Searching, true) => DroneUpdate {
            new_state: DroneState::Chasing,
            new_velocity: Some(chase_velocity(ctx.position, ctx.player, ctx.speed)),
            detected,
            state_changed: true,
        },
        (DroneState::Chasing, false) => DroneUpdate {
            new_state: DroneState::Searching,
            new_velocity: Some(Velocity::new(0.0, 0.0)),
            detected,
            state_changed: true,
        },
        _ => DroneUpdate {
            new_state: ctx.state,
            new_velocity: None,
            detected,
            state_changed: false,
        },
    }
}

// --- Enemy FSM ---

/// Input to the patrol enemy FSM for a single tick.
pub struct EnemyContext {
    pub state: EnemyState,
    pub position: Position,
    pub facing: HorizontalFacing,
    pub speed: f64,
    pub detection_range: f64,
    pub field_of_view: f64,
    /// Length of the patrol route; routes shorter than 2 cannot patrol.
    pub patrol_len: usize,
    pub player: Position,
    pub player_hidden: bool,
}

/// Output from the patrol enemy FSM.
pub struct EnemyUpdate {
    pub new_state: EnemyState,
    /// Velocity to apply. While chasing this is recomputed every tick
    /// toward the player's current position, unlike the drone.
    pub new_velocity: Option<Velocity>,
    pub new_facing: HorizontalFacing,
    pub detected: bool,
    pub state_changed: bool,
}

/// Evaluate the enemy FSM for one tick.
pub fn evaluate_enemy(ctx: &EnemyContext) -> EnemyUpdate {
    let detected = crate::perception::can_see(
        ctx.position,
        ctx.facing.angle(),
        ctx.field_of_view,
        ctx.detection_range,
        ctx.player,
        ctx.player_hidden,
    );

    match (ctx.state, detected) {
        (EnemyState::Patrolling | EnemyState::Idle, true) => {
            let velocity = chase_velocity(ctx.position, ctx.player, ctx.speed);
            EnemyUpdate {
                new_state: EnemyState::Chasing,
                new_facing: ctx.facing.from_dx(velocity.x),
                new_velocity: Some(velocity),
                detected,
                state_changed: true,
            }
        }
        (EnemyState::Chasing, true) => {
            // Continuous re-aim toward the player's current position.
            let velocity = chase_velocity(ctx.position, ctx.player, ctx.speed);
            EnemyUpdate {
                new_state: EnemyState::Chasing,
                new_facing: ctx.facing.from_dx(velocity.x),
                new_velocity: Some(velocity),
                detected,
                state_changed: false,
            }
        }
        (EnemyState::Chasing, false) => {
            let resumed = if ctx.patrol_len >= 2 {
                EnemyState::Patrolling
            } else {
                EnemyState::Idle
            };
            EnemyUpdate {
                new_state: resumed,
                new_velocity: Some(Velocity::new(0.0, 0.0)),
                new_facing: ctx.facing,
                detected,
                state_changed: true,
            }
        }
        (state, false) => EnemyUpdate {
            new_state: state,
            new_velocity: None,
            new_facing: ctx.facing,
            detected,
            state_changed: false,
        },
    }
}
