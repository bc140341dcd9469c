//! Entity spawning and level construction.

use hecs::{Entity, World};
use tracing::debug;

use shadowline_core::components::{
    CameraRig, DroneUnit, EnemyUnit, PlayerInput, PlayerState, PlayerTag, ScanPattern, ThreatId,
};
use shadowline_core::constants::*;
use shadowline_core::enums::{CameraState, DroneState, EnemyState, HorizontalFacing};
use shadowline_core::options::{CameraOptions, DroneOptions, OptionsError};
use shadowline_core::types::{Position, Rect, Velocity};

/// Spawn the player at the given position.
pub fn spawn_player(world: &mut World, position: Position) -> Entity {
    world.spawn((
        PlayerTag,
        position,
        Velocity::default(),
        PlayerState::new(PLAYER_START_LIVES),
        PlayerInput::default(),
    ))
}

/// Spawn a surveillance camera. Returns its threat id.
pub fn spawn_camera(
    world: &mut World,
    next_threat_id: &mut u32,
    position: Position,
    options: CameraOptions,
) -> Result<u32, OptionsError> {
    options.validate()?;
    let half = options.half_cycle_ticks();
    let scan = ScanPattern {
        min: options.rotation_limits.min,
        max: options.rotation_limits.max,
        half_cycle_ticks: half,
        // Start mid-leg so the initial facing is the arc's midpoint.
        phase_ticks: half / 2,
    };
    let id = *next_threat_id;
    *next_threat_id += 1;
    world.spawn((
        ThreatId(id),
        position,
        CameraRig {
            state: CameraState::Scanning,
            alerted: false,
            field_of_view: options.field_of_view,
            detection_range: options.detection_range,
            scan,
        },
    ));
    debug!(id, x = position.x, y = position.y, "camera spawned");
    Ok(id)
}

/// Spawn a search drone. Returns its threat id.
///
/// The drone spawns without a waypoint; the drone system picks its first
/// search target on the next tick.
pub fn spawn_drone(
    world: &mut World,
    next_threat_id: &mut u32,
    position: Position,
    options: DroneOptions,
) -> Result<u32, OptionsError> {
    options.validate()?;
    let id = *next_threat_id;
    *next_threat_id += 1;
    world.spawn((
        ThreatId(id),
        position,
        Velocity::default(),
        DroneUnit {
            state: DroneState::Searching,
            speed: options.speed,
            spotlight_radius: options.spotlight_radius,
            search_area: options.search_area,
            wait_remaining_ticks: 0,
        },
    ));
    debug!(id, x = position.x, y = position.y, "drone spawned");
    Ok(id)
}

/// Spawn a patrolling enemy. Returns its threat id.
///
/// A route with fewer than two points cannot be patrolled; such an enemy
/// spawns `Idle` and only moves if it spots the player.
pub fn spawn_enemy(
    world: &mut World,
    next_threat_id: &mut u32,
    position: Position,
    patrol_points: Vec<Position>,
) -> u32 {
    let state = if patrol_points.len() >= 2 {
        EnemyState::Patrolling
    } else {
        EnemyState::Idle
    };
    let id = *next_threat_id;
    *next_threat_id += 1;
    world.spawn((
        ThreatId(id),
        position,
        Velocity::default(),
        EnemyUnit {
            state,
            speed: ENEMY_SPEED,
            detection_range: ENEMY_DETECTION_RANGE,
            field_of_view: ENEMY_FIELD_OF_VIEW,
            patrol_points,
            current_point: 0,
            facing: HorizontalFacing::default(),
        },
    ));
    debug!(id, x = position.x, y = position.y, ?state, "enemy spawned");
    id
}

/// Build the default level: the player plus a mixed threat layout covering
/// the 800x600 playfield.
pub fn setup_level(world: &mut World, next_threat_id: &mut u32) -> Result<(), OptionsError> {
    spawn_player(world, Position::new(100.0, GROUND_Y));

    spawn_camera(
        world,
        next_threat_id,
        Position::new(250.0, 80.0),
        CameraOptions::default(),
    )?;
    spawn_camera(
        world,
        next_threat_id,
        Position::new(620.0, 80.0),
        CameraOptions::default(),
    )?;

    spawn_drone(
        world,
        next_threat_id,
        Position::new(400.0, 200.0),
        DroneOptions {
            search_area: Rect::new(150.0, 100.0, 500.0, 300.0),
            ..DroneOptions::default()
        },
    )?;

    spawn_enemy(
        world,
        next_threat_id,
        Position::new(500.0, GROUND_Y),
        vec![
            Position::new(450.0, GROUND_Y),
            Position::new(700.0, GROUND_Y),
        ],
    );
    spawn_enemy(
        world,
        next_threat_id,
        Position::new(250.0, GROUND_Y),
        vec![
            Position::new(200.0, GROUND_Y),
            Position::new(350.0, GROUND_Y),
        ],
    );

    Ok(())
}
