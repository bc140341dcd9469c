//! Snapshot construction. Read-only over the world.

use hecs::World;

use shadowline_core::components::{
    CameraRig, DroneUnit, EnemyUnit, MotionIntent, PlayerState, PlayerTag, ThreatId,
};
use shadowline_core::enums::{EnemyState, GamePhase};
use shadowline_core::events::GameEvent;
use shadowline_core::state::{CameraView, DroneView, EnemyView, GameStateSnapshot, PlayerView};
use shadowline_core::types::{Position, SimTime, Velocity};
use shadowline_threat_ai::fsm;

/// Build the complete visible state for this tick.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    let player = world
        .query::<(&Position, &Velocity, &PlayerState)>()
        .with::<&PlayerTag>()
        .iter()
        .next()
        .map(|(_e, (position, velocity, state))| PlayerView {
            position: *position,
            velocity: *velocity,
            is_hidden: state.is_hidden,
            is_sliding: state.is_sliding,
            on_ground: state.on_ground,
            lives: state.lives,
        })
        .unwrap_or_default();

    let mut cameras: Vec<CameraView> = world
        .query::<(&ThreatId, &Position, &CameraRig)>()
        .iter()
        .map(|(_e, (id, position, rig))| CameraView {
            threat_id: id.0,
            position: *position,
            facing: fsm::scan_facing(&rig.scan),
            field_of_view: rig.field_of_view,
            detection_range: rig.detection_range,
            state: rig.state,
            alerted: rig.alerted,
        })
        .collect();

    let mut drones: Vec<DroneView> = world
        .query::<(&ThreatId, &Position, &DroneUnit, Option<&MotionIntent>)>()
        .iter()
        .map(|(_e, (id, position, drone, intent))| DroneView {
            threat_id: id.0,
            position: *position,
            state: drone.state,
            spotlight_radius: drone.spotlight_radius,
            target: intent.map(|i| i.target),
        })
        .collect();

    let mut enemies: Vec<EnemyView> = world
        .query::<(&ThreatId, &Position, &EnemyUnit)>()
        .iter()
        .map(|(_e, (id, position, enemy))| EnemyView {
            threat_id: id.0,
            position: *position,
            facing: enemy.facing.angle(),
            field_of_view: enemy.field_of_view,
            detection_range: enemy.detection_range,
            state: enemy.state,
            cone_hot: enemy.state == EnemyState::Chasing,
        })
        .collect();

    // Stable ordering regardless of archetype layout.
    cameras.sort_by_key(|c| c.threat_id);
    drones.sort_by_key(|d| d.threat_id);
    enemies.sort_by_key(|e| e.threat_id);

    GameStateSnapshot {
        time: *time,
        phase,
        player,
        cameras,
        drones,
        enemies,
        events,
    }
}
