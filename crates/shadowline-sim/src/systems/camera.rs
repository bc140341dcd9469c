//! Surveillance camera scanning and perception.

use hecs::World;
use tracing::debug;

use shadowline_core::components::CameraRig;
use shadowline_core::enums::CameraState;
use shadowline_core::events::GameEvent;
use shadowline_core::types::Position;
use shadowline_threat_ai::{fsm, perception};

use super::ObservedPlayer;

/// Advance every camera's scan oscillator and run its perception check.
/// A detection event is emitted every tick the player stays in the cone.
pub fn run(world: &mut World, player: &ObservedPlayer, events: &mut Vec<GameEvent>) {
    for (_entity, (rig, position)) in world.query_mut::<(&mut CameraRig, &Position)>() {
        if rig.state == CameraState::Disabled {
            // Frozen phase, no perception. The alert flag was already
            // cleared when the camera was disabled.
            continue;
        }

        fsm::scan_step(&mut rig.scan);
        let facing = fsm::scan_facing(&rig.scan);

        let seen = perception::can_see(
            *position,
            facing,
            rig.field_of_view,
            rig.detection_range,
            player.position,
            player.is_hidden,
        );
        if seen != rig.alerted {
            debug!(x = position.x, y = position.y, seen, "camera alert changed");
        }
        rig.alerted = seen;

        if seen {
            // Payload is the detecting threat's position (alarm source).
            events.push(GameEvent::PlayerDetected {
                x: position.x,
                y: position.y,
            });
        }
    }
}
