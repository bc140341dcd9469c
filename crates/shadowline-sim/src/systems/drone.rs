//! Drone search and pursuit behavior.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use shadowline_core::components::{DroneUnit, MotionIntent};
use shadowline_core::constants::DRONE_NEXT_POINT_DELAY_TICKS;
use shadowline_core::enums::{DroneState, Ease};
use shadowline_core::events::GameEvent;
use shadowline_core::types::{Position, Velocity};
use shadowline_threat_ai::fsm;

/// Structural changes deferred until the query borrow is released.
enum Deferred {
    /// Drop the current waypoint intent.
    CancelIntent,
    /// Pick a fresh random search waypoint and issue an intent toward it.
    PickTarget,
}

/// Run the drone FSM for every drone, steer the searching ones between
/// random waypoints, and emit detection events.
pub fn run(
    world: &mut World,
    rng: &mut ChaCha8Rng,
    player: &super::ObservedPlayer,
    events: &mut Vec<GameEvent>,
) {
    let mut deferred: Vec<(Entity, Deferred)> = Vec::new();

    for (entity, (drone, position, velocity, intent)) in world
        .query_mut::<(&mut DroneUnit, &Position, &mut Velocity, Option<&MotionIntent>)>()
    {
        let update = fsm::evaluate_drone(&fsm::DroneContext {
            state: drone.state,
            position: *position,
            speed: drone.speed,
            spotlight_radius: drone.spotlight_radius,
            player: player.position,
            player_hidden: player.is_hidden,
        });

        if update.detected {
            events.push(GameEvent::PlayerDetected {
                x: position.x,
                y: position.y,
            });
        }

        if update.state_changed {
            debug!(from = ?drone.state, to = ?update.new_state, "drone state changed");
            drone.state = update.new_state;
            if let Some(v) = update.new_velocity {
                *velocity = v;
            }
            match update.new_state {
                DroneState::Chasing => {
                    // Aim once; the velocity holds until the player is lost.
                    drone.wait_remaining_ticks = 0;
                    deferred.push((entity, Deferred::CancelIntent));
                }
                DroneState::Searching => {
                    // Lost the player, resume searching right away.
                    deferred.push((entity, Deferred::PickTarget));
                }
            }
            continue;
        }

        if drone.state == DroneState::Searching {
            match intent {
                Some(intent) if intent.is_complete() => {
                    drone.wait_remaining_ticks = DRONE_NEXT_POINT_DELAY_TICKS;
                    deferred.push((entity, Deferred::CancelIntent));
                }
                Some(_) => {}
                None => {
                    if drone.wait_remaining_ticks > 0 {
                        drone.wait_remaining_ticks -= 1;
                        if drone.wait_remaining_ticks == 0 {
                            deferred.push((entity, Deferred::PickTarget));
                        }
                    } else {
                        // Fresh spawn: no waypoint yet.
                        deferred.push((entity, Deferred::PickTarget));
                    }
                }
            }
        }
    }

    for (entity, action) in deferred {
        match action {
            Deferred::CancelIntent => {
                let _ = world.remove_one::<MotionIntent>(entity);
            }
            Deferred::PickTarget => {
                let plan = match (
                    world.get::<&Position>(entity),
                    world.get::<&DroneUnit>(entity),
                ) {
                    (Ok(position), Ok(drone)) => {
                        let target =
                            fsm::pick_search_target(rng, drone.search_area, drone.spotlight_radius);
                        let ticks = fsm::travel_ticks(position.range_to(&target), drone.speed);
                        Some(MotionIntent::new(*position, target, ticks, Ease::SineInOut))
                    }
                    _ => None,
                };
                if let Some(intent) = plan {
                    debug!(
                        x = intent.target.x,
                        y = intent.target.y,
                        ticks = intent.duration_ticks,
                        "drone waypoint picked"
                    );
                    let _ = world.insert_one(entity, intent);
                }
            }
        }
    }
}
