//! Patrol enemy behavior.

use hecs::{Entity, World};
use tracing::debug;

use shadowline_core::components::{EnemyUnit, MotionIntent};
use shadowline_core::enums::{Ease, EnemyState};
use shadowline_core::events::GameEvent;
use shadowline_core::types::{Position, Velocity};
use shadowline_threat_ai::fsm;

enum Deferred {
    CancelIntent,
    /// Issue an intent toward the enemy's current patrol waypoint.
    Retarget,
}

/// Run the enemy FSM for every patrol enemy, advance patrol routes, and
/// emit detection events. Chasing enemies re-aim at the player every tick.
pub fn run(world: &mut World, player: &super::ObservedPlayer, events: &mut Vec<GameEvent>) {
    let mut deferred: Vec<(Entity, Deferred)> = Vec::new();

    for (entity, (enemy, position, velocity, intent)) in world
        .query_mut::<(&mut EnemyUnit, &Position, &mut Velocity, Option<&MotionIntent>)>()
    {
        let update = fsm::evaluate_enemy(&fsm::EnemyContext {
            state: enemy.state,
            position: *position,
            facing: enemy.facing,
            speed: enemy.speed,
            detection_range: enemy.detection_range,
            field_of_view: enemy.field_of_view,
            patrol_len: enemy.patrol_points.len(),
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
            debug!(from = ?enemy.state, to = ?update.new_state, "enemy state changed");
        }
        enemy.state = update.new_state;
        enemy.facing = update.new_facing;
        if let Some(v) = update.new_velocity {
            *velocity = v;
        }

        match enemy.state {
            EnemyState::Chasing => {
                if update.state_changed {
                    deferred.push((entity, Deferred::CancelIntent));
                }
            }
            EnemyState::Patrolling => match intent {
                Some(intent) if intent.is_complete() => {
                    enemy.current_point = (enemy.current_point + 1) % enemy.patrol_points.len();
                    deferred.push((entity, Deferred::Retarget));
                }
                Some(_) => {}
                // Fresh spawn or patrol resumed after a chase: head for the
                // current waypoint without advancing the route.
                None => deferred.push((entity, Deferred::Retarget)),
            },
            EnemyState::Idle => {}
        }
    }

    for (entity, action) in deferred {
        match action {
            Deferred::CancelIntent => {
                let _ = world.remove_one::<MotionIntent>(entity);
            }
            Deferred::Retarget => {
                let plan = match (
                    world.get::<&Position>(entity),
                    world.get::<&EnemyUnit>(entity),
                ) {
                    (Ok(position), Ok(enemy)) => enemy
                        .patrol_points
                        .get(enemy.current_point)
                        .map(|target| {
                            let ticks =
                                fsm::travel_ticks(position.range_to(target), enemy.speed);
                            MotionIntent::new(*position, *target, ticks, Ease::Linear)
                        }),
                    _ => None,
                };
                if let Some(intent) = plan {
                    if let Ok(mut enemy) = world.get::<&mut EnemyUnit>(entity) {
                        enemy.facing = enemy.facing.from_dx(intent.target.x - intent.from.x);
                    }
                    let _ = world.insert_one(entity, intent);
                }
            }
        }
    }
}
