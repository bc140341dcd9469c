//! Contact damage from pursuing threats.

use hecs::World;
use tracing::debug;

use shadowline_core::components::{DroneUnit, EnemyUnit, PlayerState, PlayerTag};
use shadowline_core::constants::{CONTACT_RADIUS, DAMAGE_COOLDOWN_TICKS};
use shadowline_core::enums::{DroneState, EnemyState};
use shadowline_core::events::GameEvent;
use shadowline_core::types::Position;

/// Apply contact damage from chasing threats to a vulnerable player.
/// Returns true when the player runs out of lives.
pub fn run(world: &mut World, events: &mut Vec<GameEvent>) -> bool {
    let player = {
        let mut query = world.query::<(&Position, &PlayerState)>().with::<&PlayerTag>();
        query
            .iter()
            .next()
            .map(|(entity, (position, state))| {
                (
                    entity,
                    *position,
                    state.is_hidden || state.damage_cooldown_ticks > 0,
                )
            })
    };
    let Some((entity, position, invulnerable)) = player else {
        return false;
    };
    if invulnerable {
        return false;
    }

    let mut contact = false;
    for (_e, (drone, threat_pos)) in world.query::<(&DroneUnit, &Position)>().iter() {
        if drone.state == DroneState::Chasing && threat_pos.range_to(&position) <= CONTACT_RADIUS {
            contact = true;
            break;
        }
    }
    if !contact {
        for (_e, (enemy, threat_pos)) in world.query::<(&EnemyUnit, &Position)>().iter() {
            if enemy.state == EnemyState::Chasing
                && threat_pos.range_to(&position) <= CONTACT_RADIUS
            {
                contact = true;
                break;
            }
        }
    }
    if !contact {
        return false;
    }

    let mut out_of_lives = false;
    if let Ok(mut state) = world.get::<&mut PlayerState>(entity) {
        state.lives = state.lives.saturating_sub(1);
        state.damage_cooldown_ticks = DAMAGE_COOLDOWN_TICKS;
        debug!(lives = state.lives, "player damaged");
        out_of_lives = state.lives == 0;
    }
    events.push(GameEvent::PlayerDamage);
    out_of_lives
}
