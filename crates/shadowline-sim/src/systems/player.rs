//! Player input, timers, and gravity.

use hecs::World;
use tracing::trace;

use shadowline_core::components::{PlayerInput, PlayerState, PlayerTag};
use shadowline_core::constants::{
    DT, GRAVITY_Y, PLAYER_JUMP_VELOCITY, PLAYER_SLIDE_TICKS, PLAYER_WALK_SPEED,
};
use shadowline_core::types::Velocity;

/// Apply held/queued input to the player, advance its timers, and apply
/// gravity. Position integration happens in the motion system.
pub fn run(world: &mut World) {
    let query = world
        .query_mut::<(&mut Velocity, &mut PlayerState, &mut PlayerInput)>()
        .with::<&PlayerTag>();
    for (_entity, (velocity, state, input)) in query {
        // A slide locks horizontal velocity in for its duration.
        if state.is_sliding {
            state.slide_remaining_ticks = state.slide_remaining_ticks.saturating_sub(1);
            if state.slide_remaining_ticks == 0 {
                state.is_sliding = false;
                trace!("slide finished");
            }
        } else if state.is_hidden {
            // Hiding means holding still in cover.
            velocity.x = 0.0;
        } else {
            velocity.x = f64::from(input.move_dir) * PLAYER_WALK_SPEED;
        }

        if input.jump_queued {
            input.jump_queued = false;
            if state.on_ground && !state.is_sliding && !state.is_hidden {
                velocity.y = PLAYER_JUMP_VELOCITY;
                state.on_ground = false;
                trace!("jump");
            }
        }

        if input.slide_queued {
            input.slide_queued = false;
            if state.on_ground && !state.is_sliding && !state.is_hidden && input.move_dir != 0 {
                state.is_sliding = true;
                state.slide_remaining_ticks = PLAYER_SLIDE_TICKS;
                trace!("slide started");
            }
        }

        if !state.on_ground {
            velocity.y += GRAVITY_Y * DT;
        }

        state.damage_cooldown_ticks = state.damage_cooldown_ticks.saturating_sub(1);
    }
}
