//! Motion: intent interpolation, velocity integration, world clamping.

use hecs::{Without, World};

use shadowline_core::components::{MotionIntent, PlayerState};
use shadowline_core::constants::{DT, GROUND_Y, WORLD_HEIGHT, WORLD_WIDTH};
use shadowline_core::types::{Position, Rect, Velocity};
use shadowline_threat_ai::fsm;

/// Advance all motion intents, integrate velocities for everything else,
/// then resolve ground contact and world bounds.
pub fn run(world: &mut World) {
    // Intent-driven entities are positioned on the eased path. The intent
    // holds the entity at its target once complete, until the owning
    // system removes or replaces it.
    for (_entity, (position, intent)) in world.query_mut::<(&mut Position, &mut MotionIntent)>() {
        if !intent.is_complete() {
            intent.elapsed_ticks += 1;
            let u = f64::from(intent.elapsed_ticks) / f64::from(intent.duration_ticks);
            let t = fsm::ease_value(intent.ease, u);
            position.x = intent.from.x + (intent.target.x - intent.from.x) * t;
            position.y = intent.from.y + (intent.target.y - intent.from.y) * t;
        }
    }

    // An active intent owns the entity's position outright.
    for (_entity, (position, velocity)) in
        world.query_mut::<Without<(&mut Position, &Velocity), &MotionIntent>>()
    {
        position.x += velocity.x * DT;
        position.y += velocity.y * DT;
    }

    // Ground plane contact for the player.
    for (_entity, (position, velocity, state)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut PlayerState)>()
    {
        if position.y >= GROUND_Y {
            position.y = GROUND_Y;
            velocity.y = 0.0;
            state.on_ground = true;
        } else {
            state.on_ground = false;
        }
    }

    let bounds = Rect::new(0.0, 0.0, WORLD_WIDTH, WORLD_HEIGHT);
    for (_entity, position) in world.query_mut::<&mut Position>() {
        *position = bounds.clamp(*position);
    }
}
