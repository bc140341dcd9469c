//! Simulation systems, run in a fixed order each tick by the engine.

pub mod camera;
pub mod damage;
pub mod drone;
pub mod enemy;
pub mod motion;
pub mod player;
pub mod snapshot;

use hecs::World;

use shadowline_core::components::{PlayerState, PlayerTag};
use shadowline_core::types::Position;

/// The player as seen by threat perception, captured at tick start so
/// every threat this tick perceives the same player state.
#[derive(Debug, Clone, Copy)]
pub struct ObservedPlayer {
    pub position: Position,
    pub is_hidden: bool,
}

/// Capture the player's perceivable state, if a player exists.
pub fn capture_player(world: &World) -> Option<ObservedPlayer> {
    world
        .query::<(&Position, &PlayerState)>()
        .with::<&PlayerTag>()
        .iter()
        .next()
        .map(|(_entity, (position, state))| ObservedPlayer {
            position: *position,
            is_hidden: state.is_hidden,
        })
}
