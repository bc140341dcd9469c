//! Simulation engine.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands
//! at tick boundaries, runs all systems, dispatches events through the
//! bus, and produces `GameStateSnapshot`s. Completely headless, enabling
//! deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, error};

use shadowline_core::commands::PlayerCommand;
use shadowline_core::components::{CameraRig, PlayerInput, PlayerState, ThreatId};
use shadowline_core::enums::{CameraState, GamePhase};
use shadowline_core::events::GameEvent;
use shadowline_core::state::GameStateSnapshot;
use shadowline_core::types::SimTime;

use crate::bus::EventBus;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    rng: ChaCha8Rng,
    next_threat_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<GameEvent>,
    bus: EventBus,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            next_threat_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            bus: EventBus::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Register a listener on the event bus.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + Send + 'static) {
        self.bus.subscribe(listener);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems();
            self.time.advance();
        }

        let events = std::mem::take(&mut self.events);
        self.bus.dispatch(&events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, events)
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Replace the world with a custom scene and jump straight to Active
    /// (for tests that need precise entity placement).
    #[cfg(test)]
    pub fn start_with(&mut self, build: impl FnOnce(&mut World, &mut u32)) {
        self.world = World::new();
        self.next_threat_id = 0;
        build(&mut self.world, &mut self.next_threat_id);
        self.time = SimTime::default();
        self.phase = GamePhase::Active;
    }

    /// Get a mutable reference to the ECS world (for tests).
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::StartRun => {
                if matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
                    self.world = World::new();
                    self.next_threat_id = 0;
                    match world_setup::setup_level(&mut self.world, &mut self.next_threat_id) {
                        Ok(()) => {
                            self.phase = GamePhase::Active;
                            self.time = SimTime::default();
                            debug!("run started");
                        }
                        Err(err) => {
                            // A rejected default level is a wiring bug, not a
                            // runtime condition. Surface it, stay in the menu.
                            error!(%err, "level setup rejected");
                        }
                    }
                }
            }
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::ReturnToMenu => {
                if matches!(self.phase, GamePhase::Paused | GamePhase::GameOver) {
                    self.phase = GamePhase::Menu;
                }
            }
            PlayerCommand::MoveLeft => self.set_move_dir(-1),
            PlayerCommand::MoveRight => self.set_move_dir(1),
            PlayerCommand::Stop => self.set_move_dir(0),
            PlayerCommand::Jump => {
                for (_entity, input) in self.world.query_mut::<&mut PlayerInput>() {
                    input.jump_queued = true;
                }
            }
            PlayerCommand::Slide => {
                for (_entity, input) in self.world.query_mut::<&mut PlayerInput>() {
                    input.slide_queued = true;
                }
            }
            PlayerCommand::ToggleHide => {
                for (_entity, state) in self.world.query_mut::<&mut PlayerState>() {
                    state.is_hidden = !state.is_hidden;
                    debug!(hidden = state.is_hidden, "player toggled hiding");
                }
            }
            PlayerCommand::DisableCamera { camera_id } => {
                for (_entity, (id, rig)) in self.world.query_mut::<(&ThreatId, &mut CameraRig)>() {
                    if id.0 == camera_id {
                        rig.state = CameraState::Disabled;
                        rig.alerted = false;
                        debug!(camera_id, "camera disabled");
                    }
                }
            }
            PlayerCommand::EnableCamera { camera_id } => {
                for (_entity, (id, rig)) in self.world.query_mut::<(&ThreatId, &mut CameraRig)>() {
                    if id.0 == camera_id && rig.state == CameraState::Disabled {
                        // The scan phase was frozen in place, so the
                        // oscillation resumes from the current facing.
                        rig.state = CameraState::Scanning;
                        debug!(camera_id, "camera enabled");
                    }
                }
            }
            PlayerCommand::RemoveThreat { threat_id } => {
                self.despawn_buffer.clear();
                for (entity, id) in self.world.query_mut::<&ThreatId>() {
                    if id.0 == threat_id {
                        self.despawn_buffer.push(entity);
                    }
                }
                // Despawning drops the threat's components with it,
                // including any in-flight motion intent. Unknown ids are a
                // no-op, which makes removal idempotent.
                for entity in self.despawn_buffer.drain(..) {
                    let _ = self.world.despawn(entity);
                    debug!(threat_id, "threat removed");
                }
            }
        }
    }

    fn set_move_dir(&mut self, dir: i8) {
        for (_entity, input) in self.world.query_mut::<&mut PlayerInput>() {
            input.move_dir = dir;
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // Perception this tick is evaluated against the player's state as of
        // tick start, before any system has moved anything.
        let player = systems::capture_player(&self.world);

        // 1. Player input, timers, gravity
        systems::player::run(&mut self.world);

        if let Some(player) = player {
            // 2-4. Threats: behavior, perception, detection events
            systems::camera::run(&mut self.world, &player, &mut self.events);
            systems::drone::run(&mut self.world, &mut self.rng, &player, &mut self.events);
            systems::enemy::run(&mut self.world, &player, &mut self.events);
        }

        // 5. Motion: advance intents, integrate velocities, clamp to world
        systems::motion::run(&mut self.world);

        // 6. Contact damage and game over
        if systems::damage::run(&mut self.world, &mut self.events) {
            debug!("player out of lives");
            self.phase = GamePhase::GameOver;
        }
    }
}
