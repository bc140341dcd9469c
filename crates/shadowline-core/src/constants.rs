//! Simulation constants and tuning parameters.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4};

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- World ---

/// Playfield width in pixels.
pub const WORLD_WIDTH: f64 = 800.0;

/// Playfield height in pixels.
pub const WORLD_HEIGHT: f64 = 600.0;

/// Vertical position of the ground plane the player walks on.
pub const GROUND_Y: f64 = 550.0;

/// Downward gravity acceleration (px/s²).
pub const GRAVITY_Y: f64 = 300.0;

// --- Player ---

/// Horizontal walk speed (px/s).
pub const PLAYER_WALK_SPEED: f64 = 160.0;

/// Jump impulse (px/s, negative = upward).
pub const PLAYER_JUMP_VELOCITY: f64 = -330.0;

/// Slide duration (500 ms).
pub const PLAYER_SLIDE_TICKS: u32 = TICK_RATE / 2;

/// Lives at the start of a run.
pub const PLAYER_START_LIVES: u32 = 3;

/// Invulnerability window after taking contact damage (1 s).
pub const DAMAGE_COOLDOWN_TICKS: u32 = TICK_RATE;

/// Distance at which a chasing threat touches the player (pixels).
pub const CONTACT_RADIUS: f64 = 24.0;

// --- Camera ---

/// Default scan rotation speed (radians per tick).
pub const CAMERA_ROTATION_SPEED: f64 = 0.02;

/// Default camera detection range (pixels).
pub const CAMERA_DETECTION_RANGE: f64 = 250.0;

/// Default camera field of view (45°).
pub const CAMERA_FIELD_OF_VIEW: f64 = FRAC_PI_4;

/// Default scan arc lower limit (radians).
pub const CAMERA_ROTATION_MIN: f64 = -FRAC_PI_2;

/// Default scan arc upper limit (radians).
pub const CAMERA_ROTATION_MAX: f64 = FRAC_PI_2;

// --- Drone ---

/// Default drone patrol speed (px/s).
pub const DRONE_SPEED: f64 = 150.0;

/// Default spotlight radius, the drone's omnidirectional detection radius.
pub const DRONE_SPOTLIGHT_RADIUS: f64 = 100.0;

/// Pause at each search waypoint before picking the next one (2 s).
pub const DRONE_NEXT_POINT_DELAY_TICKS: u32 = TICK_RATE * 2;

// --- Enemy ---

/// Enemy patrol speed (px/s).
pub const ENEMY_SPEED: f64 = 100.0;

/// Enemy detection range (pixels).
pub const ENEMY_DETECTION_RANGE: f64 = 200.0;

/// Enemy field of view (60°).
pub const ENEMY_FIELD_OF_VIEW: f64 = FRAC_PI_3;

// --- Pursuit ---

/// Speed multiplier applied while chasing the player.
pub const CHASE_SPEED_FACTOR: f64 = 1.5;
