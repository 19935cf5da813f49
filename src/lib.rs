//! Fire & Water - a two-player cooperative platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, session state)
//! - `settings`: Player preferences and rule preset selection
//! - `ui`: HUD and end-of-run message text
//! - `audio`: Sound cues derived from simulation events

pub mod audio;
pub mod settings;
pub mod sim;
pub mod ui;

pub use settings::{Settings, Toggle};

/// Game configuration constants
///
/// Physics values are in pixels per frame at the fixed 60 Hz tick.
pub mod consts {
    /// Simulation ticks per second
    pub const FRAME_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FRAME_RATE as f32;
    /// Maximum substeps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Player hitbox
    pub const BODY_WIDTH: f32 = 30.0;
    pub const BODY_HEIGHT: f32 = 40.0;

    /// Horizontal run speed (instant model) and top speed (eased model)
    pub const RUN_SPEED: f32 = 3.5;
    /// Eased model: velocity gained per frame while a direction is held
    pub const RUN_ACCEL: f32 = 0.5;
    /// Eased model: multiplicative damping per frame with no direction held
    pub const RUN_DAMPING: f32 = 0.8;
    /// Eased model: below this speed horizontal velocity snaps to zero
    pub const RUN_STOP_THRESHOLD: f32 = 0.1;

    /// Upward velocity applied on jump
    pub const JUMP_VELOCITY: f32 = 11.0;
    /// Downward acceleration per frame
    pub const GRAVITY: f32 = 0.6;
    /// Terminal velocity for rule sets that clamp falling
    pub const MAX_FALL_SPEED: f32 = 10.0;

    /// Vertical travel per frame of an oscillating platform
    pub const PLATFORM_STEP: f32 = 1.5;

    /// Lives per body for the lives-based death policy
    pub const STARTING_LIVES: u8 = 3;
    /// Per-level time limit
    pub const TIMEOUT_SECS: u64 = 300;

    /// Collectible and goal sizes
    pub const ITEM_SIZE: f32 = 20.0;
    pub const GOAL_WIDTH: f32 = 50.0;
    pub const GOAL_HEIGHT: f32 = 60.0;

    /// Animation counter period (cosmetic)
    pub const ANIM_PERIOD: u32 = 60;
}

/// Convert a frame count to seconds at the fixed tick rate
#[inline]
pub fn frames_to_secs(frames: u64) -> f32 {
    frames as f32 / consts::FRAME_RATE as f32
}
