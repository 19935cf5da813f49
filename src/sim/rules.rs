//! Rule presets
//!
//! The game ships two internally consistent rule sets. Individual knobs are
//! public so tests and level packs can pin them, but the presets are what the
//! settings menu exposes.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Horizontal velocity model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityModel {
    /// Velocity jumps straight to ±speed, zero when released
    Instant,
    /// Accelerates toward ±speed, damped toward zero when released
    Eased,
}

/// Platform collision model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionModel {
    /// Only landing on top of platforms is resolved
    LandingOnly,
    /// Walls, ceilings and floors resolved per axis
    AxisSeparated,
}

/// What happens when a body touches its lethal hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathPolicy {
    /// Lose a life and respawn; the run ends when a body runs out
    Lives,
    /// The body dies outright; the run ends on the next tick
    Instant,
}

/// Goal unlock condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalGate {
    /// Goal is always usable
    Open,
    /// Both bodies must hold a key (one of their own items)
    Keys,
}

/// Named rule sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RulesPreset {
    #[default]
    Classic,
    Keyed,
}

impl RulesPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            RulesPreset::Classic => "Classic",
            RulesPreset::Keyed => "Keyed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" | "lives" => Some(RulesPreset::Classic),
            "keyed" | "keys" => Some(RulesPreset::Keyed),
            _ => None,
        }
    }

    pub fn rules(&self) -> Rules {
        match self {
            RulesPreset::Classic => Rules::classic(),
            RulesPreset::Keyed => Rules::keyed(),
        }
    }
}

/// Complete gameplay rule set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub velocity: VelocityModel,
    pub collision: CollisionModel,
    pub death: DeathPolicy,
    pub goal: GoalGate,
    /// Lives per body under [`DeathPolicy::Lives`]
    pub lives: u8,
    /// Clamp on downward velocity, if any
    pub max_fall_speed: Option<f32>,
    /// Carry score into the next level instead of resetting it
    pub keep_score: bool,
    /// Per-level frame limit
    pub timeout_frames: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self::classic()
    }
}

impl Rules {
    /// Lives, instant velocity, landing-only platforms, goal always open
    pub fn classic() -> Self {
        Self {
            velocity: VelocityModel::Instant,
            collision: CollisionModel::LandingOnly,
            death: DeathPolicy::Lives,
            goal: GoalGate::Open,
            lives: STARTING_LIVES,
            max_fall_speed: None,
            keep_score: false,
            timeout_frames: TIMEOUT_SECS * FRAME_RATE as u64,
        }
    }

    /// One-hit deaths, eased running, solid platforms, key-gated goal
    pub fn keyed() -> Self {
        Self {
            velocity: VelocityModel::Eased,
            collision: CollisionModel::AxisSeparated,
            death: DeathPolicy::Instant,
            goal: GoalGate::Keys,
            lives: 1,
            max_fall_speed: Some(MAX_FALL_SPEED),
            keep_score: true,
            timeout_frames: TIMEOUT_SECS * FRAME_RATE as u64,
        }
    }
}
