//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` per frame, units are pixels per frame)
//! - Seeded RNG only, and only for cosmetics
//! - Stable iteration order (level definition order, fire before water)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod input;
pub mod level;
pub mod particles;
pub mod rules;
pub mod state;
pub mod tick;
pub mod world;

pub use body::{Body, Death, Motion};
pub use collision::{Rect, Resolution, Solid, overlaps, resolve_axes, resolve_landing};
pub use input::{Bindings, Controls, KeyState};
pub use level::{Level, LevelSet};
pub use particles::{Particle, ParticleField};
pub use rules::{CollisionModel, DeathPolicy, GoalGate, Rules, RulesPreset, VelocityModel};
pub use state::{GameEvent, GamePhase, Session};
pub use tick::{TickInput, tick};
pub use world::{Element, Goal, Hazard, HazardKind, Item, Oscillator, Platform, PlatformKind};
