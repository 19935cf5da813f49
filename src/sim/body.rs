//! Player bodies: kinematics, jumping and death
//!
//! A body integrates one frame at a time: velocity from controls, jump,
//! gravity, then the tentative move is resolved against the level's solids.
//! Hazards and items are handled by the tick, which owns score and events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, Solid, resolve_axes, resolve_landing};
use super::input::{Bindings, Controls};
use super::rules::{CollisionModel, DeathPolicy, Rules, VelocityModel};
use super::world::Element;
use crate::consts::*;

/// What a single kinematic step did, for event emission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Motion {
    pub jumped: bool,
}

/// Result of touching a lethal hazard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Death {
    /// Lost a life and went back to spawn
    Respawned { lives_left: u8 },
    /// No lives left, the body stays dead
    Out,
}

/// A player-controlled character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub element: Element,
    pub rect: Rect,
    pub vel: Vec2,
    pub on_ground: bool,
    pub alive: bool,
    pub lives: u8,
    /// Collected at least one of its own items this level
    pub has_key: bool,
    pub spawn: Vec2,
    pub bindings: Bindings,
    /// Animation counter (cosmetic)
    #[serde(skip)]
    pub anim: u32,
}

impl Body {
    pub fn new(element: Element, spawn: Vec2, bindings: Bindings, lives: u8) -> Self {
        Self {
            element,
            rect: Rect {
                pos: spawn,
                size: Vec2::new(BODY_WIDTH, BODY_HEIGHT),
            },
            vel: Vec2::ZERO,
            on_ground: false,
            alive: true,
            lives,
            has_key: false,
            spawn,
            bindings,
            anim: 0,
        }
    }

    /// Body with the element's default key bindings
    pub fn for_element(element: Element, spawn: Vec2, lives: u8) -> Self {
        let bindings = match element {
            Element::Fire => Bindings::arrows(),
            Element::Water => Bindings::wasd(),
        };
        Self::new(element, spawn, bindings, lives)
    }

    /// Back to spawn, motionless and alive (lives and key kept)
    pub fn respawn(&mut self) {
        self.rect.pos = self.spawn;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.alive = true;
    }

    /// Fresh state for a level (re)start
    pub fn reset(&mut self, spawn: Vec2, lives: u8) {
        self.spawn = spawn;
        self.lives = lives;
        self.has_key = false;
        self.anim = 0;
        self.respawn();
    }

    /// Advance one frame
    pub fn step(&mut self, controls: Controls, solids: &[Solid], rules: &Rules) -> Motion {
        if !self.alive {
            return Motion::default();
        }

        let dir = controls.direction();
        self.vel.x = match rules.velocity {
            VelocityModel::Instant => dir * RUN_SPEED,
            VelocityModel::Eased => eased_velocity(self.vel.x, dir),
        };

        let mut motion = Motion::default();
        if controls.jump && self.on_ground {
            self.vel.y = -JUMP_VELOCITY;
            self.on_ground = false;
            motion.jumped = true;
        }

        self.vel.y += GRAVITY;
        if let Some(max) = rules.max_fall_speed {
            self.vel.y = self.vel.y.min(max);
        }

        let next = self.rect.pos + self.vel;
        let res = match rules.collision {
            CollisionModel::LandingOnly => resolve_landing(&self.rect, next, self.vel, solids),
            CollisionModel::AxisSeparated => resolve_axes(&self.rect, next, self.vel, solids),
        };
        self.rect.pos = res.pos;
        self.vel = res.vel;
        self.on_ground = res.grounded;

        self.anim = (self.anim + 1) % ANIM_PERIOD;
        motion
    }

    /// Apply a hazard hit under `policy`
    pub fn die(&mut self, policy: DeathPolicy) -> Death {
        match policy {
            DeathPolicy::Lives => {
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    self.alive = false;
                    Death::Out
                } else {
                    self.respawn();
                    Death::Respawned {
                        lives_left: self.lives,
                    }
                }
            }
            DeathPolicy::Instant => {
                self.lives = 0;
                self.alive = false;
                Death::Out
            }
        }
    }
}

/// Eased horizontal model: accelerate toward the held direction, otherwise damp
fn eased_velocity(vx: f32, dir: f32) -> f32 {
    if dir != 0.0 {
        (vx + dir * RUN_ACCEL).clamp(-RUN_SPEED, RUN_SPEED)
    } else {
        let damped = vx * RUN_DAMPING;
        if damped.abs() < RUN_STOP_THRESHOLD {
            0.0
        } else {
            damped
        }
    }
}
