//! Level entities: platforms, hazards, collectibles and the goal
//!
//! Each entity embeds a [`Rect`]; only oscillating platforms change after a
//! level is loaded (besides the `collected`/`unlocked` flags).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, Solid};
use crate::consts::*;

/// The two playable elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    Fire,
    Water,
}

impl Element {
    /// Update order within a frame
    pub const ALL: [Element; 2] = [Element::Fire, Element::Water];

    pub fn as_str(&self) -> &'static str {
        match self {
            Element::Fire => "Fire",
            Element::Water => "Water",
        }
    }
}

/// Vertical back-and-forth motion around an origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Oscillator {
    pub origin_y: f32,
    pub amplitude: f32,
    /// +1 moving down, -1 moving up
    #[serde(default = "Oscillator::default_direction")]
    pub direction: f32,
}

impl Oscillator {
    fn default_direction() -> f32 {
        1.0
    }

    /// Advance `y` by one frame; flips direction once past either bound
    pub fn step(&mut self, y: f32) -> f32 {
        let y = y + self.direction * PLATFORM_STEP;
        if y > self.origin_y + self.amplitude || y < self.origin_y - self.amplitude {
            self.direction = -self.direction;
        }
        y
    }
}

/// Platform motion
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    #[default]
    Static,
    Oscillating(Oscillator),
}

/// A solid surface bodies can stand on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
    #[serde(default)]
    pub kind: PlatformKind,
    /// Vertical displacement applied during the current frame
    #[serde(skip)]
    pub last_dy: f32,
}

impl Platform {
    pub fn fixed(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind: PlatformKind::Static,
            last_dy: 0.0,
        }
    }

    /// Platform that bobs `amplitude` pixels above and below `y`, starting downward
    pub fn oscillating(x: f32, y: f32, w: f32, h: f32, amplitude: f32) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind: PlatformKind::Oscillating(Oscillator {
                origin_y: y,
                amplitude,
                direction: 1.0,
            }),
            last_dy: 0.0,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.kind, PlatformKind::Oscillating(_))
    }

    /// Per-frame update (no-op for static platforms)
    pub fn advance(&mut self) {
        match &mut self.kind {
            PlatformKind::Static => self.last_dy = 0.0,
            PlatformKind::Oscillating(osc) => {
                let y = osc.step(self.rect.pos.y);
                self.last_dy = y - self.rect.pos.y;
                self.rect.pos.y = y;
            }
        }
    }

    /// Collision view: current rect plus where it stood at frame start
    pub fn solid(&self) -> Solid {
        Solid {
            now: self.rect,
            before: self.rect.at(self.rect.pos - Vec2::new(0.0, self.last_dy)),
        }
    }
}

/// Hazard material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Kills water
    Lava,
    /// Kills fire
    Water,
}

/// A static lethal zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub rect: Rect,
    pub kind: HazardKind,
}

impl Hazard {
    pub fn new(x: f32, y: f32, w: f32, h: f32, kind: HazardKind) -> Self {
        Self {
            rect: Rect::new(x, y, w, h),
            kind,
        }
    }

    pub fn is_lethal_to(&self, element: Element) -> bool {
        matches!(
            (self.kind, element),
            (HazardKind::Lava, Element::Water) | (HazardKind::Water, Element::Fire)
        )
    }
}

/// A collectible owned by one element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub rect: Rect,
    pub owner: Element,
    #[serde(default)]
    pub collected: bool,
}

impl Item {
    /// Item with its top-left corner at (x, y)
    pub fn new(x: f32, y: f32, owner: Element) -> Self {
        Self {
            rect: Rect::new(x, y, ITEM_SIZE, ITEM_SIZE),
            owner,
            collected: false,
        }
    }

    /// Whether `element` touching `rect` picks this item up right now
    pub fn collectable_by(&self, element: Element, rect: &Rect) -> bool {
        !self.collected && self.owner == element && self.rect.overlaps(rect)
    }
}

/// Level exit both bodies must reach together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub rect: Rect,
    #[serde(default)]
    pub unlocked: bool,
}

impl Goal {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            rect: Rect::new(x, y, GOAL_WIDTH, GOAL_HEIGHT),
            unlocked: false,
        }
    }
}
