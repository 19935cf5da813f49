//! Level templates and the built-in level sequence
//!
//! A [`Level`] is an immutable template; the session clones it into a live
//! instance whenever a level starts, which also resets collected items,
//! platform phases and the goal lock.

use glam::Vec2;
use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use super::collision::Solid;
use super::world::{Element, Goal, Hazard, HazardKind, Item, Platform};

/// Default level width in pixels (camera clamp)
pub const DEFAULT_LEVEL_WIDTH: f32 = 2000.0;

fn default_width() -> f32 {
    DEFAULT_LEVEL_WIDTH
}

/// One level: geometry, hazards, collectibles and exit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    #[serde(default = "default_width")]
    pub width: f32,
    pub fire_spawn: Vec2,
    pub water_spawn: Vec2,
    pub platforms: Vec<Platform>,
    #[serde(default)]
    pub hazards: Vec<Hazard>,
    #[serde(default)]
    pub items: Vec<Item>,
    pub goal: Goal,
}

impl Level {
    pub fn spawn(&self, element: Element) -> Vec2 {
        match element {
            Element::Fire => self.fire_spawn,
            Element::Water => self.water_spawn,
        }
    }

    /// Move oscillating platforms one frame
    pub fn advance_platforms(&mut self) {
        for platform in &mut self.platforms {
            platform.advance();
        }
    }

    /// Collision view of every platform, in definition order
    pub fn solids(&self) -> Vec<Solid> {
        self.platforms.iter().map(Platform::solid).collect()
    }

    pub fn items_for(&self, element: Element) -> impl Iterator<Item = &Item> {
        self.items.iter().filter(move |i| i.owner == element)
    }

    pub fn collected_count(&self) -> usize {
        self.items.iter().filter(|i| i.collected).count()
    }
}

/// Ordered sequence of levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelSet {
    pub levels: Vec<Level>,
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LevelSet {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// Parse a level pack; a pack must hold at least one level
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let set: Self = serde_json::from_str(json)?;
        if set.is_empty() {
            return Err(serde_json::Error::custom("level pack has no levels"));
        }
        Ok(set)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The shipped levels
    pub fn builtin() -> Self {
        Self::new(vec![first_steps(), rising_tides(), twin_furnace()])
    }
}

fn first_steps() -> Level {
    use Element::{Fire, Water};
    Level {
        name: "First Steps".into(),
        width: DEFAULT_LEVEL_WIDTH,
        fire_spawn: Vec2::new(50.0, 320.0),
        water_spawn: Vec2::new(120.0, 320.0),
        platforms: vec![
            Platform::fixed(0.0, 360.0, 2000.0, 40.0),
            Platform::fixed(200.0, 310.0, 120.0, 20.0),
            Platform::fixed(400.0, 270.0, 150.0, 20.0),
            Platform::fixed(650.0, 240.0, 120.0, 20.0),
            Platform::fixed(900.0, 200.0, 150.0, 20.0),
            Platform::fixed(1150.0, 160.0, 130.0, 20.0),
            Platform::fixed(1400.0, 200.0, 120.0, 20.0),
            Platform::fixed(1580.0, 190.0, 120.0, 20.0),
            Platform::fixed(1760.0, 180.0, 160.0, 20.0),
        ],
        hazards: vec![
            Hazard::new(350.0, 340.0, 50.0, 20.0, HazardKind::Lava),
            Hazard::new(800.0, 340.0, 100.0, 20.0, HazardKind::Water),
            Hazard::new(1200.0, 340.0, 60.0, 20.0, HazardKind::Lava),
        ],
        items: vec![
            Item::new(230.0, 270.0, Fire),
            Item::new(450.0, 230.0, Water),
            Item::new(680.0, 200.0, Fire),
            Item::new(930.0, 160.0, Water),
            Item::new(1170.0, 120.0, Fire),
            Item::new(1450.0, 170.0, Water),
        ],
        goal: Goal::new(1800.0, 120.0),
    }
}

fn rising_tides() -> Level {
    use Element::{Fire, Water};
    Level {
        name: "Rising Tides".into(),
        width: DEFAULT_LEVEL_WIDTH,
        fire_spawn: Vec2::new(50.0, 320.0),
        water_spawn: Vec2::new(120.0, 320.0),
        platforms: vec![
            Platform::fixed(0.0, 360.0, 2000.0, 40.0),
            Platform::fixed(220.0, 300.0, 140.0, 20.0),
            Platform::oscillating(430.0, 260.0, 120.0, 20.0, 40.0),
            Platform::fixed(620.0, 220.0, 140.0, 20.0),
            Platform::oscillating(830.0, 240.0, 120.0, 20.0, 50.0),
            Platform::fixed(1030.0, 200.0, 160.0, 20.0),
            Platform::oscillating(1260.0, 220.0, 110.0, 20.0, 60.0),
            Platform::fixed(1450.0, 190.0, 150.0, 20.0),
            Platform::fixed(1680.0, 200.0, 200.0, 20.0),
        ],
        hazards: vec![
            Hazard::new(380.0, 340.0, 220.0, 20.0, HazardKind::Water),
            Hazard::new(780.0, 340.0, 220.0, 20.0, HazardKind::Lava),
            Hazard::new(1200.0, 340.0, 240.0, 20.0, HazardKind::Water),
            Hazard::new(1500.0, 340.0, 120.0, 20.0, HazardKind::Lava),
        ],
        items: vec![
            Item::new(270.0, 260.0, Water),
            Item::new(460.0, 200.0, Fire),
            Item::new(680.0, 180.0, Water),
            Item::new(870.0, 170.0, Fire),
            Item::new(1100.0, 160.0, Water),
            Item::new(1300.0, 140.0, Fire),
        ],
        goal: Goal::new(1760.0, 140.0),
    }
}

fn twin_furnace() -> Level {
    use Element::{Fire, Water};
    Level {
        name: "Twin Furnace".into(),
        width: DEFAULT_LEVEL_WIDTH,
        fire_spawn: Vec2::new(40.0, 320.0),
        water_spawn: Vec2::new(100.0, 320.0),
        platforms: vec![
            Platform::fixed(0.0, 360.0, 2000.0, 40.0),
            Platform::fixed(180.0, 300.0, 100.0, 20.0),
            Platform::fixed(340.0, 250.0, 100.0, 20.0),
            Platform::oscillating(500.0, 230.0, 100.0, 20.0, 45.0),
            Platform::fixed(680.0, 190.0, 120.0, 20.0),
            Platform::fixed(870.0, 150.0, 100.0, 20.0),
            Platform::oscillating(1040.0, 180.0, 100.0, 20.0, 60.0),
            Platform::fixed(1220.0, 140.0, 120.0, 20.0),
            Platform::oscillating(1400.0, 170.0, 100.0, 20.0, 50.0),
            Platform::fixed(1580.0, 130.0, 140.0, 20.0),
            Platform::fixed(1790.0, 160.0, 180.0, 20.0),
        ],
        hazards: vec![
            Hazard::new(300.0, 340.0, 160.0, 20.0, HazardKind::Lava),
            Hazard::new(460.0, 340.0, 160.0, 20.0, HazardKind::Water),
            Hazard::new(820.0, 340.0, 300.0, 20.0, HazardKind::Lava),
            Hazard::new(1120.0, 340.0, 300.0, 20.0, HazardKind::Water),
            Hazard::new(1500.0, 340.0, 260.0, 20.0, HazardKind::Lava),
            Hazard::new(1240.0, 120.0, 40.0, 20.0, HazardKind::Water),
        ],
        items: vec![
            Item::new(210.0, 260.0, Fire),
            Item::new(370.0, 210.0, Water),
            Item::new(720.0, 150.0, Fire),
            Item::new(900.0, 110.0, Water),
            Item::new(1300.0, 100.0, Water),
            Item::new(1620.0, 90.0, Fire),
        ],
        goal: Goal::new(1850.0, 100.0),
    }
}
