//! Session state
//!
//! Everything the frame driver needs lives in one [`Session`]: the level
//! sequence, the live level instance, both bodies, score, timers and phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::level::{Level, LevelSet};
use super::particles::ParticleField;
use super::rules::{GoalGate, Rules};
use super::world::Element;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Simulation advances every tick
    Running,
    /// Frozen until toggled back
    Paused,
    /// Last level completed
    Won,
    /// A body is out of lives
    Lost(Element),
    /// Level time limit exceeded
    TimedOut,
}

impl GamePhase {
    /// Won, lost or timed out; only restart leaves these
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost(_) | GamePhase::TimedOut)
    }
}

/// Notifications for audio, particles and the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped { element: Element, pos: Vec2 },
    ItemCollected { element: Element, score: u32 },
    Died { element: Element, lives_left: u8 },
    /// Finished `level` (index) and moved on to the next one
    LevelCompleted { level: usize },
    Won { elapsed_secs: f32, score: u32 },
    Lost { element: Element },
    TimedOut,
}

/// Complete game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub rules: Rules,
    pub levels: LevelSet,
    /// Index into `levels` of the level being played
    pub level_index: usize,
    /// Live copy of the current level
    pub level: Level,
    pub fire: Body,
    pub water: Body,
    pub score: u32,
    /// Frames simulated in the current level (drives the timeout)
    pub level_frames: u64,
    /// Frames simulated since the run started
    pub total_frames: u64,
    pub phase: GamePhase,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: ParticleField,
}

impl Session {
    /// Start a run at the first level of `levels`
    ///
    /// `levels` must contain at least one level.
    pub fn new(levels: LevelSet, rules: Rules, seed: u64) -> Self {
        let level = levels.levels[0].clone();
        let fire = Body::for_element(Element::Fire, level.fire_spawn, rules.lives);
        let water = Body::for_element(Element::Water, level.water_spawn, rules.lives);

        let mut session = Self {
            rules,
            levels,
            level_index: 0,
            level,
            fire,
            water,
            score: 0,
            level_frames: 0,
            total_frames: 0,
            phase: GamePhase::Running,
            events: Vec::new(),
            particles: ParticleField::new(seed),
        };
        session.load_level(0);
        session
    }

    /// Built-in levels under the given rules
    pub fn builtin(rules: Rules, seed: u64) -> Self {
        Self::new(LevelSet::builtin(), rules, seed)
    }

    pub fn body(&self, element: Element) -> &Body {
        match element {
            Element::Fire => &self.fire,
            Element::Water => &self.water,
        }
    }

    /// Seconds since the run started
    pub fn elapsed_secs(&self) -> f32 {
        crate::frames_to_secs(self.total_frames)
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// (Re)initialize level `index`: fresh level copy, bodies at spawn with
    /// full lives, per-level timer cleared. Score follows `rules.keep_score`.
    pub fn load_level(&mut self, index: usize) {
        self.level_index = index;
        self.level = self.levels.levels[index].clone();
        let lives = self.rules.lives;
        self.fire.reset(self.level.fire_spawn, lives);
        self.water.reset(self.level.water_spawn, lives);
        self.level_frames = 0;
        if !self.rules.keep_score {
            self.score = 0;
        }
        self.particles.clear();
        self.refresh_goal();
        self.phase = GamePhase::Running;
    }

    /// Restart the current level from scratch (score and run timer too)
    pub fn restart(&mut self) {
        self.score = 0;
        self.total_frames = 0;
        self.events.clear();
        self.load_level(self.level_index);
        log::info!(
            "Restarted level {} ({})",
            self.level_index + 1,
            self.level.name
        );
    }

    /// Restart from the first level
    pub fn new_game(&mut self) {
        self.level_index = 0;
        self.restart();
    }

    /// Flip between running and paused; terminal phases are unaffected
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Running => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Running,
            other => other,
        };
    }

    /// Recompute the goal lock from the current gate
    pub fn refresh_goal(&mut self) {
        self.level.goal.unlocked = match self.rules.goal {
            GoalGate::Open => true,
            GoalGate::Keys => self.fire.has_key && self.water.has_key,
        };
    }

    /// Both bodies alive and inside an unlocked goal on this frame
    pub fn goal_reached(&self) -> bool {
        let goal = &self.level.goal;
        goal.unlocked
            && [&self.fire, &self.water]
                .iter()
                .all(|b| b.alive && b.rect.overlaps(&goal.rect))
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= self.levels.len()
    }
}
