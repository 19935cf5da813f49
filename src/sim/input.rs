//! Keyboard state and per-body bindings
//!
//! Key events write into a [`KeyState`]; the frame driver clones it into the
//! tick input so each tick reads one consistent snapshot.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Set of currently held keys, by key name (`"ArrowLeft"`, `"a"`, ...)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyState {
    held: HashSet<String>,
}

/// Single-character keys compare case-insensitively (shift + W is still W)
fn normalize(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        self.held.insert(normalize(key));
    }

    pub fn release(&mut self, key: &str) {
        self.held.remove(&normalize(key));
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.held.contains(&normalize(key))
    }

    /// Drop every held key (focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
    }

    /// Builder helper for scripted input
    pub fn with(mut self, key: &str) -> Self {
        self.press(key);
        self
    }
}

/// Logical controls of one body for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

impl Controls {
    /// Horizontal intent: -1, 0 or +1 (left wins if both are held)
    pub fn direction(&self) -> f32 {
        if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        }
    }
}

/// Which keys drive a body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bindings {
    pub left: String,
    pub right: String,
    pub jump: String,
}

impl Bindings {
    /// Fire's default keys
    pub fn arrows() -> Self {
        Self {
            left: "ArrowLeft".into(),
            right: "ArrowRight".into(),
            jump: "ArrowUp".into(),
        }
    }

    /// Water's default keys
    pub fn wasd() -> Self {
        Self {
            left: "a".into(),
            right: "d".into(),
            jump: "w".into(),
        }
    }

    pub fn read(&self, keys: &KeyState) -> Controls {
        Controls {
            left: keys.is_down(&self.left),
            right: keys.is_down(&self.right),
            jump: keys.is_down(&self.jump),
        }
    }

    /// True if `key` belongs to this binding set
    pub fn binds(&self, key: &str) -> bool {
        let key = normalize(key);
        [&self.left, &self.right, &self.jump]
            .iter()
            .any(|k| normalize(k) == key)
    }
}
