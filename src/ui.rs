//! HUD and end-of-run text
//!
//! The simulation only exposes phase, score and timers; all wording lives here.

use crate::sim::{GamePhase, Session};

/// Banner text for the current phase, if any
pub fn status_message(session: &Session) -> Option<String> {
    match session.phase {
        GamePhase::Running => None,
        GamePhase::Paused => Some("Paused".to_string()),
        GamePhase::Won => Some(format!(
            "You won! Time: {:.1}s, items: {}",
            session.elapsed_secs(),
            session.score
        )),
        GamePhase::Lost(element) => Some(format!(
            "{} lost all its lives.",
            element.as_str().to_uppercase()
        )),
        GamePhase::TimedOut => Some("Time's up.".to_string()),
    }
}

/// Top-left overlay lines
pub fn hud_lines(session: &Session) -> Vec<String> {
    let remaining = session
        .rules
        .timeout_frames
        .saturating_sub(session.level_frames);
    vec![
        format!("Fire lives: {}", session.fire.lives),
        format!("Water lives: {}", session.water.lives),
        format!("Items: {}", session.score),
        format!(
            "Level: {}/{} - {}",
            session.level_index + 1,
            session.levels.len(),
            session.level.name
        ),
        format!("Time left: {:.0}s", crate::frames_to_secs(remaining)),
    ]
}
