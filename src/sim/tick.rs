//! Fixed timestep simulation tick
//!
//! Advances a session by exactly one frame: platforms, then each body
//! (movement, hazards, items), then goal and timeout checks.

use glam::Vec2;

use super::body::Death;
use super::input::KeyState;
use super::rules::DeathPolicy;
use super::state::{GameEvent, GamePhase, Session};
use super::world::Element;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Snapshot of held keys
    pub keys: KeyState,
    /// Pause toggle
    pub pause: bool,
    /// Restart the current level
    pub restart: bool,
    /// Start over from the first level
    pub new_game: bool,
}

/// Whether the rest of the frame should run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Halt,
}

/// Advance the session by one frame
pub fn tick(session: &mut Session, input: &TickInput) {
    if input.new_game {
        session.new_game();
        return;
    }

    if input.restart {
        session.restart();
        return;
    }

    if input.pause {
        session.toggle_pause();
    }

    // Paused or finished: nothing moves
    if session.phase != GamePhase::Running {
        return;
    }

    // Instant deaths end the run on the following tick
    if let Some(element) = Element::ALL
        .into_iter()
        .find(|&e| !session.body(e).alive)
    {
        lose(session, element);
        return;
    }

    session.level_frames += 1;
    session.total_frames += 1;

    session.level.advance_platforms();
    session.particles.update();

    if step_bodies(session, &input.keys) == Flow::Halt {
        return;
    }

    session.refresh_goal();
    if session.goal_reached() {
        complete_level(session);
        return;
    }

    if session.level_frames > session.rules.timeout_frames {
        session.phase = GamePhase::TimedOut;
        session.events.push(GameEvent::TimedOut);
        log::info!(
            "Level {} timed out after {:.1}s",
            session.level_index + 1,
            crate::frames_to_secs(session.level_frames)
        );
    }
}

/// Move both bodies, then resolve their hazards and items
fn step_bodies(session: &mut Session, keys: &KeyState) -> Flow {
    let Session {
        rules,
        level,
        fire,
        water,
        score,
        events,
        particles,
        phase,
        ..
    } = session;

    let solids = level.solids();

    for body in [fire, water] {
        if !body.alive {
            continue;
        }
        let element = body.element;

        let controls = body.bindings.read(keys);
        let motion = body.step(controls, &solids, rules);
        if motion.jumped {
            events.push(GameEvent::Jumped {
                element,
                pos: body.rect.center(),
            });
            particles.burst(
                Vec2::new(body.rect.center().x, body.rect.bottom()),
                element,
            );
        }

        let lethal = level
            .hazards
            .iter()
            .any(|h| h.is_lethal_to(element) && h.rect.overlaps(&body.rect));
        if lethal {
            match body.die(rules.death) {
                Death::Respawned { lives_left } => {
                    log::debug!("{} died, {} lives left", element.as_str(), lives_left);
                    events.push(GameEvent::Died {
                        element,
                        lives_left,
                    });
                }
                Death::Out => {
                    events.push(GameEvent::Died {
                        element,
                        lives_left: 0,
                    });
                    if rules.death == DeathPolicy::Lives {
                        *phase = GamePhase::Lost(element);
                        events.push(GameEvent::Lost { element });
                        log::info!("{} lost all its lives", element.as_str());
                    } else {
                        log::debug!("{} died", element.as_str());
                    }
                }
            }
            return Flow::Halt;
        }

        let rect = body.rect;
        for item in level
            .items
            .iter_mut()
            .filter(|i| i.collectable_by(element, &rect))
        {
            item.collected = true;
            *score += 1;
            body.has_key = true;
            events.push(GameEvent::ItemCollected {
                element,
                score: *score,
            });
            log::debug!("{} collected an item (score {})", element.as_str(), score);
        }
    }

    Flow::Continue
}

fn lose(session: &mut Session, element: Element) {
    session.phase = GamePhase::Lost(element);
    session.events.push(GameEvent::Lost { element });
    log::info!("{} died, run over", element.as_str());
}

/// Both bodies are in the goal: next level or victory
fn complete_level(session: &mut Session) {
    let finished = session.level_index;
    if session.is_last_level() {
        session.phase = GamePhase::Won;
        let elapsed_secs = session.elapsed_secs();
        session.events.push(GameEvent::Won {
            elapsed_secs,
            score: session.score,
        });
        log::info!(
            "All {} levels cleared in {:.1}s with score {}",
            session.levels.len(),
            elapsed_secs,
            session.score
        );
    } else {
        session.load_level(finished + 1);
        session.events.push(GameEvent::LevelCompleted { level: finished });
        log::info!(
            "Level {} complete, entering {}",
            finished + 1,
            session.level.name
        );
    }
}
