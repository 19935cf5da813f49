//! End-to-end runs through the public simulation API

use fire_and_water::frames_to_secs;
use fire_and_water::sim::{
    Body, Controls, Element, GameEvent, GamePhase, Goal, Item, KeyState, Level, LevelSet,
    Oscillator, Platform, PlatformKind, Rect, Rules, RulesPreset, Session, Solid, TickInput,
    overlaps, tick,
};
use glam::Vec2;
use proptest::prelude::*;

/// Flat floor at y=360, fire spawns at x=50, water at x=120, goal on the right
fn arena(name: &str) -> Level {
    Level {
        name: name.into(),
        width: 1000.0,
        fire_spawn: Vec2::new(50.0, 320.0),
        water_spawn: Vec2::new(120.0, 320.0),
        platforms: vec![Platform::fixed(0.0, 360.0, 1000.0, 40.0)],
        hazards: Vec::new(),
        items: vec![
            Item::new(55.0, 330.0, Element::Fire),
            Item::new(125.0, 330.0, Element::Water),
        ],
        goal: Goal {
            rect: Rect::new(880.0, 300.0, 100.0, 60.0),
            unlocked: false,
        },
    }
}

fn idle() -> TickInput {
    TickInput::default()
}

fn enter_goal(session: &mut Session) {
    session.fire.rect.pos.x = 900.0;
    session.water.rect.pos.x = 930.0;
}

#[test]
fn landing_snaps_to_platform_top() {
    for preset in [RulesPreset::Classic, RulesPreset::Keyed] {
        let solids = [Solid::fixed(Rect::new(0.0, 320.0, 200.0, 20.0))];
        // Bottom edge one pixel above the platform
        let mut body = Body::for_element(Element::Fire, Vec2::new(10.0, 279.0), 3);
        body.vel = Vec2::new(0.0, 5.0);

        body.step(Controls::default(), &solids, &preset.rules());

        assert_eq!(body.rect.bottom(), 320.0, "{}", preset.as_str());
        assert_eq!(body.vel.y, 0.0);
        assert!(body.on_ground);
    }
}

#[test]
fn collecting_keys_then_goal_advances_level() {
    let levels = LevelSet::new(vec![arena("One"), arena("Two")]);
    let mut session = Session::new(levels, Rules::keyed(), 3);
    assert!(!session.level.goal.unlocked);

    tick(&mut session, &idle());
    assert_eq!(session.score, 2);
    assert!(session.fire.has_key && session.water.has_key);
    assert!(session.level.goal.unlocked);

    enter_goal(&mut session);
    tick(&mut session, &idle());

    assert_eq!(session.level_index, 1);
    assert_eq!(session.level.name, "Two");
    assert!(session.level.items.iter().all(|i| !i.collected));
    assert!(!session.level.goal.unlocked);
    assert!(!session.fire.has_key && !session.water.has_key);
    assert_eq!(session.fire.rect.pos, session.level.fire_spawn);
    // Keyed rules carry the score into the next level
    assert_eq!(session.score, 2);
    assert!(
        session
            .drain_events()
            .contains(&GameEvent::LevelCompleted { level: 0 })
    );
}

#[test]
fn last_level_reports_win() {
    let levels = LevelSet::new(vec![arena("Only")]);
    let mut session = Session::new(levels, Rules::classic(), 3);

    tick(&mut session, &idle());
    enter_goal(&mut session);
    tick(&mut session, &idle());

    assert_eq!(session.phase, GamePhase::Won);
    assert_eq!(session.level_index, 0);
    assert_eq!(
        session.drain_events().last(),
        Some(&GameEvent::Won {
            elapsed_secs: frames_to_secs(2),
            score: 2,
        })
    );

    for _ in 0..5 {
        tick(&mut session, &idle());
    }
    assert_eq!(session.level_index, 0);
    assert_eq!(session.total_frames, 2);
    assert!(session.drain_events().is_empty());
}

#[test]
fn timeout_fires_once_until_restart() {
    let rules = Rules {
        timeout_frames: 10,
        ..Rules::classic()
    };
    let mut session = Session::new(LevelSet::new(vec![arena("Slow")]), rules, 3);
    let run = TickInput {
        keys: KeyState::new().with("ArrowRight"),
        ..Default::default()
    };

    for _ in 0..10 {
        tick(&mut session, &run);
    }
    assert_eq!(session.phase, GamePhase::Running);

    tick(&mut session, &run);
    assert_eq!(session.phase, GamePhase::TimedOut);
    let timeouts = |events: Vec<GameEvent>| {
        events
            .into_iter()
            .filter(|e| *e == GameEvent::TimedOut)
            .count()
    };
    assert_eq!(timeouts(session.drain_events()), 1);

    let frozen = session.fire.clone();
    for _ in 0..30 {
        tick(&mut session, &run);
    }
    assert_eq!(session.fire.rect, frozen.rect);
    assert_eq!(session.level_frames, 11);
    assert_eq!(timeouts(session.drain_events()), 0);

    tick(
        &mut session,
        &TickInput {
            restart: true,
            ..Default::default()
        },
    );
    assert_eq!(session.phase, GamePhase::Running);
    assert_eq!(session.level_frames, 0);
    assert_eq!(session.score, 0);
}

#[test]
fn builtin_levels_load_in_order() {
    let mut session = Session::builtin(Rules::classic(), 9);
    let names: Vec<_> = (0..session.levels.len())
        .map(|i| {
            session.load_level(i);
            session.level.name.clone()
        })
        .collect();
    assert_eq!(names, ["First Steps", "Rising Tides", "Twin Furnace"]);

    session.new_game();
    assert_eq!(session.level_index, 0);
    assert_eq!(session.total_frames, 0);
}

fn any_rect() -> impl Strategy<Value = Rect> {
    (-500.0f32..500.0, -500.0f32..500.0, 1.0f32..200.0, 1.0f32..200.0)
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn any_keys() -> impl Strategy<Value = KeyState> {
    prop::collection::vec(
        prop::sample::select(vec!["ArrowLeft", "ArrowRight", "ArrowUp", "a", "d", "w"]),
        0..4,
    )
    .prop_map(|keys| keys.into_iter().fold(KeyState::new(), KeyState::with))
}

proptest! {
    #[test]
    fn overlap_is_symmetric(a in any_rect(), b in any_rect()) {
        prop_assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn edge_contact_never_overlaps(a in any_rect(), h in 1.0f32..100.0) {
        let below = Rect::new(a.pos.x, a.bottom(), a.size.x, h);
        prop_assert!(!overlaps(&a, &below));
    }

    #[test]
    fn oscillation_stays_near_band(amplitude in 0.0f32..200.0, steps in 0usize..600) {
        let mut osc = Oscillator { origin_y: 100.0, amplitude, direction: 1.0 };
        let mut y = 100.0;
        for _ in 0..steps {
            y = osc.step(y);
            prop_assert!((y - 100.0).abs() <= amplitude + 1.5 + 1e-3);
        }
    }

    #[test]
    fn resting_body_stays_put(
        preset in prop::sample::select(vec![RulesPreset::Classic, RulesPreset::Keyed]),
        frames in 1usize..200,
    ) {
        let solids = [Solid::fixed(Rect::new(0.0, 360.0, 2000.0, 40.0))];
        let mut body = Body::for_element(Element::Water, Vec2::new(300.0, 320.0), 3);
        body.on_ground = true;
        let rules = preset.rules();
        for _ in 0..frames {
            body.step(Controls::default(), &solids, &rules);
            prop_assert_eq!(body.rect.pos, Vec2::new(300.0, 320.0));
            prop_assert!(body.on_ground);
        }
    }

    #[test]
    fn body_rides_oscillating_platform(
        preset in prop::sample::select(vec![RulesPreset::Classic, RulesPreset::Keyed]),
        direction in prop::sample::select(vec![1.0f32, -1.0]),
        amplitude in 0u8..60,
        frames in 1usize..300,
    ) {
        let mut platform = Platform::oscillating(0.0, 300.0, 100.0, 20.0, amplitude as f32);
        if let PlatformKind::Oscillating(osc) = &mut platform.kind {
            osc.direction = direction;
        }
        let mut body = Body::for_element(Element::Fire, Vec2::new(20.0, 260.0), 3);
        body.on_ground = true;
        let rules = preset.rules();
        for _ in 0..frames {
            platform.advance();
            body.step(Controls::default(), &[platform.solid()], &rules);
            prop_assert_eq!(body.rect.bottom(), platform.rect.top());
            prop_assert!(body.on_ground);
        }
    }

    #[test]
    fn classic_score_counts_collected_items(inputs in prop::collection::vec(any_keys(), 1..400)) {
        let mut session = Session::builtin(Rules::classic(), 11);
        for keys in inputs {
            tick(&mut session, &TickInput { keys, ..Default::default() });
            prop_assert_eq!(session.score as usize, session.level.collected_count());
        }
    }
}
