//! Fire & Water entry point
//!
//! Web builds run the game on a 2D canvas; native builds run a scripted
//! headless demo and log what happens.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use fire_and_water::{Settings, Toggle};
    use fire_and_water::audio::AudioManager;
    use fire_and_water::consts::*;
    use fire_and_water::sim::{
        Body, Element, GamePhase, HazardKind, KeyState, Rect, Session, TickInput, tick,
    };
    use fire_and_water::ui;

    /// Camera easing per frame
    const CAMERA_LERP: f32 = 0.1;

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        audio: AudioManager,
        ctx: CanvasRenderingContext2d,
        view: (f32, f32),
        keys: KeyState,
        // One-shot commands, cleared after the next tick
        pause: bool,
        restart: bool,
        new_game: bool,
        accumulator: f32,
        last_time: f64,
        camera_x: f32,
        last_message: Option<String>,
    }

    impl Game {
        fn new(ctx: CanvasRenderingContext2d, view: (f32, f32), seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_volume());
            Self {
                session: Session::builtin(settings.game_rules(), seed),
                settings,
                audio,
                ctx,
                view,
                keys: KeyState::new(),
                pause: false,
                restart: false,
                new_game: false,
                accumulator: 0.0,
                last_time: 0.0,
                camera_x: 0.0,
                last_message: None,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = TickInput {
                    keys: self.keys.clone(),
                    pause: self.pause,
                    restart: self.restart,
                    new_game: self.new_game,
                };
                tick(&mut self.session, &input);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.pause = false;
                self.restart = false;
                self.new_game = false;

                for event in self.session.drain_events() {
                    self.audio.play_event(&event);
                }
            }

            self.update_camera();
        }

        /// Follow the midpoint of both bodies, clamped to the level
        fn update_camera(&mut self) {
            let mid = (self.session.fire.rect.pos.x + self.session.water.rect.pos.x) / 2.0;
            let max_x = (self.session.level.width - self.view.0).max(0.0);
            let target = (mid - self.view.0 / 2.0).clamp(0.0, max_x);
            if self.settings.effective_smooth_camera() {
                self.camera_x += (target - self.camera_x) * CAMERA_LERP;
            } else {
                self.camera_x = target;
            }
        }

        /// Flip a setting, apply it and persist it
        fn apply_toggle(&mut self, toggle: Toggle) {
            self.settings.toggle(toggle);
            self.audio.set_volume(self.settings.effective_volume());
            if toggle == Toggle::Rules {
                let seed = js_sys::Date::now() as u64;
                self.session = Session::builtin(self.settings.game_rules(), seed);
                log::info!("Switched to {} rules", self.settings.rules.as_str());
            }
            self.settings.save();
            log::info!("Setting changed: {:?}", toggle);
        }

        /// Render the current frame
        fn render(&self) {
            let ctx = &self.ctx;
            let (w, h) = (self.view.0 as f64, self.view.1 as f64);
            let level = &self.session.level;

            ctx.clear_rect(0.0, 0.0, w, h);
            ctx.set_fill_style_str("#121212");
            ctx.fill_rect(0.0, 0.0, w, h);

            ctx.save();
            let _ = ctx.translate(-self.camera_x as f64, 0.0);

            for platform in &level.platforms {
                let color = if platform.is_moving() {
                    "#5555ff"
                } else {
                    "#555555"
                };
                fill_outlined(ctx, &platform.rect, color);
            }

            for hazard in &level.hazards {
                let color = match hazard.kind {
                    HazardKind::Lava => "#e63946",
                    HazardKind::Water => "#457b9d",
                };
                fill_outlined(ctx, &hazard.rect, color);
            }

            let goal_color = if level.goal.unlocked {
                "#2a9d8f"
            } else {
                "#264d48"
            };
            fill_outlined(ctx, &level.goal.rect, goal_color);

            for item in level.items.iter().filter(|i| !i.collected) {
                let c = item.rect.center();
                ctx.set_fill_style_str(match item.owner {
                    Element::Fire => "#f4a261",
                    Element::Water => "#90e0ef",
                });
                ctx.begin_path();
                let _ = ctx.arc(c.x as f64, c.y as f64, item.rect.size.x as f64 / 2.0, 0.0, TAU);
                ctx.fill();
            }

            for body in [&self.session.fire, &self.session.water] {
                if body.alive {
                    draw_body(ctx, body);
                }
            }

            if self.settings.effective_particles() {
                for p in &self.session.particles.particles {
                    ctx.set_fill_style_str(match p.element {
                        Element::Fire => "#ff6600",
                        Element::Water => "#00ccff",
                    });
                    ctx.set_global_alpha(p.fade() as f64);
                    ctx.begin_path();
                    let _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, 3.0, 0.0, TAU);
                    ctx.fill();
                }
                ctx.set_global_alpha(1.0);
            }

            ctx.restore();

            if self.settings.show_hud {
                ctx.set_fill_style_str("#ffffff");
                ctx.set_font("18px Arial");
                for (i, line) in ui::hud_lines(&self.session).iter().enumerate() {
                    let _ = ctx.fill_text(line, 10.0, 20.0 + i as f64 * 20.0);
                }
            }
        }

        /// Update the end-of-run banner in the DOM when it changes
        fn update_message(&mut self) {
            let message = ui::status_message(&self.session);
            if message == self.last_message {
                return;
            }
            if let Some(el) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("message"))
            {
                el.set_text_content(Some(message.as_deref().unwrap_or("")));
            }
            self.last_message = message;
        }
    }

    fn fill_outlined(ctx: &CanvasRenderingContext2d, rect: &Rect, color: &str) {
        let (x, y) = (rect.pos.x as f64, rect.pos.y as f64);
        let (w, h) = (rect.size.x as f64, rect.size.y as f64);
        ctx.set_fill_style_str(color);
        ctx.fill_rect(x, y, w, h);
        ctx.set_stroke_style_str("#222");
        ctx.stroke_rect(x, y, w, h);
    }

    /// Fire is a flickering triangle, water a shimmering drop
    fn draw_body(ctx: &CanvasRenderingContext2d, body: &Body) {
        let c = body.rect.center();
        let bright = body.anim % 20 < 10;
        let color = match (body.element, bright) {
            (Element::Fire, true) => "#ff5722",
            (Element::Fire, false) => "#ffab91",
            (Element::Water, true) => "#2196f3",
            (Element::Water, false) => "#90caf9",
        };

        ctx.save();
        let _ = ctx.translate(c.x as f64, c.y as f64);
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        match body.element {
            Element::Fire => {
                ctx.move_to(0.0, -20.0);
                ctx.line_to(15.0, 20.0);
                ctx.line_to(-15.0, 20.0);
            }
            Element::Water => {
                let _ = ctx.ellipse(0.0, 0.0, 12.0, 20.0, 0.0, 0.0, TAU);
            }
        }
        ctx.close_path();
        ctx.fill();
        ctx.restore();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Fire & Water starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");
        let view = (canvas.width() as f32, canvas.height() as f32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(ctx, view, seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);
        log::info!("Fire & Water running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                match key.as_str() {
                    "Escape" | "p" | "P" => {
                        if !event.repeat() {
                            g.pause = true;
                        }
                    }
                    "r" | "R" => g.restart = true,
                    "n" | "N" => g.new_game = true,
                    _ => {
                        if let Some(toggle) = Toggle::for_key(&key) {
                            if !event.repeat() {
                                g.apply_toggle(toggle);
                            }
                            return;
                        }

                        let bound = g.session.fire.bindings.binds(&key)
                            || g.session.water.bindings.binds(&key);
                        if bound {
                            // Keep arrow keys from scrolling the page
                            event.prevent_default();
                        }
                        g.keys.press(&key);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.release(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("pause-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().pause = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Window blur (click outside, tab switch)
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            // Key-up events are lost while unfocused
            g.keys.clear();
            if g.settings.pause_on_blur && g.session.phase == GamePhase::Running {
                g.pause = true;
                log::info!("Auto-paused (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_message();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use fire_and_water::sim::{LevelSet, RulesPreset};

    env_logger::init();

    // Print the built-in levels as a starting point for custom packs
    if std::env::args().nth(1).as_deref() == Some("export-levels") {
        match LevelSet::builtin().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize levels: {}", e),
        }
        return;
    }

    let preset = match std::env::args().nth(1) {
        Some(arg) => RulesPreset::from_str(&arg).unwrap_or_else(|| {
            log::warn!("Unknown rules preset {:?}, using Classic", arg);
            RulesPreset::Classic
        }),
        None => RulesPreset::Classic,
    };

    log::info!("Fire & Water (native) starting with {} rules", preset.as_str());
    log::info!("The playable version runs in the browser - build for wasm32 and serve index.html");

    // Optional level pack: `fire-and-water [classic|keyed] [pack.json]`
    let levels = match std::env::args().nth(2) {
        Some(path) => match load_pack(&path) {
            Ok(levels) => {
                log::info!("Loaded {} levels from {}", levels.len(), path);
                levels
            }
            Err(e) => {
                log::error!("Failed to load level pack {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => LevelSet::builtin(),
    };

    run_demo(preset, levels);
}

#[cfg(not(target_arch = "wasm32"))]
fn load_pack(
    path: &str,
) -> Result<fire_and_water::sim::LevelSet, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(fire_and_water::sim::LevelSet::from_json(&json)?)
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive both bodies with a fixed script and report the outcome
#[cfg(not(target_arch = "wasm32"))]
fn run_demo(preset: fire_and_water::sim::RulesPreset, levels: fire_and_water::sim::LevelSet) {
    use fire_and_water::consts::FRAME_RATE;
    use fire_and_water::sim::{KeyState, Session, TickInput, tick};
    use fire_and_water::ui;

    const DEMO_SECS: u32 = 60;

    let mut session = Session::new(levels, preset.rules(), 42);

    for frame in 0..DEMO_SECS * FRAME_RATE {
        // Both run right; fire hops every 40 frames, water every 55
        let mut keys = KeyState::new().with("ArrowRight").with("d");
        if frame % 40 == 0 {
            keys.press("ArrowUp");
        }
        if frame % 55 == 0 {
            keys.press("w");
        }

        tick(
            &mut session,
            &TickInput {
                keys,
                ..Default::default()
            },
        );
        for event in session.drain_events() {
            log::info!("frame {:>5}: {:?}", frame, event);
        }
        if session.phase.is_terminal() {
            break;
        }
    }

    for line in ui::hud_lines(&session) {
        println!("{}", line);
    }
    match ui::status_message(&session) {
        Some(message) => println!("{}", message),
        None => println!("Demo ended after {:.1}s", session.elapsed_secs()),
    }
}
