//! Rock Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlImageElement, KeyboardEvent, TouchEvent};

    use rock_runner::platform::Layout;
    use rock_runner::platform::web::DomLayout;
    use rock_runner::renderer::{DomPresenter, FrameView, Presenter};
    use rock_runner::sim::{Game, GameEvent, GamePhase, TickInput, tick};
    use rock_runner::{AssetTracker, Settings, Tuning};

    /// Delay between the last asset settling and the first run
    const LOADING_SCREEN_LINGER_MS: i32 = 500;

    /// Game instance holding all state
    struct App {
        game: Game,
        assets: AssetTracker,
        layout: DomLayout,
        presenter: DomPresenter,
        settings: Settings,
        /// Jump pressed since the last frame
        jump_requested: bool,
        /// A frame callback is scheduled
        looping: bool,
    }

    impl App {
        fn frame(&mut self, now: f64) {
            let area = self.layout.play_area();
            let character = self.layout.character_rect();
            let input = TickInput {
                now,
                area,
                character,
                jump: std::mem::take(&mut self.jump_requested),
            };
            tick(&mut self.game, &input);

            for event in self.game.drain_events() {
                if let GameEvent::GameOver(score) = event {
                    log::info!("Run over with {} points", score);
                }
            }

            let debug = self.settings.debug_collisions.then_some(&character);
            let view = FrameView::capture(&self.game, area, debug);
            self.presenter.present(&view);
        }
    }

    fn now() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or(0.0)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("logger init failed: {}", e).into());
        }

        log::info!("Rock Runner starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };
        let settings = Settings::load();
        let (Some(layout), Some(presenter)) = (
            DomLayout::new(&document),
            DomPresenter::new(document.clone(), settings.debug_collisions),
        ) else {
            log::error!("Page is missing .game-area or #character");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(Tuning::default(), seed),
            assets: AssetTracker::for_manifest(),
            layout,
            presenter,
            settings,
            jump_requested: false,
            looping: false,
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(app.clone());
        setup_restart_button(app.clone());
        preload_assets(app);
    }

    fn preload_assets(app: Rc<RefCell<App>>) {
        let sources: Vec<String> = app.borrow().assets.sources().map(String::from).collect();

        for src in sources {
            let Ok(img) = HtmlImageElement::new() else {
                on_asset_settled(&app, &src, false);
                continue;
            };

            let onload = {
                let app = app.clone();
                let src = src.clone();
                Closure::<dyn FnMut()>::new(move || on_asset_settled(&app, &src, true))
            };
            let onerror = {
                let app = app.clone();
                let src = src.clone();
                Closure::<dyn FnMut()>::new(move || on_asset_settled(&app, &src, false))
            };
            img.set_onload(Some(onload.as_ref().unchecked_ref()));
            img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onload.forget();
            onerror.forget();
            img.set_src(&src);
        }
    }

    fn on_asset_settled(app: &Rc<RefCell<App>>, src: &str, loaded: bool) {
        let completed = {
            let mut a = app.borrow_mut();
            let completed = if loaded {
                a.assets.mark_loaded(src)
            } else {
                a.assets.mark_failed(src)
            };
            let progress = a.assets.progress();
            a.presenter.loading_progress(progress);
            completed
        };
        if !completed {
            return;
        }

        {
            let mut a = app.borrow_mut();
            let failed = a.assets.failed();
            if failed > 0 {
                log::warn!("{} of {} assets failed to load", failed, a.assets.total());
            }
            a.game.assets_settled();
        }

        let app = app.clone();
        let start = Closure::once(move || {
            app.borrow().presenter.hide_loading();
            start_session(app);
        });
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                start.as_ref().unchecked_ref(),
                LOADING_SCREEN_LINGER_MS,
            );
        }
        start.forget();
    }

    /// Start or restart, then make sure the frame loop is running
    fn start_session(app: Rc<RefCell<App>>) {
        let started = {
            let mut a = app.borrow_mut();
            let phase = a.game.phase;
            let result = if phase == GamePhase::GameOver {
                a.game.restart(now())
            } else {
                a.game.start(now())
            };
            result.is_ok() && !a.looping
        };
        if started {
            app.borrow_mut().looping = true;
            request_animation_frame(app);
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        let keep_going = {
            let mut a = app.borrow_mut();
            a.frame(time);
            let running = a.game.phase == GamePhase::Running;
            a.looping = running;
            running
        };

        // Stop rescheduling once the run is over; restart picks it back up
        if keep_going {
            request_animation_frame(app);
        }
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut a = app.borrow_mut();
                let code = event.code();
                if a.settings.is_jump_key(&code) && a.game.phase == GamePhase::Running {
                    a.jump_requested = true;
                } else if code == a.settings.debug_toggle_key {
                    let on = a.settings.toggle_debug();
                    a.settings.save();
                    a.presenter.set_debug_overlay(on);
                    log::info!("Collision overlay {}", if on { "on" } else { "off" });
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start (jump)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut a = app.borrow_mut();
                if a.settings.touch_jump
                    && a.game.phase == GamePhase::Running
                    && !a.game.state.is_jumping
                {
                    event.prevent_default();
                    a.jump_requested = true;
                }
            });
            if let Some(document) = window.document() {
                let _ = document.add_event_listener_with_callback(
                    "touchstart",
                    closure.as_ref().unchecked_ref(),
                );
            }
            closure.forget();
        }
    }

    fn setup_restart_button(app: Rc<RefCell<App>>) {
        let Some(btn) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("restart-button"))
        else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            start_session(app.clone());
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rock Runner (native) starting...");
    log::info!("Native mode runs a headless demo - use `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| rock_runner::Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => rock_runner::Tuning::default(),
    };

    let summary = headless::run_demo(tuning, 20_250_101, 120_000.0);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize summary: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rock_runner::platform::{Layout, SimulatedCharacter};
    use rock_runner::renderer::FrameView;
    use rock_runner::sim::{Game, GamePhase, PlayArea, TickInput, tick};
    use rock_runner::{AssetTracker, Tuning};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Jump when the nearest rock ahead is about to reach the runner
    fn autopilot(game: &Game, runner: &SimulatedCharacter) -> bool {
        let front = runner.character_rect().right();
        let lead = game.state.game_speed * 14.0;
        game.registry
            .obstacles
            .iter()
            .any(|o| o.body.x > front - o.body.size && o.body.x - front < lead)
    }

    pub fn run_demo(tuning: Tuning, seed: u64, duration_ms: f64) -> FrameView {
        let area = PlayArea::new(960.0, 480.0);
        let mut game = Game::new(tuning, seed);

        let mut assets = AssetTracker::for_manifest();
        let sources: Vec<String> = assets.sources().map(String::from).collect();
        for src in &sources {
            if assets.mark_loaded(src) {
                game.assets_settled();
            }
        }

        let mut runner = SimulatedCharacter::new(area, &game.tuning);
        let mut now = 0.0;
        if let Err(e) = game.start(now) {
            log::error!("Could not start: {}", e);
        }

        while now < duration_ms && game.phase == GamePhase::Running {
            now += FRAME_MS;
            let input = TickInput {
                now,
                area: runner.play_area(),
                character: runner.character_rect(),
                jump: autopilot(&game, &runner),
            };
            tick(&mut game, &input);
            runner.update(now, game.state.is_jumping);
        }

        log::info!(
            "Demo finished after {:.1}s: phase={:?} score={} speed={:.1}",
            game.state.elapsed(now) / 1000.0,
            game.phase,
            game.state.score,
            game.state.game_speed
        );
        let reg = &game.registry;
        log::info!(
            "Pool entities created: rocks={} coins={} effects={}",
            reg.obstacle_pool.created(),
            reg.coin_pool.created(),
            reg.effect_pool.created()
        );
        FrameView::capture(&game, area, None)
    }
}
