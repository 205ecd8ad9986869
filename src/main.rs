//! Gap Jump entry point
//!
//! Web builds wire browser input and the animation-frame clock into a
//! `GameSession`; drawing happens in JS handlers registered on
//! `window.gapJump`. Native builds run a short scripted session headlessly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use gap_jump::consts::SIM_DT;
    use gap_jump::platform::{FrameView, Host, SceneObject, ViewportSize};
    use gap_jump::{GameSession, SessionConfig};

    // Forward side effects to optional JS handlers
    #[wasm_bindgen(inline_js = "
        function handler(name) {
            const h = window.gapJump;
            return h && typeof h[name] === 'function' ? h[name] : null;
        }
        export function scene_add(json) {
            const f = handler('add');
            if (f) f(JSON.parse(json));
        }
        export function scene_remove(json) {
            const f = handler('remove');
            if (f) f(JSON.parse(json));
        }
        export function render_frame(json) {
            const f = handler('render');
            if (f) f(JSON.parse(json));
        }
        export function notify_success(score) {
            const f = handler('onSuccess');
            if (f) f(score);
        }
        export function notify_failure() {
            const f = handler('onFailure');
            if (f) f();
        }
    ")]
    extern "C" {
        fn scene_add(json: &str);
        fn scene_remove(json: &str);
        fn render_frame(json: &str);
        fn notify_success(score: u32);
        fn notify_failure();
    }

    /// Host that serializes everything to the JS side
    struct JsHost;

    impl Host for JsHost {
        fn add(&mut self, object: &SceneObject) {
            if let Ok(json) = serde_json::to_string(object) {
                scene_add(&json);
            }
        }

        fn remove(&mut self, object: &SceneObject) {
            if let Ok(json) = serde_json::to_string(object) {
                scene_remove(&json);
            }
        }

        fn render_frame(&mut self, view: &FrameView<'_>) {
            match serde_json::to_string(view) {
                Ok(json) => render_frame(&json),
                Err(e) => log::warn!("Frame serialization failed: {}", e),
            }
        }

        fn on_success(&mut self, score: u32) {
            notify_success(score);
        }

        fn on_failure(&mut self) {
            notify_failure();
        }
    }

    /// Game instance holding the session and frame clock
    struct Game {
        session: GameSession<JsHost>,
        last_time: f64,
    }

    fn viewport_of(window: &web_sys::Window) -> ViewportSize {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1280.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(720.0);
        ViewportSize::new(width as f32, height as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Gap Jump starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = SessionConfig::load();
        let seed = js_sys::Date::now() as u64;
        let session = match GameSession::start(config, seed, JsHost) {
            Ok(session) => {
                session.config().save();
                session
            }
            Err(e) => {
                log::error!("Cannot start session: {}", e);
                return;
            }
        };
        let game = Rc::new(RefCell::new(Game {
            session,
            last_time: 0.0,
        }));
        game.borrow_mut().session.resize(viewport_of(&window));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        setup_resize(game.clone());
        setup_restart_button(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Gap Jump running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse down - start charging
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.pointer_down();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - jump
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().session.pointer_up();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - suppress emulated mouse events
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().session.pointer_down();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().session.pointer_up();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                game.borrow_mut().session.resize(viewport_of(&window));
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
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

            if let Err(e) = g.session.advance(dt) {
                log::error!("Frame aborted: {}", e);
            }
        }

        request_animation_frame(game);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if let Err(e) = g.session.restart() {
                    log::error!("Restart rejected: {}", e);
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Gap Jump (native) starting...");
    log::info!("Native mode runs a scripted session - serve the wasm build for the playable game");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random::<u64>);

    match demo::run(seed) {
        Ok(score) => println!("Scripted session ended with score {} (seed {})", score, seed),
        Err(e) => {
            eprintln!("Scripted session failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use gap_jump::consts::SIM_DT;
    use gap_jump::platform::{Host, SceneObject};
    use gap_jump::sim::JumpPhase;
    use gap_jump::{GameSession, SessionConfig};

    /// Hold lengths (ticks) tried in order until the run ends
    const HOLDS: [u32; 8] = [32, 34, 36, 30, 38, 33, 35, 31];

    /// Host that only logs
    struct LogHost;

    impl Host for LogHost {
        fn add(&mut self, object: &SceneObject) {
            log::debug!("scene + {:?}", object);
        }

        fn remove(&mut self, object: &SceneObject) {
            log::debug!("scene - {:?}", object);
        }

        fn on_success(&mut self, score: u32) {
            log::info!("Success! score {}", score);
        }

        fn on_failure(&mut self) {
            log::info!("Fell off");
        }
    }

    pub fn run(seed: u64) -> Result<u32, Box<dyn std::error::Error>> {
        let config = SessionConfig::new(
            ["Harbor", "Old Town", "Market", "Bridge", "Summit"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            2,
        );
        let mut session = GameSession::start(config, seed, LogHost)?;

        for hold in HOLDS {
            session.pointer_down();
            for _ in 0..hold {
                session.advance(SIM_DT)?;
            }
            session.pointer_up();

            // Let the jump play out, including any fall
            for _ in 0..1000 {
                session.advance(SIM_DT)?;
                if matches!(session.phase(), JumpPhase::Resting | JumpPhase::Fallen) {
                    break;
                }
            }
            if session.phase() == JumpPhase::Fallen {
                break;
            }
        }

        Ok(session.score())
    }
}
