//! Drone Wash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, KeyboardEvent, TouchEvent};

    use drone_wash::consts::*;
    use drone_wash::platform::{InputTracker, action_for_control, action_for_key};
    use drone_wash::sim::{GameEvent, GameState, PresentationSink, tick};
    use drone_wash::{ConfigError, Settings, Tuning};

    // Hand-off to the three.js scene, which owns meshes, camera and effects
    #[wasm_bindgen(inline_js = "
        export function present_frame(pose, particles, logos, camera) {
            if (window.droneScene) {
                window.droneScene.update(pose, particles, logos, camera);
            }
        }

        export function present_event(json) {
            if (window.droneScene && window.droneScene.onEvent) {
                window.droneScene.onEvent(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn present_frame(
            pose: &js_sys::Float32Array,
            particles: &js_sys::Float32Array,
            logos: &js_sys::Float32Array,
            camera: &str,
        );
        fn present_event(json: &str);
    }

    /// Writes simulation events into the DOM HUD and forwards them to the scene
    struct HudSink {
        document: Document,
    }

    impl HudSink {
        fn set_text(&self, selector: &str, text: &str) {
            if let Some(el) = self.document.query_selector(selector).ok().flatten() {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let classes = el.class_list();
                let _ = if visible {
                    classes.add_1("visible")
                } else {
                    classes.remove_1("visible")
                };
            }
        }
    }

    impl PresentationSink for HudSink {
        fn present(&mut self, event: &GameEvent) {
            match event {
                GameEvent::WarningRaised { .. } => self.set_visible("collision-warning", true),
                GameEvent::WarningCleared => self.set_visible("collision-warning", false),
                GameEvent::ScoreChanged { score } => {
                    self.set_text("#hud-score .hud-value", &score.to_string());
                }
                GameEvent::Collected { info, .. } => {
                    self.set_text("#logo-popup .popup-text", info);
                    self.set_visible("logo-popup", true);
                }
                GameEvent::Won { elapsed, .. } => {
                    self.set_text("#win-popup .win-time", &format!("{:.1}s", elapsed));
                    self.set_visible("win-popup", true);
                }
                GameEvent::SprayToggled { on } => self.set_visible("hud-spray", *on),
                GameEvent::BuildingCleaned { .. }
                | GameEvent::AllBuildingsClean
                | GameEvent::CameraChanged { .. } => {}
            }

            if let Ok(json) = serde_json::to_string(event) {
                present_event(&json);
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        input: InputTracker,
        hud: HudSink,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, settings: Settings, document: Document) -> Result<Self, ConfigError> {
            let mut tuning = Tuning::default();
            settings.apply_to(&mut tuning);
            let mut state = GameState::new(seed, tuning)?;
            state.camera = settings.camera;
            Ok(Self {
                state,
                settings,
                input: InputTracker::new(),
                hud: HudSink { document },
                accumulator: 0.0,
                last_time: 0.0,
            })
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.take_frame();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            self.state.drain_events_into(&mut self.hud);

            // Remember the last view across sessions
            if self.state.camera != self.settings.camera {
                self.settings.camera = self.state.camera;
                self.settings.save();
            }
        }

        /// Push the drone pose, spray particles and logo positions to the scene
        fn present(&self) {
            let Some(drone) = self.state.drone.as_ref() else {
                return;
            };
            let p = drone.pose.position;
            let pose = js_sys::Float32Array::from(&[p.x, p.y, p.z, drone.pose.yaw][..]);
            let particles = drone.spray_world_positions();
            let particles = js_sys::Float32Array::from(bytemuck::cast_slice::<_, f32>(&particles));
            let logos: Vec<glam::Vec3> = self
                .state
                .collectibles
                .iter()
                .map(|logo| logo.display_position())
                .collect();
            let logos = js_sys::Float32Array::from(bytemuck::cast_slice::<_, f32>(&logos));
            present_frame(&pose, &particles, &logos, self.state.camera.as_str());
        }

        fn update_timer(&self) {
            if self.settings.show_timer {
                self.hud
                    .set_text("#hud-timer .hud-value", &format!("{:.0}", self.state.elapsed));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Drone Wash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        if settings.touch_controls {
            if let Some(el) = document.get_element_by_id("touch-controls") {
                let _ = el.class_list().add_1("visible");
            }
        }
        let game = match Game::new(seed, settings, document.clone()) {
            Ok(game) => Rc::new(RefCell::new(game)),
            Err(e) => {
                log::error!("Could not start a session: {}", e);
                return;
            }
        };
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_touch_controls(game.clone(), &document);
        setup_blur_handler(game.clone());

        request_animation_frame(game);
        log::info!("Drone Wash running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = action_for_key(&event.code()) {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    if pressed {
                        g.input.press(action);
                    } else {
                        g.input.release(action);
                    }
                }
            });
            let _ = window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch_controls(game: Rc<RefCell<Game>>, document: &Document) {
        let Ok(controls) = document.query_selector_all("[data-action]") else {
            return;
        };

        for i in 0..controls.length() {
            let Some(el) = controls.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let Some(action) = el
                .get_attribute("data-action")
                .as_deref()
                .and_then(action_for_control)
            else {
                continue;
            };

            let events = [("touchstart", true), ("touchend", false), ("touchcancel", false)];
            for (kind, pressed) in events {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    if pressed {
                        g.input.press(action);
                    } else {
                        g.input.release(action);
                    }
                });
                let _ = el.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_blur_handler(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().input.release_all();
            log::info!("Inputs released (window blur)");
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
            g.present();
            g.update_timer();
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
    env_logger::init();
    log::info!("Drone Wash (native) starting...");
    log::info!("Native mode runs a scripted headless flight - run with `trunk serve` for the game");

    // Usage: drone-wash [tuning.json] [town.json]
    let mut args = std::env::args().skip(1);
    let tuning_path = args.next();
    let town_path = args.next();
    if let Err(e) = demo_flight(tuning_path.as_deref(), town_path.as_deref()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Fly down the main street with the spray on and report what happened
///
/// Optional JSON files override the tuning and the town layout.
#[cfg(not(target_arch = "wasm32"))]
fn demo_flight(
    tuning_path: Option<&str>,
    town_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    use drone_wash::consts::SIM_DT;
    use drone_wash::sim::{
        DRONE_START, DronePose, GameEvent, GameState, InputState, PresentationSink, WorldModel,
        default_collectibles, tick,
    };
    use drone_wash::{Settings, Tuning};

    struct LogSink;

    impl PresentationSink for LogSink {
        fn present(&mut self, event: &GameEvent) {
            log::info!("event: {:?}", event);
        }
    }

    let mut tuning = match tuning_path {
        Some(path) => {
            log::info!("Loading tuning from {}", path);
            Tuning::from_json(&std::fs::read_to_string(path)?)?
        }
        None => Tuning::default(),
    };
    Settings::load().apply_to(&mut tuning);

    let mut state = match town_path {
        Some(path) => {
            log::info!("Loading town from {}", path);
            let world = WorldModel::from_json(&std::fs::read_to_string(path)?)?;
            let mut state = GameState::with_world(42, tuning, world, default_collectibles())?;
            state.attach_drone(DronePose::new(DRONE_START, 0.0))?;
            state
        }
        None => GameState::new(42, tuning)?,
    };
    let mut sink = LogSink;

    tick(
        &mut state,
        &InputState {
            toggle_spray: true,
            ..Default::default()
        },
        SIM_DT,
    );

    let cruise = InputState {
        forward: true,
        ..Default::default()
    };
    for _ in 0..(10.0 / SIM_DT) as u32 {
        tick(&mut state, &cruise, SIM_DT);
        state.drain_events_into(&mut sink);
        if state.has_won {
            break;
        }
    }

    let clean = state.world.cleaned_count();
    println!(
        "Flew {:.1}s: score {}/{}, {} of {} buildings clean",
        state.elapsed,
        state.score,
        state.win_target(),
        clean,
        state.world.buildings().len()
    );
    Ok(())
}
