//! Browser widget
//!
//! The host page mounts the game on a `<canvas>`, forwards nothing else,
//! and unmounts it when the surrounding component goes away. Unmounting
//! cancels the pending animation frame and removes every listener.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent, Window};

use super::input::{InputEvent, Key, map_event};
use crate::consts::*;
use crate::engine::Engine;
use crate::renderer::WebCanvas;
use crate::settings::{QualityPreset, Settings};
use crate::sim::{Command, Snapshot};
use crate::tuning::Tuning;

/// Game instance holding all per-widget state
struct Game {
    engine: Engine,
    canvas: WebCanvas,
    last_time: Option<f64>,
    on_change: Option<Function>,
}

impl Game {
    /// Run the ticks owed since the last frame, then draw
    fn update(&mut self, time: f64) {
        let dt = match self.last_time {
            Some(last) => ((time - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(time);
        self.engine.frame(dt);
        self.engine.draw(&mut self.canvas);
    }

    /// Pending observable change plus the callback to hand it to
    fn pending_change(&mut self) -> Option<(Function, Snapshot)> {
        let change = self.engine.take_change()?;
        Some((self.on_change.clone()?, change))
    }
}

/// Call the host's change callback. Must run with no borrow of the game
/// held, since the callback may call back into the widget.
fn emit(change: Option<(Function, Snapshot)>) {
    let Some((callback, snapshot)) = change else {
        return;
    };
    match serde_json::to_string(&snapshot) {
        Ok(json) => {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::warn!("on_change callback threw: {e:?}");
            }
        }
        Err(e) => log::warn!("snapshot serialization failed: {e}"),
    }
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn init_logging() {
    console_error_panic_hook::set_once();
    // Already initialised when a second widget mounts
    let _ = console_log::init_with_level(log::Level::Info);
}

type FrameLoop = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A mounted mini-game
#[wasm_bindgen]
pub struct MiniGameWidget {
    game: Rc<RefCell<Game>>,
    frame_loop: FrameLoop,
    frame_id: Rc<Cell<Option<i32>>>,
    canvas: HtmlCanvasElement,
    window: Window,
    pointer: Closure<dyn FnMut(PointerEvent)>,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    mounted: bool,
}

#[wasm_bindgen]
impl MiniGameWidget {
    /// Mount on the canvas with id `canvas_id` and start the demo loop.
    ///
    /// `settings_json` and `tuning_json` are optional partial [`Settings`]
    /// and [`Tuning`] objects; invalid input falls back to defaults.
    pub fn mount(
        canvas_id: &str,
        settings_json: Option<String>,
        tuning_json: Option<String>,
    ) -> Result<MiniGameWidget, JsValue> {
        init_logging();

        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{canvas_id}")))?
            .dyn_into()?;

        // Fixed logical size; CSS scales it
        canvas.set_width(WORLD_WIDTH as u32);
        canvas.set_height(WORLD_HEIGHT as u32);

        let settings = Settings::from_json_or_default(settings_json.as_deref());
        let tuning = Tuning::from_json_or_default(tuning_json.as_deref());
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            engine: Engine::with_tuning(seed, tuning, settings),
            canvas: WebCanvas::new(&canvas)?,
            last_time: None,
            on_change: None,
        }));

        let pointer = {
            let game = game.clone();
            Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                handle_input(&game, InputEvent::PointerDown);
            })
        };
        canvas.add_event_listener_with_callback("pointerdown", pointer.as_ref().unchecked_ref())?;

        let keydown = {
            let game = game.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_code(&event.code());
                if handle_input(&game, InputEvent::KeyDown(key)) {
                    // Keep Space from scrolling the page
                    event.prevent_default();
                }
            })
        };
        window.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;

        let widget = MiniGameWidget {
            game,
            frame_loop: Rc::new(RefCell::new(None)),
            frame_id: Rc::new(Cell::new(None)),
            canvas,
            window,
            pointer,
            keydown,
            mounted: true,
        };
        widget.start_loop()?;

        log::info!("Mini runner mounted on #{canvas_id} (seed {seed})");
        Ok(widget)
    }

    /// Stop the loop and detach from the page. Safe to call twice.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        if let Some(id) = self.frame_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        // Breaks the closure's reference to itself
        self.frame_loop.borrow_mut().take();

        let _ = self.canvas.remove_event_listener_with_callback(
            "pointerdown",
            self.pointer.as_ref().unchecked_ref(),
        );
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());

        if let Ok(mut game) = self.game.try_borrow_mut() {
            game.engine.stop();
        }
        log::info!("Mini runner unmounted");
    }

    pub fn jump(&self) -> bool {
        self.command(Command::Jump)
    }

    pub fn start(&self) -> bool {
        self.command(Command::Start)
    }

    pub fn restart(&self) -> bool {
        self.command(Command::Restart)
    }

    #[wasm_bindgen(js_name = stopToDemo)]
    pub fn stop_to_demo(&self) -> bool {
        self.command(Command::StopToDemo)
    }

    #[wasm_bindgen(getter)]
    pub fn score(&self) -> u32 {
        self.game.borrow().engine.score()
    }

    #[wasm_bindgen(getter, js_name = highScore)]
    pub fn high_score(&self) -> u32 {
        self.game.borrow().engine.high_score()
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.game.borrow().engine.mode().as_str().to_string()
    }

    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let snapshot = self.game.borrow().engine.snapshot();
        serde_json::to_string(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Switch quality preset ("low", "medium", "high"). Returns false for
    /// an unknown name.
    #[wasm_bindgen(js_name = setQuality)]
    pub fn set_quality(&self, name: &str) -> bool {
        let Some(preset) = QualityPreset::parse(name) else {
            log::warn!("Unknown quality preset {name:?}");
            return false;
        };
        let mut game = self.game.borrow_mut();
        let settings = game.engine.settings().with_quality(preset);
        game.engine.set_settings(settings);
        log::info!("Quality set to {}", preset.as_str());
        true
    }

    /// Called with the snapshot JSON whenever score, best or mode changes
    #[wasm_bindgen(js_name = setOnChange)]
    pub fn set_on_change(&self, callback: Option<Function>) {
        self.game.borrow_mut().on_change = callback;
    }
}

impl MiniGameWidget {
    fn command(&self, command: Command) -> bool {
        let (applied, change) = {
            let mut game = self.game.borrow_mut();
            let applied = game.engine.command(command);
            (applied, game.pending_change())
        };
        emit(change);
        applied
    }

    fn start_loop(&self) -> Result<(), JsValue> {
        let game = self.game.clone();
        let frame_loop = self.frame_loop.clone();
        let frame_id = self.frame_id.clone();
        let window = self.window.clone();

        *self.frame_loop.borrow_mut() = Some(Closure::new(move |time: f64| {
            let change = {
                let mut game = game.borrow_mut();
                if game.engine.is_stopped() {
                    return;
                }
                game.update(time);
                game.pending_change()
            };
            emit(change);

            // Unmounted from inside the callback: nothing left to schedule
            let next = frame_loop.borrow();
            let Some(callback) = next.as_ref() else {
                return;
            };
            match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
                Ok(id) => frame_id.set(Some(id)),
                Err(e) => log::warn!("requestAnimationFrame failed: {e:?}"),
            }
        }));

        let first = self.frame_loop.borrow();
        if let Some(callback) = first.as_ref() {
            let id = self
                .window
                .request_animation_frame(callback.as_ref().unchecked_ref())?;
            self.frame_id.set(Some(id));
        }
        Ok(())
    }
}

impl Drop for MiniGameWidget {
    fn drop(&mut self) {
        self.unmount();
    }
}

/// Route an input event through the adapter. Returns whether it mapped
/// to a command.
fn handle_input(game: &Rc<RefCell<Game>>, event: InputEvent) -> bool {
    let (mapped, change) = {
        let Ok(mut game) = game.try_borrow_mut() else {
            return false;
        };
        let Some(command) = map_event(event, game.engine.mode()) else {
            return false;
        };
        game.engine.command(command);
        (true, game.pending_change())
    };
    emit(change);
    mapped
}
