//! Browser front end for a side-scrolling shooter.
//!
//! Game rules live in an external `Game` class; this crate draws its state on
//! a canvas every frame, feeds it debounced keyboard commands and advances it
//! on a fixed interval while a session is running.

pub mod config;
pub mod error;
pub mod game;
pub mod input;
pub mod render;
pub mod session;

pub use config::{Config, Palette};
pub use error::{Error, Result};
pub use game::{GameModel, Projectile, Scene};
pub use render::{FrameStats, Renderer, Surface};
pub use session::{Hud, Outcome, Phase, Session, TickResult};

// Only compile wasm-specific code when targeting wasm32.

#[cfg(target_arch = "wasm32")]
pub use wasm::{CanvasSurface, DomHud, FrameLoop, JsGame};

#[cfg(target_arch = "wasm32")]
mod wasm {
    use std::cell::RefCell;
    use std::rc::Rc;

    use gloo_timers::callback::Interval;
    use log::{debug, info};
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlButtonElement, HtmlCanvasElement, HtmlElement};

    use crate::config::Config;
    use crate::error::Error;
    use crate::game::GameModel;
    use crate::render::Renderer;
    use crate::session::Session;

    mod bindings;
    mod dom;
    mod render;

    pub use bindings::JsGame;
    pub use dom::DomHud;
    pub use render::{CanvasSurface, FrameLoop};

    type SharedSession = Rc<RefCell<Session<JsGame, Interval>>>;

    #[wasm_bindgen(start)]
    pub fn main() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let window = web_sys::window().ok_or(Error::MissingWindow)?;
        let document = window.document().ok_or("no document")?;

        let defaults = Config::default();
        if document.get_element_by_id(&defaults.canvas_id).is_none() {
            // Not the game page (e.g. the test harness); nothing to wire up.
            web_sys::console::warn_1(&"shooter_viz: no game canvas, not starting".into());
            return Ok(());
        }
        let canvas: HtmlCanvasElement =
            dom::element(&document, &defaults.canvas_id, "canvas")?;
        let dataset = canvas.dataset();
        let config = defaults.with_overrides(|key| dataset.get(key))?;

        if let Some(level) = config.log_level.to_level() {
            // Fails only if a logger is already installed.
            let _ = console_log::init_with_level(level);
        }

        let hud = Rc::new(RefCell::new(dom::DomHud {
            button: dom::element::<HtmlButtonElement>(&document, &config.start_button_id, "button")?,
            status: dom::element::<HtmlElement>(&document, &config.status_id, "element")?,
        }));

        let session: SharedSession = Rc::new(RefCell::new(Session::new(&config, JsGame::create)?));
        size_canvas(&canvas, &config, session.borrow().game());

        // Keyboard
        let keys = session.clone();
        dom::listen(&window, "keydown", dom::on_key(move |key| keys.borrow_mut().key_down(key)))?;
        let keys = session.clone();
        dom::listen(&window, "keyup", dom::on_key(move |key| keys.borrow_mut().key_up(key)))?;

        // Start / restart
        {
            let session = session.clone();
            let hud = hud.clone();
            let tick_ms = config.tick_millis();
            let button = hud.borrow().button.clone();
            dom::listen(&button, "click", move |_| {
                let ticker_session = Rc::downgrade(&session);
                let ticker_hud = hud.clone();
                session.borrow_mut().start_or_log(&mut *hud.borrow_mut(), move || {
                    Ok(Interval::new(tick_ms, move || {
                        let Some(session) = ticker_session.upgrade() else {
                            return;
                        };
                        let result = session.borrow_mut().tick(&mut *ticker_hud.borrow_mut());
                        debug!("tick: {result:?}");
                    }))
                });
            })?;
        }

        // Render immediately, session or not.
        let mut surface = CanvasSurface::new(canvas, &config)?;
        let renderer = Renderer::new(config);
        FrameLoop::start(move || {
            session.borrow_mut().frame(&renderer, &mut surface);
        })?;

        info!("front end ready");
        Ok(())
    }

    /// Fits the canvas to the visible grid of the initial game.
    fn size_canvas(canvas: &HtmlCanvasElement, config: &Config, game: &JsGame) {
        let (w, h) = (game.visible_width(), game.visible_height());
        if w == 0 || h == 0 {
            return;
        }
        let width = (w as f64 * config.tile_size) as u32;
        let height = (h as f64 * config.tile_size) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        debug!("canvas sized to {width}x{height}");
    }
}
