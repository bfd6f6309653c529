use std::cell::{Cell, RefCell};
use std::f64::consts::TAU;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::render::{Rect, Sprite, Surface};

/// [`Surface`] backed by a canvas 2D context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    player: HtmlImageElement,
    obstacle: HtmlImageElement,
}

impl CanvasSurface {
    /// Acquires the 2D context and starts loading sprite images.
    pub fn new(canvas: HtmlCanvasElement, config: &Config) -> Result<Self> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(Error::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::NoContext)?;

        Ok(Self {
            canvas,
            ctx,
            player: load_image(&config.player_sprite)?,
            obstacle: load_image(&config.obstacle_sprite)?,
        })
    }

    fn image(&self, sprite: Sprite) -> &HtmlImageElement {
        match sprite {
            Sprite::Player => &self.player,
            Sprite::Obstacle => &self.obstacle,
        }
    }
}

fn load_image(src: &str) -> Result<HtmlImageElement> {
    let image = HtmlImageElement::new()?;
    image.set_src(src);
    Ok(image)
}

fn log_failure(op: &str, result: std::result::Result<(), JsValue>) {
    if let Err(err) = result {
        warn!("canvas {op} failed: {err:?}");
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> (f64, f64) {
        (self.canvas.width() as f64, self.canvas.height() as f64)
    }

    fn clear(&mut self) {
        let (w, h) = self.size();
        self.ctx.clear_rect(0.0, 0.0, w, h);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str, line_width: f64) {
        self.ctx.set_line_width(line_width);
        self.ctx.set_stroke_style_str(color);
        self.ctx.stroke_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.ctx.begin_path();
        log_failure("arc", self.ctx.arc(cx, cy, radius, 0.0, TAU));
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> bool {
        let image = self.image(sprite);
        // A broken image is `complete` with zero natural width.
        if !image.complete() || image.natural_width() == 0 {
            return false;
        }
        log_failure(
            "drawImage",
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(image, rect.x, rect.y, rect.w, rect.h),
        );
        true
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running `requestAnimationFrame` loop.
///
/// The loop keeps itself alive; dropping the handle does not stop it.
#[derive(Clone)]
pub struct FrameLoop {
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    /// Calls `frame` once per display refresh until [`FrameLoop::stop`].
    pub fn start(mut frame: impl FnMut() + 'static) -> Result<FrameLoop> {
        let running = Rc::new(Cell::new(true));

        // `f` holds the animation-frame closure so that we can keep calling
        // `request_animation_frame` recursively. Storing it inside an `Option`
        // allows us to create the `Closure` first and then obtain a reference to
        // it from within itself.
        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        let alive = running.clone();
        *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !alive.get() {
                // Breaks the self-reference so the closure is freed.
                f.borrow_mut().take();
                return;
            }
            frame();

            // schedule next
            if let Err(err) = request_frame(&f) {
                warn!("frame loop stopped: {err}");
                alive.set(false);
                f.borrow_mut().take();
            }
        }) as Box<dyn FnMut()>));

        request_frame(&g)?;
        Ok(FrameLoop { running })
    }

    pub fn stop(&self) {
        self.running.set(false);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

fn request_frame(f: &FrameCallback) -> Result<()> {
    let window = window().ok_or(Error::MissingWindow)?;
    let slot = f.borrow();
    let callback = slot.as_ref().ok_or_else(|| Error::Js("frame callback released".into()))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}
