//! Browser host: `<canvas>` + WebGL2 + `requestAnimationFrame`.
//!
//! The canvas is the display surface (`clientWidth`/`clientHeight` vs
//! `width`/`height`), the WebGL2 context is the graphics context, and each
//! frame callback is a one-shot animation-frame closure.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext};

use crate::bootstrap::{self, BootConfig, ResizePolicy, Stage};
use crate::coords::{PixelSize, Viewport};
use crate::device::GraphicsContext;
use crate::frame_loop::{FrameCallback, FrameScheduler, LoopHandle};
use crate::scene::Engine;
use crate::surface::DisplaySurface;

/// A canvas element as a display surface.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas }
    }
}

impl DisplaySurface for CanvasSurface {
    fn display_size(&self) -> PixelSize {
        PixelSize::from_layout(self.canvas.client_width(), self.canvas.client_height())
    }

    fn backing_size(&self) -> PixelSize {
        PixelSize::new(self.canvas.width(), self.canvas.height())
    }

    fn set_backing_size(&mut self, size: PixelSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }
}

impl GraphicsContext for WebGl2RenderingContext {
    fn set_viewport(&mut self, vp: Viewport) {
        self.viewport(vp.x, vp.y, vp.width as i32, vp.height as i32);
    }
}

/// Runs frame callbacks through `window.requestAnimationFrame`.
pub struct AnimationFrameScheduler {
    window: web_sys::Window,
}

impl AnimationFrameScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self, frame: FrameCallback) {
        let callback = Closure::once_into_js(move |_timestamp: f64| frame());
        if let Err(e) = self.window.request_animation_frame(callback.unchecked_ref()) {
            log::error!("requestAnimationFrame failed; frame loop will not continue: {e:?}");
        }
    }
}

/// Routes `log` output to the browser console and panics to `console.error`.
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"tiny3d: logger already set".into());
    }
}

fn browser_window() -> Result<web_sys::Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Looks up a `<canvas>` by element id.
pub fn canvas_by_id(id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let document = browser_window()?
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id `{id}`")))?;
    element
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str(&format!("element `{id}` is not a canvas")))
}

/// Acquires the canvas' `"webgl2"` context.
pub fn webgl2_context(canvas: &HtmlCanvasElement) -> Result<WebGl2RenderingContext, JsValue> {
    canvas
        .get_context("webgl2")?
        .ok_or_else(|| JsValue::from_str("WebGL2 is not supported"))?
        .dyn_into::<WebGl2RenderingContext>()
        .map_err(|_| JsValue::from_str("context is not a WebGL2RenderingContext"))
}

/// Fixes the canvas' CSS size to the design size.
pub fn apply_design_size(canvas: &HtmlCanvasElement, size: PixelSize) -> Result<(), JsValue> {
    canvas.set_attribute(
        "style",
        &format!("width:{}px; height:{}px", size.width, size.height),
    )
}

/// Boots an engine on the canvas with id `canvas_id`.
///
/// `make_engine` receives a handle to the same WebGL2 context the viewport was
/// bound on.
pub fn start_on_canvas<E, F>(
    canvas_id: &str,
    make_engine: F,
    config: &BootConfig,
) -> Result<LoopHandle, JsValue>
where
    E: Engine,
    E::Environment: 'static,
    F: FnOnce(WebGl2RenderingContext) -> E,
{
    let window = browser_window()?;
    let canvas = canvas_by_id(canvas_id)?;
    apply_design_size(&canvas, config.design_size)?;
    let gl = webgl2_context(&canvas)?;

    let stage = Rc::new(RefCell::new(Stage::new(CanvasSurface::new(canvas), gl.clone())));
    let scheduler = AnimationFrameScheduler::new(window.clone());

    let handle = bootstrap::start(&mut stage.borrow_mut(), make_engine(gl), scheduler, config)
        .map_err(|e| JsValue::from_str(&format!("{e:#}")))?;

    if config.resize == ResizePolicy::Track {
        let on_resize = Closure::wrap(Box::new(move || {
            stage.borrow_mut().sync();
        }) as Box<dyn FnMut()>);
        window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
        // Lives as long as the page.
        on_resize.forget();
    }

    Ok(handle)
}
