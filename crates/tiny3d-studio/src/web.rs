//! Browser entry point: boots the hue-cycling demo on `<canvas id="canvas">`
//! as soon as the module loads.

use std::cell::RefCell;
use std::convert::Infallible;

use wasm_bindgen::prelude::*;
use web_sys::WebGl2RenderingContext as Gl;

use tiny3d_engine::bootstrap::{BootConfig, ResizePolicy};
use tiny3d_engine::frame_loop::LoopHandle;
use tiny3d_engine::scene::{Advance, CameraParams, Engine};
use tiny3d_engine::web::{init_logging, start_on_canvas};

use crate::color::frame_color;

const CANVAS_ID: &str = "canvas";

thread_local! {
    static RUNNING: RefCell<Option<LoopHandle>> = const { RefCell::new(None) };
}

/// WebGL2 counterpart of the native demo engine.
pub struct ClearEngine {
    gl: Gl,
}

impl ClearEngine {
    pub fn new(gl: Gl) -> Self {
        Self { gl }
    }
}

pub struct ClearEnvironment {
    gl: Gl,
    tick: u32,
}

impl Engine for ClearEngine {
    type Camera = CameraParams;
    type Renderer = CameraParams;
    type Environment = ClearEnvironment;
    type Error = Infallible;

    fn create_camera(&mut self, params: &CameraParams) -> Result<CameraParams, Infallible> {
        Ok(*params)
    }

    fn create_renderer(&mut self, camera: CameraParams) -> Result<CameraParams, Infallible> {
        Ok(camera)
    }

    fn create_environment(&mut self, camera: CameraParams) -> Result<ClearEnvironment, Infallible> {
        log::debug!("clear environment for {camera:?}");
        Ok(ClearEnvironment {
            gl: self.gl.clone(),
            tick: 0,
        })
    }
}

impl Advance for ClearEnvironment {
    fn advance(&mut self) -> anyhow::Result<()> {
        let (r, g, b) = frame_color(self.tick);
        self.gl.clear_color(r, g, b, 1.0);
        self.gl.clear(Gl::COLOR_BUFFER_BIT);

        self.tick = self.tick.wrapping_add(1);
        Ok(())
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    init_logging(log::Level::Info);

    let config = BootConfig {
        resize: ResizePolicy::Track,
        ..BootConfig::default()
    };
    let handle = start_on_canvas(CANVAS_ID, ClearEngine::new, &config)?;
    RUNNING.with(|running| *running.borrow_mut() = Some(handle));

    log::info!("tiny3d studio running on #{CANVAS_ID}");
    Ok(())
}

/// Stops the demo loop and releases its scene.
#[wasm_bindgen]
pub fn stop() {
    let handle = RUNNING.with(|running| running.borrow_mut().take());
    if let Some(handle) = handle {
        handle.stop();
    }
}
