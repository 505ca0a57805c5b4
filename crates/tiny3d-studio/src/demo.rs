//! Native demo engine: the environment clears the bound viewport with a color
//! that walks the hue circle one degree per frame.
//!
//! There is no geometry, so camera and renderer only carry the validated
//! parameters through to the environment.

use std::convert::Infallible;

use tiny3d_engine::device::SharedGpu;
use tiny3d_engine::scene::{Advance, CameraParams, Engine};

use crate::color::frame_color;

pub struct DemoEngine {
    gpu: SharedGpu,
}

impl DemoEngine {
    pub fn new(gpu: SharedGpu) -> Self {
        Self { gpu }
    }
}

pub struct DemoEnvironment {
    gpu: SharedGpu,
    tick: u32,
}

impl Engine for DemoEngine {
    type Camera = CameraParams;
    type Renderer = CameraParams;
    type Environment = DemoEnvironment;
    type Error = Infallible;

    fn create_camera(&mut self, params: &CameraParams) -> Result<CameraParams, Infallible> {
        Ok(*params)
    }

    fn create_renderer(&mut self, camera: CameraParams) -> Result<CameraParams, Infallible> {
        Ok(camera)
    }

    fn create_environment(&mut self, camera: CameraParams) -> Result<DemoEnvironment, Infallible> {
        log::debug!("demo environment for {camera:?}");
        Ok(DemoEnvironment {
            gpu: self.gpu.clone(),
            tick: 0,
        })
    }
}

impl Advance for DemoEnvironment {
    fn advance(&mut self) -> anyhow::Result<()> {
        let (r, g, b) = frame_color(self.tick);

        self.gpu.borrow_mut().render(
            wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
            |_pass| {},
        )?;

        self.tick = self.tick.wrapping_add(1);
        Ok(())
    }
}
