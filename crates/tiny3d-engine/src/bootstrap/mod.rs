//! Startup sequencing.
//!
//! Everything the bootstrap touches is passed in: the surface and context (as
//! a `Stage`), the engine and the frame scheduler. Hosts (`window`, `web`)
//! acquire those and call `start`; tests call it with doubles.

mod config;
mod stage;

use anyhow::Result;

use crate::device::GraphicsContext;
use crate::frame_loop::{FrameLoop, FrameScheduler, LoopHandle};
use crate::scene::{Engine, SceneBuilder};
use crate::surface::DisplaySurface;

pub use config::{BootConfig, ResizePolicy};
pub use stage::Stage;

/// Establishes initial geometry, composes the scene and starts the frame loop.
///
/// Order: backing store → viewport → camera → renderer → environment → first
/// frame request. Nothing is advanced before this returns.
pub fn start<S, G, E, F>(
    stage: &mut Stage<S, G>,
    engine: E,
    scheduler: F,
    config: &BootConfig,
) -> Result<LoopHandle>
where
    S: DisplaySurface,
    G: GraphicsContext,
    E: Engine,
    E::Environment: 'static,
    F: FrameScheduler + 'static,
{
    let viewport = stage.establish();
    log::info!(
        "display surface ready at {}x{} (resize policy {:?})",
        viewport.width,
        viewport.height,
        config.resize
    );
    if viewport.is_empty() {
        log::warn!("display surface has no area; nothing will be visible");
    }

    let scene = SceneBuilder::new(engine)
        .camera(config.camera_params())?
        .renderer()?
        .environment()?;

    let handle = FrameLoop::new(scene, scheduler).start()?;
    Ok(handle)
}
