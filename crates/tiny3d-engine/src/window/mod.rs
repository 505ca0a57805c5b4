//! Native host: winit window + wgpu surface.
//!
//! Owns the `winit` EventLoop and Window and maps them onto the bootstrap
//! seams:
//! - `WindowSurface`: window inner size (display) vs swapchain size (backing)
//! - `RedrawScheduler`: `request_redraw`, fulfilled on `RedrawRequested`
//! - `SharedGpu`: the graphics context, shared with the engine

mod host;
mod runtime;

pub use host::{RedrawScheduler, WindowSurface};
pub use runtime::{Runtime, RuntimeConfig};
