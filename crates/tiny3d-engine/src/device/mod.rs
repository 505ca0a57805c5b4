//! Graphics context abstraction + wgpu device/surface management.
//!
//! `GraphicsContext` is the seam the bootstrap talks to. `Gpu` is the native
//! implementation: it owns the wgpu device and the window's swapchain, and
//! applies the bound viewport to every render pass it opens.

mod binder;
mod config;
mod gpu;
mod surface;

use std::cell::RefCell;
use std::rc::Rc;

pub use binder::{bind_viewport, GraphicsContext};
pub use config::GpuInit;
pub use gpu::Gpu;
pub use surface::SurfaceErrorAction;

/// GPU context shared between the host (viewport, resize) and the engine (drawing).
pub type SharedGpu = Rc<RefCell<Gpu>>;
