//! tiny3d engine crate.
//!
//! Bootstrap layer for a small 3D engine: keeps a display surface's backing
//! store in step with its displayed size, binds the viewport, composes the
//! Camera → Renderer → Environment scene and drives it from a host-scheduled
//! frame loop. Native (winit + wgpu) and browser (canvas + WebGL2) hosts are
//! provided.

pub mod bootstrap;
pub mod coords;
pub mod device;
pub mod frame_loop;
pub mod logging;
pub mod scene;
pub mod surface;

#[cfg(not(target_arch = "wasm32"))]
pub mod window;

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
mod testing;
