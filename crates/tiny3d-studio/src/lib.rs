//! tiny3d studio demo scenes.
//!
//! Natively the `tiny3d-studio` binary runs `demo::DemoEngine` in a window. In
//! the browser the compiled module boots `web::ClearEngine` on load.

mod color;

#[cfg(not(target_arch = "wasm32"))]
pub mod demo;

#[cfg(target_arch = "wasm32")]
pub mod web;
