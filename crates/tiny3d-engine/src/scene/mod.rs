//! Scene composition: Camera → Renderer → Environment.
//!
//! The engine behind these three objects is opaque. This module only fixes
//! the construction order (at the type level) and the per-frame contract.

mod builder;
mod engine;
mod params;

pub use builder::{CameraStage, RendererStage, SceneBuilder, SceneError, SceneHandle};
pub use engine::{Advance, Engine};
pub use params::{CameraParams, ParamsError};
