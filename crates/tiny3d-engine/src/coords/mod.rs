//! Pixel-space geometry shared by the surface, device and host layers.
//!
//! Canonical space:
//! - Backing-store pixels (integer)
//! - Origin top-left at (0, 0)

mod size;
mod viewport;

pub use size::PixelSize;
pub use viewport::Viewport;
