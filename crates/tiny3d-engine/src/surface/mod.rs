//! Display surface abstraction and backing-store synchronization.
//!
//! A surface has two sizes:
//! - the display size computed by the host's layout (read-only here)
//! - the backing-store resolution the graphics API renders into
//!
//! `resize_to_display` is the only place that mutates the backing store.

mod sizer;

pub use sizer::{resize_to_display, DisplaySurface};
