//! Refresh-synchronized frame loop.
//!
//! The loop never drives itself: every iteration is a one-shot callback handed
//! to a `FrameScheduler`, which runs it at the host's next refresh. Each
//! callback advances the scene once and, if the loop is still running, hands
//! the next callback back to the scheduler.

mod runner;
mod scheduler;

pub use runner::{FrameLoop, LoopError, LoopHandle, LoopState};
pub use scheduler::{FrameCallback, FrameScheduler, ManualScheduler};
