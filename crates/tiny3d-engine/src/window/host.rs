use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use winit::window::Window;

use crate::coords::PixelSize;
use crate::device::SharedGpu;
use crate::frame_loop::{FrameCallback, FrameScheduler};
use crate::surface::DisplaySurface;

/// A window as a display surface; the swapchain is its backing store.
pub struct WindowSurface {
    window: Arc<Window>,
    gpu: SharedGpu,
}

impl WindowSurface {
    pub fn new(window: Arc<Window>, gpu: SharedGpu) -> Self {
        Self { window, gpu }
    }
}

impl DisplaySurface for WindowSurface {
    fn display_size(&self) -> PixelSize {
        self.window.inner_size().into()
    }

    fn backing_size(&self) -> PixelSize {
        self.gpu.borrow().backing_size()
    }

    fn set_backing_size(&mut self, size: PixelSize) {
        self.gpu.borrow_mut().resize(size);
    }
}

/// Frame callbacks waiting for the next `RedrawRequested`.
pub(crate) type PendingFrames = Rc<RefCell<Vec<FrameCallback>>>;

/// Schedules frames through winit redraw requests.
///
/// With a FIFO present mode the redraw cadence follows the display refresh.
pub struct RedrawScheduler {
    window: Arc<Window>,
    pending: PendingFrames,
}

impl RedrawScheduler {
    pub(crate) fn new(window: Arc<Window>, pending: PendingFrames) -> Self {
        Self { window, pending }
    }
}

impl FrameScheduler for RedrawScheduler {
    fn request_frame(&self, frame: FrameCallback) {
        self.pending.borrow_mut().push(frame);
        self.window.request_redraw();
    }
}

/// Runs every callback queued before this redraw. Callbacks queued while
/// running wait for the next redraw.
pub(crate) fn run_pending(pending: &PendingFrames) -> usize {
    let frames: Vec<FrameCallback> = pending.borrow_mut().drain(..).collect();
    let count = frames.len();
    for frame in frames {
        frame();
    }
    count
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn run_pending_defers_rearmed_frames() {
        let pending: PendingFrames = Rc::default();
        let ran = Rc::new(Cell::new(0));

        let queue = Rc::clone(&pending);
        let counter = Rc::clone(&ran);
        pending.borrow_mut().push(Box::new(move || {
            counter.set(counter.get() + 1);
            let counter = Rc::clone(&counter);
            queue
                .borrow_mut()
                .push(Box::new(move || counter.set(counter.get() + 1)));
        }));

        assert_eq!(run_pending(&pending), 1);
        assert_eq!(ran.get(), 1);
        assert_eq!(pending.borrow().len(), 1);

        assert_eq!(run_pending(&pending), 1);
        assert_eq!(ran.get(), 2);
        assert!(pending.borrow().is_empty());
    }

    #[test]
    fn run_pending_on_empty_queue_is_noop() {
        let pending: PendingFrames = Rc::default();
        assert_eq!(run_pending(&pending), 0);
    }
}
