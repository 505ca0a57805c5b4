use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// One-shot frame callback.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Host facility that runs a callback at the next display refresh.
pub trait FrameScheduler {
    fn request_frame(&self, frame: FrameCallback);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for Rc<S> {
    fn request_frame(&self, frame: FrameCallback) {
        (**self).request_frame(frame)
    }
}

/// Scheduler that queues callbacks until told to run them.
///
/// Each `run_next` stands in for one display refresh, so tests (and headless
/// hosts) can step a loop a known number of frames.
#[derive(Default)]
pub struct ManualScheduler {
    queue: RefCell<VecDeque<FrameCallback>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of callbacks waiting for a refresh.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Runs the oldest queued callback. Returns `false` if none was queued.
    pub fn run_next(&self) -> bool {
        // Release the queue before running: the callback usually re-arms.
        let next = self.queue.borrow_mut().pop_front();
        match next {
            Some(frame) => {
                frame();
                true
            }
            None => false,
        }
    }

    /// Runs up to `frames` callbacks; returns how many actually ran.
    pub fn run_frames(&self, frames: usize) -> usize {
        (0..frames).take_while(|_| self.run_next()).count()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, frame: FrameCallback) {
        self.queue.borrow_mut().push_back(frame);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn runs_callbacks_in_request_order() {
        let scheduler = ManualScheduler::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        for i in 0..3 {
            let order = Rc::clone(&order);
            scheduler.request_frame(Box::new(move || order.borrow_mut().push(i)));
        }

        assert_eq!(scheduler.pending(), 3);
        assert_eq!(scheduler.run_frames(10), 3);
        assert_eq!(*order.borrow(), vec![0, 1, 2]);
        assert!(!scheduler.run_next());
    }

    #[test]
    fn callback_may_request_the_next_frame() {
        let scheduler = Rc::new(ManualScheduler::new());
        let ran = Rc::new(Cell::new(false));

        let inner = Rc::clone(&scheduler);
        let flag = Rc::clone(&ran);
        scheduler.request_frame(Box::new(move || {
            inner.request_frame(Box::new(move || flag.set(true)));
        }));

        assert!(scheduler.run_next());
        assert_eq!(scheduler.pending(), 1);
        assert!(!ran.get());

        assert!(scheduler.run_next());
        assert!(ran.get());
    }
}
