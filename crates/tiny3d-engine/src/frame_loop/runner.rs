use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::scene::{Advance, SceneHandle};

use super::FrameScheduler;

/// Lifecycle of a frame loop.
///
/// `Idle → Running` happens once. `Running` ends either through
/// `LoopHandle::stop` (`Stopped`) or a failed advance (`Faulted`); neither
/// returns to `Running`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Idle,
    Running,
    Stopped,
    Faulted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopError {
    /// `start` was called on a loop that already left `Idle`.
    NotIdle(LoopState),
}

impl fmt::Display for LoopError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotIdle(state) => write!(f, "frame loop cannot start from state {state:?}"),
        }
    }
}

impl std::error::Error for LoopError {}

type Release = Rc<dyn Fn()>;

struct Status {
    state: Cell<LoopState>,
    frames: Cell<u64>,
    /// Drops the scene and scheduler of a started loop. Holds the loop weakly.
    release: RefCell<Option<Release>>,
}

/// Cheap, cloneable view of a loop: observe it or stop it.
///
/// Holding a handle does not keep the scene alive.
#[derive(Clone)]
pub struct LoopHandle {
    status: Rc<Status>,
}

impl fmt::Debug for LoopHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoopHandle")
            .field("state", &self.state())
            .field("frames", &self.frames())
            .finish()
    }
}

impl LoopHandle {
    pub fn state(&self) -> LoopState {
        self.status.state.get()
    }

    pub fn is_running(&self) -> bool {
        self.state() == LoopState::Running
    }

    /// Frames whose advance completed successfully.
    pub fn frames(&self) -> u64 {
        self.status.frames.get()
    }

    /// Ends the loop and drops its scene and scheduler.
    ///
    /// A callback already handed to the host still fires but neither advances
    /// nor re-arms. Called from inside an advance, the scene is dropped as soon
    /// as that advance returns.
    pub fn stop(&self) {
        match self.state() {
            LoopState::Idle | LoopState::Running => {
                log::info!("frame loop stopping after {} frames", self.frames());
                self.status.state.set(LoopState::Stopped);

                let release = self.status.release.borrow().clone();
                if let Some(release) = release {
                    release();
                }
            }
            LoopState::Stopped | LoopState::Faulted => {}
        }
    }
}

struct Inner<V, S> {
    scene: RefCell<Option<SceneHandle<V>>>,
    scheduler: RefCell<Option<S>>,
    status: Rc<Status>,
}

/// Drives `SceneHandle::advance` once per scheduled callback.
pub struct FrameLoop<V, S> {
    inner: Rc<Inner<V, S>>,
}

impl<V, S> FrameLoop<V, S>
where
    V: Advance + 'static,
    S: FrameScheduler + 'static,
{
    pub fn new(scene: SceneHandle<V>, scheduler: S) -> Self {
        Self {
            inner: Rc::new(Inner {
                scene: RefCell::new(Some(scene)),
                scheduler: RefCell::new(Some(scheduler)),
                status: Rc::new(Status {
                    state: Cell::new(LoopState::Idle),
                    frames: Cell::new(0),
                    release: RefCell::new(None),
                }),
            }),
        }
    }

    pub fn handle(&self) -> LoopHandle {
        LoopHandle {
            status: Rc::clone(&self.inner.status),
        }
    }

    pub fn state(&self) -> LoopState {
        self.inner.status.state.get()
    }

    /// Schedules the first frame. The loop then keeps itself alive through the
    /// scheduler, so `self` may be dropped afterwards.
    pub fn start(&self) -> Result<LoopHandle, LoopError> {
        let state = self.state();
        if state != LoopState::Idle {
            return Err(LoopError::NotIdle(state));
        }

        let weak = Rc::downgrade(&self.inner);
        let hook: Release = Rc::new(move || {
            if let Some(inner) = weak.upgrade() {
                release(&inner);
            }
        });
        *self.inner.status.release.borrow_mut() = Some(hook);

        self.inner.status.state.set(LoopState::Running);
        log::info!("frame loop started");
        arm(&self.inner);

        // A scheduler that runs callbacks inline may have ended the loop already.
        if self.state() != LoopState::Running {
            release(&self.inner);
        }
        Ok(self.handle())
    }
}

fn arm<V, S>(inner: &Rc<Inner<V, S>>)
where
    V: Advance + 'static,
    S: FrameScheduler + 'static,
{
    let next = Rc::clone(inner);
    if let Some(scheduler) = inner.scheduler.borrow().as_ref() {
        scheduler.request_frame(Box::new(move || run_frame(next)));
    }
}

/// Drops whatever the loop still owns. A slot borrowed further up the stack
/// is skipped; its frame calls this again on the way out.
fn release<V, S>(inner: &Inner<V, S>) {
    let scene = inner.scene.try_borrow_mut().ok().and_then(|mut s| s.take());
    let scheduler = inner.scheduler.try_borrow_mut().ok().and_then(|mut s| s.take());
    if scene.is_some() {
        log::debug!("frame loop released its scene");
    }
    drop(scene);
    drop(scheduler);
}

fn run_frame<V, S>(inner: Rc<Inner<V, S>>)
where
    V: Advance + 'static,
    S: FrameScheduler + 'static,
{
    let state = inner.status.state.get();
    if state != LoopState::Running {
        log::debug!("frame callback in state {state:?}; not re-arming");
        release(&inner);
        return;
    }

    let result = match inner.scene.borrow_mut().as_mut() {
        Some(scene) => scene.advance(),
        None => return,
    };

    match result {
        Ok(()) => {
            let frames = &inner.status.frames;
            frames.set(frames.get().wrapping_add(1));

            // Advance may have stopped the loop through a handle.
            if inner.status.state.get() == LoopState::Running {
                arm(&inner);
            }
        }
        Err(err) => {
            log::error!(
                "scene advance failed after {} frames; frame loop halted: {err:#}",
                inner.status.frames.get()
            );
            inner.status.state.set(LoopState::Faulted);
        }
    }

    if inner.status.state.get() != LoopState::Running {
        release(&inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frame_loop::ManualScheduler;
    use crate::testing::CountingScene;

    fn looped(scene: CountingScene) -> (FrameLoop<CountingScene, Rc<ManualScheduler>>, Rc<ManualScheduler>) {
        let scheduler = Rc::new(ManualScheduler::new());
        let frame_loop = FrameLoop::new(SceneHandle::new(scene), Rc::clone(&scheduler));
        (frame_loop, scheduler)
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    #[test]
    fn idle_until_started() {
        let scene = CountingScene::default();
        let (frame_loop, scheduler) = looped(scene.clone());

        assert_eq!(frame_loop.state(), LoopState::Idle);
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scene.advances(), 0);
    }

    #[test]
    fn start_schedules_without_advancing() {
        let scene = CountingScene::default();
        let (frame_loop, scheduler) = looped(scene.clone());

        let handle = frame_loop.start().unwrap();

        assert!(handle.is_running());
        assert_eq!(scheduler.pending(), 1);
        assert_eq!(scene.advances(), 0);
    }

    #[test]
    fn start_twice_is_rejected() {
        let (frame_loop, scheduler) = looped(CountingScene::default());

        frame_loop.start().unwrap();
        assert_eq!(frame_loop.start().err(), Some(LoopError::NotIdle(LoopState::Running)));
        assert_eq!(scheduler.pending(), 1);
    }

    // ── iteration ─────────────────────────────────────────────────────────

    #[test]
    fn one_advance_per_callback() {
        let scene = CountingScene::default();
        let (frame_loop, scheduler) = looped(scene.clone());
        let handle = frame_loop.start().unwrap();

        for expected in 1..=5 {
            assert!(scheduler.run_next());
            assert_eq!(scene.advances(), expected);
            assert_eq!(handle.frames(), expected as u64);
            assert_eq!(scheduler.pending(), 1);
        }
    }

    #[test]
    fn loop_outlives_its_owner() {
        let scene = CountingScene::default();
        let (frame_loop, scheduler) = looped(scene.clone());
        let handle = frame_loop.start().unwrap();
        drop(frame_loop);

        assert_eq!(scheduler.run_frames(3), 3);
        assert_eq!(handle.frames(), 3);
    }

    #[test]
    fn inline_scheduler_unwinds_cleanly() {
        // Runs each callback inside `request_frame`, nesting every frame.
        struct InlineScheduler;

        impl FrameScheduler for InlineScheduler {
            fn request_frame(&self, frame: crate::frame_loop::FrameCallback) {
                frame();
            }
        }

        let dropped = Rc::new(Cell::new(false));
        let observer = CountingScene::default();
        let scene = observer.clone().drop_flag(Rc::clone(&dropped));
        let frame_loop = FrameLoop::new(SceneHandle::new(scene), InlineScheduler);
        let handle = frame_loop.handle();
        let stop_handle = handle.clone();
        observer.on_advance(3, move || stop_handle.stop());

        frame_loop.start().unwrap();

        assert_eq!(observer.advances(), 3);
        assert_eq!(handle.state(), LoopState::Stopped);
        assert_eq!(handle.frames(), 3);
        assert!(dropped.get());
    }

    // ── termination ───────────────────────────────────────────────────────

    #[test]
    fn stop_halts_before_next_advance() {
        let scene = CountingScene::default();
        let (frame_loop, scheduler) = looped(scene.clone());
        let handle = frame_loop.start().unwrap();

        scheduler.run_frames(2);
        handle.stop();

        assert_eq!(handle.state(), LoopState::Stopped);
        assert!(scheduler.run_next());
        assert_eq!(scene.advances(), 2);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn stop_from_inside_advance_is_honored() {
        let scene = CountingScene::default();
        let (frame_loop, scheduler) = looped(scene.clone());
        let handle = frame_loop.start().unwrap();

        let stop_handle = handle.clone();
        scene.on_advance(3, move || stop_handle.stop());

        assert_eq!(scheduler.run_frames(10), 3);
        assert_eq!(handle.frames(), 3);
        assert_eq!(handle.state(), LoopState::Stopped);
    }

    #[test]
    fn stop_before_start_prevents_start() {
        let (frame_loop, scheduler) = looped(CountingScene::default());

        frame_loop.handle().stop();
        assert_eq!(frame_loop.start().err(), Some(LoopError::NotIdle(LoopState::Stopped)));
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn failed_advance_faults_the_loop() {
        let scene = CountingScene::failing_at(2);
        let (frame_loop, scheduler) = looped(scene.clone());
        let handle = frame_loop.start().unwrap();

        assert_eq!(scheduler.run_frames(10), 2);
        assert_eq!(handle.state(), LoopState::Faulted);
        assert_eq!(handle.frames(), 1);
        assert_eq!(scene.advances(), 2);
        assert_eq!(scheduler.pending(), 0);

        // Stop after a fault keeps the fault visible.
        handle.stop();
        assert_eq!(handle.state(), LoopState::Faulted);
    }

    #[test]
    fn stop_drops_scene_without_another_frame() {
        let dropped = Rc::new(Cell::new(false));
        let scene = CountingScene::default().drop_flag(Rc::clone(&dropped));
        let (frame_loop, scheduler) = looped(scene);
        let handle = frame_loop.start().unwrap();
        drop(frame_loop);

        scheduler.run_next();
        handle.stop();
        assert!(dropped.get());

        // The host discards its queue without running it.
        let weak_scheduler = Rc::downgrade(&scheduler);
        drop(scheduler);
        drop(handle);
        assert!(weak_scheduler.upgrade().is_none());
    }

    #[test]
    fn fault_drops_scene() {
        let dropped = Rc::new(Cell::new(false));
        let scene = CountingScene::failing_at(1).drop_flag(Rc::clone(&dropped));
        let (frame_loop, scheduler) = looped(scene);
        frame_loop.start().unwrap();

        scheduler.run_next();
        assert_eq!(frame_loop.state(), LoopState::Faulted);
        assert!(dropped.get());
    }

    #[test]
    fn stop_from_inside_advance_drops_scene_after_it_returns() {
        let dropped = Rc::new(Cell::new(false));
        let observer = CountingScene::default();
        let (frame_loop, scheduler) = looped(observer.clone().drop_flag(Rc::clone(&dropped)));
        let handle = frame_loop.start().unwrap();

        let stop_handle = handle.clone();
        let seen_alive = Rc::new(Cell::new(false));
        let seen = Rc::clone(&seen_alive);
        let flag = Rc::clone(&dropped);
        observer.on_advance(1, move || {
            stop_handle.stop();
            seen.set(!flag.get());
        });

        scheduler.run_next();
        assert!(seen_alive.get());
        assert!(dropped.get());
    }

    #[test]
    fn handle_debug_shows_state_and_frames() {
        let (frame_loop, scheduler) = looped(CountingScene::default());
        let handle = frame_loop.start().unwrap();
        scheduler.run_next();

        assert_eq!(
            format!("{handle:?}"),
            "LoopHandle { state: Running, frames: 1 }"
        );
    }
}
