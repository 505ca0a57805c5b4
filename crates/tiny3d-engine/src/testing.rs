//! Test doubles for surfaces, contexts, engines and scenes.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::coords::{PixelSize, Viewport};
use crate::device::GraphicsContext;
use crate::scene::{Advance, CameraParams, Engine};
use crate::surface::DisplaySurface;

// ── surface ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct FakeSurface {
    display: PixelSize,
    backing: PixelSize,
    writes: usize,
}

impl FakeSurface {
    pub fn new(display: PixelSize, backing: PixelSize) -> Self {
        Self { display, backing, writes: 0 }
    }

    pub fn set_display_size(&mut self, size: PixelSize) {
        self.display = size;
    }

    /// Number of backing-store writes observed.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl DisplaySurface for FakeSurface {
    fn display_size(&self) -> PixelSize {
        self.display
    }

    fn backing_size(&self) -> PixelSize {
        self.backing
    }

    fn set_backing_size(&mut self, size: PixelSize) {
        self.backing = size;
        self.writes += 1;
    }
}

// ── context ───────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct RecordingContext {
    viewports: Vec<Viewport>,
}

impl RecordingContext {
    pub fn viewports(&self) -> &[Viewport] {
        &self.viewports
    }

    pub fn last_viewport(&self) -> Option<Viewport> {
        self.viewports.last().copied()
    }
}

impl GraphicsContext for RecordingContext {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewports.push(viewport);
    }
}

// ── engine ────────────────────────────────────────────────────────────────

pub type CallLog = Rc<RefCell<Vec<&'static str>>>;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum StubFailure {
    Camera,
    Renderer,
    Environment,
}

#[derive(Debug)]
pub struct StubError(pub StubFailure);

impl fmt::Display for StubError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stub engine refused {:?}", self.0)
    }
}

impl std::error::Error for StubError {}

/// Engine that records its construction calls.
#[derive(Default)]
pub struct StubEngine {
    log: CallLog,
    seen: Rc<RefCell<Option<CameraParams>>>,
    fail: Option<StubFailure>,
}

pub struct StubCamera;
pub struct StubRenderer(#[allow(dead_code)] StubCamera);

pub struct StubEnvironment {
    log: CallLog,
    _renderer: StubRenderer,
}

impl StubEngine {
    pub fn failing_at(stage: StubFailure) -> Self {
        Self { fail: Some(stage), ..Self::default() }
    }

    pub fn log(&self) -> CallLog {
        Rc::clone(&self.log)
    }

    pub fn seen_params(&self) -> Rc<RefCell<Option<CameraParams>>> {
        Rc::clone(&self.seen)
    }

    fn check(&self, stage: StubFailure, name: &'static str) -> Result<(), StubError> {
        if self.fail == Some(stage) {
            return Err(StubError(stage));
        }
        self.log.borrow_mut().push(name);
        Ok(())
    }
}

impl Engine for StubEngine {
    type Camera = StubCamera;
    type Renderer = StubRenderer;
    type Environment = StubEnvironment;
    type Error = StubError;

    fn create_camera(&mut self, params: &CameraParams) -> Result<StubCamera, StubError> {
        self.check(StubFailure::Camera, "camera")?;
        *self.seen.borrow_mut() = Some(*params);
        Ok(StubCamera)
    }

    fn create_renderer(&mut self, camera: StubCamera) -> Result<StubRenderer, StubError> {
        self.check(StubFailure::Renderer, "renderer")?;
        Ok(StubRenderer(camera))
    }

    fn create_environment(&mut self, renderer: StubRenderer) -> Result<StubEnvironment, StubError> {
        self.check(StubFailure::Environment, "environment")?;
        Ok(StubEnvironment {
            log: Rc::clone(&self.log),
            _renderer: renderer,
        })
    }
}

impl Advance for StubEnvironment {
    fn advance(&mut self) -> anyhow::Result<()> {
        self.log.borrow_mut().push("advance");
        Ok(())
    }
}

// ── scene ─────────────────────────────────────────────────────────────────

type Hook = (usize, Box<dyn FnOnce()>);

#[derive(Default)]
struct Counters {
    advances: Cell<usize>,
    hook: RefCell<Option<Hook>>,
}

/// Scene whose clones share one set of counters. The drop flag is per
/// instance: set it on the copy handed to the loop.
#[derive(Clone, Default)]
pub struct CountingScene {
    counters: Rc<Counters>,
    fail_at: Option<usize>,
    drop_flag: Option<Rc<Cell<bool>>>,
}

impl CountingScene {
    /// Advance number `n` (1-based) returns an error.
    pub fn failing_at(n: usize) -> Self {
        let mut scene = Self::default();
        scene.fail_at = Some(n);
        scene
    }

    pub fn drop_flag(mut self, flag: Rc<Cell<bool>>) -> Self {
        self.drop_flag = Some(flag);
        self
    }

    /// Runs `hook` during advance number `n`.
    pub fn on_advance(&self, n: usize, hook: impl FnOnce() + 'static) {
        *self.counters.hook.borrow_mut() = Some((n, Box::new(hook)));
    }

    pub fn advances(&self) -> usize {
        self.counters.advances.get()
    }
}

impl Advance for CountingScene {
    fn advance(&mut self) -> anyhow::Result<()> {
        let c = &self.counters;
        let n = c.advances.get() + 1;
        c.advances.set(n);

        let due = matches!(&*c.hook.borrow(), Some((at, _)) if *at == n);
        if due {
            let hook = c.hook.borrow_mut().take();
            if let Some((_, hook)) = hook {
                hook();
            }
        }

        if self.fail_at == Some(n) {
            anyhow::bail!("stub advance failed at frame {n}");
        }
        Ok(())
    }
}

impl Drop for CountingScene {
    fn drop(&mut self) {
        if let Some(flag) = &self.drop_flag {
            flag.set(true);
        }
    }
}
