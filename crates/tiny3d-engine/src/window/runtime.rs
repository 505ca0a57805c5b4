use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::bootstrap::{self, BootConfig, ResizePolicy, Stage};
use crate::device::{Gpu, GpuInit, SharedGpu};
use crate::frame_loop::{LoopHandle, LoopState};
use crate::scene::Engine;

use super::host::{run_pending, PendingFrames, RedrawScheduler, WindowSurface};

/// Native host settings: the window plus what gets booted inside it.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub gpu: GpuInit,
    pub boot: BootConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let boot = BootConfig::default();
        Self {
            title: "tiny3d".to_string(),
            initial_size: LogicalSize::new(
                boot.design_size.width as f64,
                boot.design_size.height as f64,
            ),
            gpu: GpuInit::default(),
            boot,
        }
    }
}

/// Entry point for the native host.
pub struct Runtime;

impl Runtime {
    /// Opens a window, boots the engine built by `make_engine` against it and
    /// runs until the window closes or the frame loop faults.
    ///
    /// `make_engine` receives the shared GPU context the engine renders with.
    pub fn run<E, F>(config: RuntimeConfig, make_engine: F) -> Result<()>
    where
        E: Engine + 'static,
        E::Environment: 'static,
        F: FnOnce(SharedGpu) -> E + 'static,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;

        let boot = config.boot.clone();
        let launch: Launch = Box::new(
            move |stage: &mut WindowStage, gpu: SharedGpu, scheduler: RedrawScheduler| {
                bootstrap::start(stage, make_engine(gpu), scheduler, &boot)
            },
        );

        let mut state = AppState::new(config, launch);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

type WindowStage = Stage<WindowSurface, SharedGpu>;

type Launch = Box<dyn FnOnce(&mut WindowStage, SharedGpu, RedrawScheduler) -> Result<LoopHandle>>;

struct Host {
    window: Arc<Window>,
    stage: WindowStage,
    pending: PendingFrames,
    handle: LoopHandle,
}

struct AppState {
    config: RuntimeConfig,
    launch: Option<Launch>,
    host: Option<Host>,
    failure: Option<anyhow::Error>,
}

impl AppState {
    fn new(config: RuntimeConfig, launch: Launch) -> Self {
        Self {
            config,
            launch: Some(launch),
            host: None,
            failure: None,
        }
    }

    fn create_host(&mut self, event_loop: &ActiveEventLoop) -> Result<Host> {
        let launch = self.launch.take().context("engine already launched")?;

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let gpu = pollster::block_on(Gpu::new(Arc::clone(&window), self.config.gpu.clone()))
            .context("GPU initialization failed for window")?;
        let gpu: SharedGpu = Rc::new(RefCell::new(gpu));

        let mut stage = Stage::new(
            WindowSurface::new(Arc::clone(&window), Rc::clone(&gpu)),
            Rc::clone(&gpu),
        );

        let pending = PendingFrames::default();
        let scheduler = RedrawScheduler::new(Arc::clone(&window), Rc::clone(&pending));

        let handle = launch(&mut stage, gpu, scheduler).context("failed to boot engine")?;

        Ok(Host {
            window,
            stage,
            pending,
            handle,
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: anyhow::Error) {
        log::error!("{err:#}");
        self.failure.get_or_insert(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }

        match self.create_host(event_loop) {
            Ok(host) => self.host = Some(host),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // The frame loop requests its own redraws.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let track = self.config.boot.resize == ResizePolicy::Track;

        let Some(host) = self.host.as_mut() else {
            return;
        };
        if host.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                host.handle.stop();
                // Queued frames still hold the (now empty) loop.
                host.pending.borrow_mut().clear();
                self.host = None;
                event_loop.exit();
            }

            WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                if track {
                    host.stage.sync();
                } else {
                    log::debug!("window resized; backing store kept (resize policy StartupOnly)");
                }
            }

            WindowEvent::RedrawRequested => {
                run_pending(&host.pending);

                match host.handle.state() {
                    LoopState::Running | LoopState::Idle => {}
                    LoopState::Stopped => event_loop.exit(),
                    LoopState::Faulted => {
                        let frames = host.handle.frames();
                        self.fail(
                            event_loop,
                            anyhow::anyhow!("frame loop faulted after {frames} frames"),
                        );
                    }
                }
            }

            _ => {}
        }
    }
}
