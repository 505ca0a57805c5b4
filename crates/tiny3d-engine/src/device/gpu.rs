use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::SurfaceError;
use winit::window::Window;

use crate::coords::{PixelSize, Viewport};

use super::surface;
use super::{GpuInit, GraphicsContext, SurfaceErrorAction};

/// One acquired swapchain image and the encoder recording into it.
struct Frame {
    surface_texture: wgpu::SurfaceTexture,
    view: wgpu::TextureView,
    encoder: wgpu::CommandEncoder,
}

/// Owns wgpu core objects, the surface configuration and the bound viewport.
///
/// The surface configuration is the window's backing store: its width/height
/// are what `resize` changes and what `backing_size` reports.
pub struct Gpu {
    /// Keeps its own `Arc<Window>`, hence `'static`.
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    /// Current backing-store size in physical pixels. May be empty while the
    /// configuration keeps its last usable size.
    size: PixelSize,

    /// Viewport applied to every render pass opened through `render`.
    viewport: Viewport,
}

impl Gpu {
    /// Opens a device for `window` and configures its swapchain at the
    /// window's current inner size. Block on it with `pollster` natively.
    pub async fn new(window: Arc<Window>, init: GpuInit) -> Result<Self> {
        let size = PixelSize::from(window.inner_size());
        anyhow::ensure!(!size.is_empty(), "window has zero size");

        let GpuInit {
            prefer_srgb,
            present_mode,
            alpha_mode,
            power_preference,
            desired_maximum_frame_latency,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window)
            .context("failed to create wgpu surface")?;
        let (adapter, device, queue) = open_device(&instance, &surface, power_preference).await?;

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps.formats, prefer_srgb)
            .context("no supported surface formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps.alpha_modes, alpha_mode);
        log::debug!("surface format {format:?}, alpha mode {alpha_mode:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency,
        };

        surface.configure(&device, &config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            size,
            viewport: Viewport::default(),
        })
    }

    /// Swapchain format; pipelines drawing into `render` passes must target it.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Returns the backing-store size (physical pixels).
    pub fn backing_size(&self) -> PixelSize {
        self.size
    }

    /// Returns the viewport last bound with `set_viewport`.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    /// Resizes the backing store (swapchain).
    pub fn resize(&mut self, new_size: PixelSize) {
        surface::apply_resize(
            &self.surface,
            &self.device,
            &mut self.config,
            &mut self.size,
            new_size,
        );
    }

    fn begin_frame(&self) -> std::result::Result<Frame, SurfaceError> {
        let surface_texture = self.surface.get_current_texture()?;
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tiny3d frame encoder"),
            });

        Ok(Frame {
            surface_texture,
            view,
            encoder,
        })
    }

    fn submit(&self, frame: Frame) {
        self.queue.submit(std::iter::once(frame.encoder.finish()));
        drop(frame.view);
        frame.surface_texture.present();
    }

    /// Reacts to a failed acquisition: a lost or outdated swapchain is rebuilt
    /// at the current size.
    pub fn handle_surface_error(&mut self, err: &SurfaceError) -> SurfaceErrorAction {
        let action = SurfaceErrorAction::classify(err);
        if action == SurfaceErrorAction::Reconfigured && !self.size.is_empty() {
            self.surface.configure(&self.device, &self.config);
        }
        action
    }

    /// Acquires a frame, opens a pass cleared to `clear` and clipped to the
    /// bound viewport, runs `draw`, then presents.
    ///
    /// Recoverable surface errors skip the frame; a fatal one is returned.
    pub fn render<F>(&mut self, clear: wgpu::Color, draw: F) -> Result<()>
    where
        F: FnOnce(&mut wgpu::RenderPass<'_>),
    {
        let mut frame = match self.begin_frame() {
            Ok(f) => f,
            Err(err) => {
                log::warn!("failed to acquire surface texture: {err}");
                let action = self.handle_surface_error(&err);
                anyhow::ensure!(action != SurfaceErrorAction::Fatal, "fatal surface error");
                return Ok(());
            }
        };

        let target = PixelSize::new(
            frame.surface_texture.texture.width(),
            frame.surface_texture.texture.height(),
        );

        {
            let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tiny3d pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            let vp = clip_viewport(self.viewport, target);
            if !vp.is_empty() {
                pass.set_viewport(
                    vp.x as f32,
                    vp.y as f32,
                    vp.width as f32,
                    vp.height as f32,
                    0.0,
                    1.0,
                );
            }

            draw(&mut pass);
        }

        self.submit(frame);
        Ok(())
    }
}

async fn open_device(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'_>,
    power_preference: wgpu::PowerPreference,
) -> Result<(wgpu::Adapter, wgpu::Device, wgpu::Queue)> {
    let options = wgpu::RequestAdapterOptions {
        power_preference,
        compatible_surface: Some(surface),
        force_fallback_adapter: false,
    };
    let adapter = instance
        .request_adapter(&options)
        .await
        .context("no GPU adapter can present to this window")?;

    let info = adapter.get_info();
    log::info!("using adapter {} ({:?})", info.name, info.backend);

    let descriptor = wgpu::DeviceDescriptor {
        label: Some("tiny3d device"),
        required_features: wgpu::Features::empty(),
        required_limits: wgpu::Limits::default(),
        experimental_features: wgpu::ExperimentalFeatures::disabled(),
        memory_hints: wgpu::MemoryHints::Performance,
        trace: wgpu::Trace::Off,
    };
    let (device, queue) = adapter
        .request_device(&descriptor)
        .await
        .context("adapter refused to open a device")?;

    Ok((adapter, device, queue))
}

impl GraphicsContext for Gpu {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }
}

/// wgpu validates viewports against the attachment; a stale viewport after a
/// skipped resize must not exceed the texture.
fn clip_viewport(viewport: Viewport, target: PixelSize) -> Viewport {
    let x = viewport.x.clamp(0, target.width as i32);
    let y = viewport.y.clamp(0, target.height as i32);
    let width = viewport.width.min(target.width - x as u32);
    let height = viewport.height.min(target.height - y as u32);
    Viewport::new(x, y, width, height)
}
