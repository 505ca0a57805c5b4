/// Surface and adapter preferences for the native GPU context.
///
/// Preferences the surface cannot honor fall back to what it reports as
/// supported.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Pick an sRGB swapchain format when one is offered.
    pub prefer_srgb: bool,

    /// Swap behavior. `Fifo` paces redraws to the display refresh, which is
    /// what gives the native frame loop its cadence.
    pub present_mode: wgpu::PresentMode,

    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub power_preference: wgpu::PowerPreference,

    /// Backend-dependent hint.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            power_preference: wgpu::PowerPreference::HighPerformance,
            desired_maximum_frame_latency: 2,
        }
    }
}
