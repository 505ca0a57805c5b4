use crate::coords::PixelSize;
use crate::scene::CameraParams;

/// When the stage re-synchronizes after startup.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ResizePolicy {
    /// Size the backing store and bind the viewport once, at startup.
    #[default]
    StartupOnly,
    /// Also re-run both on every host resize notification.
    Track,
}

/// Startup parameters.
///
/// The camera aspect comes from `design_size`, not from the measured surface.
#[derive(Debug, Clone)]
pub struct BootConfig {
    pub design_size: PixelSize,
    pub near: f32,
    pub far: f32,
    pub lens: f32,
    pub resize: ResizePolicy,
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            design_size: PixelSize::new(800, 600),
            near: 1.0,
            far: 2000.0,
            lens: 50.0,
            resize: ResizePolicy::StartupOnly,
        }
    }
}

impl BootConfig {
    /// Camera parameters derived from this configuration. Not validated here;
    /// an empty design size yields a zero aspect that scene construction rejects.
    pub fn camera_params(&self) -> CameraParams {
        CameraParams {
            near: self.near,
            far: self.far,
            lens: self.lens,
            aspect: self.design_size.aspect().unwrap_or(0.0),
        }
    }
}
