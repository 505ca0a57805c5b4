/// Per-frame entry point of a composed scene.
pub trait Advance {
    /// Updates and renders one frame. Takes no time delta.
    fn advance(&mut self) -> anyhow::Result<()>;
}

impl<A: Advance + ?Sized> Advance for Box<A> {
    fn advance(&mut self) -> anyhow::Result<()> {
        (**self).advance()
    }
}

/// Capability interface of a 3D engine.
///
/// Each constructor consumes the product of the previous one, so the
/// Environment owns the Renderer which owns the Camera.
pub trait Engine {
    type Camera;
    type Renderer;
    type Environment: Advance;
    type Error: std::error::Error + Send + Sync + 'static;

    fn create_camera(&mut self, params: &super::CameraParams) -> Result<Self::Camera, Self::Error>;

    fn create_renderer(&mut self, camera: Self::Camera) -> Result<Self::Renderer, Self::Error>;

    fn create_environment(
        &mut self,
        renderer: Self::Renderer,
    ) -> Result<Self::Environment, Self::Error>;
}
