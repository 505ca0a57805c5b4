use std::fmt;

use super::{Advance, CameraParams, Engine, ParamsError};

/// Failure while composing a scene.
#[derive(Debug)]
pub enum SceneError<E> {
    InvalidParams(ParamsError),
    Camera(E),
    Renderer(E),
    Environment(E),
}

impl<E: fmt::Display> fmt::Display for SceneError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams(e) => write!(f, "invalid camera configuration: {e}"),
            Self::Camera(e) => write!(f, "failed to create camera: {e}"),
            Self::Renderer(e) => write!(f, "failed to create renderer: {e}"),
            Self::Environment(e) => write!(f, "failed to create environment: {e}"),
        }
    }
}

impl<E> std::error::Error for SceneError<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidParams(e) => Some(e),
            Self::Camera(e) | Self::Renderer(e) | Self::Environment(e) => Some(e),
        }
    }
}

/// Entry of the construction chain. Holds the engine until a camera exists.
///
/// ```
/// # use std::convert::Infallible;
/// # use tiny3d_engine::scene::{Advance, CameraParams, Engine, SceneBuilder};
/// # struct Env;
/// # impl Advance for Env {
/// #     fn advance(&mut self) -> anyhow::Result<()> { Ok(()) }
/// # }
/// # struct Stub;
/// # impl Engine for Stub {
/// #     type Camera = ();
/// #     type Renderer = ();
/// #     type Environment = Env;
/// #     type Error = Infallible;
/// #     fn create_camera(&mut self, _: &CameraParams) -> Result<(), Infallible> { Ok(()) }
/// #     fn create_renderer(&mut self, _: ()) -> Result<(), Infallible> { Ok(()) }
/// #     fn create_environment(&mut self, _: ()) -> Result<Env, Infallible> { Ok(Env) }
/// # }
/// # let params = CameraParams::new(1.0, 2000.0, 50.0, 800.0 / 600.0).unwrap();
/// let mut scene = SceneBuilder::new(Stub)
///     .camera(params)
///     .unwrap()
///     .renderer()
///     .unwrap()
///     .environment()
///     .unwrap();
/// scene.advance().unwrap();
/// ```
///
/// A renderer cannot be built before the camera:
///
/// ```compile_fail
/// # use std::convert::Infallible;
/// # use tiny3d_engine::scene::{Advance, CameraParams, Engine, SceneBuilder};
/// # struct Env;
/// # impl Advance for Env {
/// #     fn advance(&mut self) -> anyhow::Result<()> { Ok(()) }
/// # }
/// # struct Stub;
/// # impl Engine for Stub {
/// #     type Camera = ();
/// #     type Renderer = ();
/// #     type Environment = Env;
/// #     type Error = Infallible;
/// #     fn create_camera(&mut self, _: &CameraParams) -> Result<(), Infallible> { Ok(()) }
/// #     fn create_renderer(&mut self, _: ()) -> Result<(), Infallible> { Ok(()) }
/// #     fn create_environment(&mut self, _: ()) -> Result<Env, Infallible> { Ok(Env) }
/// # }
/// # let params = CameraParams::new(1.0, 2000.0, 50.0, 800.0 / 600.0).unwrap();
/// let _ = SceneBuilder::new(Stub).renderer();
/// ```
///
/// nor an environment before the renderer:
///
/// ```compile_fail
/// # use std::convert::Infallible;
/// # use tiny3d_engine::scene::{Advance, CameraParams, Engine, SceneBuilder};
/// # struct Env;
/// # impl Advance for Env {
/// #     fn advance(&mut self) -> anyhow::Result<()> { Ok(()) }
/// # }
/// # struct Stub;
/// # impl Engine for Stub {
/// #     type Camera = ();
/// #     type Renderer = ();
/// #     type Environment = Env;
/// #     type Error = Infallible;
/// #     fn create_camera(&mut self, _: &CameraParams) -> Result<(), Infallible> { Ok(()) }
/// #     fn create_renderer(&mut self, _: ()) -> Result<(), Infallible> { Ok(()) }
/// #     fn create_environment(&mut self, _: ()) -> Result<Env, Infallible> { Ok(Env) }
/// # }
/// # let params = CameraParams::new(1.0, 2000.0, 50.0, 800.0 / 600.0).unwrap();
/// let _ = SceneBuilder::new(Stub).camera(params).unwrap().environment();
/// ```
pub struct SceneBuilder<E: Engine> {
    engine: E,
}

impl<E: Engine> SceneBuilder<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Validates `params` and builds the camera.
    pub fn camera(mut self, params: CameraParams) -> Result<CameraStage<E>, SceneError<E::Error>> {
        params.validate().map_err(SceneError::InvalidParams)?;
        let camera = self
            .engine
            .create_camera(&params)
            .map_err(SceneError::Camera)?;
        log::debug!(
            "camera created (near {}, far {}, aspect {:.3})",
            params.near,
            params.far,
            params.aspect
        );
        Ok(CameraStage {
            engine: self.engine,
            camera,
        })
    }
}

/// A camera exists; the renderer is next.
pub struct CameraStage<E: Engine> {
    engine: E,
    camera: E::Camera,
}

impl<E: Engine> CameraStage<E> {
    pub fn renderer(mut self) -> Result<RendererStage<E>, SceneError<E::Error>> {
        let renderer = self
            .engine
            .create_renderer(self.camera)
            .map_err(SceneError::Renderer)?;
        log::debug!("renderer created");
        Ok(RendererStage {
            engine: self.engine,
            renderer,
        })
    }
}

/// A renderer exists; the environment completes the scene.
pub struct RendererStage<E: Engine> {
    engine: E,
    renderer: E::Renderer,
}

impl<E: Engine> RendererStage<E> {
    pub fn environment(mut self) -> Result<SceneHandle<E::Environment>, SceneError<E::Error>> {
        let environment = self
            .engine
            .create_environment(self.renderer)
            .map_err(SceneError::Environment)?;
        log::info!("scene composed");
        Ok(SceneHandle::new(environment))
    }
}

/// The composed scene. Only `advance` is exposed.
pub struct SceneHandle<V> {
    environment: V,
    advances: u64,
}

impl<V: Advance> SceneHandle<V> {
    pub(crate) fn new(environment: V) -> Self {
        Self {
            environment,
            advances: 0,
        }
    }

    pub fn advance(&mut self) -> anyhow::Result<()> {
        self.advances = self.advances.wrapping_add(1);
        self.environment.advance()
    }

    /// Number of advance calls made so far, including failed ones.
    pub fn advances(&self) -> u64 {
        self.advances
    }
}
