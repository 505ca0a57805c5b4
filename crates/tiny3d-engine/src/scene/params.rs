use std::fmt;

/// Camera construction parameters.
///
/// `lens` is the engine-specific scalar (field of view or focal parameter);
/// this layer only requires it to be finite and positive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraParams {
    pub near: f32,
    pub far: f32,
    pub lens: f32,
    pub aspect: f32,
}

impl CameraParams {
    /// Builds and validates a parameter set.
    pub fn new(near: f32, far: f32, lens: f32, aspect: f32) -> Result<Self, ParamsError> {
        let params = Self { near, far, lens, aspect };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        let fields = [
            ("near", self.near),
            ("far", self.far),
            ("lens", self.lens),
            ("aspect", self.aspect),
        ];
        if let Some((field, value)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(ParamsError::NonFinite { field, value });
        }

        if self.near <= 0.0 {
            return Err(ParamsError::NonPositiveNear(self.near));
        }
        if self.far <= 0.0 {
            return Err(ParamsError::NonPositiveFar(self.far));
        }
        if self.far <= self.near {
            return Err(ParamsError::FarNotBeyondNear {
                near: self.near,
                far: self.far,
            });
        }
        if self.aspect <= 0.0 {
            return Err(ParamsError::NonPositiveAspect(self.aspect));
        }
        if self.lens <= 0.0 {
            return Err(ParamsError::NonPositiveLens(self.lens));
        }
        Ok(())
    }
}

/// Rejected camera configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamsError {
    NonFinite { field: &'static str, value: f32 },
    NonPositiveNear(f32),
    NonPositiveFar(f32),
    FarNotBeyondNear { near: f32, far: f32 },
    NonPositiveAspect(f32),
    NonPositiveLens(f32),
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite { field, value } => write!(f, "camera {field} is not finite ({value})"),
            Self::NonPositiveNear(v) => write!(f, "camera near plane must be positive, got {v}"),
            Self::NonPositiveFar(v) => write!(f, "camera far plane must be positive, got {v}"),
            Self::FarNotBeyondNear { near, far } => {
                write!(f, "camera far plane ({far}) must be beyond near plane ({near})")
            }
            Self::NonPositiveAspect(v) => write!(f, "camera aspect ratio must be positive, got {v}"),
            Self::NonPositiveLens(v) => write!(f, "camera lens parameter must be positive, got {v}"),
        }
    }
}

impl std::error::Error for ParamsError {}
