use super::PixelSize;

/// Active rendering rectangle in backing-store pixels.
///
/// Mirrors the arguments of `glViewport` / `RenderPass::set_viewport`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Viewport covering the whole of `size`, anchored at the origin.
    #[inline]
    pub const fn covering(size: PixelSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    #[inline]
    pub fn size(self) -> PixelSize {
        PixelSize::new(self.width, self.height)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}
