use crate::coords::Viewport;
use crate::device::{bind_viewport, GraphicsContext};
use crate::surface::{resize_to_display, DisplaySurface};

/// A display surface paired with the graphics context rendering into it.
pub struct Stage<S, G> {
    surface: S,
    context: G,
    viewport: Option<Viewport>,
}

impl<S, G> Stage<S, G>
where
    S: DisplaySurface,
    G: GraphicsContext,
{
    pub fn new(surface: S, context: G) -> Self {
        Self {
            surface,
            context,
            viewport: None,
        }
    }

    /// Startup geometry: size the backing store, then bind the viewport
    /// unconditionally.
    pub fn establish(&mut self) -> Viewport {
        resize_to_display(&mut self.surface);
        let viewport = bind_viewport(&mut self.context, &self.surface);
        self.viewport = Some(viewport);
        viewport
    }

    /// Re-synchronizes after a layout change. The viewport is re-bound only
    /// when the backing store actually changed (or was never bound).
    pub fn sync(&mut self) -> bool {
        let resized = resize_to_display(&mut self.surface);
        if resized || self.viewport.is_none() {
            self.viewport = Some(bind_viewport(&mut self.context, &self.surface));
        }
        resized
    }

    /// Viewport bound by the last `establish`/`sync`, if any.
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn context(&self) -> &G {
        &self.context
    }
}
