use std::cell::RefCell;
use std::rc::Rc;

use crate::coords::Viewport;
use crate::surface::DisplaySurface;

/// Handle to a rendering API bound to a display surface.
pub trait GraphicsContext {
    /// Sets the active rendering viewport.
    fn set_viewport(&mut self, viewport: Viewport);
}

impl<G: GraphicsContext + ?Sized> GraphicsContext for &mut G {
    fn set_viewport(&mut self, viewport: Viewport) {
        (**self).set_viewport(viewport)
    }
}

impl<G: GraphicsContext + ?Sized> GraphicsContext for Rc<RefCell<G>> {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.borrow_mut().set_viewport(viewport)
    }
}

/// Points `context` at the full backing store of `surface`.
///
/// Run after `resize_to_display`; the viewport reflects the backing-store size
/// at the time of the call and is not updated by later resizes.
pub fn bind_viewport<G, S>(context: &mut G, surface: &S) -> Viewport
where
    G: GraphicsContext + ?Sized,
    S: DisplaySurface + ?Sized,
{
    let viewport = Viewport::covering(surface.backing_size());
    log::debug!("binding viewport {}x{}", viewport.width, viewport.height);
    context.set_viewport(viewport);
    viewport
}
