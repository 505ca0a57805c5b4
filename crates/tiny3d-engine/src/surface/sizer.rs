use crate::coords::PixelSize;

/// On-screen drawing target with a layout size and a backing-store size.
pub trait DisplaySurface {
    /// Size the host currently displays the surface at.
    fn display_size(&self) -> PixelSize;

    /// Current backing-store resolution.
    fn backing_size(&self) -> PixelSize;

    /// Replaces the backing-store resolution.
    fn set_backing_size(&mut self, size: PixelSize);
}

impl<S: DisplaySurface + ?Sized> DisplaySurface for &mut S {
    fn display_size(&self) -> PixelSize {
        (**self).display_size()
    }

    fn backing_size(&self) -> PixelSize {
        (**self).backing_size()
    }

    fn set_backing_size(&mut self, size: PixelSize) {
        (**self).set_backing_size(size)
    }
}

/// Makes the backing store match the display size.
///
/// Returns `true` if the backing store was changed. Calling it again without an
/// intervening layout change returns `false` and leaves the surface untouched.
/// A detached or zero-sized surface ends up with an empty backing store.
pub fn resize_to_display<S>(surface: &mut S) -> bool
where
    S: DisplaySurface + ?Sized,
{
    let display = surface.display_size();
    let backing = surface.backing_size();

    if display == backing {
        return false;
    }

    log::debug!(
        "resizing backing store {}x{} -> {}x{}",
        backing.width,
        backing.height,
        display.width,
        display.height
    );
    surface.set_backing_size(display);
    true
}
