use crate::error::Error;
use crate::surface::{DrawingSurface, Layer};

use super::branding::{PageTotal, draw_footer};
use super::context::Phase;
use super::{Branding, LayoutContext, LayoutGeometry};

/// Redraw every footer with the real page total. Running it twice produces
/// the same footers. Returns the page count.
pub fn finalize<S: DrawingSurface>(
    surface: &mut S,
    geometry: &LayoutGeometry,
    branding: &Branding<'_>,
) -> Result<usize, Error> {
    let total = surface.page_count();
    let current = surface.current_page_index();

    for index in 1..=total {
        surface.select_page(index)?;
        surface.clear_layer(Layer::Footer);
        surface.set_layer(Layer::Footer);
        draw_footer(surface, geometry, branding, index, PageTotal::Known(total));
    }

    surface.set_layer(Layer::Content);
    if total > 0 {
        surface.select_page(current)?;
    }
    log::debug!("Stamped page totals on {total} page(s)");
    Ok(total)
}

impl<S: DrawingSurface> LayoutContext<'_, S> {
    pub fn finalize(&mut self) -> Result<usize, Error> {
        self.phase = Phase::Finalizing;
        finalize(&mut self.surface, &self.geometry, &self.branding)
    }

    /// Finalize and hand back the surface.
    pub fn finish(mut self) -> Result<S, Error> {
        self.finalize()?;
        Ok(self.surface)
    }
}
