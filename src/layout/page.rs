use crate::error::Error;
use crate::surface::{DrawingSurface, Layer};

use super::branding::{PageTotal, draw_footer, draw_header};
use super::context::{EPSILON, Phase};
use super::LayoutContext;

impl<S: DrawingSurface> LayoutContext<'_, S> {
    pub fn fits(&self, required_height: f32) -> bool {
        self.cursor.y + required_height <= self.geometry.content_end_y + EPSILON
    }

    /// Start a new page if `required_height` does not fit below the cursor.
    /// Every overflow decision in the engine goes through here.
    pub fn check_new_page(&mut self, required_height: f32) -> bool {
        if self.fits(required_height) {
            return false;
        }
        if self.at_content_top() {
            // A fresh page would not have more room than this one.
            log::warn!(
                "{required_height:.1}pt does not fit in the {:.1}pt content band; drawing on page {} anyway",
                self.geometry.available_height,
                self.cursor.page,
            );
            return false;
        }
        self.break_page();
        true
    }

    /// Reserve room for a block that must not be split across pages.
    pub fn keep_together(&mut self, block: &'static str, height: f32) -> Result<bool, Error> {
        if height > self.geometry.available_height + EPSILON {
            return Err(Error::AtomicBlockTooTall {
                block,
                required: height,
                available: self.geometry.available_height,
            });
        }
        Ok(self.check_new_page(height))
    }

    fn break_page(&mut self) {
        let from = self.cursor.page;
        self.surface.new_page();
        self.cursor.page = self.surface.current_page_index();
        self.decorate_page();
        self.reset_to_content_top();
        log::debug!("Page break: {from} -> {}", self.cursor.page);
    }

    /// Header, then footer with a pending total, on the current page.
    pub(crate) fn decorate_page(&mut self) {
        self.phase = Phase::DrawingHeader;
        self.set_layer(Layer::Header);
        draw_header(&mut self.surface, &self.geometry, &self.branding);

        self.phase = Phase::DrawingFooter;
        self.set_layer(Layer::Footer);
        draw_footer(
            &mut self.surface,
            &self.geometry,
            &self.branding,
            self.cursor.page,
            PageTotal::Pending,
        );

        self.set_layer(Layer::Content);
        self.phase = Phase::DrawingContent;
    }
}
