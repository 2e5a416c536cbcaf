use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::{DrawOp, DrawingSurface, ImageRef, Layer, Paint};
use crate::error::Error;
use crate::fonts::{FontSet, FontStyle};

/// Decoded pixels, ready to be embedded.
#[derive(Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub alpha: Option<Vec<u8>>,
}

impl fmt::Debug for RasterImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RasterImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("alpha", &self.alpha.is_some())
            .finish()
    }
}

impl RasterImage {
    pub fn decode(bytes: &[u8]) -> Result<Self, Error> {
        let decoded = image::load_from_memory(bytes)?;
        let rgba: image::RgbaImage = decoded.to_rgba8();
        let (width, height) = (rgba.width(), rgba.height());
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

        let rgb: Vec<u8> = rgba
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();
        let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());

        Ok(Self {
            width,
            height,
            rgb,
            alpha,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageOp {
    pub layer: Layer,
    pub op: DrawOp,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    ops: Vec<PageOp>,
}

impl Page {
    pub fn ops(&self) -> &[PageOp] {
        &self.ops
    }

    pub fn layer_ops(&self, layer: Layer) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(move |o| o.layer == layer)
            .map(|o| &o.op)
    }

    /// Text strings drawn on `layer`, in drawing order.
    pub fn texts(&self, layer: Layer) -> impl Iterator<Item = &str> {
        self.layer_ops(layer).filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn all_text(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|o| match &o.op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// A finished, sealed document: its page count no longer changes.
#[derive(Clone, Debug)]
pub struct Document {
    pub(crate) page_width: f32,
    pub(crate) page_height: f32,
    pub(crate) pages: Vec<Page>,
    pub(crate) fonts: Arc<FontSet>,
    pub(crate) title: Option<String>,
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.page_width == other.page_width
            && self.page_height == other.page_height
            && self.pages == other.pages
            && self.title == other.title
    }
}

impl Document {
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// 1-based page lookup.
    pub fn page(&self, index: usize) -> Option<&Page> {
        index.checked_sub(1).and_then(|i| self.pages.get(i))
    }

    pub fn page_size(&self) -> (f32, f32) {
        (self.page_width, self.page_height)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub(crate) fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn to_pdf(&self) -> Result<Vec<u8>, Error> {
        crate::pdf::render(self)
    }

    pub fn save(&self, path: &Path) -> Result<(), Error> {
        let bytes = self.to_pdf()?;
        std::fs::write(path, &bytes)?;
        log::info!("Wrote {} ({} pages, {} bytes)", path.display(), self.page_count(), bytes.len());
        Ok(())
    }
}

/// In-memory surface that records every primitive per page and layer.
/// Doubles as the test surface and as the input of the PDF writer.
pub struct RecordingSurface {
    page_width: f32,
    page_height: f32,
    fonts: Arc<FontSet>,
    pages: Vec<Page>,
    current: usize,
    font_size: f32,
    style: FontStyle,
    color: [u8; 3],
    line_width: f32,
    layer: Layer,
    decoded: Vec<(ImageRef, Result<Arc<RasterImage>, String>)>,
}

impl RecordingSurface {
    /// A surface holding one blank page.
    pub fn new(page_width: f32, page_height: f32, fonts: Arc<FontSet>) -> Self {
        Self {
            page_width,
            page_height,
            fonts,
            pages: vec![Page::default()],
            current: 0,
            font_size: 10.0,
            style: FontStyle::Normal,
            color: [0, 0, 0],
            line_width: 0.5,
            layer: Layer::Content,
            decoded: Vec::new(),
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_document(self) -> Document {
        Document {
            page_width: self.page_width,
            page_height: self.page_height,
            pages: self.pages,
            fonts: self.fonts,
            title: None,
        }
    }

    fn push(&mut self, op: DrawOp) {
        let layer = self.layer;
        self.pages[self.current].ops.push(PageOp { layer, op });
    }

    fn decode(&mut self, image: &ImageRef) -> Result<Arc<RasterImage>, Error> {
        let cached = self
            .decoded
            .iter()
            .find(|(r, _)| r.same(image))
            .map(|(_, res)| res.clone());
        let result = match cached {
            Some(res) => res,
            None => {
                let res = RasterImage::decode(image.bytes())
                    .map(Arc::new)
                    .map_err(|e| e.to_string());
                if let Err(e) = &res {
                    log::warn!("Image could not be decoded ({e}); it will not be drawn");
                }
                self.decoded.push((image.clone(), res.clone()));
                res
            }
        };
        result.map_err(Error::Image)
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_font(&mut self, size: f32, style: FontStyle) {
        self.font_size = size;
        self.style = style;
    }

    fn set_color(&mut self, color: [u8; 3]) {
        self.color = color;
    }

    fn set_line_width(&mut self, width: f32) {
        self.line_width = width;
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32) {
        self.push(DrawOp::Text {
            text: text.to_string(),
            x,
            y,
            font_size: self.font_size,
            style: self.style,
            color: self.color,
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.push(DrawOp::Line {
            x1,
            y1,
            x2,
            y2,
            width: self.line_width,
            color: self.color,
        });
    }

    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: Paint) {
        self.push(DrawOp::Rect {
            x,
            y,
            w,
            h,
            paint,
            width: self.line_width,
            color: self.color,
        });
    }

    fn draw_image(
        &mut self,
        image: &ImageRef,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    ) -> Result<(), Error> {
        let image = self.decode(image)?;
        self.push(DrawOp::Image { image, x, y, w, h });
        Ok(())
    }

    fn image_dimensions(&mut self, image: &ImageRef) -> Result<(u32, u32), Error> {
        self.decode(image).map(|img| (img.width, img.height))
    }

    fn text_width(&self, text: &str) -> f32 {
        self.fonts.face(self.style).text_width(text, self.font_size)
    }

    fn ascent(&self) -> f32 {
        self.fonts.face(self.style).ascender_ratio() * self.font_size
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.current = self.pages.len() - 1;
    }

    fn select_page(&mut self, index: usize) -> Result<(), Error> {
        if index == 0 || index > self.pages.len() {
            return Err(Error::PageOutOfRange {
                index,
                count: self.pages.len(),
            });
        }
        self.current = index - 1;
        Ok(())
    }

    fn current_page_index(&self) -> usize {
        self.current + 1
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    fn clear_layer(&mut self, layer: Layer) {
        self.pages[self.current].ops.retain(|o| o.layer != layer);
    }
}
