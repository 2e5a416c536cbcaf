//! The drawing sink the layout engine targets.
//!
//! Coordinates are PDF points measured from the top-left corner of the page,
//! `y` growing downwards. `draw_text` positions the baseline.

mod recording;

use std::fmt;
use std::sync::Arc;

pub use recording::{Document, Page, PageOp, RasterImage, RecordingSurface};

use crate::error::Error;
use crate::fonts::FontStyle;

/// Which part of the page an operation belongs to. The footer layer is what
/// the finalizer clears and redraws once the page total is known.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Layer {
    Header,
    Content,
    Footer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Stroke,
    Fill,
}

/// Shared, undecoded image bytes (PNG or JPEG).
#[derive(Clone)]
pub struct ImageRef(Arc<[u8]>);

impl ImageRef {
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    pub fn bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn same(&self, other: &ImageRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ImageRef({} bytes)", self.0.len())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    Text {
        text: String,
        x: f32,
        y: f32,
        font_size: f32,
        style: FontStyle,
        color: [u8; 3],
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: [u8; 3],
    },
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        paint: Paint,
        width: f32,
        color: [u8; 3],
    },
    Image {
        image: Arc<RasterImage>,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
    },
}

pub trait DrawingSurface {
    fn set_font(&mut self, size: f32, style: FontStyle);
    fn set_color(&mut self, color: [u8; 3]);
    fn set_line_width(&mut self, width: f32);

    fn draw_text(&mut self, text: &str, x: f32, y: f32);
    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32);
    fn draw_rect(&mut self, x: f32, y: f32, w: f32, h: f32, paint: Paint);
    fn draw_image(&mut self, image: &ImageRef, x: f32, y: f32, w: f32, h: f32)
    -> Result<(), Error>;
    /// Pixel size of an image; fails when the bytes cannot be decoded.
    fn image_dimensions(&mut self, image: &ImageRef) -> Result<(u32, u32), Error>;

    /// Width of `text` in the current font.
    fn text_width(&self, text: &str) -> f32;
    /// Distance from the top of the em box to the baseline in the current font.
    fn ascent(&self) -> f32;

    fn new_page(&mut self);
    /// Make an existing page (1-based) the target of subsequent drawing.
    fn select_page(&mut self, index: usize) -> Result<(), Error>;
    /// 1-based index of the page being drawn on.
    fn current_page_index(&self) -> usize;
    fn page_count(&self) -> usize;

    fn set_layer(&mut self, layer: Layer);
    /// Remove everything drawn on `layer` of the current page.
    fn clear_layer(&mut self, layer: Layer);
}
