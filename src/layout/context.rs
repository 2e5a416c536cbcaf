use crate::config::Theme;
use crate::fonts::FontStyle;
use crate::model::CompanyProfile;
use crate::surface::{DrawingSurface, ImageRef, Layer, Paint};

use super::LayoutGeometry;
use super::text::{TextStyle, line_height};

/// Tolerance for floating-point comparisons against band edges.
pub(crate) const EPSILON: f32 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cursor {
    /// Top of the next line box.
    pub y: f32,
    /// 1-based page index.
    pub page: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    DrawingHeader,
    DrawingContent,
    DrawingFooter,
    Finalizing,
}

/// What the header and footer are drawn from.
#[derive(Clone, Debug)]
pub struct Branding<'a> {
    pub company: &'a CompanyProfile,
    /// Logo bytes, already read; decoding happens at draw time.
    pub logo: Option<ImageRef>,
    pub theme: Theme,
    pub generator: &'a str,
}

/// Mutable layout state for one generation call: the cursor, the page being
/// filled and the surface it draws on.
pub struct LayoutContext<'a, S: DrawingSurface> {
    pub(super) surface: S,
    pub(super) geometry: LayoutGeometry,
    pub(super) branding: Branding<'a>,
    pub(super) cursor: Cursor,
    pub(super) phase: Phase,
}

impl<'a, S: DrawingSurface> LayoutContext<'a, S> {
    /// Take over `surface` and decorate its current page (creating one if it
    /// has none). The cursor starts at the top of the content band.
    pub fn new(mut surface: S, geometry: LayoutGeometry, branding: Branding<'a>) -> Self {
        if surface.page_count() == 0 {
            surface.new_page();
        }
        let page = surface.current_page_index();
        let mut ctx = Self {
            surface,
            geometry,
            branding,
            cursor: Cursor {
                y: geometry.content_start_y,
                page,
            },
            phase: Phase::DrawingHeader,
        };
        ctx.decorate_page();
        ctx
    }

    pub fn geometry(&self) -> &LayoutGeometry {
        &self.geometry
    }

    pub fn branding(&self) -> &Branding<'a> {
        &self.branding
    }

    pub fn theme(&self) -> &Theme {
        &self.branding.theme
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor.y
    }

    pub fn current_page(&self) -> usize {
        self.cursor.page
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor.y += dy;
    }

    pub fn reset_to_content_top(&mut self) {
        self.cursor.y = self.geometry.content_start_y;
    }

    pub(crate) fn at_content_top(&self) -> bool {
        (self.cursor.y - self.geometry.content_start_y).abs() < EPSILON
    }

    /// Space left between the cursor and the bottom of the content band.
    pub fn remaining_height(&self) -> f32 {
        (self.geometry.content_end_y - self.cursor.y).max(0.0)
    }

    pub(crate) fn apply_style(&mut self, style: &TextStyle) {
        self.surface.set_font(style.size, style.style);
        self.surface.set_color(style.color);
    }

    pub fn text_width(&mut self, text: &str, style: &TextStyle) -> f32 {
        self.apply_style(style);
        self.surface.text_width(text)
    }

    /// Baseline for a line of `style` whose box starts at `top`.
    pub(crate) fn baseline(&self, top: f32, style: &TextStyle) -> f32 {
        top + (line_height(style.size) - style.size) / 2.0 + self.surface.ascent()
    }

    fn debug_check_in_band(&self) {
        debug_assert_eq!(self.phase, Phase::DrawingContent);
        debug_assert!(
            self.cursor.y >= self.geometry.content_start_y - EPSILON
                && self.cursor.y <= self.geometry.content_end_y + EPSILON,
            "cursor {} outside content band [{}, {}]",
            self.cursor.y,
            self.geometry.content_start_y,
            self.geometry.content_end_y,
        );
    }

    /// Draw one unwrapped line whose box starts at `top`. The cursor is not moved.
    pub fn text_at(&mut self, text: &str, x: f32, top: f32, style: &TextStyle) {
        self.debug_check_in_band();
        self.apply_style(style);
        let y = self.baseline(top, style);
        self.surface.draw_text(text, x, y);
    }

    pub fn rule(&mut self, x1: f32, x2: f32, y: f32, width: f32, color: [u8; 3]) {
        self.debug_check_in_band();
        self.surface.set_color(color);
        self.surface.set_line_width(width);
        self.surface.draw_line(x1, y, x2, y);
    }

    pub fn frame(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: [u8; 3]) {
        self.debug_check_in_band();
        self.surface.set_color(color);
        self.surface.set_line_width(width);
        self.surface.draw_rect(x, y, w, h, Paint::Stroke);
    }

    pub(crate) fn body_style(&self) -> TextStyle {
        TextStyle::new(BODY_FONT_SIZE, FontStyle::Normal, self.branding.theme.text)
    }

    pub(crate) fn set_layer(&mut self, layer: Layer) {
        self.surface.set_layer(layer);
    }
}

pub(crate) const BODY_FONT_SIZE: f32 = 10.0;
