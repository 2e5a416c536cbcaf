use crate::fonts::FontStyle;
use crate::surface::DrawingSurface;

use super::LayoutContext;

pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub style: FontStyle,
    pub color: [u8; 3],
}

impl TextStyle {
    pub fn new(size: f32, style: FontStyle, color: [u8; 3]) -> Self {
        Self { size, style, color }
    }

    pub fn line_height(&self) -> f32 {
        line_height(self.size)
    }

    pub fn bold(self) -> Self {
        Self {
            style: FontStyle::Bold,
            ..self
        }
    }
}

/// Split `text` into lines no wider than `max_width`.
///
/// Explicit newlines start a new line (blank lines are kept, trailing ones
/// dropped). Runs of whitespace collapse to a single space. A word wider than
/// the line on its own is broken between characters.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    if text.trim().is_empty() {
        return lines;
    }
    let space_w = measure(" ");

    for paragraph in text.split('\n') {
        let mut current = String::new();
        let mut current_w: f32 = 0.0;

        for word in paragraph.split_whitespace() {
            let ww = measure(word);

            if ww > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = break_word(word, max_width, &measure);
                // The tail of the broken word keeps the line open for what follows.
                if let Some(last) = pieces.pop() {
                    lines.extend(pieces);
                    current_w = measure(&last);
                    current = last;
                }
                continue;
            }

            let proposed = if current.is_empty() {
                ww
            } else {
                current_w + space_w + ww
            };
            if !current.is_empty() && proposed > max_width {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
                current_w = ww;
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
                current_w = proposed;
            }
        }
        lines.push(current);
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

fn break_word(word: &str, max_width: f32, measure: &impl Fn(&str) -> f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_w: f32 = 0.0;
    let mut buf = [0u8; 4];
    for ch in word.chars() {
        let cw = measure(ch.encode_utf8(&mut buf));
        if !piece.is_empty() && piece_w + cw > max_width {
            pieces.push(std::mem::take(&mut piece));
            piece_w = 0.0;
        }
        piece.push(ch);
        piece_w += cw;
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

impl<S: DrawingSurface> LayoutContext<'_, S> {
    /// Wrap `text` starting at `x` and draw it line by line from the cursor,
    /// breaking pages whenever the next line would cross the bottom of the
    /// content band. Returns the new cursor y.
    ///
    /// The wrap width is `max_width` when given, otherwise the rest of the
    /// column right of `x`. An override wider than the rest of the column is
    /// clamped to it.
    pub fn draw_wrapped(
        &mut self,
        text: &str,
        x: f32,
        style: &TextStyle,
        max_width: Option<f32>,
    ) -> f32 {
        if text.trim().is_empty() {
            return self.cursor.y;
        }

        self.apply_style(style);
        let width = self.wrap_width(x, max_width);
        let lines = {
            let surface = &self.surface;
            wrap_text(text, width, |s| surface.text_width(s))
        };

        let lh = style.line_height();
        for line in &lines {
            self.check_new_page(lh);
            if !line.is_empty() {
                let top = self.cursor.y;
                self.text_at(line, x, top, style);
            }
            self.advance(lh);
        }
        self.cursor.y
    }

    fn wrap_width(&self, x: f32, max_width: Option<f32>) -> f32 {
        let remaining = self.geometry.content_right() - x;
        let width = match max_width {
            Some(w) if w > remaining => {
                log::debug!("Clamping wrap width {w:.1}pt to the {remaining:.1}pt left in the column");
                remaining
            }
            Some(w) => w,
            None => remaining,
        };
        width.max(1.0)
    }
}
