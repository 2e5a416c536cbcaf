use crate::fonts::FontStyle;
use crate::surface::DrawingSurface;

use super::LayoutContext;
use super::text::TextStyle;

const SECTION_SPACING: f32 = 14.0;
const TITLE_SIZE: f32 = 11.5;
const TITLE_RULE_GAP: f32 = 3.0;
const TITLE_BODY_GAP: f32 = 5.0;
const PARAGRAPH_GAP: f32 = 4.0;
pub(crate) const LABEL_WIDTH: f32 = 120.0;

/// One row under a section title.
#[derive(Clone, Debug, PartialEq)]
pub enum SectionRow {
    /// Bold label in the left column, wrapped value to its right.
    Field { label: String, value: String },
    /// Full-width wrapped text.
    Paragraph(String),
    Spacer(f32),
}

impl SectionRow {
    pub fn field(label: impl Into<String>, value: impl Into<String>) -> Self {
        SectionRow::Field {
            label: label.into(),
            value: value.into(),
        }
    }

    /// A field only when `value` has something in it.
    pub fn optional(label: impl Into<String>, value: Option<&str>) -> Option<Self> {
        let value = value.map(str::trim).filter(|v| !v.is_empty())?;
        Some(Self::field(label, value))
    }

    /// A field that is always shown, with `N/A` standing in for a missing value.
    pub fn identity(label: impl Into<String>, value: Option<&str>) -> Self {
        let value = value.map(str::trim).filter(|v| !v.is_empty()).unwrap_or("N/A");
        Self::field(label, value)
    }
}

impl<S: DrawingSurface> LayoutContext<'_, S> {
    fn title_style(&self) -> TextStyle {
        TextStyle::new(TITLE_SIZE, FontStyle::Bold, self.branding.theme.accent)
    }

    /// Title with an accent rule under it. The title is never left alone at
    /// the bottom of a page: there must be room for at least one body line.
    pub fn section_title(&mut self, title: &str) {
        let style = self.title_style();
        if !self.at_content_top() {
            self.advance(SECTION_SPACING);
        }
        let needed = style.line_height() + TITLE_RULE_GAP + TITLE_BODY_GAP + self.body_style().line_height();
        self.check_new_page(needed);

        let left = self.geometry.content_left();
        self.draw_wrapped(title, left, &style, None);

        self.advance(TITLE_RULE_GAP);
        let y = self.cursor.y;
        let right = self.geometry.content_right();
        let accent = self.branding.theme.accent;
        self.rule(left, right, y, 0.75, accent);
        self.advance(TITLE_BODY_GAP);
    }

    pub fn section(&mut self, title: &str, rows: &[SectionRow]) {
        self.section_with(title, |ctx| {
            for row in rows {
                ctx.section_row(row);
            }
        });
    }

    /// Title followed by whatever `body` draws.
    pub fn section_with(&mut self, title: &str, body: impl FnOnce(&mut Self)) {
        self.section_title(title);
        body(self);
    }

    pub fn section_row(&mut self, row: &SectionRow) {
        let body = self.body_style();
        let left = self.geometry.content_left();
        match row {
            SectionRow::Field { label, value } => {
                let label_style = TextStyle::new(body.size, FontStyle::Bold, self.branding.theme.muted);
                self.check_new_page(body.line_height());
                let top = self.cursor.y;
                self.text_at(label, left, top, &label_style);
                if value.trim().is_empty() {
                    self.advance(body.line_height());
                } else {
                    self.draw_wrapped(value, left + LABEL_WIDTH, &body, None);
                }
            }
            SectionRow::Paragraph(text) => {
                self.draw_wrapped(text, left, &body, None);
                self.advance(PARAGRAPH_GAP);
            }
            SectionRow::Spacer(h) => {
                if !self.check_new_page(*h) {
                    self.advance(*h);
                }
            }
        }
    }
}
