//! Company header and page footer.
//!
//! Both draw straight onto the surface inside their own bands and never see
//! the layout cursor, so content flow is unaffected by them.

use std::borrow::Cow;
use std::fmt;

use crate::fonts::FontStyle;
use crate::model::{CompanyProfile, present};
use crate::surface::{DrawingSurface, ImageRef};

use super::{Branding, LayoutGeometry};

const NAME_SIZE: f32 = 14.0;
const MIN_NAME_SIZE: f32 = 6.0;
const DETAIL_SIZE: f32 = 8.5;
const DETAIL_LEADING: f32 = 11.0;
const LOGO_MAX_WIDTH: f32 = 120.0;
const LOGO_GAP: f32 = 12.0;
const BAND_PADDING: f32 = 8.0;
const FOOTER_SIZE: f32 = 7.5;
/// Depth below the baseline reserved for descenders, as a fraction of the size.
const DESCENT_RATIO: f32 = 0.22;
const ELLIPSIS: &str = "...";

pub const TOTAL_PLACEHOLDER: &str = "?";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageTotal {
    Pending,
    Known(usize),
}

impl fmt::Display for PageTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageTotal::Pending => f.write_str(TOTAL_PLACEHOLDER),
            PageTotal::Known(n) => write!(f, "{n}"),
        }
    }
}

pub fn page_stamp(index: usize, total: PageTotal) -> String {
    format!("Page {index} of {total}")
}

/// `address, postal city (province)`, skipping whatever is missing.
fn address_line(company: &CompanyProfile) -> Option<String> {
    let mut locality = [present(&company.postal_code), present(&company.city)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    if let Some(province) = present(&company.province) {
        if locality.is_empty() {
            locality = province.to_string();
        } else {
            locality = format!("{locality} ({province})");
        }
    }
    let parts: Vec<&str> = [present(&company.address), Some(locality.as_str())]
        .into_iter()
        .flatten()
        .filter(|s| !s.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

fn contact_line(company: &CompanyProfile) -> Option<String> {
    let parts: Vec<String> = [
        present(&company.phone).map(|p| format!("Tel: {p}")),
        present(&company.email).map(|e| format!("Email: {e}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    (!parts.is_empty()).then(|| parts.join("  |  "))
}

/// Company detail lines under the name, absent fields omitted.
pub fn header_details(company: &CompanyProfile) -> Vec<String> {
    [
        address_line(company),
        contact_line(company),
        present(&company.vat_number).map(|v| format!("VAT No. {v}")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Draw the logo scaled into the header band. Returns the width it took, or
/// `None` if it could not be drawn.
fn draw_logo<S: DrawingSurface>(
    surface: &mut S,
    geometry: &LayoutGeometry,
    logo: &ImageRef,
) -> Option<f32> {
    let (px_w, px_h) = match surface.image_dimensions(logo) {
        Ok(dims) => dims,
        Err(e) => {
            log::debug!("Logo skipped ({e}); using a text-only header");
            return None;
        }
    };
    if px_w == 0 || px_h == 0 {
        return None;
    }

    let max_h = (geometry.page.header_height - 2.0 * BAND_PADDING).max(0.0);
    let scale = (max_h / px_h as f32).min(LOGO_MAX_WIDTH / px_w as f32);
    let (w, h) = (px_w as f32 * scale, px_h as f32 * scale);
    if w <= 0.0 || h <= 0.0 {
        return None;
    }

    match surface.draw_image(logo, geometry.content_left(), geometry.header_top(), w, h) {
        Ok(()) => Some(w),
        Err(e) => {
            log::debug!("Logo could not be drawn ({e}); using a text-only header");
            None
        }
    }
}

/// `text` cut short with an ellipsis so it fits `max_width` in the current
/// font, or `None` when not even the ellipsis fits.
fn fit_width<'a, S: DrawingSurface>(
    surface: &S,
    text: &'a str,
    max_width: f32,
) -> Option<Cow<'a, str>> {
    if surface.text_width(text) <= max_width {
        return Some(Cow::Borrowed(text));
    }
    let mut end = text.len();
    while let Some((i, _)) = text[..end].char_indices().next_back() {
        end = i;
        let candidate = format!("{}{ELLIPSIS}", text[..end].trim_end());
        if surface.text_width(&candidate) <= max_width {
            return Some(Cow::Owned(candidate));
        }
    }
    None
}

/// Draw the company block. Lines that would reach past the band are left
/// out, and lines wider than the space beside the logo are shortened.
pub fn draw_header<S: DrawingSurface>(
    surface: &mut S,
    geometry: &LayoutGeometry,
    branding: &Branding<'_>,
) {
    let company = branding.company;
    let theme = &branding.theme;

    let mut text_x = geometry.content_left();
    if let Some(logo) = &branding.logo
        && let Some(w) = draw_logo(surface, geometry, logo)
    {
        text_x += w + LOGO_GAP;
    }
    let max_width = geometry.content_right() - text_x;
    let top = geometry.header_top();
    let limit = geometry.content_start_y - BAND_PADDING;

    let name_size = NAME_SIZE.min((limit - top) / (1.0 + DESCENT_RATIO));
    let mut baseline = top + name_size;
    if name_size >= MIN_NAME_SIZE {
        surface.set_font(name_size, FontStyle::Bold);
        surface.set_color(theme.accent);
        if let Some(name) = fit_width(surface, &company.name, max_width) {
            surface.draw_text(&name, text_x, baseline);
        }
    } else {
        log::debug!("Header band too short for the company name");
    }

    surface.set_font(DETAIL_SIZE, FontStyle::Normal);
    surface.set_color(theme.muted);
    baseline += DETAIL_LEADING + 2.0;
    for line in header_details(company) {
        if baseline + DETAIL_SIZE * DESCENT_RATIO > limit {
            log::debug!("Header band full; omitting {line:?} and the lines after it");
            break;
        }
        if let Some(line) = fit_width(surface, &line, max_width) {
            surface.draw_text(&line, text_x, baseline);
        }
        baseline += DETAIL_LEADING;
    }

    surface.set_color(theme.accent);
    surface.set_line_width(1.0);
    surface.draw_line(geometry.content_left(), limit, geometry.content_right(), limit);
}

pub fn draw_footer<S: DrawingSurface>(
    surface: &mut S,
    geometry: &LayoutGeometry,
    branding: &Branding<'_>,
    page_index: usize,
    total: PageTotal,
) {
    let theme = &branding.theme;
    let rule_y = geometry.content_end_y + BAND_PADDING;
    surface.set_color(theme.muted);
    surface.set_line_width(0.5);
    surface.draw_line(geometry.content_left(), rule_y, geometry.content_right(), rule_y);

    let baseline = rule_y + BAND_PADDING + FOOTER_SIZE;
    surface.set_font(FOOTER_SIZE, FontStyle::Normal);
    surface.set_color(theme.muted);

    if !branding.generator.is_empty() {
        surface.draw_text(branding.generator, geometry.content_left(), baseline);
    }

    if let Some(website) = present(&branding.company.website) {
        let w = surface.text_width(website);
        let x = geometry.content_left() + (geometry.content_width - w) / 2.0;
        surface.draw_text(website, x, baseline);
    }

    let stamp = page_stamp(page_index, total);
    let w = surface.text_width(&stamp);
    surface.draw_text(&stamp, geometry.content_right() - w, baseline);
}
