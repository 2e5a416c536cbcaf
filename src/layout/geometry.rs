use crate::config::PageGeometry;
use crate::error::Error;

/// Content-band bounds derived from the page description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutGeometry {
    pub page: PageGeometry,
    pub content_start_y: f32,
    pub content_end_y: f32,
    pub content_width: f32,
    pub available_height: f32,
}

impl LayoutGeometry {
    /// Validate `page` and derive the bounds.
    pub fn new(page: &PageGeometry) -> Result<Self, Error> {
        validate(page)?;
        Ok(Self::derive(page))
    }

    /// Pure derivation; does not check the inputs.
    pub fn derive(page: &PageGeometry) -> Self {
        let content_start_y = page.margin_top + page.header_height;
        let content_end_y = page.page_height - page.margin_bottom - page.footer_height;
        Self {
            page: *page,
            content_start_y,
            content_end_y,
            content_width: page.page_width - page.margin_left - page.margin_right,
            available_height: content_end_y - content_start_y,
        }
    }

    pub fn content_left(&self) -> f32 {
        self.page.margin_left
    }

    pub fn content_right(&self) -> f32 {
        self.page.margin_left + self.content_width
    }

    pub fn header_top(&self) -> f32 {
        self.page.margin_top
    }

    pub fn footer_bottom(&self) -> f32 {
        self.page.page_height - self.page.margin_bottom
    }
}

fn validate(page: &PageGeometry) -> Result<(), Error> {
    let fields = [
        ("pageWidth", page.page_width),
        ("pageHeight", page.page_height),
        ("marginTop", page.margin_top),
        ("marginBottom", page.margin_bottom),
        ("marginLeft", page.margin_left),
        ("marginRight", page.margin_right),
        ("headerHeight", page.header_height),
        ("footerHeight", page.footer_height),
    ];
    for (name, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidGeometry(format!("{name} = {value}")));
        }
    }

    let derived = LayoutGeometry::derive(page);
    if derived.content_width <= 0.0 {
        return Err(Error::InvalidGeometry(format!(
            "horizontal margins leave no content width ({:.1}pt)",
            derived.content_width
        )));
    }
    if derived.available_height <= 0.0 {
        return Err(Error::InvalidGeometry(format!(
            "margins and header/footer bands leave no content height ({:.1}pt)",
            derived.available_height
        )));
    }
    Ok(())
}
