mod branding;
mod context;
mod finalize;
mod geometry;
mod page;
mod section;
mod text;

pub use branding::{PageTotal, draw_footer, draw_header, header_details, page_stamp};
pub use context::{Branding, Cursor, LayoutContext, Phase};
pub use finalize::finalize;
pub use geometry::LayoutGeometry;
pub use section::SectionRow;
pub use text::{LINE_HEIGHT_FACTOR, TextStyle, line_height, wrap_text};
