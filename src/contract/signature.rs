use crate::error::Error;
use crate::fonts::FontStyle;
use crate::layout::{LayoutContext, TextStyle};
use crate::model::{Party, present};
use crate::surface::DrawingSurface;

pub(super) const BLOCK_NAME: &str = "signature block";

const GAP_ABOVE: f32 = 24.0;
const BOX_HEIGHT: f32 = 84.0;
const BOX_SPACING: f32 = 20.0;
const PADDING: f32 = 8.0;
const ROLE_SIZE: f32 = 9.0;
const SIGN_LINE_OFFSET: f32 = 58.0;

/// Full height reserved for the block, spacing included.
pub const SIGNATURE_BLOCK_HEIGHT: f32 = GAP_ABOVE + BOX_HEIGHT;

/// Two side-by-side boxes, buyer then seller. The whole block is reserved
/// before anything is drawn, so it always lands on a single page.
pub(super) fn draw_signature_block<S: DrawingSurface>(
    ctx: &mut LayoutContext<'_, S>,
    buyer: Option<&Party>,
    seller: Option<&Party>,
) -> Result<(), Error> {
    ctx.keep_together(BLOCK_NAME, SIGNATURE_BLOCK_HEIGHT)?;
    ctx.advance(GAP_ABOVE);

    let geometry = *ctx.geometry();
    let box_w = (geometry.content_width - BOX_SPACING) / 2.0;
    let top = ctx.cursor_y();
    let boxes = [
        ("BUYER", buyer, geometry.content_left()),
        ("SELLER", seller, geometry.content_left() + box_w + BOX_SPACING),
    ];
    for (role, party, x) in boxes {
        draw_box(ctx, role, party, x, top, box_w);
    }

    ctx.advance(BOX_HEIGHT);
    Ok(())
}

fn draw_box<S: DrawingSurface>(
    ctx: &mut LayoutContext<'_, S>,
    role: &str,
    party: Option<&Party>,
    x: f32,
    top: f32,
    width: f32,
) {
    let theme = *ctx.theme();
    ctx.frame(x, top, width, BOX_HEIGHT, 0.75, theme.muted);

    let inner_x = x + PADDING;
    let role_style = TextStyle::new(ROLE_SIZE, FontStyle::Bold, theme.accent);
    ctx.text_at(role, inner_x, top + PADDING, &role_style);

    let name_style = ctx.body_style().bold();
    if let Some(name) = party.and_then(|p| present(&p.name)) {
        let name_top = top + PADDING + role_style.line_height() + 2.0;
        ctx.text_at(name, inner_x, name_top, &name_style);
    }

    let line_y = top + SIGN_LINE_OFFSET;
    ctx.rule(inner_x, x + width - PADDING, line_y, 0.5, theme.muted);

    let date_style = TextStyle::new(8.5, FontStyle::Normal, theme.muted);
    ctx.text_at("Date: ________________", inner_x, line_y + 4.0, &date_style);
}
