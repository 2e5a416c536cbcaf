mod rows;
mod signature;

use std::sync::Arc;
use std::time::Instant;

use crate::config::ContractOptions;
use crate::error::Error;
use crate::fonts::{FontSet, FontStyle};
use crate::layout::{Branding, LayoutContext, LayoutGeometry, SectionRow, TextStyle};
use crate::model::{CompanyProfile, LogoSource, Order, Party};
use crate::surface::{Document, DrawingSurface, ImageRef, RecordingSurface};

pub use rows::{final_price, format_money, party_rows, product_rows, terms_rows};
pub use signature::SIGNATURE_BLOCK_HEIGHT;

const TITLE: &str = "SALES CONTRACT";
const TITLE_SIZE: f32 = 18.0;
const TITLE_GAP: f32 = 6.0;

pub const LEGAL_TERMS: [&str; 4] = [
    "1. Ownership of the goods passes to the buyer only upon full payment of the agreed price. \
     Until then the goods remain the property of the seller and may not be pledged or resold.",
    "2. Any defects must be reported in writing within eight days of delivery, stating the nature \
     of the defect. Goods accepted without reservation are deemed to conform to this contract.",
    "3. Neither party is liable for delays caused by events beyond its reasonable control, \
     including strikes, natural disasters, transport interruptions and acts of public authorities.",
    "4. This contract is governed by the law of the seller's registered office. Any dispute \
     arising from it falls under the exclusive jurisdiction of the courts of that place.",
];

/// Read the logo ahead of layout so no I/O happens while pages are drawn.
/// An unreadable file degrades to a text-only header.
fn resolve_logo(company: &CompanyProfile) -> Option<ImageRef> {
    match company.logo.as_ref()? {
        LogoSource::Bytes(bytes) => Some(ImageRef::new(bytes.clone())),
        LogoSource::Path(path) => match std::fs::read(path) {
            Ok(bytes) => Some(ImageRef::new(bytes)),
            Err(e) => {
                log::warn!("Logo {} could not be read ({e}); using a text-only header", path.display());
                None
            }
        },
    }
}

fn load_fonts(options: &ContractOptions) -> FontSet {
    if options.fonts.is_empty() {
        FontSet::builtin()
    } else {
        FontSet::load(&options.fonts)
    }
}

/// Lay out a complete contract and return the finalized document.
///
/// Fails before anything is drawn when the order is missing, when neither
/// party is given, when the page geometry leaves no content band, or when
/// the signature block could never fit on a page.
pub fn generate_contract(
    order: Option<&Order>,
    buyer: Option<&Party>,
    seller: Option<&Party>,
    company: &CompanyProfile,
    options: &ContractOptions,
) -> Result<Document, Error> {
    let t0 = Instant::now();

    let order = order.ok_or(Error::MissingInput("order"))?;
    if buyer.is_none() && seller.is_none() {
        return Err(Error::MissingInput("buyer or seller"));
    }

    let geometry = LayoutGeometry::new(&options.page)?;
    if SIGNATURE_BLOCK_HEIGHT > geometry.available_height {
        return Err(Error::AtomicBlockTooTall {
            block: signature::BLOCK_NAME,
            required: SIGNATURE_BLOCK_HEIGHT,
            available: geometry.available_height,
        });
    }

    let fonts = Arc::new(load_fonts(options));
    let branding = Branding {
        company,
        logo: resolve_logo(company),
        theme: options.theme,
        generator: &options.generator,
    };
    let t_prepare = t0.elapsed();

    let surface = RecordingSurface::new(options.page.page_width, options.page.page_height, fonts);
    let mut ctx = LayoutContext::new(surface, geometry, branding);
    assemble(&mut ctx, order, buyer, seller, options)?;
    let doc = ctx
        .finish()?
        .into_document()
        .with_title(format!("Contract {}", order.order_number));
    let t_total = t0.elapsed();

    log::info!(
        "Contract {}: {} page(s), prepare={:.1}ms, layout={:.1}ms, total={:.1}ms",
        order.order_number,
        doc.page_count(),
        t_prepare.as_secs_f64() * 1000.0,
        (t_total - t_prepare).as_secs_f64() * 1000.0,
        t_total.as_secs_f64() * 1000.0,
    );

    Ok(doc)
}

/// Draw every part of the contract, in order, onto `ctx`. Does not finalize.
pub fn assemble<S: DrawingSurface>(
    ctx: &mut LayoutContext<'_, S>,
    order: &Order,
    buyer: Option<&Party>,
    seller: Option<&Party>,
    options: &ContractOptions,
) -> Result<(), Error> {
    draw_title(ctx);

    let date = order.created_at.format(rows::date_format(options));
    let meta = format!("Contract No. {} | Date: {date}", order.order_number);
    let body = ctx.body_style();
    let left = ctx.geometry().content_left();
    ctx.draw_wrapped(&meta, left, &body, None);

    ctx.section("BUYER", &party_rows(buyer));
    ctx.section("SELLER", &party_rows(seller));
    ctx.section("PRODUCT", &product_rows(order));
    ctx.section("COMMERCIAL TERMS", &terms_rows(order, options));
    ctx.section_with("LEGAL TERMS", |ctx| {
        for clause in LEGAL_TERMS {
            ctx.section_row(&SectionRow::Paragraph(clause.to_string()));
        }
    });

    signature::draw_signature_block(ctx, buyer, seller)
}

fn draw_title<S: DrawingSurface>(ctx: &mut LayoutContext<'_, S>) {
    let style = TextStyle::new(TITLE_SIZE, FontStyle::Bold, ctx.theme().accent);
    let width = ctx.text_width(TITLE, &style);
    let geometry = *ctx.geometry();
    let x = geometry.content_left() + ((geometry.content_width - width) / 2.0).max(0.0);

    ctx.check_new_page(style.line_height());
    let top = ctx.cursor_y();
    ctx.text_at(TITLE, x, top, &style);
    ctx.advance(style.line_height() + TITLE_GAP);
}
