use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, Timelike, Utc};
use pdf_writer::{Content, Date, Filter, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::error::Error;
use crate::fonts::{FontEntry, FontStyle, register_font};
use crate::surface::{DrawOp, Document, Paint, RasterImage};

const PRODUCER: &str = concat!("contract-pdf ", env!("CARGO_PKG_VERSION"));

fn rgb(color: [u8; 3]) -> (f32, f32, f32) {
    (
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
    )
}

/// Write a decoded image as a FlateDecode RGB XObject with an optional
/// soft mask for its alpha channel.
fn embed_image(pdf: &mut Pdf, xobj_ref: Ref, img: &RasterImage, alloc: &mut impl FnMut() -> Ref) {
    let compressed_rgb = miniz_oxide::deflate::compress_to_vec_zlib(&img.rgb, 6);

    let smask_ref = img.alpha.as_ref().map(|alpha| {
        let compressed_alpha = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
        let mask_ref = alloc();
        let mut mask = pdf.image_xobject(mask_ref, &compressed_alpha);
        mask.filter(Filter::FlateDecode);
        mask.width(img.width as i32);
        mask.height(img.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask_ref
    });

    let mut xobj = pdf.image_xobject(xobj_ref, &compressed_rgb);
    xobj.filter(Filter::FlateDecode);
    xobj.width(img.width as i32);
    xobj.height(img.height as i32);
    xobj.color_space().device_rgb();
    xobj.bits_per_component(8);
    if let Some(mask_ref) = smask_ref {
        xobj.s_mask(mask_ref);
    }
}

fn font_name(style: FontStyle) -> String {
    format!("F{}", style.index() + 1)
}

fn pdf_date(now: chrono::DateTime<Utc>) -> Date {
    Date::new(now.year() as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour(0)
}

/// Serialize a finished document. Coordinates are flipped from the
/// top-left origin used by the layout into PDF user space.
pub fn render(doc: &Document) -> Result<Vec<u8>, Error> {
    let t0 = std::time::Instant::now();
    if doc.pages.is_empty() {
        return Err(Error::Pdf("document has no pages".into()));
    }

    let mut pdf = Pdf::new();
    let mut next_id = 1i32;
    let mut alloc = || {
        let r = Ref::new(next_id);
        next_id += 1;
        r
    };

    let catalog_id = alloc();
    let pages_id = alloc();
    let info_id = alloc();

    // Phase 1: which characters each style needs
    let mut used_chars: HashMap<FontStyle, HashSet<char>> = HashMap::new();
    for page in &doc.pages {
        for page_op in page.ops() {
            if let DrawOp::Text { text, style, .. } = &page_op.op {
                used_chars.entry(*style).or_default().extend(text.chars());
            }
        }
    }
    let t_collect = t0.elapsed();

    let mut fonts: HashMap<FontStyle, FontEntry> = HashMap::new();
    for style in FontStyle::ALL {
        if let Some(chars) = used_chars.get(&style) {
            let entry = register_font(
                &mut pdf,
                doc.fonts.face(style),
                style,
                font_name(style),
                &mut alloc,
                chars,
            );
            fonts.insert(style, entry);
        }
    }
    let t_fonts = t0.elapsed();

    // Phase 2: images, one XObject per distinct decode
    let mut images: Vec<(Arc<RasterImage>, String, Ref)> = Vec::new();
    for page in &doc.pages {
        for page_op in page.ops() {
            if let DrawOp::Image { image, .. } = &page_op.op
                && !images.iter().any(|(seen, _, _)| Arc::ptr_eq(seen, image))
            {
                let xobj_ref = alloc();
                embed_image(&mut pdf, xobj_ref, image, &mut alloc);
                images.push((image.clone(), format!("Im{}", images.len() + 1), xobj_ref));
            }
        }
    }
    let t_images = t0.elapsed();

    // Phase 3: page content streams
    let page_h = doc.page_height;
    let mut contents: Vec<Content> = Vec::with_capacity(doc.pages.len());
    for page in &doc.pages {
        let mut content = Content::new();
        for page_op in page.ops() {
            match &page_op.op {
                DrawOp::Text {
                    text,
                    x,
                    y,
                    font_size,
                    style,
                    color,
                } => {
                    let Some(entry) = fonts.get(style) else {
                        continue;
                    };
                    let (r, g, b) = rgb(*color);
                    let bytes = entry.encode(text);
                    content
                        .begin_text()
                        .set_font(Name(entry.pdf_name.as_bytes()), *font_size)
                        .set_fill_rgb(r, g, b)
                        .next_line(*x, page_h - *y)
                        .show(Str(&bytes))
                        .end_text();
                }
                DrawOp::Line {
                    x1,
                    y1,
                    x2,
                    y2,
                    width,
                    color,
                } => {
                    let (r, g, b) = rgb(*color);
                    content.save_state();
                    content.set_line_width(*width);
                    content.set_stroke_rgb(r, g, b);
                    content.move_to(*x1, page_h - *y1);
                    content.line_to(*x2, page_h - *y2);
                    content.stroke();
                    content.restore_state();
                }
                DrawOp::Rect {
                    x,
                    y,
                    w,
                    h,
                    paint,
                    width,
                    color,
                } => {
                    let (r, g, b) = rgb(*color);
                    content.save_state();
                    content.rect(*x, page_h - *y - *h, *w, *h);
                    match paint {
                        Paint::Stroke => {
                            content.set_line_width(*width);
                            content.set_stroke_rgb(r, g, b);
                            content.stroke();
                        }
                        Paint::Fill => {
                            content.set_fill_rgb(r, g, b);
                            content.fill_nonzero();
                        }
                    }
                    content.restore_state();
                }
                DrawOp::Image { image, x, y, w, h } => {
                    let Some((_, name, _)) = images.iter().find(|(seen, _, _)| Arc::ptr_eq(seen, image))
                    else {
                        continue;
                    };
                    content.save_state();
                    content.transform([*w, 0.0, 0.0, *h, *x, page_h - *y - *h]);
                    content.x_object(Name(name.as_bytes()));
                    content.restore_state();
                }
            }
        }
        contents.push(content);
    }
    let t_layout = t0.elapsed();

    // Phase 4: page tree and resources
    let n = contents.len();
    let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
    let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

    for (i, c) in contents.into_iter().enumerate() {
        let raw = c.finish();
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
        pdf.stream(content_ids[i], &compressed).filter(Filter::FlateDecode);
    }

    pdf.catalog(catalog_id).pages(pages_id);
    pdf.pages(pages_id)
        .kids(page_ids.iter().copied())
        .count(n as i32);

    let mut font_pairs: Vec<(&str, Ref)> = fonts
        .values()
        .map(|e| (e.pdf_name.as_str(), e.font_ref))
        .collect();
    font_pairs.sort_by(|a, b| a.0.cmp(b.0));

    for i in 0..n {
        let mut page = pdf.page(page_ids[i]);
        page.media_box(Rect::new(0.0, 0.0, doc.page_width, doc.page_height))
            .parent(pages_id)
            .contents(content_ids[i]);
        let mut resources = page.resources();
        {
            let mut fonts = resources.fonts();
            for (name, font_ref) in &font_pairs {
                fonts.pair(Name(name.as_bytes()), *font_ref);
            }
        }
        if !images.is_empty() {
            let mut xobjects = resources.x_objects();
            for (_, name, xobj_ref) in &images {
                xobjects.pair(Name(name.as_bytes()), *xobj_ref);
            }
        }
    }

    {
        let mut info = pdf.document_info(info_id);
        if let Some(title) = doc.title() {
            info.title(TextStr(title));
        }
        info.creator(TextStr(PRODUCER));
        info.producer(TextStr(PRODUCER));
        info.creation_date(pdf_date(Utc::now()));
    }

    let t_assembly = t0.elapsed();

    log::info!(
        "Render phases: collect_chars={:.1}ms, font_embed={:.1}ms, images={:.1}ms, content={:.1}ms, assembly={:.1}ms",
        t_collect.as_secs_f64() * 1000.0,
        (t_fonts - t_collect).as_secs_f64() * 1000.0,
        (t_images - t_fonts).as_secs_f64() * 1000.0,
        (t_layout - t_images).as_secs_f64() * 1000.0,
        (t_assembly - t_layout).as_secs_f64() * 1000.0,
    );

    Ok(pdf.finish())
}
