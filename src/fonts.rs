use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::Arc;

use memmap2::Mmap;
use pdf_writer::{Name, Pdf, Rect, Ref};
use ttf_parser::Face;

use crate::config::FontFiles;
use crate::error::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    pub const ALL: [FontStyle; 4] = [
        FontStyle::Normal,
        FontStyle::Bold,
        FontStyle::Italic,
        FontStyle::BoldItalic,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            FontStyle::Normal => 0,
            FontStyle::Bold => 1,
            FontStyle::Italic => 2,
            FontStyle::BoldItalic => 3,
        }
    }

    pub fn is_bold(self) -> bool {
        matches!(self, FontStyle::Bold | FontStyle::BoldItalic)
    }

    pub(crate) fn builtin_name(self) -> &'static str {
        match self {
            FontStyle::Normal => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Italic => "Helvetica-Oblique",
            FontStyle::BoldItalic => "Helvetica-BoldOblique",
        }
    }
}

/// A memory-mapped TrueType/OpenType face with its advance widths cached.
pub struct TrueTypeFace {
    name: String,
    data: Mmap,
    face_index: u32,
    units_per_em: f32,
    ascender_ratio: f32,
    char_widths_1000: HashMap<char, f32>,
}

impl std::fmt::Debug for TrueTypeFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrueTypeFace")
            .field("name", &self.name)
            .field("face_index", &self.face_index)
            .finish()
    }
}

fn font_family_name(face: &Face) -> Option<String> {
    for name in face.names() {
        if name.name_id == ttf_parser::name_id::FAMILY
            && name.is_unicode()
            && let Some(s) = name.to_string()
        {
            return Some(s);
        }
    }
    None
}

impl TrueTypeFace {
    pub fn open(path: &Path) -> Result<Self, Error> {
        let file = std::fs::File::open(path)?;
        let data = unsafe { Mmap::map(&file) }?;
        let face = Face::parse(&data, 0)
            .map_err(|e| Error::Font(format!("{}: {e}", path.display())))?;

        let units_per_em = face.units_per_em() as f32;
        let ascender_ratio = face.ascender() as f32 / units_per_em;
        let name = font_family_name(&face).unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Embedded".to_string())
        });

        // Latin coverage is what contracts use; anything else is measured on demand.
        let mut char_widths_1000 = HashMap::new();
        for ch in (0x20u32..=0x24F).filter_map(char::from_u32).chain(WINANSI_EXTRAS) {
            if let Some(adv) = face.glyph_index(ch).and_then(|gid| face.glyph_hor_advance(gid)) {
                char_widths_1000.insert(ch, adv as f32 / units_per_em * 1000.0);
            }
        }
        drop(face);

        log::debug!("Loaded font {name} from {}", path.display());
        Ok(Self {
            name,
            data,
            face_index: 0,
            units_per_em,
            ascender_ratio,
            char_widths_1000,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn char_width_1000(&self, ch: char) -> f32 {
        if let Some(&w) = self.char_widths_1000.get(&ch) {
            return w;
        }
        Face::parse(&self.data, self.face_index)
            .ok()
            .and_then(|face| {
                face.glyph_index(ch)
                    .and_then(|gid| face.glyph_hor_advance(gid))
            })
            .map(|adv| adv as f32 / self.units_per_em * 1000.0)
            .unwrap_or(0.0)
    }
}

#[derive(Clone, Debug)]
pub enum FontFace {
    Builtin(FontStyle),
    TrueType(Arc<TrueTypeFace>),
}

impl FontFace {
    pub(crate) fn char_width_1000(&self, ch: char) -> f32 {
        match self {
            FontFace::Builtin(style) => {
                let byte = char_to_winansi(ch);
                if byte >= 32 {
                    helvetica_width(byte, style.is_bold())
                } else {
                    0.0
                }
            }
            FontFace::TrueType(face) => face.char_width_1000(ch),
        }
    }

    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|ch| self.char_width_1000(ch) * font_size / 1000.0)
            .sum()
    }

    /// Baseline offset below the top of the line box, as a fraction of the font size.
    pub fn ascender_ratio(&self) -> f32 {
        match self {
            FontFace::Builtin(_) => 0.718,
            FontFace::TrueType(face) => face.ascender_ratio,
        }
    }
}

/// The four faces a document draws with.
#[derive(Clone, Debug)]
pub struct FontSet {
    faces: [FontFace; 4],
}

impl Default for FontSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FontSet {
    pub fn builtin() -> Self {
        Self {
            faces: FontStyle::ALL.map(FontFace::Builtin),
        }
    }

    /// Load the configured font files. Styles without a file reuse the regular
    /// face when there is one, otherwise they stay on Helvetica. Files that fail
    /// to load fall back the same way.
    pub fn load(files: &FontFiles) -> Self {
        let open = |path: Option<&std::path::PathBuf>| -> Option<Arc<TrueTypeFace>> {
            let path = path?;
            match TrueTypeFace::open(path) {
                Ok(face) => Some(Arc::new(face)),
                Err(e) => {
                    log::warn!("Font not loaded: {} ({e}), using Helvetica", path.display());
                    None
                }
            }
        };

        let regular = open(files.regular.as_ref());
        let mut set = Self::builtin();
        for style in FontStyle::ALL {
            let path = match style {
                FontStyle::Normal => None,
                FontStyle::Bold => files.bold.as_ref(),
                FontStyle::Italic => files.italic.as_ref(),
                FontStyle::BoldItalic => files.bold_italic.as_ref(),
            };
            let face = open(path).or_else(|| regular.clone());
            if let Some(face) = face {
                set.faces[style.index()] = FontFace::TrueType(face);
            }
        }
        set
    }

    pub fn face(&self, style: FontStyle) -> &FontFace {
        &self.faces[style.index()]
    }
}

const WINANSI_EXTRAS: [char; 27] = [
    '\u{20AC}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{017D}', '\u{2018}',
    '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}', '\u{02DC}',
    '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{017E}', '\u{0178}',
];

/// Map a single Unicode char to its WinAnsi byte, or 0 if unmappable.
fn char_to_winansi(c: char) -> u8 {
    match c as u32 {
        0x0020..=0x007E => c as u8,
        0x00A0..=0x00FF => c as u8,
        0x20AC => 0x80,
        0x201A => 0x82,
        0x0192 => 0x83,
        0x201E => 0x84,
        0x2026 => 0x85,
        0x2020 => 0x86,
        0x2021 => 0x87,
        0x02C6 => 0x88,
        0x2030 => 0x89,
        0x0160 => 0x8A,
        0x2039 => 0x8B,
        0x0152 => 0x8C,
        0x017D => 0x8E,
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95,
        0x2013 => 0x96,
        0x2014 => 0x97,
        0x02DC => 0x98,
        0x2122 => 0x99,
        0x0161 => 0x9A,
        0x203A => 0x9B,
        0x0153 => 0x9C,
        0x017E => 0x9E,
        0x0178 => 0x9F,
        _ => 0,
    }
}

/// Convert a UTF-8 string to WinAnsi (Windows-1252) bytes for PDF Str encoding.
/// Characters outside the code page are dropped.
pub(crate) fn to_winansi_bytes(s: &str) -> Vec<u8> {
    s.chars()
        .map(char_to_winansi)
        .filter(|&b| b != 0)
        .collect()
}

/// Encode UTF-8 text as big-endian 2-byte glyph IDs for CIDFont content streams.
pub(crate) fn encode_as_gids(text: &str, char_to_gid: &HashMap<char, u16>) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for ch in text.chars() {
        let gid = char_to_gid.get(&ch).copied().unwrap_or(0);
        out.push((gid >> 8) as u8);
        out.push((gid & 0xFF) as u8);
    }
    out
}

// Helvetica / Helvetica-Bold AFM advance widths for ASCII 32..=126.
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // sp - /
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0-9
    278, 278, 584, 584, 584, 556, 1015, // : - @
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A - M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N - Z
    278, 278, 278, 469, 556, 333, // [ - `
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a - m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n - z
    334, 260, 334, 584, // { - ~
];

const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Helvetica width at 1000 units/em for a WinAnsi byte >= 32. Bytes outside
/// ASCII use an average width.
fn helvetica_width(byte: u8, bold: bool) -> f32 {
    let table = if bold {
        &HELVETICA_BOLD_ASCII
    } else {
        &HELVETICA_ASCII
    };
    match byte {
        32..=126 => table[(byte - 32) as usize] as f32,
        0xA0 => 278.0,
        0x95 => 350.0,
        0x96 => 556.0,
        0x97 => 1000.0,
        0x85 => 1000.0,
        _ => 556.0,
    }
}

/// A font registered in a PDF being written.
pub(crate) struct FontEntry {
    pub(crate) pdf_name: String,
    pub(crate) font_ref: Ref,
    pub(crate) char_to_gid: Option<HashMap<char, u16>>,
}

impl FontEntry {
    pub(crate) fn encode(&self, text: &str) -> Vec<u8> {
        match &self.char_to_gid {
            Some(map) => encode_as_gids(text, map),
            None => to_winansi_bytes(text),
        }
    }
}

/// Embed a TrueType/OpenType font as a CIDFont (Type0 composite) with Identity-H encoding.
/// The font data is subsetted to only include glyphs used in the document.
fn embed_truetype(
    pdf: &mut Pdf,
    font_ref: Ref,
    ttf: &TrueTypeFace,
    used_chars: &HashSet<char>,
    alloc: &mut impl FnMut() -> Ref,
) -> Option<HashMap<char, u16>> {
    let font_data: &[u8] = &ttf.data;
    let face = Face::parse(font_data, ttf.face_index).ok()?;

    let units = face.units_per_em() as f32;
    let ascent = face.ascender() as f32 / units * 1000.0;
    let descent = face.descender() as f32 / units * 1000.0;
    let cap_height = face
        .capital_height()
        .map(|h| h as f32 / units * 1000.0)
        .unwrap_or(700.0);

    let bb = face.global_bounding_box();
    let bbox = Rect::new(
        bb.x_min as f32 / units * 1000.0,
        bb.y_min as f32 / units * 1000.0,
        bb.x_max as f32 / units * 1000.0,
        bb.y_max as f32 / units * 1000.0,
    );

    let mut remapper = subsetter::GlyphRemapper::new();
    let mut char_to_gid = HashMap::new();
    let mut gid_widths: Vec<(u16, f32)> = Vec::new();
    for &ch in used_chars {
        if let Some(gid) = face.glyph_index(ch) {
            let new_gid = remapper.remap(gid.0);
            char_to_gid.insert(ch, new_gid);
            let w = face
                .glyph_hor_advance(gid)
                .map(|adv| adv as f32 / units * 1000.0)
                .unwrap_or(0.0);
            gid_widths.push((new_gid, w));
        }
    }
    gid_widths.sort_by_key(|&(gid, _)| gid);
    gid_widths.dedup_by_key(|&mut (gid, _)| gid);

    let subset_data = subsetter::subset(font_data, ttf.face_index, &remapper)
        .unwrap_or_else(|e| {
            log::warn!("Font subsetting failed for {}: {e}; embedding the full font", ttf.name);
            font_data.to_vec()
        });

    let data_ref = alloc();
    let descriptor_ref = alloc();
    let data_len = i32::try_from(subset_data.len()).ok()?;
    pdf.stream(data_ref, &subset_data)
        .pair(Name(b"Length1"), data_len);

    let ps_name = ttf.name.replace(' ', "");

    pdf.font_descriptor(descriptor_ref)
        .name(Name(ps_name.as_bytes()))
        .flags(pdf_writer::types::FontFlags::NON_SYMBOLIC)
        .bbox(bbox)
        .italic_angle(0.0)
        .ascent(ascent)
        .descent(descent)
        .cap_height(cap_height)
        .stem_v(80.0)
        .font_file2(data_ref);

    let cid_font_ref = alloc();
    let system_info = pdf_writer::types::SystemInfo {
        registry: pdf_writer::Str(b"Adobe"),
        ordering: pdf_writer::Str(b"Identity"),
        supplement: 0,
    };
    {
        let mut cid = pdf.cid_font(cid_font_ref);
        cid.subtype(pdf_writer::types::CidFontType::Type2);
        cid.base_font(Name(ps_name.as_bytes()));
        cid.system_info(system_info);
        cid.font_descriptor(descriptor_ref);
        cid.default_width(0.0);
        cid.cid_to_gid_map_predefined(Name(b"Identity"));
        if !gid_widths.is_empty() {
            let mut w = cid.widths();
            for &(gid, width) in &gid_widths {
                w.consecutive(gid, [width]);
            }
        }
    }

    let tounicode_ref = alloc();
    let cmap_name = format!("{}-UTF16", ps_name);
    let mut cmap = pdf_writer::types::UnicodeCmap::new(
        Name(cmap_name.as_bytes()),
        pdf_writer::types::SystemInfo {
            registry: pdf_writer::Str(b"Adobe"),
            ordering: pdf_writer::Str(b"Identity"),
            supplement: 0,
        },
    );
    for (&ch, &new_gid) in &char_to_gid {
        cmap.pair(new_gid, ch);
    }
    let cmap_data = cmap.finish();
    pdf.stream(tounicode_ref, cmap_data.as_slice());

    pdf.type0_font(font_ref)
        .base_font(Name(ps_name.as_bytes()))
        .encoding_predefined(Name(b"Identity-H"))
        .descendant_font(cid_font_ref)
        .to_unicode(tounicode_ref);

    Some(char_to_gid)
}

pub(crate) fn register_font(
    pdf: &mut Pdf,
    face: &FontFace,
    style: FontStyle,
    pdf_name: String,
    alloc: &mut impl FnMut() -> Ref,
    used_chars: &HashSet<char>,
) -> FontEntry {
    let t0 = std::time::Instant::now();
    let font_ref = alloc();

    let char_to_gid = match face {
        FontFace::TrueType(ttf) => {
            let embedded = embed_truetype(pdf, font_ref, ttf, used_chars, alloc);
            if embedded.is_none() {
                log::warn!("Could not embed {} ({style:?}); using Helvetica", ttf.name);
            }
            embedded
        }
        FontFace::Builtin(_) => None,
    };
    if char_to_gid.is_none() {
        pdf.type1_font(font_ref)
            .base_font(Name(style.builtin_name().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }

    log::debug!(
        "register_font: {pdf_name} {style:?} in {:.1}ms",
        t0.elapsed().as_secs_f64() * 1000.0,
    );

    FontEntry {
        pdf_name,
        font_ref,
        char_to_gid,
    }
}
