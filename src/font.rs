use crate::{
    metrics::{StandardFont, TextMetrics},
    refs::{ObjectReferences, RefType},
    units::*,
    LabelError,
};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Str,
};
use std::{collections::BTreeMap, path::Path};

/// A parsed TrueType / OpenType font. The whole font file is embedded in generated
/// documents, but only the glyphs actually drawn get width and unicode entries.
pub struct Font {
    face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, LabelError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    /// Load a font file from disk. A missing or unreadable file means no text can be
    /// measured, and is reported as [LabelError::MetricsUnavailable].
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Font, LabelError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            LabelError::MetricsUnavailable(format!("cannot read {}: {e}", path.display()))
        })?;
        Font::load(bytes).map_err(|e| {
            LabelError::MetricsUnavailable(format!("cannot parse {}: {e}", path.display()))
        })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face().units_per_em() as f32
    }

    /// The PostScript name of the font, reduced to characters valid in a PDF name
    pub fn postscript_name(&self) -> String {
        let name = self
            .face()
            .names()
            .into_iter()
            .find(|name| {
                name.name_id == owned_ttf_parser::name_id::POST_SCRIPT_NAME && name.is_unicode()
            })
            .and_then(|name| name.to_string())
            .unwrap_or_default();
        let name: String = name
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-')
            .collect();
        if name.is_empty() {
            "LabelFont".to_string()
        } else {
            name
        }
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    /// Glyph used to draw `ch`, substituting the replacement character, then `?`,
    /// then `.notdef` when the font lacks it
    pub fn glyph_or_fallback(&self, ch: char) -> u16 {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .unwrap_or(0)
    }

    fn advance(&self, gid: u16) -> f32 {
        self.face()
            .glyph_hor_advance(GlyphId(gid))
            .unwrap_or_default() as f32
    }

    /// Encode text as big-endian glyph ids for an `Identity-H` font
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .flat_map(|ch| {
                if self.glyph_id(ch).is_none() {
                    log::warn!("font has no glyph for {ch:?}, substituting");
                }
                self.glyph_or_fallback(ch).to_be_bytes()
            })
            .collect()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        used: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) {
        let base_font = self.postscript_name();
        let font_id = refs.gen(RefType::Font);
        let cid_font_id = refs.gen(RefType::CidFont);
        let descriptor_id = refs.gen(RefType::FontDescriptor);
        let data_id = refs.gen(RefType::FontData);
        let to_unicode_id = refs.gen(RefType::ToUnicode);

        writer
            .type0_font(font_id)
            .base_font(Name(base_font.as_bytes()))
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(cid_font_id)
            .to_unicode(to_unicode_id);

        // widths are expressed in thousandths of an em
        let per_mille = 1000.0 / self.face().units_per_em() as f32;

        let mut cid_font = writer.cid_font(cid_font_id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(0.0);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        let mut widths = cid_font.widths();
        for &gid in used.keys() {
            widths.consecutive(gid, [self.advance(gid) * per_mille]);
        }
        widths.finish();
        cid_font.finish();

        let face = self.face();
        let bbox = face.global_bounding_box();
        let mut flags = FontFlags::SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        writer
            .font_descriptor(descriptor_id)
            .name(Name(base_font.as_bytes()))
            .flags(flags)
            .bbox(pdf_writer::Rect {
                x1: bbox.x_min as f32 * per_mille,
                y1: bbox.y_min as f32 * per_mille,
                x2: bbox.x_max as f32 * per_mille,
                y2: bbox.y_max as f32 * per_mille,
            })
            .italic_angle(0.0)
            .ascent(face.ascender() as f32 * per_mille)
            .descent(face.descender() as f32 * per_mille)
            .cap_height(
                face.capital_height()
                    .unwrap_or_else(|| face.ascender()) as f32
                    * per_mille,
            )
            .stem_v(80.0)
            .font_file2(data_id);

        let level = CompressionLevel::DefaultLevel as u8;
        let data = compress_to_vec_zlib(self.face.as_slice(), level);
        let mut stream = writer.stream(data_id, &data);
        stream.filter(Filter::FlateDecode);
        stream.pair(Name(b"Length1"), self.face.as_slice().len() as i32);
        stream.finish();

        let cmap = to_unicode_cmap(used);
        writer
            .stream(to_unicode_id, &compress_to_vec_zlib(cmap.as_bytes(), level))
            .filter(Filter::FlateDecode);
    }
}

impl TextMetrics for Font {
    fn text_width(&self, text: &str, size: Pt) -> Result<Mm, LabelError> {
        let scaling = self.scaling(size);
        let width: Pt = text
            .chars()
            .map(|ch| scaling * self.advance(self.glyph_or_fallback(ch)))
            .sum();
        Ok(width.into())
    }

    fn ascent(&self, size: Pt) -> Mm {
        (self.scaling(size) * self.face().ascender() as f32).into()
    }
}

/// Build a ToUnicode CMap for the glyphs in `used`, so text copied out of the PDF
/// maps back to the original characters
fn to_unicode_cmap(used: &BTreeMap<u16, char>) -> String {
    let mut map = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );

    // a bfchar block may hold at most 100 entries
    let entries: Vec<(&u16, &char)> = used.iter().collect();
    for block in entries.chunks(100) {
        map.push_str(&format!("{} beginbfchar\n", block.len()));
        for (gid, ch) in block {
            let mut units = [0u16; 2];
            let hex: String = ch
                .encode_utf16(&mut units)
                .iter()
                .map(|u| format!("{u:04X}"))
                .collect();
            map.push_str(&format!("<{gid:04X}> <{hex}>\n"));
        }
        map.push_str("endbfchar\n");
    }

    map.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");
    map
}

/// The font labels are set in
pub enum Typeface {
    Standard(StandardFont),
    TrueType(Font),
}

impl Default for Typeface {
    fn default() -> Self {
        Typeface::Standard(StandardFont::Courier)
    }
}

impl From<Font> for Typeface {
    fn from(font: Font) -> Self {
        Typeface::TrueType(font)
    }
}

impl From<StandardFont> for Typeface {
    fn from(font: StandardFont) -> Self {
        Typeface::Standard(font)
    }
}

impl Typeface {
    /// Encode text into the byte string shown by a content stream
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Typeface::Standard(font) => font.encode(text),
            Typeface::TrueType(font) => font.encode(text),
        }
    }

    /// Write the font objects, given every character the document draws
    pub(crate) fn write<'a, I>(&self, refs: &mut ObjectReferences, drawn: I, writer: &mut Pdf)
    where
        I: IntoIterator<Item = &'a str>,
    {
        match self {
            Typeface::Standard(font) => {
                let id = refs.gen(RefType::Font);
                writer
                    .type1_font(id)
                    .base_font(Name(font.base_font()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
            }
            Typeface::TrueType(font) => {
                let mut used: BTreeMap<u16, char> = BTreeMap::new();
                for ch in drawn.into_iter().flat_map(str::chars) {
                    used.entry(font.glyph_or_fallback(ch)).or_insert(ch);
                }
                font.write(refs, &used, writer);
            }
        }
    }
}

impl TextMetrics for Typeface {
    fn text_width(&self, text: &str, size: Pt) -> Result<Mm, LabelError> {
        match self {
            Typeface::Standard(font) => font.text_width(text, size),
            Typeface::TrueType(font) => font.text_width(text, size),
        }
    }

    fn ascent(&self, size: Pt) -> Mm {
        match self {
            Typeface::Standard(font) => font.ascent(size),
            Typeface::TrueType(font) => font.ascent(size),
        }
    }
}
