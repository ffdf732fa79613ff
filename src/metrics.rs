use crate::{units::*, LabelError};

/// Measures text for layout. Implementations must be usable from several render
/// calls at once.
pub trait TextMetrics: Send + Sync {
    /// Advance width of `text` set at `size`
    fn text_width(&self, text: &str, size: Pt) -> Result<Mm, LabelError>;

    /// Distance from the top of a line to its baseline at `size`
    fn ascent(&self, size: Pt) -> Mm {
        (size * 0.8).into()
    }
}

/// One of the PDF standard fonts, which every conforming reader supplies, so
/// nothing has to be embedded. Text is encoded as WinAnsi; characters outside it
/// are shown as `?`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StandardFont {
    Courier,
    CourierBold,
}

impl StandardFont {
    /// Every Courier glyph advances by 600 units of a 1000-unit em
    const ADVANCE: f32 = 0.6;
    const ASCENDER: f32 = 0.629;

    pub fn base_font(&self) -> &'static [u8] {
        match self {
            StandardFont::Courier => b"Courier",
            StandardFont::CourierBold => b"Courier-Bold",
        }
    }

    /// Encode text as WinAnsi bytes for a content stream
    pub fn encode(&self, text: &str) -> Vec<u8> {
        text.chars()
            .map(|ch| match ch as u32 {
                0x20..=0x7e | 0xa0..=0xff => ch as u8,
                _ => b'?',
            })
            .collect()
    }
}

impl TextMetrics for StandardFont {
    fn text_width(&self, text: &str, size: Pt) -> Result<Mm, LabelError> {
        Ok((size * (Self::ADVANCE * text.chars().count() as f32)).into())
    }

    fn ascent(&self, size: Pt) -> Mm {
        (size * Self::ASCENDER).into()
    }
}
