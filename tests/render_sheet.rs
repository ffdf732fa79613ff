//! End-to-end rendering of label sheets, with the built-in Courier typeface and with
//! an embedded TrueType font.

use image::{GrayImage, Luma};
use std::sync::{Arc, Mutex};
use tag_sheet::{
    validate_pdf, CodeGenerator, ErrorKind, Font, LabelError, LabelItem, LabelSheet, Mm,
    PageGeometry, Pt, SheetOptions, StandardFont, TextMetrics, A5,
};

fn dejavu_mono() -> Font {
    let bytes = include_bytes!("assets/DejaVuSansMono.ttf");
    Font::load(bytes.to_vec()).expect("can load font")
}

fn boxes(n: usize) -> Vec<LabelItem> {
    LabelItem::from_tags((0..n).map(|i| (format!("tag-{i:03}"), format!("Box {i}"))))
}

fn page_count(pdf: &[u8]) -> Option<usize> {
    let text = String::from_utf8_lossy(pdf);
    let start = text.find("/Count ")? + "/Count ".len();
    let digits: String = text[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Hands out blank codes and remembers every payload it was asked for
#[derive(Clone, Default)]
struct RecordingCodes {
    payloads: Arc<Mutex<Vec<String>>>,
}

impl CodeGenerator for RecordingCodes {
    fn generate(&self, payload: &str, _size_px: u32) -> Result<GrayImage, LabelError> {
        if let Ok(mut payloads) = self.payloads.lock() {
            payloads.push(payload.to_string());
        }
        Ok(GrayImage::from_pixel(21, 21, Luma([255])))
    }
}

struct BrokenCodes;

impl CodeGenerator for BrokenCodes {
    fn generate(&self, _payload: &str, _size_px: u32) -> Result<GrayImage, LabelError> {
        Err(LabelError::CodeImage("encoder unavailable".into()))
    }
}

#[test]
fn renders_a_complete_pdf() {
    let sheet = LabelSheet::default();
    let items = LabelItem::from_tags([
        ("6f1c", "Kitchen: plates and bowls"),
        ("9a07", "Books"),
        ("1d22", "Bedroom lamp"),
    ]);

    let pdf = sheet.render(&items).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    assert!(String::from_utf8_lossy(&pdf).trim_end().ends_with("%%EOF"));
    assert!(validate_pdf(&pdf).is_ok());
    assert_eq!(page_count(&pdf), Some(1));
}

#[test]
fn empty_collection_is_rejected() {
    let err = LabelSheet::default().render(&[]).unwrap_err();
    assert!(matches!(err, LabelError::EmptyInput));
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn page_count_follows_the_layout() {
    let sheet = LabelSheet::default();
    let items = boxes(40);

    let placements = sheet.layout(&items).unwrap();
    let pages = placements.iter().map(|p| p.page_index).max().unwrap() + 1;
    assert_eq!(pages, 2);

    let pdf = sheet.render(&items).unwrap();
    assert_eq!(page_count(&pdf), Some(pages));
}

#[test]
fn small_pages_paginate_sooner() {
    let options =
        SheetOptions::default().with_geometry(PageGeometry::default().with_page_size(A5));
    let sheet = LabelSheet::new(StandardFont::CourierBold).with_options(options);
    let items = boxes(24);

    let placements = sheet.layout(&items).unwrap();
    assert!(placements.last().unwrap().page_index > 0);
    for p in &placements {
        assert!(p.x + p.width <= Mm(148.0 - 5.0 + 1e-3));
    }
    assert!(sheet.render(&items).is_ok());
}

#[test]
fn every_tag_gets_its_own_code_payload() {
    let codes = RecordingCodes::default();
    let sheet = LabelSheet::default()
        .with_options(SheetOptions::default().with_url_template("https://moves.example/t/{id}"))
        .with_code_generator(codes.clone());
    let items = LabelItem::from_tags([("a1", "Kitchen"), ("b2", "Garage"), ("c3", "Attic")]);

    sheet.render(&items).unwrap();

    let payloads = codes.payloads.lock().unwrap().clone();
    assert_eq!(
        payloads,
        vec![
            "https://moves.example/t/a1",
            "https://moves.example/t/b2",
            "https://moves.example/t/c3",
        ]
    );
}

#[test]
fn code_failure_yields_no_document() {
    let sheet = LabelSheet::default().with_code_generator(BrokenCodes);
    let err = sheet.render(&boxes(3)).unwrap_err();
    assert!(matches!(err, LabelError::CodeImage(_)));
    assert_eq!(err.kind(), ErrorKind::Resource);
}

#[test]
fn invalid_geometry_is_an_input_error() {
    let options =
        SheetOptions::default().with_geometry(PageGeometry::default().with_columns(0));
    let err = LabelSheet::default()
        .with_options(options)
        .render(&boxes(2))
        .unwrap_err();
    assert!(matches!(err, LabelError::InvalidGeometry(_)));
    assert_eq!(err.kind(), ErrorKind::Input);
}

#[test]
fn rendering_is_repeatable() {
    let sheet = LabelSheet::default();
    let items = boxes(9);

    assert_eq!(sheet.layout(&items).unwrap(), sheet.layout(&items).unwrap());
    assert_eq!(sheet.render(&items).unwrap(), sheet.render(&items).unwrap());
}

#[test]
fn metadata_is_written_when_set() {
    let pdf = LabelSheet::default().render(&boxes(1)).unwrap();
    assert!(String::from_utf8_lossy(&pdf).contains("(Tag labels)"));

    let bare = LabelSheet::default()
        .with_options(SheetOptions::default().with_info(None))
        .render(&boxes(1))
        .unwrap();
    assert!(!String::from_utf8_lossy(&bare).contains("(Tag labels)"));
}

#[test]
fn renders_are_independent_across_threads() {
    let sheet = Arc::new(LabelSheet::default());
    let handles: Vec<_> = (0..4)
        .map(|n| {
            let sheet = Arc::clone(&sheet);
            std::thread::spawn(move || sheet.render(&boxes(5 + n)))
        })
        .collect();
    for handle in handles {
        let pdf = handle.join().unwrap().unwrap();
        assert!(validate_pdf(&pdf).is_ok());
    }
}

#[test]
fn embeds_truetype_fonts_for_non_latin_labels() {
    let sheet = LabelSheet::new(dejavu_mono());
    let items = LabelItem::from_tags([
        ("k1", "Küche: Teller und Schüsseln"),
        ("s1", "Спальня"),
        ("b1", "Βιβλία"),
        ("x1", "箱 spare cables"),
    ]);

    let pdf = sheet.render(&items).unwrap();
    assert!(validate_pdf(&pdf).is_ok());
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/Type0"));
    assert!(text.contains("/Identity-H"));
    assert!(text.contains("/FontFile2"));
    assert!(text.contains("/ToUnicode"));
    assert!(text.contains("/DejaVuSansMono"));
    assert_eq!(page_count(&pdf), Some(1));
}

#[test]
fn truetype_widths_scale_with_size() {
    let font = dejavu_mono();
    let small = font.text_width("Kitchen", Pt(10.0)).unwrap();
    let large = font.text_width("Kitchen", Pt(20.0)).unwrap();
    assert!(small > Mm(0.0));
    assert!((large.0 - 2.0 * small.0).abs() < 1e-4);

    // monospaced: every glyph advances the same distance
    let narrow = font.text_width("iiii", Pt(10.0)).unwrap();
    let wide = font.text_width("WWWW", Pt(10.0)).unwrap();
    assert!((narrow.0 - wide.0).abs() < 1e-4);

    let ascent = font.ascent(Pt(10.0));
    assert!(ascent > Mm(0.0) && ascent < Pt(10.0).into());
}

#[test]
fn truetype_encoding_substitutes_missing_glyphs() {
    let font = dejavu_mono();

    let a = font.glyph_id('A').expect("font covers latin");
    assert_eq!(font.encode("A"), a.to_be_bytes().to_vec());

    assert!(font.glyph_id('箱').is_none());
    let fallback = font.glyph_or_fallback('箱');
    assert_ne!(fallback, 0);
    assert_eq!(font.encode("箱"), fallback.to_be_bytes().to_vec());
    assert_eq!(font.encode("A箱").len(), 4);
}

