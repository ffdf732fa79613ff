use crate::{
    code::{payload_for, CodeGenerator},
    document::Document,
    font::Typeface,
    geometry::PageGeometry,
    image::Image,
    item::LabelItem,
    layout::{wrap_words, Placement},
    metrics::TextMetrics,
    page::{ImageLayout, Page, TextLine},
    rect::Rect,
    units::*,
    LabelError,
};

/// Pixel size requested from the code generator for every code image
pub const CODE_IMAGE_PIXELS: u32 = 186;

/// Draws laid-out labels onto pages. A renderer holds exclusive access to the
/// document it draws into for the duration of one call.
pub struct Renderer<'a> {
    pub geometry: &'a PageGeometry,
    pub typeface: &'a Typeface,
    pub codes: &'a dyn CodeGenerator,
    /// Template for code payloads; `{id}` is replaced by the tag identifier
    pub url_template: &'a str,
    /// Print a "Tag N" heading above each label
    pub numbered: bool,
}

impl<'a> Renderer<'a> {
    /// Draw every placement, in order, into a new document. `items` must be the
    /// collection the placements were computed from. Nothing to draw is an error,
    /// never an empty document.
    pub fn render(
        &self,
        placements: &[Placement],
        items: &[LabelItem],
    ) -> Result<Document<'a>, LabelError> {
        if placements.is_empty() {
            return Err(LabelError::EmptyInput);
        }
        if placements.len() != items.len() {
            let missing = placements
                .get(items.len())
                .map(|p| p.item_id.clone())
                .unwrap_or_default();
            return Err(LabelError::MissingItem(missing));
        }

        let mut document = Document::new(self.typeface);
        for (placement, item) in placements.iter().zip(items) {
            if placement.item_id != item.id {
                return Err(LabelError::MissingItem(placement.item_id.clone()));
            }
            while document.pages.len() <= placement.page_index {
                document.add_page(Page::new(
                    self.geometry.page_width,
                    self.geometry.page_height,
                ));
            }
            self.draw_label(&mut document, placement, item)?;
        }

        log::debug!(
            "rendered {} labels onto {} page(s) with {} code images",
            placements.len(),
            document.pages.len(),
            document.images.len()
        );
        Ok(document)
    }

    fn draw_label(
        &self,
        document: &mut Document<'a>,
        placement: &Placement,
        item: &LabelItem,
    ) -> Result<(), LabelError> {
        let padding = self.geometry.padding;
        let container = placement.rect();
        let inner_left = container.x1 + padding;
        let inner_width = container.width() - padding * 2.0;
        let size = placement.resolved_font_size;

        let mut lines: Vec<String> = Vec::new();
        if self.numbered {
            lines.push(format!("Tag {}", item.sequence_index + 1));
        }
        lines.extend(
            wrap_words(self.typeface, &item.text, inner_width, size)?
                .into_iter()
                .filter(|line| !line.is_empty()),
        );

        let line_height: Mm = (size * self.geometry.line_height).into();
        let ascent = self.typeface.ascent(size);
        let mut text_lines: Vec<TextLine> = Vec::with_capacity(lines.len());
        for (i, text) in lines.into_iter().enumerate() {
            let width = self.typeface.text_width(&text, size)?;
            // overflowing lines stay pinned to the left padding
            let offset = ((inner_width - width) / 2.0).max(Mm(0.0));
            text_lines.push(TextLine {
                text,
                size,
                origin: (
                    inner_left + offset,
                    container.y1 + padding + ascent + line_height * i as f32,
                ),
            });
        }

        let image = self.code_image(&item.id)?;
        let image = document.add_image(image);

        let code_size = self.geometry.code_size();
        let code_x = inner_left + (inner_width - code_size) / 2.0;
        let code_y = container.y2 - padding - code_size;

        let page = &mut document.pages[placement.page_index];
        page.add_border(container);
        for line in text_lines {
            page.add_text(line);
        }
        page.add_image(ImageLayout {
            image,
            position: Rect::from_origin_size(code_x, code_y, code_size, code_size),
        });

        log::trace!(
            "drew label {:?} on page {} at ({}, {}) with {}",
            item.id,
            placement.page_index,
            placement.x,
            placement.y,
            size
        );
        Ok(())
    }

    /// Generate and encode the code for one tag. The raster only lives inside this
    /// call; what leaves it is the compressed image resource.
    fn code_image(&self, id: &str) -> Result<Image, LabelError> {
        let payload = payload_for(self.url_template, id);
        let raster = self.codes.generate(&payload, CODE_IMAGE_PIXELS)?;
        Image::from_gray(raster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::QrCodeGenerator;
    use crate::layout::layout;
    use crate::metrics::StandardFont;
    use crate::page::PageContents;
    use image::GrayImage;

    struct NoCodes;

    impl CodeGenerator for NoCodes {
        fn generate(&self, _payload: &str, _size_px: u32) -> Result<GrayImage, LabelError> {
            Err(LabelError::CodeImage("scanner offline".into()))
        }
    }

    fn renderer<'a>(
        geometry: &'a PageGeometry,
        typeface: &'a Typeface,
        codes: &'a dyn CodeGenerator,
    ) -> Renderer<'a> {
        Renderer {
            geometry,
            typeface,
            codes,
            url_template: "https://moves.example/tag/{id}",
            numbered: true,
        }
    }

    #[test]
    fn draws_border_text_and_code_per_label() {
        let geometry = PageGeometry::default();
        let typeface = Typeface::Standard(StandardFont::Courier);
        let codes = QrCodeGenerator::default();
        let items = LabelItem::from_tags([("k1", "Kitchen"), ("b1", "Bedroom lamp")]);
        let placements = layout(&items, &geometry, &typeface).unwrap();

        let document = renderer(&geometry, &typeface, &codes)
            .render(&placements, &items)
            .unwrap();
        assert_eq!(document.pages.len(), 1);
        assert_eq!(document.images.len(), 2);

        let page = &document.pages[0];
        let texts: Vec<&str> = page.text().collect();
        assert_eq!(texts, vec!["Tag 1", "Kitchen", "Tag 2", "Bedroom lamp"]);

        let borders = page
            .contents
            .iter()
            .filter(|c| matches!(c, PageContents::Border(_)))
            .count();
        assert_eq!(borders, 2);
    }

    #[test]
    fn code_is_centred_and_bottom_anchored() {
        let geometry = PageGeometry::default();
        let typeface = Typeface::default();
        let codes = QrCodeGenerator::default();
        let items = LabelItem::from_tags([("k1", "Kitchen")]);
        let placements = layout(&items, &geometry, &typeface).unwrap();
        let document = renderer(&geometry, &typeface, &codes)
            .render(&placements, &items)
            .unwrap();

        let container = placements[0].rect();
        let code = document.pages[0]
            .contents
            .iter()
            .find_map(|c| match c {
                PageContents::Image(layout) => Some(layout.position),
                _ => None,
            })
            .unwrap();
        assert!((code.width().0 - 38.0).abs() < 1e-4);
        assert!((code.y2.0 - (container.y2.0 - 1.0)).abs() < 1e-4);
        let left_gap = code.x1.0 - container.x1.0;
        let right_gap = container.x2.0 - code.x2.0;
        assert!((left_gap - right_gap).abs() < 1e-4);
    }

    #[test]
    fn text_stays_above_the_code() {
        let geometry = PageGeometry::default();
        let typeface = Typeface::default();
        let codes = QrCodeGenerator::default();
        let items = LabelItem::from_tags([(
            "w1",
            "Winter clothes, boots, scarves and the good umbrella",
        )]);
        let placements = layout(&items, &geometry, &typeface).unwrap();
        let document = renderer(&geometry, &typeface, &codes)
            .render(&placements, &items)
            .unwrap();

        let code_top = placements[0].rect().y2 - geometry.padding - geometry.code_size();
        for content in &document.pages[0].contents {
            if let PageContents::Text(line) = content {
                assert!(line.origin.1 < code_top);
            }
        }
    }

    #[test]
    fn failing_code_generation_aborts_the_render() {
        let geometry = PageGeometry::default();
        let typeface = Typeface::default();
        let items = LabelItem::from_tags([("k1", "Kitchen")]);
        let placements = layout(&items, &geometry, &typeface).unwrap();
        let err = renderer(&geometry, &typeface, &NoCodes)
            .render(&placements, &items)
            .err()
            .expect("render fails");
        assert!(matches!(err, LabelError::CodeImage(_)));
    }

    #[test]
    fn placements_must_match_items() {
        let geometry = PageGeometry::default();
        let typeface = Typeface::default();
        let codes = QrCodeGenerator::default();
        let items = LabelItem::from_tags([("k1", "Kitchen")]);
        let placements = layout(&items, &geometry, &typeface).unwrap();
        let others = LabelItem::from_tags([("x9", "Kitchen")]);
        let err = renderer(&geometry, &typeface, &codes)
            .render(&placements, &others)
            .err()
            .expect("mismatched items are rejected");
        assert!(matches!(err, LabelError::MissingItem(id) if id == "k1"));
    }

    #[test]
    fn nothing_to_draw_is_rejected() {
        let geometry = PageGeometry::default();
        let typeface = Typeface::default();
        let codes = QrCodeGenerator::default();
        let err = renderer(&geometry, &typeface, &codes)
            .render(&[], &[])
            .err()
            .expect("an empty render is an error");
        assert!(matches!(err, LabelError::EmptyInput));
    }
}
