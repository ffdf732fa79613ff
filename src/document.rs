use crate::{
    font::Typeface,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    LabelError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

/// A rendered label sheet: pages of drawing operations plus the images they
/// reference, written out with a call to [Document::write].
///
/// The typeface is borrowed; it has to outlive the document that draws with it.
pub struct Document<'f> {
    pub info: Option<Info>,
    pub pages: Vec<Page>,
    pub images: Arena<Image>,
    typeface: &'f Typeface,
}

impl<'f> Document<'f> {
    pub fn new(typeface: &'f Typeface) -> Document<'f> {
        Document {
            info: None,
            pages: Vec::new(),
            images: Arena::new(),
            typeface,
        }
    }

    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    pub fn typeface(&self) -> &'f Typeface {
        self.typeface
    }

    /// Add a page to the end of the document, returning its 0-based index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Add an image that any page can then draw by referring to the returned id
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Write the entire document to `w`
    pub fn write<W: Write>(&self, w: &mut W) -> Result<(), LabelError> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..self.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        self.typeface.write(
            &mut refs,
            self.pages.iter().flat_map(Page::text),
            &mut writer,
        );

        for (id, image) in self.images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, page) in self.pages.iter().enumerate() {
            page.write(&mut refs, page_index, self.typeface, &mut writer);
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}
