use crate::font::Typeface;
use crate::image::Image;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use id_arena::Id;
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Str};

/// Resource name of the sheet's only font
const FONT_NAME: &[u8] = b"F0";
const BORDER_WIDTH: Pt = Pt(0.5);

/// A single line of text. `origin` is the left end of the baseline, measured from
/// the top-left corner of the page.
#[derive(Clone, PartialEq, Debug)]
pub struct TextLine {
    pub text: String,
    pub size: Pt,
    pub origin: (Mm, Mm),
}

#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image: Id<Image>,
    pub position: Rect,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    /// A stroked rectangle outline
    Border(Rect),
    Text(TextLine),
    Image(ImageLayout),
}

/// One page of the sheet: a canvas of drawing operations, replayed in order when
/// the document is written
#[derive(Debug)]
pub struct Page {
    pub width: Mm,
    pub height: Mm,
    pub contents: Vec<PageContents>,
}

fn image_name(image: Id<Image>) -> String {
    format!("I{}", image.index())
}

impl Page {
    pub fn new(width: Mm, height: Mm) -> Page {
        Page {
            width,
            height,
            contents: Vec::default(),
        }
    }

    pub fn add_border(&mut self, rect: Rect) {
        self.contents.push(PageContents::Border(rect));
    }

    pub fn add_text(&mut self, line: TextLine) {
        self.contents.push(PageContents::Text(line));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// Text of every line drawn on the page
    pub fn text(&self) -> impl Iterator<Item = &str> {
        self.contents.iter().filter_map(|c| match c {
            PageContents::Text(line) => Some(line.text.as_str()),
            _ => None,
        })
    }

    /// Images drawn on the page, each listed once
    pub fn images(&self) -> Vec<Id<Image>> {
        let mut images: Vec<Id<Image>> = Vec::new();
        for c in self.contents.iter() {
            if let PageContents::Image(layout) = c {
                if !images.contains(&layout.image) {
                    images.push(layout.image);
                }
            }
        }
        images
    }

    /// Convert a distance from the top of the page into a PDF y-coordinate
    fn flip(&self, y: Mm) -> f32 {
        *Pt::from(self.height - y)
    }

    fn render(&self, typeface: &Typeface) -> Vec<u8> {
        let mut content = Content::new();

        for page_content in self.contents.iter() {
            match page_content {
                PageContents::Border(rect) => {
                    let r = rect.to_pdf(self.height);
                    content.save_state();
                    content.set_stroke_gray(0.0);
                    content.set_line_width(*BORDER_WIDTH);
                    content.rect(r.x1, r.y1, r.x2 - r.x1, r.y2 - r.y1);
                    content.stroke();
                    content.restore_state();
                }
                PageContents::Text(line) => {
                    let x: Pt = line.origin.0.into();
                    content.begin_text();
                    content.set_fill_gray(0.0);
                    content.set_font(Name(FONT_NAME), *line.size);
                    content.next_line(*x, self.flip(line.origin.1));
                    content.show(Str(&typeface.encode(&line.text)));
                    content.end_text();
                }
                PageContents::Image(layout) => {
                    let r = layout.position.to_pdf(self.height);
                    content.save_state();
                    content.transform([r.x2 - r.x1, 0.0, 0.0, r.y2 - r.y1, r.x1, r.y1]);
                    content.x_object(Name(image_name(layout.image).as_bytes()));
                    content.restore_state();
                }
            }
        }

        content.finish()
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        typeface: &Typeface,
        writer: &mut Pdf,
    ) {
        let id = refs.gen(RefType::Page(page_index));
        let content_id = refs.gen(RefType::ContentForPage(page_index));
        let media_box = Rect::from_origin_size(Mm(0.0), Mm(0.0), self.width, self.height);

        let mut page = writer.page(id);
        page.media_box(media_box.to_pdf(self.height));
        page.parent(refs.gen(RefType::PageTree));
        page.contents(content_id);

        let mut resources = page.resources();
        resources.fonts().pair(Name(FONT_NAME), refs.gen(RefType::Font));
        let mut x_objects = resources.x_objects();
        for image in self.images() {
            x_objects.pair(
                Name(image_name(image).as_bytes()),
                refs.gen(RefType::Image(image.index())),
            );
        }
        x_objects.finish();
        resources.finish();
        page.finish();

        let rendered = self.render(typeface);
        let compressed =
            compress_to_vec_zlib(&rendered, CompressionLevel::DefaultLevel as u8);
        writer
            .stream(content_id, &compressed)
            .filter(Filter::FlateDecode);
    }
}
