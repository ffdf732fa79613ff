use crate::{
    assemble::assemble,
    code::{validate_template, CodeGenerator, QrCodeGenerator},
    font::Typeface,
    geometry::PageGeometry,
    info::Info,
    item::LabelItem,
    layout::{layout, Placement},
    render::Renderer,
    LabelError,
};

/// Everything about a sheet besides the tags on it
#[derive(Debug, Clone, PartialEq)]
pub struct SheetOptions {
    pub geometry: PageGeometry,
    /// Payload template for the codes, with `{id}` standing in for the tag identifier.
    /// Must be an absolute URL; the default points at a local development server
    /// and should be replaced with the address tags are actually served from.
    pub url_template: String,
    /// Print a "Tag N" heading above each label
    pub numbered: bool,
    pub info: Option<Info>,
}

impl Default for SheetOptions {
    fn default() -> Self {
        SheetOptions {
            geometry: PageGeometry::default(),
            url_template: "http://localhost:5173/tag/{id}".to_string(),
            numbered: true,
            info: Some(Info::new().title("Tag labels").clone()),
        }
    }
}

impl SheetOptions {
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn with_url_template<S: Into<String>>(mut self, template: S) -> Self {
        self.url_template = template.into();
        self
    }

    pub fn with_numbering(mut self, numbered: bool) -> Self {
        self.numbered = numbered;
        self
    }

    pub fn with_info(mut self, info: Option<Info>) -> Self {
        self.info = info;
        self
    }
}

/// Renders tag collections into printable PDF label sheets.
///
/// A sheet holds no per-render state, so one instance can serve any number of
/// render calls, from several threads at once.
///
/// ```
/// use tag_sheet::{LabelItem, LabelSheet, SheetOptions};
///
/// let sheet = LabelSheet::default().with_options(
///     SheetOptions::default().with_url_template("https://moves.example/tag/{id}"),
/// );
/// let tags = LabelItem::from_tags([("6f1c", "Kitchen: plates"), ("9a07", "Books")]);
/// let pdf = sheet.render(&tags).expect("can render labels");
/// assert!(pdf.starts_with(b"%PDF-"));
/// ```
pub struct LabelSheet {
    options: SheetOptions,
    typeface: Typeface,
    codes: Box<dyn CodeGenerator>,
}

impl Default for LabelSheet {
    fn default() -> Self {
        LabelSheet::new(Typeface::default())
    }
}

impl LabelSheet {
    pub fn new<T: Into<Typeface>>(typeface: T) -> LabelSheet {
        LabelSheet {
            options: SheetOptions::default(),
            typeface: typeface.into(),
            codes: Box::new(QrCodeGenerator::default()),
        }
    }

    pub fn with_options(mut self, options: SheetOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_code_generator<C: CodeGenerator + 'static>(mut self, codes: C) -> Self {
        self.codes = Box::new(codes);
        self
    }

    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    /// Compute where every tag goes without drawing anything
    pub fn layout(&self, items: &[LabelItem]) -> Result<Vec<Placement>, LabelError> {
        layout(items, &self.options.geometry, &self.typeface)
    }

    /// Lay out, draw and serialise `items` into a PDF. Any failure yields an error
    /// and no bytes at all.
    pub fn render(&self, items: &[LabelItem]) -> Result<Vec<u8>, LabelError> {
        let placements = self.layout(items)?;
        validate_template(&self.options.url_template)?;

        let renderer = Renderer {
            geometry: &self.options.geometry,
            typeface: &self.typeface,
            codes: self.codes.as_ref(),
            url_template: &self.options.url_template,
            numbered: self.options.numbered,
        };
        let mut document = renderer.render(&placements, items)?;
        if let Some(info) = &self.options.info {
            document.set_info(info.clone());
        }

        assemble(&document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_produces_no_document() {
        let err = LabelSheet::default().render(&[]).unwrap_err();
        assert!(matches!(err, LabelError::EmptyInput));
    }

    #[test]
    fn sheet_is_shareable_between_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LabelSheet>();
    }

    #[test]
    fn relative_templates_are_refused() {
        let sheet = LabelSheet::default()
            .with_options(SheetOptions::default().with_url_template("/tag/{id}"));
        let err = sheet
            .render(&LabelItem::from_tags([("k1", "Kitchen")]))
            .unwrap_err();
        assert!(matches!(err, LabelError::InvalidTemplate(_)));
    }

    #[test]
    fn default_template_is_absolute() {
        assert!(validate_template(&SheetOptions::default().url_template).is_ok());
    }
}
