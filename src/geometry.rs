//! Sheet geometry: the page, its margin, and the grid of label containers.
//!
//! Every layout and render call receives a [PageGeometry] by reference; nothing
//! about the sheet is global. The defaults describe an ISO A4 page split into
//! four columns.
//!
//! ```
//! use tag_sheet::{Mm, PageGeometry};
//!
//! let geometry = PageGeometry::default().with_columns(3).with_margin(Mm(8.0));
//! assert!(geometry.validate().is_ok());
//! ```

use crate::{units::*, LabelError};

/// Page dimensions as (width, height) in millimetres.
pub type PageSize = (Mm, Mm);

pub const A4: PageSize = (Mm(210.0), Mm(297.0));
pub const A5: PageSize = (Mm(148.0), Mm(210.0));
pub const LETTER: PageSize = (Mm(215.9), Mm(279.4));

/// Dimensions and typographic constants of a label sheet
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    pub page_width: Mm,
    pub page_height: Mm,
    /// Left, right and bottom margin. The top of the page uses [PageGeometry::top_start]
    pub margin: Mm,
    pub columns: usize,
    /// Inner padding of each container
    pub padding: Mm,
    /// Gap between consecutive rows
    pub vertical_spacing: Mm,
    /// Where the first row of every page starts
    pub top_start: Mm,
    pub nominal_font_size: Pt,
    pub min_font_size: Pt,
    /// Decrement used when searching for a font size that fits
    pub font_size_step: Pt,
    /// Line height as a multiple of the font size, applied in layout units
    pub line_height: f32,
    /// Extra room reserved beside the code image on top of the padding
    pub code_gutter: Mm,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            page_width: A4.0,
            page_height: A4.1,
            margin: Mm(5.0),
            columns: 4,
            padding: Mm(1.0),
            vertical_spacing: Mm(2.0),
            top_start: Mm(2.0),
            nominal_font_size: Pt(11.0),
            min_font_size: Pt(8.0),
            font_size_step: Pt(0.5),
            line_height: 1.2,
            code_gutter: Mm(10.0),
        }
    }
}

impl PageGeometry {
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_width = size.0;
        self.page_height = size.1;
        self
    }

    pub fn with_margin(mut self, margin: Mm) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_padding(mut self, padding: Mm) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_vertical_spacing(mut self, spacing: Mm) -> Self {
        self.vertical_spacing = spacing;
        self
    }

    pub fn with_top_start(mut self, top: Mm) -> Self {
        self.top_start = top;
        self
    }

    /// Set the font size range searched by the font fitter, largest first
    pub fn with_font_sizes(mut self, nominal: Pt, min: Pt) -> Self {
        self.nominal_font_size = nominal;
        self.min_font_size = min;
        self
    }

    /// Set the decrement the font fitter steps down by
    pub fn with_font_size_step(mut self, step: Pt) -> Self {
        self.font_size_step = step;
        self
    }

    pub fn with_line_height(mut self, multiplier: f32) -> Self {
        self.line_height = multiplier;
        self
    }

    pub fn with_code_gutter(mut self, gutter: Mm) -> Self {
        self.code_gutter = gutter;
        self
    }

    /// Width of every container: the usable page width split evenly into columns
    pub fn column_width(&self) -> Mm {
        (self.page_width - self.margin * 2.0) / self.columns.max(1) as f32
    }

    /// Width available to text inside a container
    pub fn text_width(&self) -> Mm {
        self.column_width() - self.padding * 2.0
    }

    /// Side length of the square code image drawn in every container
    pub fn code_size(&self) -> Mm {
        self.column_width() - self.padding * 2.0 - self.code_gutter
    }

    /// The lowest y-coordinate any container may reach
    pub fn bottom_edge(&self) -> Mm {
        self.page_height - self.margin
    }

    /// Check that the geometry describes a grid containers can actually be laid out in
    pub fn validate(&self) -> Result<(), LabelError> {
        let invalid = |msg: String| Err(LabelError::InvalidGeometry(msg));

        let lengths = [
            ("page width", self.page_width),
            ("page height", self.page_height),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value <= Mm(0.0) {
                return invalid(format!("{name} must be positive, got {value}"));
            }
        }
        let offsets = [
            ("margin", self.margin),
            ("padding", self.padding),
            ("vertical spacing", self.vertical_spacing),
            ("top start", self.top_start),
            ("code gutter", self.code_gutter),
        ];
        for (name, value) in offsets {
            if !value.is_finite() || value < Mm(0.0) {
                return invalid(format!("{name} must not be negative, got {value}"));
            }
        }
        if self.columns == 0 {
            return invalid("at least one column is required".into());
        }
        if self.font_size_step <= Pt(0.0) {
            return invalid(format!(
                "font size step must be positive, got {}",
                self.font_size_step
            ));
        }
        if self.min_font_size <= Pt(0.0) || self.min_font_size > self.nominal_font_size {
            return invalid(format!(
                "font sizes must satisfy 0 < min ({}) <= nominal ({})",
                self.min_font_size, self.nominal_font_size
            ));
        }
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return invalid(format!(
                "line height must be positive, got {}",
                self.line_height
            ));
        }
        if self.code_size() <= Mm(0.0) {
            return invalid(format!(
                "columns of {} leave no room for a code image",
                self.column_width()
            ));
        }
        if self.top_start >= self.bottom_edge() {
            return invalid(format!(
                "top start {} lies below the bottom margin",
                self.top_start
            ));
        }
        Ok(())
    }
}
