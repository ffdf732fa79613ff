use crate::units::*;

/// An axis-aligned rectangle on a page, specified by two opposite corners in
/// millimetres with the origin at the top-left of the page and `y` growing downwards.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the left edge.
    pub x1: Mm,
    /// The y-coordinate of the top edge.
    pub y1: Mm,
    /// The x-coordinate of the right edge.
    pub x2: Mm,
    /// The y-coordinate of the bottom edge.
    pub y2: Mm,
}

impl Rect {
    /// Create a rectangle from its top-left corner and its size
    pub fn from_origin_size(x: Mm, y: Mm, width: Mm, height: Mm) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> Mm {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Mm {
        self.y2 - self.y1
    }

    /// Whether the interiors of the two rectangles overlap by more than `tolerance`
    /// along both axes. Rectangles that merely share an edge do not intersect.
    pub fn intersects(&self, other: &Rect, tolerance: Mm) -> bool {
        let overlap_x = self.x2.0.min(other.x2.0) - self.x1.0.max(other.x1.0);
        let overlap_y = self.y2.0.min(other.y2.0) - self.y1.0.max(other.y1.0);
        overlap_x > tolerance.0 && overlap_y > tolerance.0
    }

    /// Convert to PDF user space (points, origin at the bottom-left) for a page of
    /// the given height
    pub fn to_pdf(&self, page_height: Mm) -> pdf_writer::Rect {
        let x1: Pt = self.x1.into();
        let x2: Pt = self.x2.into();
        let y1: Pt = (page_height - self.y2).into();
        let y2: Pt = (page_height - self.y1).into();
        pdf_writer::Rect {
            x1: *x1,
            y1: *y1,
            x2: *x2,
            y2: *y2,
        }
    }
}
