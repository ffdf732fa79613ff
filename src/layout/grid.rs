use crate::geometry::PageGeometry;
use crate::item::LabelItem;
use crate::metrics::TextMetrics;
use crate::rect::Rect;
use crate::units::*;
use crate::LabelError;

use super::text::{estimate_height, fit_font_size};

/// Where one label ends up on the sheet. Coordinates are in millimetres from the
/// top-left corner of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub item_id: String,
    pub page_index: usize,
    pub x: Mm,
    pub y: Mm,
    pub width: Mm,
    pub height: Mm,
    /// Largest font size within the geometry's range at which the label fits on one line
    pub resolved_font_size: Pt,
}

impl Placement {
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.x, self.y, self.width, self.height)
    }
}

/// Position of the next container, threaded through a single layout pass
#[derive(Debug)]
struct LayoutCursor {
    current_x: Mm,
    current_y: Mm,
    current_row_max_height: Mm,
    current_page_index: usize,
    column: usize,
    placed_on_page: usize,
}

impl LayoutCursor {
    fn new(geometry: &PageGeometry) -> LayoutCursor {
        LayoutCursor {
            current_x: geometry.margin,
            current_y: geometry.top_start,
            current_row_max_height: Mm(0.0),
            current_page_index: 0,
            column: 0,
            placed_on_page: 0,
        }
    }

    fn close_row(&mut self, geometry: &PageGeometry) {
        self.current_y += self.current_row_max_height + geometry.vertical_spacing;
        self.current_x = geometry.margin;
        self.current_row_max_height = Mm(0.0);
        self.column = 0;
    }

    fn next_page(&mut self, geometry: &PageGeometry) {
        self.current_page_index += 1;
        self.current_y = geometry.top_start;
        self.current_x = geometry.margin;
        self.current_row_max_height = Mm(0.0);
        self.column = 0;
        self.placed_on_page = 0;
    }

    fn advance(&mut self, geometry: &PageGeometry, column_width: Mm, height: Mm) {
        self.column += 1;
        self.placed_on_page += 1;
        // computed from the column index so that rounding never accumulates across a row
        self.current_x = geometry.margin + column_width * self.column as f32;
        self.current_row_max_height = self.current_row_max_height.max(height);
    }
}

/// Shelf-packs `items` into a fixed-column grid, strictly in input order.
///
/// Rows are as tall as their tallest container; a row closes once it holds
/// `geometry.columns` containers. A container that would cross the bottom margin
/// moves to a fresh page. Earlier rows are never repacked.
///
/// Container heights are estimated at the nominal font size even when the label
/// is later drawn smaller, so the estimate is an upper bound.
pub fn layout(
    items: &[LabelItem],
    geometry: &PageGeometry,
    metrics: &dyn TextMetrics,
) -> Result<Vec<Placement>, LabelError> {
    if items.is_empty() {
        return Err(LabelError::EmptyInput);
    }
    geometry.validate()?;

    let column_width = geometry.column_width();
    let bottom_edge = geometry.bottom_edge();
    let usable_height = bottom_edge - geometry.top_start;

    let mut cursor = LayoutCursor::new(geometry);
    let mut placements: Vec<Placement> = Vec::with_capacity(items.len());

    for item in items {
        let height = estimate_height(
            metrics,
            &item.text,
            column_width,
            geometry.nominal_font_size,
            geometry,
        )?;
        let resolved_font_size = fit_font_size(
            metrics,
            &item.text,
            geometry.text_width(),
            geometry.nominal_font_size,
            geometry.min_font_size,
            geometry.font_size_step,
        )?;

        if cursor.column >= geometry.columns {
            log::trace!(
                "row on page {} closed at height {}",
                cursor.current_page_index,
                cursor.current_row_max_height
            );
            cursor.close_row(geometry);
        }

        // a container taller than the whole page can't fit anywhere; it goes on the
        // current page if that page is still empty rather than leaving a blank page
        if cursor.current_y + height > bottom_edge && cursor.placed_on_page > 0 {
            log::debug!(
                "label {:?} starts page {}",
                item.id,
                cursor.current_page_index + 1
            );
            cursor.next_page(geometry);
        }
        if height > usable_height {
            log::warn!(
                "label {:?} needs {height} but pages only have {usable_height}; it will overflow",
                item.id
            );
        }

        placements.push(Placement {
            item_id: item.id.clone(),
            page_index: cursor.current_page_index,
            x: cursor.current_x,
            y: cursor.current_y,
            width: column_width,
            height,
            resolved_font_size,
        });

        cursor.advance(geometry, column_width, height);
    }

    log::debug!(
        "laid out {} labels on {} page(s)",
        placements.len(),
        cursor.current_page_index + 1
    );
    Ok(placements)
}
