//! Label layout: measuring, wrapping and fitting label text, and packing
//! containers into a fixed-column grid across pages.
//!
//! Layout needs nothing but text metrics, so it can be run on its own to preview
//! how a tag collection will paginate:
//!
//! ```
//! use tag_sheet::{LabelItem, PageGeometry, StandardFont};
//! use tag_sheet::layout::layout;
//!
//! let items = LabelItem::from_tags([("k1", "Kitchen"), ("b1", "Bedroom")]);
//! let placements = layout(&items, &PageGeometry::default(), &StandardFont::Courier)
//!     .expect("can lay out labels");
//!
//! assert_eq!(placements.len(), 2);
//! assert_eq!(placements[0].page_index, 0);
//! ```

mod grid;
mod text;

pub use grid::*;
pub use text::*;
