//! Printable label sheets for moving tags.
//!
//! Each tag becomes a bordered container holding its (wrapped, and if need be
//! shrunk) description above a QR code that points back at the tag. Containers
//! are packed into columns and rows and flow over as many pages as needed; the
//! whole sheet comes out as a single PDF byte stream.
//!
//! [LabelSheet] is the front door. The individual stages ([layout::layout],
//! [Renderer] and [assemble]) are public as well for callers that want to
//! inspect placements or draw into a [Document] themselves.

mod assemble;
pub use assemble::*;

mod code;
pub use code::*;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod geometry;
pub use geometry::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

mod item;
pub use item::*;

/// Placing tags on pages and fitting their text into containers
pub mod layout;

mod metrics;
pub use metrics::*;

mod page;
pub use page::*;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod render;
pub use render::*;

mod sheet;
pub use sheet::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality, mostly for inspecting [pdf_writer::Content] output
pub use pdf_writer;
