//! Workbook transformations
//!
//! - Extract: roster workbook (.xlsx) → source records
//! - Populate: source records → person sheets cloned from a template
//! - Embed: portrait images → pictures anchored in person sheets
//! - Prune: workbook → first worksheet only

pub mod cell_ref;
mod embedder;
mod extractor;
pub mod geometry;
mod populator;
mod pruner;
pub mod workbook;

pub use cell_ref::CellRef;
pub use embedder::{resize_portrait, ImageEmbedder, Placement, PortraitArea};
pub use extractor::RecordExtractor;
pub use populator::{validate_sheet_name, SheetPopulator};
pub use pruner::SheetPruner;
pub use workbook::SaveOptions;
