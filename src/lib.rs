//! Rosterbook - per-person worksheets from a roster workbook
//!
//! This library fills a workbook with one worksheet per person listed in a
//! roster, embeds each person's portraits into their sheet, and can reset the
//! workbook back to its first sheet.
//!
//! # Features
//!
//! - Roster extraction from a fixed sheet and column range (calamine)
//! - Template sheet cloning and cell population (umya-spreadsheet)
//! - Portrait discovery by `<name><n>.jpg` naming and fitted anchoring
//! - Layout overrides from YAML
//!
//! # Example
//!
//! ```no_run
//! use rosterbook::config::Layout;
//! use rosterbook::excel::{RecordExtractor, SaveOptions, SheetPopulator};
//! use std::path::Path;
//!
//! let layout = Layout::default();
//! let records = RecordExtractor::new("人员信息汇总.xlsx", layout.clone()).extract()?;
//!
//! let report = SheetPopulator::new(layout).populate_file(
//!     Path::new("工作簿.xlsx"),
//!     &records,
//!     SaveOptions::default(),
//! )?;
//! println!("Created {} sheets", report.created.len());
//! # Ok::<(), rosterbook::error::RosterError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod excel;
pub mod portraits;
pub mod types;

// Re-export commonly used types
pub use error::{RosterError, RosterResult};
pub use types::{EmbedReport, PopulateReport, Portrait, SourceRecord};
