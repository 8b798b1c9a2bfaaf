//! Sheet pruning - reset a workbook to its first worksheet

use crate::error::{RosterError, RosterResult};
use crate::excel::workbook::{self, SaveOptions};
use std::path::Path;
use tracing::debug;
use umya_spreadsheet::Spreadsheet;

/// Deletes every worksheet after the first one
pub struct SheetPruner;

impl SheetPruner {
    /// Prune the workbook at `path`, returning the removed sheet names
    pub fn prune_file(path: &Path, options: SaveOptions) -> RosterResult<Vec<String>> {
        let mut book = workbook::load(path)?;
        let removed = Self::prune(&mut book)?;
        workbook::save(&book, path, options)?;
        Ok(removed)
    }

    /// Prune an in-memory workbook
    pub fn prune(book: &mut Spreadsheet) -> RosterResult<Vec<String>> {
        let removed: Vec<String> = workbook::sheet_names(book).into_iter().skip(1).collect();

        while book.get_sheet_count() > 1 {
            let last = book.get_sheet_count() - 1;
            book.remove_sheet(last)
                .map_err(|e| RosterError::Workbook(e.to_string()))?;
        }

        // The active tab may have pointed at a removed sheet
        book.set_active_sheet(0);
        debug!(removed = removed.len(), "pruned workbook");
        Ok(removed)
    }
}
