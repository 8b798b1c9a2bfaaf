//! Loading and saving target workbooks in place

use crate::error::{RosterError, RosterResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use umya_spreadsheet::Spreadsheet;

/// How a command persists the workbook it modified
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Run every step but skip the final write
    pub dry_run: bool,
    /// Copy the workbook to `<file>.bak` before overwriting it
    pub backup: bool,
}

/// Read a workbook, failing with a readable message when it is missing
pub fn load(path: &Path) -> RosterResult<Spreadsheet> {
    if !path.is_file() {
        return Err(RosterError::Workbook(format!(
            "Workbook not found: {}",
            path.display()
        )));
    }
    Ok(umya_spreadsheet::reader::xlsx::read(path)?)
}

/// Write the workbook back to `path` according to `options`.
///
/// Returns the backup path when one was written.
pub fn save(book: &Spreadsheet, path: &Path, options: SaveOptions) -> RosterResult<Option<PathBuf>> {
    if options.dry_run {
        info!(path = %path.display(), "dry run, workbook not written");
        return Ok(None);
    }

    let backup = if options.backup && path.exists() {
        Some(backup(path)?)
    } else {
        None
    };

    umya_spreadsheet::writer::xlsx::write(book, path)?;
    info!(path = %path.display(), "workbook saved");
    Ok(backup)
}

/// Copy `path` to a sibling file with `.bak` appended to its name
pub fn backup(path: &Path) -> RosterResult<PathBuf> {
    let backup_path = backup_path(path);
    fs::copy(path, &backup_path)?;
    Ok(backup_path)
}

pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

/// Worksheet names in tab order
pub fn sheet_names(book: &Spreadsheet) -> Vec<String> {
    book.get_sheet_collection()
        .iter()
        .map(|sheet| sheet.get_name().to_string())
        .collect()
}
