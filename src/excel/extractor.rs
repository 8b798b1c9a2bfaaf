//! Roster extraction - source workbook (.xlsx) → SourceRecord list

use crate::config::{Layout, SourceColumns};
use crate::error::{RosterError, RosterResult};
use crate::types::SourceRecord;
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads personnel rows from a fixed sheet and row range of a roster workbook
pub struct RecordExtractor {
    path: PathBuf,
    layout: Layout,
}

impl RecordExtractor {
    pub fn new<P: AsRef<Path>>(path: P, layout: Layout) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            layout,
        }
    }

    /// Read every row with a non-empty name, in sheet order
    pub fn extract(&self) -> RosterResult<Vec<SourceRecord>> {
        let columns = self.layout.source_columns()?;

        // Cached values only, so formula cells yield what Excel last computed
        let mut workbook: Xlsx<_> = open_workbook(&self.path).map_err(|e| {
            RosterError::Workbook(format!(
                "Failed to open roster {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let sheet = &self.layout.source_sheet;
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(RosterError::SheetNotFound(sheet.clone()));
        }
        let range = workbook.worksheet_range(sheet)?;

        let records = self.read_rows(&range, columns);
        debug!(
            sheet = %sheet,
            count = records.len(),
            "extracted roster records"
        );
        Ok(records)
    }

    fn read_rows(&self, range: &Range<Data>, columns: SourceColumns) -> Vec<SourceRecord> {
        let Some((last_row, _)) = range.end() else {
            return Vec::new();
        };

        let first_row = self.layout.first_row.saturating_sub(1);
        let mut records = Vec::new();

        for row in first_row..=last_row {
            let name = cell_text(range, row, columns.name);
            if name.is_empty() {
                continue;
            }

            records.push(SourceRecord {
                name,
                soldier_id: cell_text(range, row, columns.soldier_id),
                id_card: cell_text(range, row, columns.id_card),
            });
        }

        records
    }
}

/// Trimmed text of an absolute cell position, empty when missing
fn cell_text(range: &Range<Data>, row: u32, col: u32) -> String {
    match range.get_value((row, col)) {
        None | Some(Data::Empty) => String::new(),
        Some(Data::String(s)) => s.trim().to_string(),
        // Whole floats print without a fraction (12345.0 → "12345")
        Some(cell) => cell.to_string().trim().to_string(),
    }
}
