//! Person sheet population - one worksheet per roster record, cloned from a template

use crate::config::{Layout, RecordCells};
use crate::error::{RosterError, RosterResult};
use crate::excel::cell_ref::CellRef;
use crate::excel::workbook::{self, SaveOptions};
use crate::types::{PopulateReport, SourceRecord};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Longest worksheet name Excel accepts
const MAX_SHEET_NAME_LEN: usize = 31;
const FORBIDDEN_SHEET_CHARS: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// Creates or refreshes one person sheet per source record
pub struct SheetPopulator {
    layout: Layout,
}

impl SheetPopulator {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Populate the workbook at `path` and persist it according to `options`
    pub fn populate_file(
        &self,
        path: &Path,
        records: &[SourceRecord],
        options: SaveOptions,
    ) -> RosterResult<PopulateReport> {
        let mut book = workbook::load(path)?;
        let report = self.populate(&mut book, records)?;
        workbook::save(&book, path, options)?;
        Ok(report)
    }

    /// Populate an in-memory workbook.
    ///
    /// The template and every sheet name are checked before the first change,
    /// so an error leaves `book` untouched.
    pub fn populate(
        &self,
        book: &mut Spreadsheet,
        records: &[SourceRecord],
    ) -> RosterResult<PopulateReport> {
        let cells = self.layout.record_cells()?;
        let template_name = self.layout.template_sheet.as_str();

        let template = book
            .get_sheet_by_name(template_name)
            .ok_or_else(|| RosterError::TemplateNotFound(template_name.to_string()))?
            .clone();

        for record in records {
            validate_sheet_name(&record.name)?;
        }

        // Excel compares sheet names case-insensitively
        let mut existing: HashMap<String, String> = workbook::sheet_names(book)
            .into_iter()
            .map(|name| (name.to_lowercase(), name))
            .collect();
        let mut report = PopulateReport::default();

        for record in records {
            let key = record.name.to_lowercase();
            let sheet = if let Some(current) = existing.get(&key) {
                report.updated.push(record.name.clone());
                book.get_sheet_by_name_mut(current)
                    .ok_or_else(|| RosterError::SheetNotFound(current.clone()))?
            } else {
                let mut copy = template.clone();
                copy.set_name(record.name.clone());
                existing.insert(key, record.name.clone());
                report.created.push(record.name.clone());
                debug!(sheet = %record.name, template = template_name, "cloned template");
                book.add_sheet(copy)
                    .map_err(|e| RosterError::Workbook(format!("{}: {}", record.name, e)))?
            };

            write_record(sheet, &cells, record);
        }

        Ok(report)
    }
}

/// Write the three record fields as text so ids keep their leading zeros
fn write_record(sheet: &mut Worksheet, cells: &RecordCells, record: &SourceRecord) {
    set_text(sheet, cells.name, &record.name);
    set_text(sheet, cells.soldier_id, &record.clean_soldier_id());
    set_text(sheet, cells.id_card, &record.id_card);
}

fn set_text(sheet: &mut Worksheet, cell: CellRef, value: &str) {
    // umya addresses cells as one-based (column, row)
    sheet
        .get_cell_mut((cell.column + 1, cell.row + 1))
        .set_value_string(value);
}

/// Reject names Excel would refuse as a worksheet title
pub fn validate_sheet_name(name: &str) -> RosterResult<()> {
    let invalid = |reason: &str| {
        Err(RosterError::InvalidSheetName {
            name: name.to_string(),
            reason: reason.to_string(),
        })
    };

    if name.trim().is_empty() {
        return invalid("name is empty");
    }
    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return invalid("longer than 31 characters");
    }
    if let Some(c) = name.chars().find(|c| FORBIDDEN_SHEET_CHARS.contains(c)) {
        return invalid(&format!("contains '{}'", c));
    }
    if name.starts_with('\'') || name.ends_with('\'') {
        return invalid("starts or ends with an apostrophe");
    }
    Ok(())
}
