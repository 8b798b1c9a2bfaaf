//! Workbook layout configuration
//!
//! Every fixed position the tools rely on lives in [`Layout`]. The defaults
//! describe the roster and worksheet template the tools were built for; a YAML
//! file can override any subset of them:
//!
//! ```yaml
//! template_sheet: 模板
//! first_row: 2
//! portrait_rows: [20, 21, 22]
//! ```

use crate::error::{RosterError, RosterResult};
use crate::excel::cell_ref::{column_index, CellRef};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_SOURCE_FILE: &str = "人员信息汇总.xlsx";
pub const DEFAULT_WORKBOOK_FILE: &str = "工作簿.xlsx";
pub const DEFAULT_IMAGES_DIR: &str = "照片";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Layout {
    /// Sheet of the source workbook holding the roster
    pub source_sheet: String,
    /// One-based row where roster data starts
    pub first_row: u32,
    pub name_column: String,
    pub soldier_id_column: String,
    pub id_card_column: String,

    /// Sheet cloned for every new person
    pub template_sheet: String,
    pub name_cell: String,
    pub soldier_id_cell: String,
    pub id_card_cell: String,

    /// Top-left cell of the portrait area
    pub portrait_cell: String,
    /// Columns spanned by the portrait area
    pub portrait_columns: Vec<String>,
    /// One-based rows spanned by the portrait area
    pub portrait_rows: Vec<u32>,
    /// Maximum number of portraits placed side by side
    pub max_portraits: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            source_sheet: "Sheet1".to_string(),
            first_row: 3,
            name_column: "C".to_string(),
            soldier_id_column: "D".to_string(),
            id_card_column: "E".to_string(),
            template_sheet: "肖龙飞".to_string(),
            name_cell: "B3".to_string(),
            soldier_id_cell: "D3".to_string(),
            id_card_cell: "B4".to_string(),
            portrait_cell: "B19".to_string(),
            portrait_columns: ["B", "C", "D", "E"].iter().map(|c| c.to_string()).collect(),
            portrait_rows: vec![19, 20, 21],
            max_portraits: 2,
        }
    }
}

/// Source column indices resolved from a [`Layout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceColumns {
    pub name: u32,
    pub soldier_id: u32,
    pub id_card: u32,
}

/// Target cells resolved from a [`Layout`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCells {
    pub name: CellRef,
    pub soldier_id: CellRef,
    pub id_card: CellRef,
}

impl Layout {
    /// Load a layout from a YAML file, filling unspecified fields with defaults
    pub fn from_file(path: &Path) -> RosterResult<Self> {
        let content = fs::read_to_string(path)?;
        let layout: Layout = serde_yaml::from_str(&content)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Load `path` when given, otherwise use the defaults
    pub fn load(path: Option<&Path>) -> RosterResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn to_yaml(&self) -> RosterResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check every reference in the layout resolves
    pub fn validate(&self) -> RosterResult<()> {
        if self.source_sheet.trim().is_empty() {
            return Err(RosterError::Config("source_sheet must not be empty".into()));
        }
        if self.template_sheet.trim().is_empty() {
            return Err(RosterError::Config("template_sheet must not be empty".into()));
        }
        if self.first_row == 0 {
            return Err(RosterError::Config("first_row is one-based and must be at least 1".into()));
        }
        self.source_columns()?;
        self.record_cells()?;
        self.portrait_anchor()?;
        self.portrait_column_letters()?;

        if self.portrait_rows.is_empty() {
            return Err(RosterError::Config("portrait_rows must not be empty".into()));
        }
        if self.portrait_rows.contains(&0) {
            return Err(RosterError::Config("portrait_rows are one-based".into()));
        }
        if self.max_portraits == 0 {
            return Err(RosterError::Config("max_portraits must be at least 1".into()));
        }
        Ok(())
    }

    pub fn source_columns(&self) -> RosterResult<SourceColumns> {
        Ok(SourceColumns {
            name: parse_column(&self.name_column)?,
            soldier_id: parse_column(&self.soldier_id_column)?,
            id_card: parse_column(&self.id_card_column)?,
        })
    }

    pub fn record_cells(&self) -> RosterResult<RecordCells> {
        Ok(RecordCells {
            name: CellRef::parse(&self.name_cell)?,
            soldier_id: CellRef::parse(&self.soldier_id_cell)?,
            id_card: CellRef::parse(&self.id_card_cell)?,
        })
    }

    pub fn portrait_anchor(&self) -> RosterResult<CellRef> {
        CellRef::parse(&self.portrait_cell)
    }

    /// Upper-cased portrait column letters, checked to be real columns
    pub fn portrait_column_letters(&self) -> RosterResult<Vec<String>> {
        if self.portrait_columns.is_empty() {
            return Err(RosterError::Config("portrait_columns must not be empty".into()));
        }
        self.portrait_columns
            .iter()
            .map(|letters| {
                parse_column(letters)?;
                Ok(letters.trim().to_ascii_uppercase())
            })
            .collect()
    }
}

fn parse_column(letters: &str) -> RosterResult<u32> {
    column_index(letters.trim())
        .ok_or_else(|| RosterError::Config(format!("'{}' is not a column", letters)))
}
