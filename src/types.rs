use regex::Regex;
use std::path::PathBuf;
use std::sync::OnceLock;

//==============================================================================
// Source Records
//==============================================================================

/// One personnel row read from the source roster
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceRecord {
    /// Person name, also the name of their worksheet
    pub name: String,
    /// Soldier id exactly as it appears in the roster
    pub soldier_id: String,
    /// Identity card number
    pub id_card: String,
}

impl SourceRecord {
    pub fn new(
        name: impl Into<String>,
        soldier_id: impl Into<String>,
        id_card: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            soldier_id: soldier_id.into(),
            id_card: id_card.into(),
        }
    }

    /// Soldier id with every non-digit character removed
    pub fn clean_soldier_id(&self) -> String {
        extract_digits(&self.soldier_id)
    }
}

/// Keep only the ASCII digits of `raw`, in order.
///
/// Applying it to its own output returns the same string.
pub fn extract_digits(raw: &str) -> String {
    static DIGIT: OnceLock<Regex> = OnceLock::new();
    let digit = DIGIT.get_or_init(|| Regex::new(r"[0-9]+").expect("valid digit pattern"));

    digit.find_iter(raw).map(|m| m.as_str()).collect()
}

//==============================================================================
// Portraits
//==============================================================================

/// An image file that belongs to one person sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Portrait {
    /// Name prefix of the file, matched against sheet names
    pub owner: String,
    /// Trailing number of the file stem, 0 when absent
    pub order: u32,
    pub path: PathBuf,
}

//==============================================================================
// Run Reports
//==============================================================================

/// Outcome of a populate run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PopulateReport {
    /// Sheets cloned from the template in this run
    pub created: Vec<String>,
    /// Sheets that already existed and were overwritten
    pub updated: Vec<String>,
}

impl PopulateReport {
    pub fn total(&self) -> usize {
        self.created.len() + self.updated.len()
    }
}

/// Outcome of an embed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedReport {
    /// Sheets that received portraits
    pub sheets: Vec<String>,
    /// Number of images anchored across all sheets
    pub images: usize,
    /// Portrait owners with no matching sheet
    pub skipped: Vec<String>,
}
