//! A1-style cell references

use crate::error::{RosterError, RosterResult};
use std::fmt;

/// Zero-based cell position parsed from an A1 reference such as `B19`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRef {
    pub column: u32,
    pub row: u32,
}

impl CellRef {
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Parse `"B19"` (case-insensitive, optional `$` markers) into column 1, row 18
    pub fn parse(reference: &str) -> RosterResult<Self> {
        let cleaned: String = reference.trim().chars().filter(|c| *c != '$').collect();
        let split = cleaned
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| RosterError::InvalidCellRef(reference.to_string()))?;
        let (letters, digits) = cleaned.split_at(split);

        let column = column_index(letters)
            .ok_or_else(|| RosterError::InvalidCellRef(reference.to_string()))?;
        let row: u32 = digits
            .parse()
            .map_err(|_| RosterError::InvalidCellRef(reference.to_string()))?;
        if row == 0 {
            return Err(RosterError::InvalidCellRef(reference.to_string()));
        }

        Ok(Self::new(column, row - 1))
    }

    /// One-based row number as shown in Excel
    pub fn row_number(&self) -> u32 {
        self.row + 1
    }

    /// Column letters of this cell (`B` for column 1)
    pub fn column_letter(&self) -> String {
        column_letter(self.column)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letter(), self.row_number())
    }
}

/// Convert column index to Excel column letter (0→A, 1→B, 25→Z, 26→AA, etc.)
pub fn column_letter(index: u32) -> String {
    let mut result = String::new();
    let mut idx = index;

    loop {
        let remainder = idx % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }

    result
}

/// Convert Excel column letters to a zero-based index (A→0, AA→26).
///
/// Returns `None` for empty input, non-letters, or columns past `XFD`.
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }

    let mut value: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        value = value * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }

    // XFD is the last column Excel allows
    if value > 16_384 {
        return None;
    }
    Some(value - 1)
}
