//! Pixel geometry of a worksheet area
//!
//! Excel stores column widths in characters and row heights in points. The
//! conversions below follow Excel's rendering at 96 DPI with the default
//! Calibri 11 font, which is what the portrait area is sized against.

/// Excel's width for a column with no explicit width, in characters
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.38;
/// Excel's height for a row with no explicit height, in points
pub const DEFAULT_ROW_HEIGHT: f64 = 15.0;
/// English Metric Units per pixel at 96 DPI
pub const EMU_PER_PIXEL: i64 = 9525;

/// Column width in characters → pixels; `None` or non-positive uses the default
pub fn column_width_to_pixels(width: Option<f64>) -> f64 {
    let width = match width {
        Some(w) if w > 0.0 => w,
        _ => DEFAULT_COLUMN_WIDTH,
    };
    if width < 1.0 {
        (width * 12.0 + 0.5).floor()
    } else {
        (width * 7.0 + 5.0).floor()
    }
}

/// Row height in points → pixels; `None` or non-positive uses the default
pub fn row_height_to_pixels(height: Option<f64>) -> f64 {
    let height = match height {
        Some(h) if h > 0.0 => h,
        _ => DEFAULT_ROW_HEIGHT,
    };
    height * 4.0 / 3.0
}

pub fn pixels_to_emu(pixels: u32) -> i64 {
    i64::from(pixels) * EMU_PER_PIXEL
}

/// Split `total` pixels into `count` adjacent shares.
///
/// Share edges are placed at rounded multiples of `total / count` (ties to
/// even), so the shares always add back up to `total` when it is large enough;
/// every share is at least one pixel wide.
pub fn split_width(total: u32, count: usize) -> Vec<u32> {
    if count == 0 {
        return Vec::new();
    }

    let base = f64::from(total) / count as f64;
    let mut shares = Vec::with_capacity(count);
    let mut cumulative = 0.0;
    let mut previous_right: i64 = 0;

    for _ in 0..count {
        cumulative += base;
        let right = cumulative.round_ties_even() as i64;
        shares.push((right - previous_right).max(1) as u32);
        previous_right = right;
    }

    shares
}

/// Position of a horizontal pixel offset inside a run of columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnOffset {
    /// Index into the run of columns
    pub column: usize,
    /// Pixels from the left edge of that column
    pub offset: u32,
}

/// Locate `offset` pixels from the left edge of `widths`.
///
/// Offsets at or past the right edge clamp to one pixel inside the last column.
pub fn locate_offset(widths: &[u32], offset: u32) -> ColumnOffset {
    let mut remaining = offset;
    let mut column = 0;

    for &width in widths {
        if remaining < width {
            break;
        }
        remaining -= width;
        column += 1;
    }

    if column >= widths.len() {
        let last = widths.last().copied().unwrap_or(0);
        return ColumnOffset {
            column: widths.len().saturating_sub(1),
            offset: last.saturating_sub(1),
        };
    }

    ColumnOffset {
        column,
        offset: remaining,
    }
}
