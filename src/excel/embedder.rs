//! Portrait embedding - image directory → pictures anchored in person sheets

use crate::config::Layout;
use crate::error::{RosterError, RosterResult};
use crate::excel::cell_ref::CellRef;
use crate::excel::geometry::{
    column_width_to_pixels, locate_offset, pixels_to_emu, row_height_to_pixels, split_width,
};
use crate::excel::workbook::{self, SaveOptions};
use crate::portraits::PortraitIndex;
use crate::types::{EmbedReport, Portrait};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};
use umya_spreadsheet::structs::drawing::spreadsheet::MarkerType;
use umya_spreadsheet::structs::Image;
use umya_spreadsheet::{Spreadsheet, Worksheet};

/// Pixel box the portraits of one sheet are fitted into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortraitArea {
    /// Top-left cell of the area
    pub anchor: CellRef,
    /// Pixel width of each column the area spans
    pub column_widths: Vec<u32>,
    pub width: u32,
    pub height: u32,
}

/// Where and how large one portrait is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Zero-based column the picture starts in
    pub column: u32,
    /// Pixels from the left edge of `column`
    pub column_offset: u32,
    /// Zero-based row the picture starts in
    pub row: u32,
    pub width: u32,
    pub height: u32,
}

impl PortraitArea {
    /// Measure the layout's portrait area on `sheet`
    pub fn measure(sheet: &Worksheet, layout: &Layout) -> RosterResult<Self> {
        let anchor = layout.portrait_anchor()?;

        let column_pixels: Vec<f64> = layout
            .portrait_column_letters()?
            .iter()
            .map(|letter| {
                let width = sheet
                    .get_column_dimension(letter)
                    .map(|column| column.get_width().to_owned());
                column_width_to_pixels(width)
            })
            .collect();

        let height: f64 = layout
            .portrait_rows
            .iter()
            .map(|row| {
                let height = sheet
                    .get_row_dimension(row)
                    .map(|dimension| dimension.get_height().to_owned());
                row_height_to_pixels(height)
            })
            .sum();

        Ok(Self {
            anchor,
            width: column_pixels.iter().sum::<f64>() as u32,
            height: height as u32,
            column_widths: column_pixels.iter().map(|px| *px as u32).collect(),
        })
    }

    /// Lay `count` portraits side by side across the full area
    pub fn placements(&self, count: usize) -> Vec<Placement> {
        if self.width == 0 || self.height == 0 {
            return Vec::new();
        }

        let mut offset = 0;
        split_width(self.width, count)
            .into_iter()
            .map(|width| {
                let located = locate_offset(&self.column_widths, offset);
                offset += width;
                Placement {
                    column: self.anchor.column + located.column as u32,
                    column_offset: located.offset,
                    row: self.anchor.row,
                    width,
                    height: self.height,
                }
            })
            .collect()
    }
}

/// Anchors each person's first portraits into their worksheet
pub struct ImageEmbedder {
    layout: Layout,
}

impl ImageEmbedder {
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }

    /// Embed portraits from `images_dir` into the workbook at `path`
    pub fn embed_file(
        &self,
        path: &Path,
        images_dir: &Path,
        options: SaveOptions,
    ) -> RosterResult<EmbedReport> {
        if !images_dir.is_dir() {
            return Err(RosterError::Config(format!(
                "Image directory does not exist or is not a directory: {}",
                images_dir.display()
            )));
        }

        let index = PortraitIndex::scan(images_dir)?;
        info!(owners = index.len(), dir = %images_dir.display(), "portraits indexed");

        let mut book = workbook::load(path)?;
        let report = self.embed(&mut book, &index)?;
        workbook::save(&book, path, options)?;
        Ok(report)
    }

    /// Embed portraits into an in-memory workbook
    pub fn embed(&self, book: &mut Spreadsheet, index: &PortraitIndex) -> RosterResult<EmbedReport> {
        self.layout.validate()?;
        let mut report = EmbedReport::default();
        let mut media = MediaNames::from_book(book);

        for (owner, portraits) in index.iter() {
            let Some(position) = workbook::sheet_names(book).iter().position(|n| n == owner) else {
                debug!(owner, "no worksheet for portraits, skipped");
                report.skipped.push(owner.to_string());
                continue;
            };

            let chosen = &portraits[..portraits.len().min(self.layout.max_portraits)];
            let sheet = book
                .get_sheet_mut(&position)
                .ok_or_else(|| RosterError::SheetNotFound(owner.to_string()))?;

            let area = PortraitArea::measure(sheet, &self.layout)?;
            let placements = area.placements(chosen.len());

            let mut anchored = 0;
            for (portrait, placement) in chosen.iter().zip(&placements) {
                let image = build_image(portrait, placement, &mut media)?;
                sheet.add_image(image);
                anchored += 1;
            }

            if anchored == 0 {
                debug!(sheet = owner, "portrait area has no size, nothing anchored");
                continue;
            }
            debug!(sheet = owner, images = anchored, "portraits anchored");
            report.images += anchored;
            report.sheets.push(owner.to_string());
        }

        Ok(report)
    }
}

/// Media part names already used anywhere in a workbook.
///
/// The writer stores one media part per name; a reused name keeps the older
/// picture's bytes.
struct MediaNames {
    taken: HashSet<String>,
    next: usize,
}

impl MediaNames {
    fn from_book(book: &Spreadsheet) -> Self {
        let taken = book
            .get_sheet_collection()
            .iter()
            .flat_map(|sheet| sheet.get_image_collection())
            .map(|image| image.get_image_name().to_string())
            .collect();
        Self { taken, next: 1 }
    }

    /// Next free `portrait<n>.<extension>`, kept ASCII
    fn allocate(&mut self, extension: &str) -> String {
        loop {
            let name = format!("portrait{}.{}", self.next, extension);
            self.next += 1;
            if self.taken.insert(name.clone()) {
                return name;
            }
        }
    }
}

/// Resize a portrait to its placement and wrap it in a one-cell anchor
fn build_image(
    portrait: &Portrait,
    placement: &Placement,
    media: &mut MediaNames,
) -> RosterResult<Image> {
    let format = ImageFormat::from_path(&portrait.path)?;
    let bytes = resize_portrait(&portrait.path, placement.width, placement.height, format)?;

    let extension = format.extensions_str().first().copied().unwrap_or("png");
    let media_name = media.allocate(extension);

    let mut marker = MarkerType::default();
    marker
        .set_col(placement.column as _)
        .set_col_off(pixels_to_emu(placement.column_offset) as _)
        .set_row(placement.row as _)
        .set_row_off(0);

    let mut image = Image::default();
    image.new_image_with_dimensions(
        placement.height,
        placement.width,
        &media_name,
        bytes,
        marker,
    );
    Ok(image)
}

/// Stretch the image at `path` to exactly `width` x `height` and re-encode it
pub fn resize_portrait(
    path: &Path,
    width: u32,
    height: u32,
    format: ImageFormat,
) -> RosterResult<Vec<u8>> {
    let source = image::open(path)?;
    let resized = source.resize_exact(width, height, FilterType::CatmullRom);

    // JPEG has no alpha channel
    let resized = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(resized.to_rgb8()),
        _ => resized,
    };

    let mut bytes = Vec::new();
    resized.write_to(&mut Cursor::new(&mut bytes), format)?;
    Ok(bytes)
}
