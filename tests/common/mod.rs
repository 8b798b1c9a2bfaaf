//! Fixture builders shared by the integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use umya_spreadsheet::Spreadsheet;

pub const TEMPLATE: &str = "肖龙飞";

/// A roster row: name, soldier id, id card. Empty strings leave the cell blank.
pub type Row<'a> = (&'a str, &'a str, &'a str);

/// Write a roster workbook laid out like the real one: two title rows,
/// then people in columns C/D/E of `Sheet1`.
pub fn write_roster(path: &Path, rows: &[Row]) {
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Sheet1").unwrap();
    sheet.write_string(0, 0, "2025年驾校考核人员信息汇总").unwrap();
    sheet.write_string(1, 2, "姓名").unwrap();
    sheet.write_string(1, 3, "士兵证号").unwrap();
    sheet.write_string(1, 4, "身份证号").unwrap();

    for (offset, (name, soldier_id, id_card)) in rows.iter().enumerate() {
        let row = 2 + offset as u32;
        for (col, value) in [(2u16, name), (3, soldier_id), (4, id_card)] {
            if !value.is_empty() {
                sheet.write_string(row, col, *value).unwrap();
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Build a target workbook holding the template sheet plus `extra` sheets
pub fn template_book(extra: &[&str]) -> Spreadsheet {
    let mut book = umya_spreadsheet::new_file();
    {
        let template = book.get_sheet_mut(&0).unwrap();
        template.set_name(TEMPLATE);
        template.get_cell_mut("A1").set_value_string("驾校考核个人登记表");
        template.get_cell_mut("A3").set_value_string("姓名");
        template.get_cell_mut("C3").set_value_string("士兵证号");
        template.get_cell_mut("A4").set_value_string("身份证号");
    }
    for name in extra {
        book.new_sheet(*name).unwrap();
    }
    book
}

pub fn write_template_workbook(path: &Path, extra: &[&str]) {
    umya_spreadsheet::writer::xlsx::write(&template_book(extra), path).unwrap();
}

pub fn read_book(path: &Path) -> Spreadsheet {
    umya_spreadsheet::reader::xlsx::read(path).unwrap()
}

pub fn sheet_names(path: &Path) -> Vec<String> {
    rosterbook::excel::workbook::sheet_names(&read_book(path))
}

pub fn cell_text(book: &Spreadsheet, sheet: &str, cell: &str) -> String {
    book.get_sheet_by_name(sheet)
        .and_then(|s| s.get_cell(cell))
        .map(|c| c.get_value().to_string())
        .unwrap_or_default()
}

/// Write a solid-colour image; the format follows the file extension
pub fn write_portrait(dir: &Path, name: &str) -> PathBuf {
    write_coloured_portrait(dir, name, [90, 120, 200])
}

pub fn write_coloured_portrait(dir: &Path, name: &str, rgb: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    image::RgbImage::from_pixel(30, 40, image::Rgb(rgb))
        .save(&path)
        .unwrap();
    path
}

/// Centre pixel of every picture anchored in `sheet`, in anchoring order
pub fn anchored_colours(book: &Spreadsheet, sheet: &str) -> Vec<[u8; 3]> {
    book.get_sheet_by_name(sheet)
        .map(|s| s.get_image_collection().iter().collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter()
        .map(|picture| {
            let decoded = image::load_from_memory(picture.get_image_data())
                .unwrap()
                .to_rgb8();
            decoded
                .get_pixel(decoded.width() / 2, decoded.height() / 2)
                .0
        })
        .collect()
}

/// Whether two colours match within resampling noise
pub fn same_colour(a: [u8; 3], b: [u8; 3]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
}
