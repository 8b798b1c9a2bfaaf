//! Roster extraction and person sheet population against real .xlsx files

mod common;

use common::{cell_text, read_book, sheet_names, write_roster, write_template_workbook, TEMPLATE};
use pretty_assertions::assert_eq;
use rosterbook::config::Layout;
use rosterbook::excel::{RecordExtractor, SaveOptions, SheetPopulator};
use rosterbook::{RosterError, SourceRecord};
use std::fs;
use tempfile::TempDir;

// ═══════════════════════════════════════════════════════════════════════════
// RECORD EXTRACTOR TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_extract_reads_rows_from_third_row() {
    let temp_dir = TempDir::new().unwrap();
    let roster = temp_dir.path().join("roster.xlsx");
    write_roster(
        &roster,
        &[
            ("张三", "兵字 0012", "110101199001011234"),
            ("", "999", "orphan"),
            ("李四", "", ""),
        ],
    );

    let records = RecordExtractor::new(&roster, Layout::default())
        .extract()
        .unwrap();

    assert_eq!(
        records,
        vec![
            SourceRecord::new("张三", "兵字 0012", "110101199001011234"),
            SourceRecord::new("李四", "", ""),
        ]
    );
}

#[test]
fn test_extract_missing_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let roster = temp_dir.path().join("roster.xlsx");
    write_roster(&roster, &[("张三", "1", "2")]);

    let layout = Layout {
        source_sheet: "花名册".to_string(),
        ..Layout::default()
    };
    let result = RecordExtractor::new(&roster, layout).extract();

    assert!(matches!(result, Err(RosterError::SheetNotFound(ref s)) if s == "花名册"));
}

// ═══════════════════════════════════════════════════════════════════════════
// SHEET POPULATOR TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_every_named_row_gets_a_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let roster = temp_dir.path().join("roster.xlsx");
    let target = temp_dir.path().join("target.xlsx");
    write_roster(
        &roster,
        &[
            ("张三", "A-001", "110"),
            ("李四", "B-002", "120"),
            ("  ", "C-003", "130"),
            ("王五", "", "140"),
        ],
    );
    write_template_workbook(&target, &[]);

    let layout = Layout::default();
    let records = RecordExtractor::new(&roster, layout.clone())
        .extract()
        .unwrap();
    let report = SheetPopulator::new(layout)
        .populate_file(&target, &records, SaveOptions::default())
        .unwrap();

    assert_eq!(report.created.len(), 3);
    assert_eq!(sheet_names(&target), vec![TEMPLATE, "张三", "李四", "王五"]);

    let book = read_book(&target);
    assert_eq!(cell_text(&book, "李四", "B3"), "李四");
    assert_eq!(cell_text(&book, "李四", "D3"), "002");
    assert_eq!(cell_text(&book, "李四", "B4"), "120");
    assert_eq!(cell_text(&book, "王五", "D3"), "");
    // Template content carried into the clone
    assert_eq!(cell_text(&book, "王五", "A4"), "身份证号");
}

#[test]
fn test_second_run_creates_no_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target.xlsx");
    write_template_workbook(&target, &[]);

    let populator = SheetPopulator::new(Layout::default());
    let records = vec![
        SourceRecord::new("张三", "1", "A"),
        SourceRecord::new("李四", "2", "B"),
    ];

    populator
        .populate_file(&target, &records, SaveOptions::default())
        .unwrap();
    let after_first = sheet_names(&target);

    let report = populator
        .populate_file(&target, &records, SaveOptions::default())
        .unwrap();

    assert!(report.created.is_empty());
    assert_eq!(report.updated.len(), 2);
    assert_eq!(sheet_names(&target), after_first);
}

#[test]
fn test_rerun_with_different_case_reuses_sheet() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target.xlsx");
    write_template_workbook(&target, &[]);

    let populator = SheetPopulator::new(Layout::default());
    populator
        .populate_file(&target, &[SourceRecord::new("Tom", "1", "A")], SaveOptions::default())
        .unwrap();

    let report = populator
        .populate_file(&target, &[SourceRecord::new("TOM", "2", "B")], SaveOptions::default())
        .unwrap();

    assert!(report.created.is_empty());
    assert_eq!(report.updated, vec!["TOM".to_string()]);
    assert_eq!(sheet_names(&target), vec![TEMPLATE, "Tom"]);
    assert_eq!(cell_text(&read_book(&target), "Tom", "D3"), "2");
}

#[test]
fn test_existing_person_sheet_is_overwritten_in_place() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target.xlsx");
    write_template_workbook(&target, &["张三"]);

    SheetPopulator::new(Layout::default())
        .populate_file(
            &target,
            &[SourceRecord::new("张三", "证 42", "X")],
            SaveOptions::default(),
        )
        .unwrap();

    let book = read_book(&target);
    assert_eq!(sheet_names(&target), vec![TEMPLATE, "张三"]);
    assert_eq!(cell_text(&book, "张三", "D3"), "42");
    // Reused, not cloned: the template title never appears
    assert_eq!(cell_text(&book, "张三", "A1"), "");
}

#[test]
fn test_missing_template_fails_without_touching_file() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target.xlsx");
    write_template_workbook(&target, &[]);
    let before = fs::read(&target).unwrap();

    let layout = Layout {
        template_sheet: "不存在".to_string(),
        ..Layout::default()
    };
    let result = SheetPopulator::new(layout).populate_file(
        &target,
        &[SourceRecord::new("张三", "1", "2")],
        SaveOptions::default(),
    );

    assert!(matches!(result, Err(RosterError::TemplateNotFound(_))));
    assert_eq!(fs::read(&target).unwrap(), before);
}

#[test]
fn test_dry_run_and_backup() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target.xlsx");
    write_template_workbook(&target, &[]);
    let records = vec![SourceRecord::new("张三", "1", "2")];
    let populator = SheetPopulator::new(Layout::default());

    let dry = SaveOptions {
        dry_run: true,
        backup: true,
    };
    let report = populator.populate_file(&target, &records, dry).unwrap();
    assert_eq!(report.created, vec!["张三".to_string()]);
    assert_eq!(sheet_names(&target), vec![TEMPLATE]);
    assert!(!temp_dir.path().join("target.xlsx.bak").exists());

    let with_backup = SaveOptions {
        dry_run: false,
        backup: true,
    };
    populator.populate_file(&target, &records, with_backup).unwrap();
    assert_eq!(sheet_names(&target), vec![TEMPLATE, "张三"]);
    assert_eq!(
        sheet_names(&temp_dir.path().join("target.xlsx.bak")),
        vec![TEMPLATE]
    );
}

#[test]
fn test_custom_layout_cells() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join("target.xlsx");
    write_template_workbook(&target, &[]);

    let layout = Layout {
        name_cell: "C5".to_string(),
        soldier_id_cell: "C6".to_string(),
        id_card_cell: "C7".to_string(),
        ..Layout::default()
    };
    SheetPopulator::new(layout)
        .populate_file(
            &target,
            &[SourceRecord::new("赵六", "#88", "ID")],
            SaveOptions::default(),
        )
        .unwrap();

    let book = read_book(&target);
    assert_eq!(cell_text(&book, "赵六", "C5"), "赵六");
    assert_eq!(cell_text(&book, "赵六", "C6"), "88");
    assert_eq!(cell_text(&book, "赵六", "C7"), "ID");
    assert_eq!(cell_text(&book, "赵六", "B3"), "");
}
