use crate::config::Layout;
use crate::error::{RosterError, RosterResult};
use crate::excel::workbook::backup_path;
use crate::excel::{ImageEmbedder, RecordExtractor, SaveOptions, SheetPopulator, SheetPruner};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Load the layout file if one was given, applying a template override on top
fn resolve_layout(layout: Option<&Path>, template: Option<String>) -> RosterResult<Layout> {
    let mut resolved = Layout::load(layout)?;
    if let Some(template) = template {
        resolved.template_sheet = template;
        resolved.validate()?;
    }
    Ok(resolved)
}

fn print_save_mode(save: SaveOptions) {
    if save.dry_run {
        println!(
            "{}",
            "📋 DRY RUN MODE - No changes will be written\n".yellow()
        );
    }
}

fn print_saved(workbook: &Path, save: SaveOptions) {
    if save.dry_run {
        println!("{}", "📋 Dry run complete - no changes written".yellow());
        return;
    }
    if save.backup {
        println!("   Backup: {}", backup_path(workbook).display());
    }
    println!("   Saved: {}\n", workbook.display());
}

fn require_workbook(workbook: &Path) -> RosterResult<()> {
    if !workbook.is_file() {
        return Err(RosterError::Workbook(format!(
            "Workbook not found: {}",
            workbook.display()
        )));
    }
    Ok(())
}

/// Execute the populate command
pub fn populate(
    workbook: PathBuf,
    source: PathBuf,
    template: Option<String>,
    layout: Option<PathBuf>,
    save: SaveOptions,
    verbose: bool,
) -> RosterResult<()> {
    let layout = resolve_layout(layout.as_deref(), template)?;

    println!("{}", "📝 Rosterbook - Populating person sheets".bold().green());
    println!("   Roster:   {}", source.display());
    println!("   Workbook: {}", workbook.display());
    println!("   Template: {}\n", layout.template_sheet.bright_blue());
    print_save_mode(save);

    if verbose {
        println!(
            "{}",
            format!(
                "📖 Reading '{}' from row {}...",
                layout.source_sheet, layout.first_row
            )
            .cyan()
        );
    }

    let records = RecordExtractor::new(&source, layout.clone()).extract()?;

    if verbose {
        println!("   Found {} people\n", records.len());
    }

    let report = SheetPopulator::new(layout).populate_file(&workbook, &records, save)?;

    if verbose {
        for name in &report.created {
            println!("   {} {}", "+".green().bold(), name);
        }
        for name in &report.updated {
            println!("   {} {}", "~".yellow().bold(), name);
        }
        println!();
    }

    println!(
        "{}",
        format!("✅ Processed {} people", report.total()).bold().green()
    );
    println!(
        "   {} sheets created, {} sheets updated",
        report.created.len(),
        report.updated.len()
    );
    print_saved(&workbook, save);

    Ok(())
}

/// Execute the embed-images command
pub fn embed_images(
    workbook: PathBuf,
    images: PathBuf,
    layout: Option<PathBuf>,
    save: SaveOptions,
    verbose: bool,
) -> RosterResult<()> {
    let layout = resolve_layout(layout.as_deref(), None)?;
    require_workbook(&workbook)?;

    println!("{}", "🖼  Rosterbook - Embedding portraits".bold().green());
    println!("   Workbook: {}", workbook.display());
    println!("   Images:   {}", images.display());
    println!("   Anchor:   {}\n", layout.portrait_cell.bright_blue());
    print_save_mode(save);

    let report = ImageEmbedder::new(layout).embed_file(&workbook, &images, save)?;

    if verbose {
        for name in &report.sheets {
            println!("   {} {}", "+".green().bold(), name);
        }
        for name in &report.skipped {
            println!("   {} {} (no worksheet)", "-".dimmed(), name.dimmed());
        }
        println!();
    }

    println!(
        "{}",
        format!(
            "✅ Embedded {} portraits into {} sheets",
            report.images,
            report.sheets.len()
        )
        .bold()
        .green()
    );
    if !report.skipped.is_empty() {
        println!(
            "   {} portrait owners had no matching sheet",
            report.skipped.len()
        );
    }
    print_saved(&workbook, save);

    Ok(())
}

/// Execute the prune command
pub fn prune(workbook: PathBuf, save: SaveOptions, verbose: bool) -> RosterResult<()> {
    require_workbook(&workbook)?;

    println!("{}", "✂  Rosterbook - Pruning worksheets".bold().green());
    println!("   Workbook: {}\n", workbook.display());
    print_save_mode(save);

    if !save.backup && !save.dry_run {
        println!(
            "{}",
            "⚠️  Removed sheets cannot be recovered without a backup (--backup)".yellow()
        );
    }

    let removed = SheetPruner::prune_file(&workbook, save)?;

    if verbose {
        for name in &removed {
            println!("   {} {}", "-".red().bold(), name);
        }
        println!();
    }

    println!(
        "{}",
        format!("✅ Removed {} extra worksheets", removed.len())
            .bold()
            .green()
    );
    print_saved(&workbook, save);

    Ok(())
}

/// Execute the layout command - print the effective layout as YAML
pub fn layout(layout: Option<PathBuf>) -> RosterResult<()> {
    let resolved = Layout::load(layout.as_deref())?;
    print!("{}", resolved.to_yaml()?);
    Ok(())
}
