use clap::{Args, Parser, Subcommand};
use rosterbook::cli;
use rosterbook::config::{DEFAULT_IMAGES_DIR, DEFAULT_SOURCE_FILE, DEFAULT_WORKBOOK_FILE};
use rosterbook::error::RosterResult;
use rosterbook::excel::SaveOptions;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rosterbook")]
#[command(about = "Fill per-person worksheets from a roster and embed their portraits.")]
#[command(long_about = "Rosterbook - per-person worksheets from a roster workbook

COMMANDS:
  populate      - Clone the template sheet per person and fill name / ids
  embed-images  - Anchor each person's portraits into their sheet
  prune         - Delete every worksheet except the first
  layout        - Print the effective cell layout as YAML

WORKFLOW:
  1. rosterbook populate 工作簿.xlsx --source 人员信息汇总.xlsx
  2. rosterbook embed-images 工作簿.xlsx 照片/
  3. rosterbook prune 工作簿.xlsx --backup     # start over from the template

The workbook is modified in place. Close it in Excel first and keep a
backup (--backup writes <workbook>.bak before saving).

Set RUST_LOG=rosterbook=debug for diagnostic output.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct WriteArgs {
    /// Run every step without writing the workbook
    #[arg(short = 'n', long)]
    dry_run: bool,

    /// Copy the workbook to <workbook>.bak before writing
    #[arg(short, long)]
    backup: bool,

    /// Show per-sheet details
    #[arg(short, long)]
    verbose: bool,
}

impl WriteArgs {
    fn save_options(self) -> SaveOptions {
        SaveOptions {
            dry_run: self.dry_run,
            backup: self.backup,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Create or refresh one worksheet per person in the roster.

Reads name, soldier id and id card from the roster sheet (default Sheet1,
columns C/D/E from row 3). For each person, the sheet with their name is
reused; otherwise the template sheet is cloned and renamed. Name goes to B3,
the soldier id (digits only) to D3, the id card to B4.

Running it twice never creates duplicate sheets.
If the template sheet is missing nothing is written.")]
    /// Create or refresh person sheets from the roster
    Populate {
        /// Target workbook (.xlsx)
        #[arg(env = "ROSTERBOOK_WORKBOOK", default_value = DEFAULT_WORKBOOK_FILE)]
        workbook: PathBuf,

        /// Roster workbook with personnel rows
        #[arg(short, long, env = "ROSTERBOOK_SOURCE", default_value = DEFAULT_SOURCE_FILE)]
        source: PathBuf,

        /// Template sheet name (overrides the layout)
        #[arg(short, long, env = "ROSTERBOOK_TEMPLATE")]
        template: Option<String>,

        /// YAML file overriding sheet, column and cell positions
        #[arg(short, long)]
        layout: Option<PathBuf>,

        #[command(flatten)]
        write: WriteArgs,
    },

    #[command(long_about = "Embed portraits into person sheets.

Image files are named <name><n>.jpg (also .jpeg/.png/.bmp), e.g. 张三1.jpg and
张三2.jpg. For every name that has a worksheet, the two lowest-numbered images
are resized to fill the portrait area (default B19:E21) side by side.
Images without a matching sheet are skipped.")]
    /// Embed portraits into person sheets
    EmbedImages {
        /// Target workbook (.xlsx)
        #[arg(env = "ROSTERBOOK_WORKBOOK", default_value = DEFAULT_WORKBOOK_FILE)]
        workbook: PathBuf,

        /// Directory holding the portrait files
        #[arg(env = "ROSTERBOOK_IMAGES", default_value = DEFAULT_IMAGES_DIR)]
        images: PathBuf,

        /// YAML file overriding the portrait area
        #[arg(short, long)]
        layout: Option<PathBuf>,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Delete every worksheet except the first
    Prune {
        /// Target workbook (.xlsx)
        #[arg(env = "ROSTERBOOK_WORKBOOK", default_value = DEFAULT_WORKBOOK_FILE)]
        workbook: PathBuf,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Print the effective layout as YAML
    Layout {
        /// YAML file to merge over the defaults
        #[arg(short, long)]
        layout: Option<PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "rosterbook=debug" } else { "rosterbook=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> RosterResult<()> {
    let cli = Cli::parse();

    let verbose = match &cli.command {
        Commands::Populate { write, .. }
        | Commands::EmbedImages { write, .. }
        | Commands::Prune { write, .. } => write.verbose,
        Commands::Layout { .. } => false,
    };
    init_tracing(verbose);

    match cli.command {
        Commands::Populate {
            workbook,
            source,
            template,
            layout,
            write,
        } => cli::populate(
            workbook,
            source,
            template,
            layout,
            write.save_options(),
            write.verbose,
        ),

        Commands::EmbedImages {
            workbook,
            images,
            layout,
            write,
        } => cli::embed_images(workbook, images, layout, write.save_options(), write.verbose),

        Commands::Prune { workbook, write } => {
            cli::prune(workbook, write.save_options(), write.verbose)
        }

        Commands::Layout { layout } => cli::layout(layout),
    }
}
