//! sheetpdf CLI - spreadsheet to PDF conversion tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;

use sheetpdf::{
    convert_file, layout_sheet, render, ConvertOptions, JsonFormat, LayoutOptions, Metadata,
    XlsxParser,
};

#[derive(Parser)]
#[command(name = "sheetpdf")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert spreadsheet (.xlsx) workbooks to PDF", long_about = None)]
struct Cli {
    /// Input workbook
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output PDF file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a workbook to PDF
    Convert {
        /// Input workbook
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output PDF file (defaults to <FILE stem>.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show workbook information
    Info {
        /// Input workbook
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Dump the laid-out pages as JSON
    Json {
        /// Input workbook
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Dump the parsed cell grid instead of the laid-out pages
        #[arg(long)]
        cells: bool,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Default)]
struct LayoutArgs {
    /// Body font size in points
    #[arg(long, value_name = "PT")]
    font_size: Option<f32>,

    /// Margin on all four sides in points
    #[arg(long, value_name = "PT")]
    margin: Option<f32>,

    /// Gap between columns in points
    #[arg(long, value_name = "PT")]
    padding: Option<f32>,

    /// Line height as a multiple of the font size
    #[arg(long, value_name = "FACTOR")]
    line_spacing: Option<f32>,

    /// Paper size
    #[arg(long, value_enum, default_value = "letter")]
    page_size: PageSize,

    /// Landscape orientation
    #[arg(long)]
    landscape: bool,

    /// Do not print the sheet name above each sheet
    #[arg(long)]
    no_sheet_name: bool,

    /// Sheets to convert by 0-based index (e.g. "0,2")
    #[arg(long, value_delimiter = ',', value_name = "INDICES")]
    sheets: Option<Vec<usize>>,

    /// Sheets to convert by name (e.g. "Summary,Data")
    #[arg(long, value_delimiter = ',', value_name = "NAMES", conflicts_with = "sheets")]
    sheet_names: Option<Vec<String>>,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Document author
    #[arg(long)]
    author: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
enum PageSize {
    /// US Letter (612 x 792 pt)
    #[default]
    Letter,
    /// A4 (595 x 842 pt)
    A4,
}

impl LayoutArgs {
    fn to_options(&self) -> ConvertOptions {
        let mut layout = match self.page_size {
            PageSize::Letter => LayoutOptions::letter(),
            PageSize::A4 => LayoutOptions::a4(),
        };
        if self.landscape {
            layout = layout.rotated();
        }
        if let Some(size) = self.font_size {
            layout = layout.with_font_size(size);
        }
        if let Some(margin) = self.margin {
            layout = layout.with_margins(margin);
        }
        if let Some(padding) = self.padding {
            layout = layout.with_column_padding(padding);
        }
        if let Some(spacing) = self.line_spacing {
            layout = layout.with_line_spacing(spacing);
        }
        if self.no_sheet_name {
            layout = layout.without_sheet_name();
        }

        let mut options = ConvertOptions::new().with_layout(layout);
        if let Some(indices) = &self.sheets {
            options = options.with_sheets(indices.iter().copied());
        }
        if let Some(names) = &self.sheet_names {
            options = options.with_sheet_names(names.iter().cloned());
        }

        let mut metadata = Metadata::new().with_creator(concat!("sheetpdf ", env!("CARGO_PKG_VERSION")));
        if let Some(title) = &self.title {
            metadata = metadata.with_title(title.clone());
        }
        if let Some(author) = &self.author {
            metadata = metadata.with_author(author.clone());
        }
        options.with_metadata(metadata)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            layout,
        }) => cmd_convert(&input, output.as_deref(), &layout),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Json {
            input,
            output,
            compact,
            cells,
            layout,
        }) => cmd_json(&input, output.as_deref(), compact, cells, &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &LayoutArgs::default())
            } else {
                println!("{}", "Usage: sheetpdf <FILE> [OUTPUT]".yellow());
                println!("       sheetpdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// `<stem>.pdf` next to the input.
fn default_output(input: &Path) -> PathBuf {
    input.with_extension("pdf")
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output(input));

    let options = layout.to_options();
    log::debug!("converting {} -> {}", input.display(), output.display());
    let pages = sheetpdf::convert_file_to_pdf(input, &output, &options)?;

    println!(
        "{} {} ({} {})",
        "Saved to".green(),
        output.display(),
        pages,
        if pages == 1 { "page" } else { "pages" }
    );
    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    cells: bool,
    layout: &LayoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = if cells {
        let sheets = XlsxParser::open(input)?.parse()?;
        render::sheets_to_json(&sheets, format)?
    } else {
        let doc = convert_file(input, &layout.to_options())?;
        render::to_json(&doc, format)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let mut parser = XlsxParser::open(input)?;
    log::debug!("sheets declared: {:?}", parser.sheet_names()?);
    let sheets = parser.parse()?;
    let layout = LayoutOptions::default();

    println!("{}", "Workbook Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Sheets".bold(), sheets.len());

    let mut total_pages = 0;
    for (index, sheet) in sheets.iter().enumerate() {
        let pages = layout_sheet(sheet, &layout)?.len();
        total_pages += pages;

        println!();
        println!("{} {}", format!("[{}]", index).dimmed(), sheet.name.bold());
        println!("  {}: {}", "Rows".bold(), sheet.row_count());
        println!("  {}: {}", "Columns".bold(), sheet.column_count());
        println!("  {}: {}", "Pages (Letter)".bold(), pages);
    }

    println!();
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Estimated pages".bold(), total_pages.max(1));

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "sheetpdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Spreadsheet to PDF conversion tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/sheetpdf".dimmed());
    println!("License: MIT");
}
