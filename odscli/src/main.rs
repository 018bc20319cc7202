use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use odscraft_core::{CellStyle, DocumentConfig, OdsDocument, Row, TextProperties};

#[derive(Parser)]
#[command(name = "odscli")]
#[command(about = "Build OpenDocument spreadsheets from CSV files", long_about = None)]
#[command(version)]
struct Cli {
    /// Output .ods file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// CSV input files, one table per file (named after the file stem)
    #[arg(long = "sheet", num_args = 1.., value_name = "CSV", required = true)]
    sheets: Vec<PathBuf>,

    /// Document configuration (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Treat the first record as data instead of a bold header row
    #[arg(long)]
    no_header: bool,

    /// Show what would be done without writing the file
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DocumentConfig::from_file(path)
            .with_context(|| format!("reading config '{}'", path.display()))?,
        None => DocumentConfig::default(),
    };
    let mut doc = OdsDocument::with_config(&config);

    let header_style = CellStyle::builder("header")
        .text_properties(TextProperties::bold())
        .build();

    let mut total_rows = 0usize;
    let mut total_cells = 0usize;

    for sheet_path in &cli.sheets {
        let name = sheet_path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("Sheet");
        let table = doc.add_table(name)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(sheet_path)
            .with_context(|| format!("opening '{}'", sheet_path.display()))?;

        let mut rows = 0usize;
        for (index, record) in reader.records().enumerate() {
            let record =
                record.with_context(|| format!("reading '{}'", sheet_path.display()))?;
            let row = table.next_row();
            let is_header = index == 0 && !cli.no_header;
            for (col, field) in record.iter().enumerate() {
                if is_header {
                    row.set_text(col, field);
                    row.set_style(col, &header_style);
                } else {
                    write_typed_cell(row, col, field);
                }
            }
            rows += 1;
        }

        let cells = table.cell_count();
        total_rows += rows;
        total_cells += cells;
        println!(
            "{} {} ({} rows, {} cells)",
            "imported".green().bold(),
            name.bold(),
            rows,
            cells
        );
    }

    if cli.dry_run {
        println!(
            "{} would write '{}' with {} table(s), {} rows, {} cells",
            "[DRY RUN]".yellow().bold(),
            cli.output.display(),
            cli.sheets.len(),
            total_rows,
            total_cells
        );
        return Ok(());
    }

    let table_count = doc.table_count();
    doc.save(&cli.output)
        .with_context(|| format!("writing '{}'", cli.output.display()))?;
    println!(
        "{} '{}' with {} table(s), {} rows, {} cells",
        "wrote".green().bold(),
        cli.output.display(),
        table_count,
        total_rows,
        total_cells
    );
    Ok(())
}

/// Infer the cell type from the field text: boolean, number, ISO date, or
/// plain text. Empty fields stay blank.
fn write_typed_cell(row: &mut Row, col: usize, field: &str) {
    if field.is_empty() {
        return;
    }
    if let Ok(value) = field.parse::<bool>() {
        row.set_boolean(col, value);
    } else if let Ok(value) = field.parse::<f64>() {
        row.set_float(col, value);
    } else if let Ok(date) = chrono::NaiveDate::parse_from_str(field, "%Y-%m-%d") {
        match date.and_hms_opt(0, 0, 0) {
            Some(datetime) => row.set_date(col, datetime),
            None => row.set_text(col, field),
        }
    } else {
        row.set_text(col, field);
    }
}
