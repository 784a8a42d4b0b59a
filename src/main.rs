use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use sheet_peek::convert::{records_to_json, rows_to_json, to_records, to_rows};
use sheet_peek::loading::{LoadOptions, LoadRequest, LogObserver, SheetSelection};
use sheet_peek::render::{render_column, render_preview};
use sheet_peek::types::DEFAULT_PREVIEW_ROWS;

/// Preview an Excel sheet, print one column, and convert it to rows or records.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Workbook to read (.xlsx, .xlsm, .xlsb, .xls, .ods).
    path: PathBuf,

    /// Sheet name or zero-based sheet index (defaults to the first sheet).
    #[arg(short, long)]
    sheet: Option<SheetSelection>,

    /// Number of rows shown in the preview.
    #[arg(short = 'n', long, default_value_t = DEFAULT_PREVIEW_ROWS)]
    rows: usize,

    /// Column to print after the preview.
    #[arg(short, long)]
    column: Option<String>,

    /// Also print the converted dataset as JSON.
    #[arg(short, long, value_enum, default_value_t = Emit::None)]
    emit: Emit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    None,
    Rows,
    Records,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let stdout = io::stdout();
    run(&args, &mut stdout.lock())
}

fn run(args: &Args, out: &mut impl Write) -> Result<()> {
    let request = LoadRequest {
        path: args.path.clone(),
        options: LoadOptions {
            sheet: args.sheet.clone().unwrap_or_default(),
            observer: Some(Arc::new(LogObserver)),
            ..Default::default()
        },
    };
    let ds = request
        .run()
        .with_context(|| format!("failed to load {}", args.path.display()))?;

    write!(out, "{}", render_preview(&ds.head(args.rows)))?;

    if let Some(name) = args.column.as_deref() {
        let column = ds.column(name)?;
        writeln!(out)?;
        write!(out, "{}", render_column(&column))?;
    }

    let rows = to_rows(&ds);
    let records = to_records(&ds);
    log::debug!("converted {} rows and {} records", rows.len(), records.len());

    match args.emit {
        Emit::None => {}
        Emit::Rows => writeln!(out, "{}", rows_to_json(&rows)?)?,
        Emit::Records => writeln!(out, "{}", records_to_json(&records)?)?,
    }

    Ok(())
}
