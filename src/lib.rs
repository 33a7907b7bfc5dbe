pub mod api;
pub mod args;
pub mod constants;
pub mod fetch;
pub mod flatten;
pub mod utils;

use anyhow::{Context, Result};
use args::Args;
use fetch::{FetchEvent, Fetcher, HttpTransport, Transport};
use flatten::to_table;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::PathBuf,
};
use utils::read_identifier_file;

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Nothing was collected, so no file was written.
    NoResults,
    Written {
        path: PathBuf,
        rows: usize,
        columns: Vec<String>,
    },
}

pub fn run(args: &Args) -> Result<Outcome> {
    let transport = HttpTransport::new(&args.api_url)?;
    run_with(args, transport)
}

pub fn run_with<T: Transport>(args: &Args, transport: T) -> Result<Outcome> {
    let identifiers = read_identifier_file(&args.input)?;
    info!(
        "querying {} for {} identifiers",
        args.api_url,
        identifiers.len()
    );

    let fetcher = Fetcher::new(transport, args.page_size)?;
    let progress = progress_bar(identifiers.len(), args.quiet);
    let results = fetcher.fetch_batch(&identifiers, |event| report(&progress, event));
    progress.finish_and_clear();

    let mut out = io::stdout().lock();
    if !results.not_found.is_empty() {
        writeln!(out, "The following DOIs were not found:")?;
        for doi in &results.not_found {
            writeln!(out, "{doi}")?;
        }
    }

    let Some(table) = to_table(&results.records) else {
        warn!("no results obtained");
        writeln!(out, "No results obtained.")?;
        return Ok(Outcome::NoResults);
    };

    fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;
    let path = args.output_dir.join(&args.output_file);
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    table.write_csv(BufWriter::new(file))?;
    info!(
        "wrote {} rows x {} columns to {}",
        table.rows.len(),
        table.columns.len(),
        path.display()
    );

    if args.preview > 0 {
        table.write_preview(&mut out, args.preview)?;
    }
    writeln!(out, "Wrote {} rows to {}", table.rows.len(), path.display())?;

    Ok(Outcome::Written {
        path,
        rows: table.rows.len(),
        columns: table.columns,
    })
}

fn progress_bar(len: usize, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}") {
        bar.set_style(style);
    }
    bar.set_message("querying the public API");
    bar
}

fn report(progress: &ProgressBar, event: FetchEvent) {
    match event {
        FetchEvent::Progress { done, .. } => progress.set_position(done as u64),
        other => progress.suspend(|| warn!("{other}")),
    }
}
