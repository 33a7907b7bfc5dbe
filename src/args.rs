use crate::constants::{BASE_URL, OUTPUT_FILENAME, PAGE_SIZE};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about)]
/// Look up a list of DOIs in the OSTI records API and collect the metadata as CSV
pub struct Args {
    /// Plain text file with one DOI per line
    pub input: PathBuf,

    /// Output directory
    #[arg(default_value = ".")]
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Name of the CSV file written to the output directory
    #[arg(default_value = OUTPUT_FILENAME)]
    #[arg(long)]
    pub output_file: String,

    /// API page size, fixed in normal use
    #[arg(default_value_t = PAGE_SIZE)]
    #[arg(long, hide = true)]
    pub page_size: usize,

    /// Records endpoint, fixed in normal use
    #[arg(default_value = BASE_URL)]
    #[arg(long, hide = true)]
    pub api_url: String,

    /// Rows to preview on stdout, 0 to disable
    #[arg(default_value_t = 10)]
    #[arg(long)]
    pub preview: usize,

    /// Hide the progress bar
    #[arg(short('q'), long("quiet"))]
    pub quiet: bool,
}
