use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// One identifier per line, trimmed. Blank lines and duplicates pass through.
pub fn read_identifiers(text: &str) -> Vec<String> {
    text.lines().map(|line| line.trim().to_string()).collect()
}

pub fn read_identifier_file(path: &Path) -> Result<Vec<String>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = String::from_utf8(bytes)
        .with_context(|| format!("{} is not valid UTF-8", path.display()))?;
    Ok(read_identifiers(&text))
}

/// Zero-based row offset of a one-based page number.
pub fn page_offset(page: usize, page_size: usize) -> usize {
    (page - 1) * page_size
}

pub fn build_query(identifier: &str, start: usize, rows: usize) -> [(&'static str, String); 3] {
    [
        ("doi", identifier.to_string()),
        ("start", start.to_string()),
        ("rows", rows.to_string()),
    ]
}
