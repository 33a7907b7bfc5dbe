use crate::api::{FieldValue, ListItem, Record};
use crate::constants::{
    CITATION_COLUMN, CITATION_REL, FULLTEXT_COLUMN, FULLTEXT_REL, LINKS_FIELD, PLACEHOLDER,
};
use anyhow::Result;
use std::collections::{BTreeSet, HashMap};
use std::io::Write;

/// Rectangular view of a result set: every row has a cell for every column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Returns `None` when there is nothing to tabulate.
pub fn to_table(records: &[Record]) -> Option<Table> {
    if records.is_empty() {
        return None;
    }

    let mut columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect();
    if columns.remove(LINKS_FIELD) {
        columns.insert(CITATION_COLUMN);
        columns.insert(FULLTEXT_COLUMN);
    }
    let columns: Vec<String> = columns.into_iter().map(str::to_string).collect();

    let rows = records
        .iter()
        .map(|record| flatten_record(record, &columns))
        .collect();

    Some(Table { columns, rows })
}

fn flatten_record(record: &Record, columns: &[String]) -> Vec<String> {
    let mut cells: HashMap<&str, String> = record
        .iter()
        .filter(|(name, _)| name.as_str() != LINKS_FIELD)
        .map(|(name, value)| (name.as_str(), value.to_cell()))
        .collect();

    if let Some(FieldValue::List(entries)) = record.get(LINKS_FIELD) {
        for (rel, column) in [(CITATION_REL, CITATION_COLUMN), (FULLTEXT_REL, FULLTEXT_COLUMN)] {
            let mut links = entries.iter().filter_map(ListItem::as_link);
            if let Some(link) = links.find(|link| link.rel == rel) {
                cells.insert(column, link.href.clone());
            }
        }
    }

    columns
        .iter()
        .map(|column| {
            cells
                .remove(column.as_str())
                .unwrap_or_else(|| PLACEHOLDER.to_string())
        })
        .collect()
}

impl Table {
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_csv(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        Ok(buf)
    }

    /// Tab separated header plus the first `limit` rows.
    pub fn write_preview<W: Write>(&self, out: W, limit: usize) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(out);
        writer.write_record(&self.columns)?;
        for row in self.rows.iter().take(limit) {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
