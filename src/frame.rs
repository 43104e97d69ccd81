//! Labeled tables that alias renames operate on.
//!
//! [`LabeledTable`] is the contract the rename operations need: enumerable and
//! renamable column labels plus a free-form metadata bag that lives as long as
//! the table instance. [`Frame`] is the in-memory CSV-backed implementation used
//! by the command-line tool.

use std::{
    collections::BTreeMap,
    io::{Read, Write},
};

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use serde_json::Value;

use crate::{io_utils, label::ColumnLabel};

pub trait LabeledTable: Clone {
    fn columns(&self) -> &[ColumnLabel];

    /// Renames every text column whose label is a key of `mapping`.
    fn rename_columns(&mut self, mapping: &BTreeMap<String, String>);

    fn metadata(&self, key: &str) -> Option<&Value>;

    fn set_metadata(&mut self, key: &str, value: Value);
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    columns: Vec<ColumnLabel>,
    rows: Vec<Vec<String>>,
    metadata: BTreeMap<String, Value>,
}

impl Frame {
    pub fn new<I, L>(columns: I, rows: Vec<Vec<String>>) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<ColumnLabel>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows,
            metadata: BTreeMap::new(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn metadata_bag(&self) -> &BTreeMap<String, Value> {
        &self.metadata
    }

    /// Header labels rendered as strings, in column order.
    pub fn header_names(&self) -> Vec<String> {
        self.columns.iter().map(ToString::to_string).collect()
    }

    /// Reads headers and every record from `reader`, decoding with `encoding`.
    pub fn from_csv_reader<R: Read>(
        reader: &mut csv::Reader<R>,
        encoding: &'static Encoding,
    ) -> Result<Self> {
        let headers = io_utils::reader_headers(reader, encoding)?;
        let mut rows = Vec::new();
        for (idx, record) in reader.byte_records().enumerate() {
            let record = record.with_context(|| format!("Reading row {}", idx + 2))?;
            rows.push(io_utils::decode_record(&record, encoding)?);
        }
        Ok(Self::new(headers, rows))
    }

    pub fn write_csv<W: Write>(&self, writer: &mut csv::Writer<W>) -> Result<()> {
        writer
            .write_record(self.header_names())
            .context("Writing header row")?;
        for row in &self.rows {
            writer.write_record(row).context("Writing output row")?;
        }
        writer.flush().context("Flushing output")?;
        Ok(())
    }
}

impl LabeledTable for Frame {
    fn columns(&self) -> &[ColumnLabel] {
        &self.columns
    }

    fn rename_columns(&mut self, mapping: &BTreeMap<String, String>) {
        if mapping.is_empty() {
            return;
        }
        for column in &mut self.columns {
            if let ColumnLabel::Text(name) = column
                && let Some(target) = mapping.get(name.as_str())
            {
                *name = target.clone();
            }
        }
    }

    fn metadata(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    fn set_metadata(&mut self, key: &str, value: Value) {
        self.metadata.insert(key.to_string(), value);
    }
}
