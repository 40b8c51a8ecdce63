//! The field selection configuration describing which metrics are reported.
//!
//! Each row of the configuration is
//! `display_header,metric_group,metric_name,value_kind`, where `value_kind` is
//! either `count` or `percent`. Rows are reported in the order they appear.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use crate::collect::store::MetricGroup;
use crate::collect::store::ValueKind;
use crate::errors::Error;
use crate::errors::Result;

/// The number of fields in a field selection row.
const FIELDS: usize = 4;

/// A single row of the report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSelectionRow {
    /// The label printed in the first column.
    pub header: String,

    /// The group the metric belongs to.
    pub group: MetricGroup,

    /// The metric name.
    pub metric: String,

    /// Which value of the metric to report.
    pub kind: ValueKind,
}

/// An ordered list of [`FieldSelectionRow`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldSelection(Vec<FieldSelectionRow>);

impl FieldSelection {
    /// Creates a new [`FieldSelection`] from its rows.
    pub fn new(rows: Vec<FieldSelectionRow>) -> Self {
        FieldSelection(rows)
    }

    /// Parses a field selection from any reader. `source` is only used in
    /// error messages.
    pub fn parse<R>(reader: R, source: &Path) -> Result<Self>
    where
        R: Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            if record.len() < FIELDS {
                return Err(Error::MalformedRow {
                    path: PathBuf::from(source),
                    line,
                    expected: FIELDS,
                    found: record.len(),
                });
            }

            let in_row = |err: Error| Error::InvalidSelectionRow {
                path: PathBuf::from(source),
                line,
                source: Box::new(err),
            };

            rows.push(FieldSelectionRow {
                header: record[0].to_string(),
                group: record[1].parse().map_err(in_row)?,
                metric: record[2].to_string(),
                kind: record[3].trim_end().parse().map_err(in_row)?,
            });
        }

        Ok(FieldSelection(rows))
    }

    /// Opens and parses the field selection at `path`.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::MissingFile {
                path: path.to_path_buf(),
            });
        }

        Self::parse(File::open(path)?, path)
    }

    /// The rows in report order.
    pub fn rows(&self) -> &[FieldSelectionRow] {
        &self.0
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
