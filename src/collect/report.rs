//! Projection of the [`MetricStore`] into the case report.
//!
//! The report is a table with one column per sample:
//!
//! ```text
//! ,NA12878,NA12892,NA12891
//! Pedigree Status,proband,mother,father
//! Total Reads,839141370,812345678,798765432
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use prettytable::Cell;
use prettytable::Row;
use prettytable::Table;

use crate::collect::selection::FieldSelection;
use crate::collect::store::MetricStore;
use crate::errors::Result;
use crate::utils::formats::manifest::Manifest;

/// Label of the row listing each sample's role.
pub const PEDIGREE_STATUS: &str = "Pedigree Status";

/// A rendered case report.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseReport {
    rows: Vec<Vec<String>>,
}

impl CaseReport {
    /// Projects the selected fields of `store` for the samples in `manifest`.
    ///
    /// Every selected metric must exist for every sample; a gap is reported
    /// as [`Error::MissingMetric`](crate::errors::Error::MissingMetric).
    pub fn project(
        selection: &FieldSelection,
        manifest: &Manifest,
        store: &MetricStore,
    ) -> Result<Self> {
        let samples = manifest.samples();
        let mut rows = Vec::with_capacity(selection.len() + 2);

        let mut header = vec![String::new()];
        header.extend(samples.iter().map(|s| s.to_string()));
        rows.push(header);

        let mut pedigree = vec![PEDIGREE_STATUS.to_string()];
        pedigree.extend(
            samples
                .iter()
                .map(|s| manifest.role_of(s).unwrap_or_default().to_string()),
        );
        rows.push(pedigree);

        for field in selection.rows() {
            let mut row = Vec::with_capacity(samples.len() + 1);
            row.push(field.header.clone());

            for sample in &samples {
                let entry = store.require(sample, field.group, &field.metric)?;
                row.push(entry.value(field.kind).to_string());
            }

            rows.push(row);
        }

        Ok(CaseReport { rows })
    }

    /// Every row of the report, including the sample and pedigree rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Writes the report as CSV.
    pub fn write_csv<W>(&self, writer: W) -> Result<()>
    where
        W: Write,
    {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);

        for row in &self.rows {
            writer.write_record(row)?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Writes the report as CSV to `path`.
    pub fn write<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let file = File::create(path)?;
        self.write_csv(file)
    }

    /// Renders the report as a [`Table`] for display on the terminal.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();

        for row in &self.rows {
            table.add_row(Row::new(row.iter().map(|c| Cell::new(c)).collect()));
        }

        table
    }
}
