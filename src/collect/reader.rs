//! Reading of the CSV metric files produced by the upstream pipeline.
//!
//! Metric files have no header and rows of the form
//! `metric_group,sample_name,metric_name,count[,percent]`. The sample name is
//! blank in single-sample files and filled in for joint (multi-sample) files.

use std::fs::File;
use std::path::Path;

use tracing::debug;

use crate::collect::store::MetricEntry;
use crate::collect::store::MetricGroup;
use crate::collect::store::MetricStore;
use crate::errors::Error;
use crate::errors::Result;

/// The minimum number of fields in a metric row.
pub const MIN_FIELDS: usize = 4;

/// Merges every row of the metric file at `path` that belongs to `group` into
/// `store`, returning the number of rows merged.
///
/// Rows without their own sample name are attributed to `fallback_sample`.
/// Rows belonging to other groups are skipped, but must still be well formed.
pub fn read_metric_file<P>(
    path: P,
    fallback_sample: &str,
    group: MetricGroup,
    store: &mut MetricStore,
) -> Result<usize>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::MissingFile {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut merged = 0;

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() < MIN_FIELDS {
            return Err(Error::MalformedRow {
                path: path.to_path_buf(),
                line,
                expected: MIN_FIELDS,
                found: record.len(),
            });
        }

        if &record[0] != group.label() {
            continue;
        }

        let sample = match &record[1] {
            "" => fallback_sample,
            s => s,
        };

        if !store.contains_sample(sample) {
            return Err(Error::UnknownSample {
                sample: sample.to_string(),
                path: path.to_path_buf(),
            });
        }

        let entry = MetricEntry::new(&record[3], record.get(4).unwrap_or_default());
        store.put(sample, group, &record[2], entry)?;
        merged += 1;
    }

    debug!(
        "    [*] Merged {} {} rows from {}.",
        merged,
        group,
        path.display()
    );

    Ok(merged)
}
