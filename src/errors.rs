//! Errors that can arise while collecting metrics for a case.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::collect::store::MetricGroup;

/// A [`Result`](std::result::Result) with the error fixed to [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the metric collection engine.
#[derive(Error, Debug)]
pub enum Error {
    /// An expected input file does not exist.
    #[error("file does not exist: {}", .path.display())]
    MissingFile {
        /// Path to the file that was expected.
        path: PathBuf,
    },

    /// A metric row references a sample that was never initialized.
    #[error("unknown sample \"{sample}\" referenced in {}", .path.display())]
    UnknownSample {
        /// The sample name found on the row.
        sample: String,
        /// The file containing the row.
        path: PathBuf,
    },

    /// A metric was written for a sample that was never initialized.
    #[error("cannot write metrics for uninitialized sample \"{0}\"")]
    UninitializedSample(String),

    /// A metric was requested that does not exist for the sample.
    #[error("metric \"{metric}\" in group \"{group}\" not found for sample \"{sample}\"")]
    MissingMetric {
        /// The sample name.
        sample: String,
        /// The metric group.
        group: MetricGroup,
        /// The metric name.
        metric: String,
    },

    /// The total SNP count for a proband was zero.
    #[error("total SNP count is zero for proband \"{sample}\"")]
    DivideByZero {
        /// The proband sample name.
        sample: String,
    },

    /// A row had fewer fields than required.
    #[error("{}:{line}: expected at least {expected} fields, found {found}", .path.display())]
    MalformedRow {
        /// The file containing the row.
        path: PathBuf,
        /// The one-based line number of the row.
        line: u64,
        /// The minimum number of fields.
        expected: usize,
        /// The number of fields found.
        found: usize,
    },

    /// A count needed for a calculation is not an integer.
    #[error("count \"{value}\" for metric \"{metric}\" of sample \"{sample}\" is not an integer")]
    InvalidCount {
        /// The sample name.
        sample: String,
        /// The metric name.
        metric: String,
        /// The raw count value.
        value: String,
    },

    /// A metric group label is not one of the supported groups.
    #[error("unknown metric group: \"{0}\"")]
    UnknownMetricGroup(String),

    /// A value kind is neither `count` nor `percent`.
    #[error("unknown value kind: \"{0}\" (expected \"count\" or \"percent\")")]
    UnknownValueKind(String),

    /// A field selection row has a group or value kind that does not parse.
    #[error("{}:{line}: {source}", .path.display())]
    InvalidSelectionRow {
        /// The field selection file.
        path: PathBuf,
        /// The one-based line number of the row.
        line: u64,
        /// The underlying parse error.
        #[source]
        source: Box<Error>,
    },

    /// The de novo SNP counts of a proband do not fit in a `u64`.
    #[error("de novo SNP count overflows for proband \"{sample}\"")]
    CountOverflow {
        /// The proband sample name.
        sample: String,
    },

    /// A manifest line is not `key:value`.
    #[error("manifest line {line} is not of the form `key:value`: \"{content}\"")]
    MalformedManifestLine {
        /// The one-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// The manifest has no `caseId` entry.
    #[error("manifest does not contain a `caseId` entry")]
    MissingCaseId,

    /// The manifest has more than one `caseId` entry.
    #[error("manifest line {line} repeats the `caseId` entry")]
    DuplicateCaseId {
        /// The one-based line number of the repeated entry.
        line: usize,
    },

    /// An I/O error.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// A CSV error.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}
