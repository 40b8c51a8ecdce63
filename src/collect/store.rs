//! The in-memory store holding every metric collected for a case.
//!
//! # Overview
//!
//! Metrics are keyed by sample name, then by [`MetricGroup`], then by the
//! metric name as it appears in the upstream CSV file. Each metric holds a
//! [`MetricEntry`], which is a raw `(count, percent)` pair of strings exactly
//! as reported upstream.
//!
//! Samples must be registered with [`MetricStore::init_sample`] before any
//! metric can be written for them. Writing to a sample that was never
//! initialized results in an [`Error::UninitializedSample`]. Writing the same
//! `(sample, group, metric)` twice replaces the earlier entry.
//!
//! ```
//! use wgs_metrics::collect::store::{MetricEntry, MetricGroup, MetricStore};
//!
//! let mut store = MetricStore::default();
//! store.init_sample("NA12878");
//!
//! store
//!     .put(
//!         "NA12878",
//!         MetricGroup::MappingAligningSummary,
//!         "Total input reads",
//!         MetricEntry::new("42", "3.5"),
//!     )
//!     .unwrap();
//!
//! let entry = store
//!     .get("NA12878", MetricGroup::MappingAligningSummary, "Total input reads")
//!     .unwrap();
//! assert_eq!(entry.count(), "42");
//! assert_eq!(entry.percent(), "3.5");
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

use crate::errors::Error;
use crate::errors::Result;

//===============//
// Metric Groups //
//===============//

/// The categories of metrics produced by the upstream pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum MetricGroup {
    /// Alignment summary, read from `<sample>.mapping_metrics.csv`.
    #[serde(rename = "MAPPING/ALIGNING SUMMARY")]
    MappingAligningSummary,

    /// Whole-genome coverage, read from `<sample>.wgs_coverage_metrics.csv`.
    #[serde(rename = "COVERAGE SUMMARY")]
    CoverageSummary,

    /// Single-sample variant calling, read from `<sample>.vc_metrics.csv`.
    #[serde(rename = "VARIANT CALLER POSTFILTER")]
    VariantCallerPostfilter,

    /// Joint variant calling, read from `<caseId>-joint-snv.vc_metrics.csv`.
    #[serde(rename = "JOINT CALLER POSTFILTER")]
    JointCallerPostfilter,
}

impl MetricGroup {
    /// Every supported metric group in the order they are collected.
    pub fn all() -> [MetricGroup; 4] {
        [
            MetricGroup::MappingAligningSummary,
            MetricGroup::CoverageSummary,
            MetricGroup::VariantCallerPostfilter,
            MetricGroup::JointCallerPostfilter,
        ]
    }

    /// The label used for this group in the upstream CSV files.
    pub fn label(&self) -> &'static str {
        match self {
            MetricGroup::MappingAligningSummary => "MAPPING/ALIGNING SUMMARY",
            MetricGroup::CoverageSummary => "COVERAGE SUMMARY",
            MetricGroup::VariantCallerPostfilter => "VARIANT CALLER POSTFILTER",
            MetricGroup::JointCallerPostfilter => "JOINT CALLER POSTFILTER",
        }
    }
}

impl fmt::Display for MetricGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MetricGroup {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MetricGroup::all()
            .into_iter()
            .find(|group| group.label() == s)
            .ok_or_else(|| Error::UnknownMetricGroup(s.to_string()))
    }
}

//=============//
// Value Kinds //
//=============//

/// Which half of a [`MetricEntry`] to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// The count (first) value.
    Count,

    /// The percent (second) value.
    Percent,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Count => write!(f, "count"),
            ValueKind::Percent => write!(f, "percent"),
        }
    }
}

impl FromStr for ValueKind {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "count" => Ok(ValueKind::Count),
            "percent" => Ok(ValueKind::Percent),
            _ => Err(Error::UnknownValueKind(s.to_string())),
        }
    }
}

//==============//
// Metric Entry //
//==============//

/// A single reported metric. Either value may be empty, meaning it was not
/// reported upstream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MetricEntry {
    count: String,
    percent: String,
}

impl MetricEntry {
    /// Creates a new [`MetricEntry`].
    pub fn new(count: impl Into<String>, percent: impl Into<String>) -> Self {
        MetricEntry {
            count: count.into(),
            percent: percent.into(),
        }
    }

    /// The `("NA", "")` entry recorded when a derived metric cannot be
    /// computed.
    pub fn not_available() -> Self {
        MetricEntry::new("NA", "")
    }

    /// Gets the raw count.
    pub fn count(&self) -> &str {
        &self.count
    }

    /// Gets the raw percent.
    pub fn percent(&self) -> &str {
        &self.percent
    }

    /// Gets the value of the requested kind.
    pub fn value(&self, kind: ValueKind) -> &str {
        match kind {
            ValueKind::Count => self.count(),
            ValueKind::Percent => self.percent(),
        }
    }
}

//==============//
// Metric Store //
//==============//

/// Metrics for a single sample, keyed by group and then metric name.
pub type SampleMetrics = IndexMap<MetricGroup, IndexMap<String, MetricEntry>>;

/// All metrics collected for a case. See the [module-level documentation].
///
/// [module-level documentation]: self
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetricStore {
    samples: IndexMap<String, SampleMetrics>,
}

impl MetricStore {
    /// Registers a sample so that metrics can be written for it. Initializing
    /// a sample that already exists leaves its metrics untouched.
    pub fn init_sample(&mut self, sample: impl Into<String>) {
        self.samples.entry(sample.into()).or_default();
    }

    /// Whether the sample has been initialized.
    pub fn contains_sample(&self, sample: &str) -> bool {
        self.samples.contains_key(sample)
    }

    /// The initialized sample names in the order they were registered.
    pub fn samples(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(|s| s.as_str())
    }

    /// Writes an entry, returning the entry it replaced (if any). The metric
    /// group is created on demand, but the sample must already exist.
    pub fn put(
        &mut self,
        sample: &str,
        group: MetricGroup,
        metric: impl Into<String>,
        entry: MetricEntry,
    ) -> Result<Option<MetricEntry>> {
        let metrics = self
            .samples
            .get_mut(sample)
            .ok_or_else(|| Error::UninitializedSample(sample.to_string()))?;

        Ok(metrics
            .entry(group)
            .or_default()
            .insert(metric.into(), entry))
    }

    /// Looks up an entry.
    pub fn get(&self, sample: &str, group: MetricGroup, metric: &str) -> Option<&MetricEntry> {
        self.samples.get(sample)?.get(&group)?.get(metric)
    }

    /// Looks up an entry, failing with [`Error::MissingMetric`] if it is absent.
    pub fn require(&self, sample: &str, group: MetricGroup, metric: &str) -> Result<&MetricEntry> {
        self.get(sample, group, metric)
            .ok_or_else(|| Error::MissingMetric {
                sample: sample.to_string(),
                group,
                metric: metric.to_string(),
            })
    }

    /// The total number of entries across every sample and group.
    pub fn len(&self) -> usize {
        self.samples
            .values()
            .flat_map(|groups| groups.values())
            .map(|metrics| metrics.len())
            .sum()
    }

    /// Whether the store has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_requires_initialized_sample() {
        let mut store = MetricStore::default();
        let result = store.put(
            "NA12878",
            MetricGroup::CoverageSummary,
            "PCT of genome with coverage [ 20x: inf)",
            MetricEntry::new("", "95.1"),
        );

        assert!(matches!(result, Err(Error::UninitializedSample(_))));
        assert!(!store.contains_sample("NA12878"));
    }

    #[test]
    fn test_put_is_last_write_wins() {
        let mut store = MetricStore::default();
        store.init_sample("NA12878");

        let first = store
            .put("NA12878", MetricGroup::JointCallerPostfilter, "SNPs", MetricEntry::new("10", ""))
            .unwrap();
        assert_eq!(first, None);

        let second = store
            .put("NA12878", MetricGroup::JointCallerPostfilter, "SNPs", MetricEntry::new("20", ""))
            .unwrap();
        assert_eq!(second, Some(MetricEntry::new("10", "")));

        let entry = store
            .get("NA12878", MetricGroup::JointCallerPostfilter, "SNPs")
            .unwrap();
        assert_eq!(entry.count(), "20");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_groups_are_independent_namespaces() {
        let mut store = MetricStore::default();
        store.init_sample("NA12878");
        store
            .put("NA12878", MetricGroup::VariantCallerPostfilter, "SNPs", MetricEntry::new("5", ""))
            .unwrap();
        store
            .put("NA12878", MetricGroup::JointCallerPostfilter, "SNPs", MetricEntry::new("7", ""))
            .unwrap();

        assert_eq!(
            store
                .get("NA12878", MetricGroup::VariantCallerPostfilter, "SNPs")
                .unwrap()
                .count(),
            "5"
        );
        assert_eq!(
            store
                .get("NA12878", MetricGroup::JointCallerPostfilter, "SNPs")
                .unwrap()
                .count(),
            "7"
        );
    }

    #[test]
    fn test_init_sample_keeps_existing_metrics() {
        let mut store = MetricStore::default();
        store.init_sample("NA12878");
        store
            .put("NA12878", MetricGroup::CoverageSummary, "Aligned bases", MetricEntry::new("1", ""))
            .unwrap();
        store.init_sample("NA12878");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_require_reports_missing_metric() {
        let mut store = MetricStore::default();
        store.init_sample("NA12878");
        let err = store
            .require("NA12878", MetricGroup::MappingAligningSummary, "Total input reads")
            .unwrap_err();
        assert!(matches!(err, Error::MissingMetric { .. }));
    }

    #[test]
    fn test_value_kinds() {
        let entry = MetricEntry::new("42", "3.5%");
        assert_eq!(entry.value(ValueKind::Count), "42");
        assert_eq!(entry.value(ValueKind::Percent), "3.5%");
        assert_eq!("count".parse::<ValueKind>().unwrap(), ValueKind::Count);
        assert!("Count".parse::<ValueKind>().is_err());
    }

    #[test]
    fn test_metric_group_labels() {
        for group in MetricGroup::all() {
            assert_eq!(group.label().parse::<MetricGroup>().unwrap(), group);
        }
        assert!("MAPPING SUMMARY".parse::<MetricGroup>().is_err());
    }

    #[test]
    fn test_serializes_with_group_labels() {
        let mut store = MetricStore::default();
        store.init_sample("NA12878");
        store
            .put("NA12878", MetricGroup::CoverageSummary, "Aligned bases", MetricEntry::new("1", "2"))
            .unwrap();

        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(
            json,
            r#"{"NA12878":{"COVERAGE SUMMARY":{"Aligned bases":{"count":"1","percent":"2"}}}}"#
        );
    }
}
