//! Collection of every metric file belonging to a case.

use std::path::Path;
use std::path::PathBuf;

use tracing::info;

use crate::collect::reader::read_metric_file;
use crate::collect::store::MetricGroup;
use crate::collect::store::MetricStore;
use crate::errors::Result;

/// Sample name that joint rows fall back to when they name no sample.
pub const JOINT_FALLBACK_SAMPLE: &str = "NA";

/// Suffix of the joint SNV metric file, appended to the case identifier.
pub const JOINT_SUFFIX: &str = "-joint-snv.vc_metrics.csv";

/// A per-sample metric file and the group that is read from it.
#[derive(Debug)]
pub struct SampleMetricFile {
    /// Suffix appended to `<sample>.` to form the file name.
    pub suffix: &'static str,

    /// The group read from the file.
    pub group: MetricGroup,
}

/// The per-sample metric files, in the order they are read.
pub const SAMPLE_METRIC_FILES: [SampleMetricFile; 3] = [
    SampleMetricFile {
        suffix: "mapping_metrics.csv",
        group: MetricGroup::MappingAligningSummary,
    },
    SampleMetricFile {
        suffix: "wgs_coverage_metrics.csv",
        group: MetricGroup::CoverageSummary,
    },
    SampleMetricFile {
        suffix: "vc_metrics.csv",
        group: MetricGroup::VariantCallerPostfilter,
    },
];

/// Path to a per-sample metric file: `<directory>/<sample>.<suffix>`.
pub fn sample_metric_path(directory: &Path, sample: &str, suffix: &str) -> PathBuf {
    directory.join(format!("{}.{}", sample, suffix))
}

/// Path to the joint metric file: `<directory>/<caseId>-joint-snv.vc_metrics.csv`.
pub fn joint_metric_path(directory: &Path, case_id: &str) -> PathBuf {
    directory.join(format!("{}{}", case_id, JOINT_SUFFIX))
}

/// Builds the [`MetricStore`] for a case.
///
/// Every sample is initialized and has its own files read before the joint
/// file is read, as joint rows may refer to any sample of the case.
pub fn collect_case_metrics(
    directory: &Path,
    case_id: &str,
    samples: &[&str],
) -> Result<MetricStore> {
    let mut store = MetricStore::default();

    for sample in samples {
        info!("  [*] Collecting metrics for sample {}.", sample);
        store.init_sample(*sample);

        for file in SAMPLE_METRIC_FILES.iter() {
            let path = sample_metric_path(directory, sample, file.suffix);
            read_metric_file(&path, sample, file.group, &mut store)?;
        }
    }

    info!("  [*] Collecting joint metrics for case {}.", case_id);
    read_metric_file(
        joint_metric_path(directory, case_id),
        JOINT_FALLBACK_SAMPLE,
        MetricGroup::JointCallerPostfilter,
        &mut store,
    )?;

    Ok(store)
}
