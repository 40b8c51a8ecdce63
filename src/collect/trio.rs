//! Trio concordance derived from the joint caller metrics.
//!
//! The concordance for a proband is the share of joint SNP calls that are
//! not de novo:
//!
//! ```text
//! denovo      = DeNovo Autosome SNPs + DeNovo chrX SNPs + DeNovo chrY SNPs
//! concordance = (1 - denovo / SNPs) * 100
//! ```
//!
//! The percentage is rounded to two decimal places. It is not clamped to
//! `[0, 100]`.

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::collect::store::MetricEntry;
use crate::collect::store::MetricGroup;
use crate::collect::store::MetricStore;
use crate::errors::Error;
use crate::errors::Result;
use crate::utils::formats::manifest::Manifest;

/// Name of the derived metric within [`MetricGroup::JointCallerPostfilter`].
pub const TRIO_CONCORDANCE: &str = "Trio Concordance";

/// The de novo SNP counts summed into the numerator.
pub const DENOVO_METRICS: [&str; 3] = [
    "DeNovo Autosome SNPs",
    "DeNovo chrX SNPs",
    "DeNovo chrY SNPs",
];

/// The total SNP count used as the denominator.
pub const TOTAL_METRIC: &str = "SNPs";

/// Number of decimal places the concordance is rounded to.
pub const PRECISION: i32 = 2;

/// Reads a joint caller count as an integer. Returns `Ok(None)` if the metric
/// was not reported for the sample.
fn joint_count(store: &MetricStore, sample: &str, metric: &str) -> Result<Option<u64>> {
    let entry = match store.get(sample, MetricGroup::JointCallerPostfilter, metric) {
        Some(entry) => entry,
        None => return Ok(None),
    };

    entry
        .count()
        .trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| Error::InvalidCount {
            sample: sample.to_string(),
            metric: metric.to_string(),
            value: entry.count().to_string(),
        })
}

/// Rounds half away from zero to [`PRECISION`] decimal places. Values that
/// round to zero come back as `0.0`, never `-0.0`.
fn round(value: f64) -> f64 {
    let factor = 10f64.powi(PRECISION);
    let rounded = (value * factor).round() / factor;

    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Computes the trio concordance for a proband.
///
/// Returns `Ok(None)` when any of the required counts is absent,
/// [`Error::DivideByZero`] when the total SNP count is zero and
/// [`Error::CountOverflow`] when the de novo counts do not sum in a `u64`.
pub fn trio_concordance(store: &MetricStore, proband: &str) -> Result<Option<f64>> {
    let mut denovo = 0u64;

    for metric in DENOVO_METRICS {
        match joint_count(store, proband, metric)? {
            Some(count) => {
                denovo = denovo.checked_add(count).ok_or_else(|| Error::CountOverflow {
                    sample: proband.to_string(),
                })?;
            }
            None => {
                debug!("  [*] {} not reported for {}.", metric, proband);
                return Ok(None);
            }
        }
    }

    let total = match joint_count(store, proband, TOTAL_METRIC)? {
        Some(total) => total,
        None => {
            debug!("  [*] {} not reported for {}.", TOTAL_METRIC, proband);
            return Ok(None);
        }
    };

    if total == 0 {
        return Err(Error::DivideByZero {
            sample: proband.to_string(),
        });
    }

    Ok(Some(round((1.0 - denovo as f64 / total as f64) * 100.0)))
}

/// Records [`TRIO_CONCORDANCE`] for every sample in the case.
///
/// Without a mother or father, every sample gets `("NA", "")`. Otherwise each
/// proband gets its concordance (or `("NA", "")` if it cannot be computed) and
/// every other sample gets `("NA", "")`.
pub fn annotate_trio_concordance(manifest: &Manifest, store: &mut MetricStore) -> Result<()> {
    let samples = manifest.samples();

    if !manifest.has_parents() {
        info!("No parents in case {}, skipping trio concordance.", manifest.case_id());
        for sample in samples {
            store.put(
                sample,
                MetricGroup::JointCallerPostfilter,
                TRIO_CONCORDANCE,
                MetricEntry::not_available(),
            )?;
        }
        return Ok(());
    }

    let probands = manifest.probands();

    for sample in samples {
        let entry = if probands.contains(&sample) {
            match trio_concordance(store, sample) {
                Ok(Some(concordance)) => {
                    info!("  [*] Trio concordance for {}: {}", sample, concordance);
                    MetricEntry::new(concordance.to_string(), "")
                }
                Ok(None) => MetricEntry::not_available(),
                Err(e @ Error::DivideByZero { .. }) => {
                    warn!("{}, recording trio concordance as NA.", e);
                    MetricEntry::not_available()
                }
                Err(e) => return Err(e),
            }
        } else {
            MetricEntry::not_available()
        };

        store.put(
            sample,
            MetricGroup::JointCallerPostfilter,
            TRIO_CONCORDANCE,
            entry,
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(contents: &str) -> Manifest {
        Manifest::parse(contents.as_bytes()).unwrap()
    }

    type Counts = Vec<(&'static str, &'static str)>;

    fn store_with_joint(sample_counts: Vec<(&str, Counts)>) -> MetricStore {
        let mut store = MetricStore::default();
        for (sample, counts) in sample_counts {
            store.init_sample(sample);
            for (metric, count) in counts {
                store
                    .put(
                        sample,
                        MetricGroup::JointCallerPostfilter,
                        metric,
                        MetricEntry::new(count, ""),
                    )
                    .unwrap();
            }
        }
        store
    }

    fn counts(autosome: &'static str, snps: &'static str) -> Counts {
        vec![
            ("DeNovo Autosome SNPs", autosome),
            ("DeNovo chrX SNPs", "0"),
            ("DeNovo chrY SNPs", "0"),
            ("SNPs", snps),
        ]
    }

    fn concordance_of(store: &MetricStore, sample: &str) -> MetricEntry {
        store
            .get(sample, MetricGroup::JointCallerPostfilter, TRIO_CONCORDANCE)
            .unwrap()
            .clone()
    }

    #[test]
    fn test_trio_concordance_value() {
        let store = store_with_joint(vec![("PROBAND1", counts("2", "1000"))]);
        assert_eq!(trio_concordance(&store, "PROBAND1").unwrap(), Some(99.8));
    }

    #[test]
    fn test_trio_concordance_sums_all_denovo_counts() {
        let store = store_with_joint(vec![(
            "PROBAND1",
            vec![
                ("DeNovo Autosome SNPs", "10"),
                ("DeNovo chrX SNPs", "3"),
                ("DeNovo chrY SNPs", "2"),
                ("SNPs", "600"),
            ],
        )]);
        assert_eq!(trio_concordance(&store, "PROBAND1").unwrap(), Some(97.5));
    }

    #[test]
    fn test_trio_concordance_is_rounded_not_clamped() {
        let store = store_with_joint(vec![("PROBAND1", counts("1", "3"))]);
        assert_eq!(trio_concordance(&store, "PROBAND1").unwrap(), Some(66.67));

        let store = store_with_joint(vec![("PROBAND1", counts("20", "10"))]);
        assert_eq!(trio_concordance(&store, "PROBAND1").unwrap(), Some(-100.0));
    }

    #[test]
    fn test_trio_concordance_never_negative_zero() {
        let store = store_with_joint(vec![("PROBAND1", counts("100001", "100000"))]);
        let concordance = trio_concordance(&store, "PROBAND1").unwrap().unwrap();

        assert_eq!(concordance, 0.0);
        assert!(concordance.is_sign_positive());
        assert_eq!(concordance.to_string(), "0");
    }

    #[test]
    fn test_trio_concordance_denovo_overflow() {
        let store = store_with_joint(vec![(
            "PROBAND1",
            vec![
                ("DeNovo Autosome SNPs", "18446744073709551615"),
                ("DeNovo chrX SNPs", "1"),
                ("DeNovo chrY SNPs", "0"),
                ("SNPs", "1000"),
            ],
        )]);

        assert!(matches!(
            trio_concordance(&store, "PROBAND1"),
            Err(Error::CountOverflow { sample }) if sample == "PROBAND1"
        ));
    }

    #[test]
    fn test_trio_concordance_missing_metric() {
        let store = store_with_joint(vec![("PROBAND1", vec![("SNPs", "1000")])]);
        assert_eq!(trio_concordance(&store, "PROBAND1").unwrap(), None);
    }

    #[test]
    fn test_trio_concordance_zero_snps() {
        let store = store_with_joint(vec![("PROBAND1", counts("0", "0"))]);
        assert!(matches!(
            trio_concordance(&store, "PROBAND1"),
            Err(Error::DivideByZero { .. })
        ));
    }

    #[test]
    fn test_trio_concordance_invalid_count() {
        let store = store_with_joint(vec![("PROBAND1", counts("two", "1000"))]);
        assert!(matches!(
            trio_concordance(&store, "PROBAND1"),
            Err(Error::InvalidCount { .. })
        ));
    }

    #[test]
    fn test_annotate_trio() {
        let manifest = manifest("caseId:CASE1\nproband:PROBAND1\nmother:MOTHER1\nfather:FATHER1\n");
        let mut store = store_with_joint(vec![
            ("PROBAND1", counts("2", "1000")),
            ("MOTHER1", counts("2", "1000")),
            ("FATHER1", vec![]),
        ]);

        annotate_trio_concordance(&manifest, &mut store).unwrap();

        assert_eq!(concordance_of(&store, "PROBAND1"), MetricEntry::new("99.8", ""));
        assert_eq!(concordance_of(&store, "MOTHER1"), MetricEntry::not_available());
        assert_eq!(concordance_of(&store, "FATHER1"), MetricEntry::not_available());
    }

    #[test]
    fn test_annotate_without_parents() {
        let manifest = manifest("caseId:CASE1\nproband:PROBAND1\nsibling:SIB1\n");
        let mut store = store_with_joint(vec![("PROBAND1", counts("2", "1000")), ("SIB1", vec![])]);

        annotate_trio_concordance(&manifest, &mut store).unwrap();

        assert_eq!(concordance_of(&store, "PROBAND1"), MetricEntry::not_available());
        assert_eq!(concordance_of(&store, "SIB1"), MetricEntry::not_available());
    }

    #[test]
    fn test_annotate_degrades_zero_snps_to_sentinel() {
        let manifest = manifest("caseId:CASE1\nproband:TWIN1\nproband:TWIN2\nmother:MOTHER1\n");
        let mut store = store_with_joint(vec![
            ("TWIN1", counts("2", "1000")),
            ("TWIN2", counts("0", "0")),
            ("MOTHER1", vec![]),
        ]);

        annotate_trio_concordance(&manifest, &mut store).unwrap();

        assert_eq!(concordance_of(&store, "TWIN1"), MetricEntry::new("99.8", ""));
        assert_eq!(concordance_of(&store, "TWIN2"), MetricEntry::not_available());
        assert_eq!(concordance_of(&store, "MOTHER1"), MetricEntry::not_available());
    }

    #[test]
    fn test_annotate_missing_denovo_counts() {
        let manifest = manifest("caseId:CASE1\nproband:PROBAND1\nfather:FATHER1\n");
        let mut store = store_with_joint(vec![("PROBAND1", vec![("SNPs", "1000")]), ("FATHER1", vec![])]);

        annotate_trio_concordance(&manifest, &mut store).unwrap();

        assert_eq!(concordance_of(&store, "PROBAND1"), MetricEntry::not_available());
    }
}
