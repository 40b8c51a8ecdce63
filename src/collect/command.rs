//! Functionality related to the `wgs-metrics collect` command itself.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use num_format::Locale;
use num_format::ToFormattedString;
use tracing::debug;
use tracing::info;

use crate::collect::aggregate::collect_case_metrics;
use crate::collect::report::CaseReport;
use crate::collect::selection::FieldSelection;
use crate::collect::store::MetricStore;
use crate::collect::trio::annotate_trio_concordance;
use crate::utils::formats::manifest::Manifest;

//========================//
// Command line arguments //
//========================//

/// Clap arguments for the `wgs-metrics collect` subcommand.
#[derive(Args)]
pub struct CollectArgs {
    /// Directory containing the metric files for the case.
    #[arg(short = 'i', long, value_name = "PATH")]
    input_directory: PathBuf,

    /// Manifest listing the case identifier and the samples in the case.
    #[arg(short = 's', long, value_name = "PATH")]
    sample_text_file: PathBuf,

    /// Configuration listing the metrics to report.
    #[arg(short = 'm', long, value_name = "PATH")]
    metric_file: PathBuf,

    /// Directory to write the report to. Defaults to the input directory.
    #[arg(short = 'o', long, value_name = "PATH")]
    output_directory: Option<PathBuf>,

    /// Also write every collected metric as JSON.
    #[arg(long)]
    json: bool,

    /// Also print the report to stdout.
    #[arg(long)]
    print: bool,
}

//===============================================//
// Prepares the `wgs-metrics collect` subcommand //
//===============================================//

/// Main method for the `wgs-metrics collect` subcommand.
pub fn collect(args: CollectArgs) -> anyhow::Result<()> {
    info!("Starting collect command...");
    debug!("Arguments:");

    let input_directory = args.input_directory;
    debug!("  [*] Input directory: {}", input_directory.display());

    let sample_text_file = args.sample_text_file;
    debug!("  [*] Sample text file: {}", sample_text_file.display());

    let metric_file = args.metric_file;
    debug!("  [*] Metric file: {}", metric_file.display());

    let output_directory = args
        .output_directory
        .unwrap_or_else(|| input_directory.clone());
    debug!("  [*] Output directory: {}", output_directory.display());

    let manifest = Manifest::from_path(&sample_text_file)
        .with_context(|| format!("reading manifest: {}", sample_text_file.display()))?;
    let selection = FieldSelection::from_path(&metric_file)
        .with_context(|| format!("reading metric file: {}", metric_file.display()))?;

    app(
        input_directory,
        output_directory,
        manifest,
        selection,
        args.json,
        args.print,
    )
}

//==============//
// Main program //
//==============//

/// Runs the main program for the `collect` subcommand.
fn app(
    input_directory: PathBuf,
    output_directory: PathBuf,
    manifest: Manifest,
    selection: FieldSelection,
    json: bool,
    print: bool,
) -> anyhow::Result<()> {
    let case_id = manifest.case_id();
    let samples = manifest.samples();
    info!("Case {} with {} samples.", case_id, samples.len());

    //========================================//
    // Collect every metric file for the case //
    //========================================//

    let mut store = collect_case_metrics(&input_directory, case_id, &samples)
        .with_context(|| format!("collecting metrics for case {}", case_id))?;

    info!(
        "Collected {} metrics.",
        store.len().to_formatted_string(&Locale::en)
    );

    //=================//
    // Derived metrics //
    //=================//

    annotate_trio_concordance(&manifest, &mut store)?;

    //==================//
    // Write the report //
    //==================//

    if !output_directory.exists() {
        std::fs::create_dir_all(&output_directory).with_context(|| {
            format!(
                "creating output directory: {}",
                output_directory.display()
            )
        })?;
    }

    let report = CaseReport::project(&selection, &manifest, &store)?;
    let report_path = output_directory.join(format!("{}_wgs_metrics.csv", case_id));
    report
        .write(&report_path)
        .with_context(|| format!("writing report: {}", report_path.display()))?;
    info!("Wrote report to {}.", report_path.display());

    if json {
        let json_path = output_directory.join(format!("{}_wgs_metrics.json", case_id));
        write_json(&store, &json_path)
            .with_context(|| format!("writing metrics: {}", json_path.display()))?;
        info!("Wrote metrics to {}.", json_path.display());
    }

    if print {
        report.to_table().printstd();
    }

    Ok(())
}

/// Writes the whole [`MetricStore`] as pretty-printed JSON.
fn write_json(store: &MetricStore, path: &Path) -> anyhow::Result<()> {
    let mut file = File::create(path)?;
    let output = serde_json::to_string_pretty(store)?;
    file.write_all(output.as_bytes())?;

    Ok(())
}
