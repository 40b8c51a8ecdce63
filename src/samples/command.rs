//! Functionality related to the `wgs-metrics samples` command itself.
//!
//! Splits the manifest into the two files consumed by the downstream pipeline
//! steps: `sample_names.txt`, with one sample name per line, and
//! `caseId.txt`, holding a single `CASE_ID="<caseId>"` line.

use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tracing::debug;
use tracing::info;

use crate::utils::formats::manifest::Manifest;

/// Name of the file listing the sample names.
pub const SAMPLE_NAMES_FILE: &str = "sample_names.txt";

/// Name of the file holding the case identifier.
pub const CASE_ID_FILE: &str = "caseId.txt";

//========================//
// Command line arguments //
//========================//

/// Clap arguments for the `wgs-metrics samples` subcommand.
#[derive(Args)]
pub struct SamplesArgs {
    /// Manifest listing the case identifier and the samples in the case.
    #[arg(short = 's', long, value_name = "PATH")]
    sample_text_file: PathBuf,

    /// Directory to write `sample_names.txt` and `caseId.txt` to.
    #[arg(short = 'o', long, value_name = "PATH")]
    output_directory: PathBuf,
}

//==============//
// Main command //
//==============//

/// Main method for the `wgs-metrics samples` subcommand.
pub fn samples(args: SamplesArgs) -> anyhow::Result<()> {
    info!("Starting samples command...");
    debug!("Arguments:");
    debug!("  [*] Sample text file: {}", args.sample_text_file.display());
    debug!("  [*] Output directory: {}", args.output_directory.display());

    let manifest = Manifest::from_path(&args.sample_text_file)
        .with_context(|| format!("reading manifest: {}", args.sample_text_file.display()))?;

    write_sample_files(&manifest, &args.output_directory)?;

    info!(
        "Wrote {} sample names for case {}.",
        manifest.samples().len(),
        manifest.case_id()
    );

    Ok(())
}

/// Writes `sample_names.txt` and `caseId.txt` for `manifest` into `directory`.
pub fn write_sample_files(manifest: &Manifest, directory: &Path) -> anyhow::Result<()> {
    let sample_names_path = directory.join(SAMPLE_NAMES_FILE);
    let mut sample_names = File::create(&sample_names_path)
        .map(BufWriter::new)
        .with_context(|| format!("creating {}", sample_names_path.display()))?;

    for sample in manifest.samples() {
        writeln!(sample_names, "{}", sample)?;
    }
    sample_names.flush()?;

    let case_id_path = directory.join(CASE_ID_FILE);
    let mut case_id = File::create(&case_id_path)
        .with_context(|| format!("creating {}", case_id_path.display()))?;
    writeln!(case_id, "CASE_ID=\"{}\"", manifest.case_id())?;

    Ok(())
}
