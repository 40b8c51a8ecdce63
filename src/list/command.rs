//! Functionality related to the `wgs-metrics list` command itself.

use anyhow::bail;
use clap::{builder::PossibleValuesParser, Args};

use prettytable::{row, Table};

use crate::collect::{
    aggregate::{JOINT_SUFFIX, SAMPLE_METRIC_FILES},
    store::MetricGroup,
    trio::{DENOVO_METRICS, TOTAL_METRIC, TRIO_CONCORDANCE},
};

//========================//
// Command-line arguments //
//========================//

/// Command line arguments for `wgs-metrics list`.
#[derive(Args)]
pub struct ListArgs {
    /// The subject which you want to list values for.
    #[arg(value_parser = PossibleValuesParser::new(["groups", "derived"]))]
    subject: String,
}

//==============//
// Main command //
//==============//

/// Main method for the `wgs-metrics list` subcommand.
pub fn list(args: ListArgs) -> anyhow::Result<()> {
    match args.subject.as_str() {
        "groups" => {
            let mut table = Table::new();

            table.add_row(row!["Metric Group", "Source File"]);
            for file in SAMPLE_METRIC_FILES.iter() {
                table.add_row(row![file.group, format!("<sample>.{}", file.suffix)]);
            }
            table.add_row(row![
                MetricGroup::JointCallerPostfilter,
                format!("<caseId>{}", JOINT_SUFFIX)
            ]);

            table.printstd();

            Ok(())
        }
        "derived" => {
            let mut table = Table::new();

            table.add_row(row!["Metric Group", "Metric", "Computed From"]);
            table.add_row(row![
                MetricGroup::JointCallerPostfilter,
                TRIO_CONCORDANCE,
                format!("(1 - ({}) / {}) * 100", DENOVO_METRICS.join(" + "), TOTAL_METRIC)
            ]);

            table.printstd();

            Ok(())
        }
        s => bail!("Unsupported subject: {}", s),
    }
}
