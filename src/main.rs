use clap::{Parser, Subcommand};
use git_testament::{git_testament, render_testament};

use wgs_metrics::collect::command::{collect, CollectArgs};
use wgs_metrics::list::command::{list, ListArgs};
use wgs_metrics::samples::command::{samples, SamplesArgs};

git_testament!(TESTAMENT);

#[derive(Parser)]
#[command(name = "wgs-metrics", author, version = render_testament!(TESTAMENT), propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Only errors are printed to the stderr stream.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// All available information, including debug information, is printed to
    /// stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Collects the metrics for a case into a single report.
    Collect(CollectArgs),

    /// Lists the metric groups and derived metrics that are supported.
    List(ListArgs),

    /// Splits a manifest into the sample name and case identifier files.
    Samples(SamplesArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut level = tracing::Level::INFO;
    if cli.quiet {
        level = tracing::Level::ERROR;
    } else if cli.verbose {
        level = tracing::Level::DEBUG;
    }

    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    match cli.command {
        Commands::Collect(args) => collect(args),
        Commands::List(args) => list(args),
        Commands::Samples(args) => samples(args),
    }
}
