//! Functionality related to the `wgs-metrics list` subcommand.

pub mod command;
