//! Functionality related to the `wgs-metrics samples` subcommand.

pub mod command;
