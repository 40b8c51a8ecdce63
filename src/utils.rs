//! Utilities that are used across the `wgs-metrics` subcommands.

pub mod formats;
