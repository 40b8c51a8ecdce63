//! Functionality related to the `wgs-metrics collect` subcommand.
//!
//! Collection happens in three steps. First, every metric file for the case is
//! read into a [`MetricStore`](store::MetricStore) ([`aggregate`]). Next, the
//! trio concordance is derived from the joint caller metrics ([`trio`]).
//! Last, the metrics listed in the field selection ([`selection`]) are
//! projected into the case report ([`report`]).

pub mod aggregate;
pub mod command;
pub mod reader;
pub mod report;
pub mod selection;
pub mod store;
pub mod trio;
