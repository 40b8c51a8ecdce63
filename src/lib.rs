//! `wgs-metrics` is a command line tool that gathers the quality control
//! metrics produced for each sample of a whole-genome sequencing case into a
//! single report. This package is composed of both a library crate, as well
//! as a binary crate.
//!
//! This documentation generally refers to the library crate documentation for
//! use by developers of `wgs-metrics`.
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]

pub mod collect;
pub mod errors;
pub mod list;
pub mod samples;
pub mod utils;
