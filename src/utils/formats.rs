//! Utilities related to the file formats consumed by `wgs-metrics`.

pub mod manifest;
