//! Batch CLI around the `kharcha_core` simulation engine
//!
//! This crate is the glue: it loads and validates the YAML configuration,
//! sets up logging, runs the engine once and renders the textual report.
//! All statistical behavior lives in `kharcha_core`.

pub mod config_io;
pub mod format;
pub mod logging;
pub mod report;
