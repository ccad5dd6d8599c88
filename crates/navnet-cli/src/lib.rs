//! navnet CLI library.
//!
//! Shared pieces of the `navnet-cli` binary: option types understood by the
//! argument parser and the formatters used to print query reports.

pub mod options;
pub mod output;
