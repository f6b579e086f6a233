//! File format adapters
//!
//! Adapters turning variant files into records for the filter chain.

pub mod vcf;

pub use vcf::{estimate_vcf, VcfParseError, VcfReader, VcfRecordView};
