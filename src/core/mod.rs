//! Core purity estimation functionality
//!
//! This module contains the run configuration, sample resolution,
//! the per-record filter chain and the percentile estimate.

pub mod config;
mod error;
pub mod filter;
pub mod io;
pub mod report;
mod samples;
pub mod stats;
mod variant;

pub use config::{AfSource, FieldName, PurityConfig, DEFAULT_AF_FIELD, DP_FIELD};
pub use error::{
    ConfigError, ConfigResult, FieldError, FieldResult, PurityError, Result,
};
pub use filter::{
    is_germline_het, AfPair, Decision, Estimation, FilterStats, PurityEstimator, SkipReason,
    GERMLINE_HET_RANGE,
};
pub use io::{detect_compression, open_input, open_reader, CompressionFormat, LineReader};
pub use report::{write_estimate, REPORT_HEADER};
pub use samples::SamplePair;
pub use stats::{percentiles, PurityEstimate, FALLBACK_ESTIMATE, PERCENTILES};
pub use variant::VariantRecord;
