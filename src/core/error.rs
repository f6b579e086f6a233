//! Error types for vcf-purity
//!
//! Defines all error types used throughout the library.

use thiserror::Error;

use crate::formats::vcf::VcfParseError;

/// Main error type for purity estimation
#[derive(Debug, Error)]
pub enum PurityError {
    /// Invalid run configuration or sample layout
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A requested field could not be read from a record
    #[error("Field error: {0}")]
    Field(#[from] FieldError),

    /// Malformed VCF input
    #[error("VCF parse error: {0}")]
    Vcf(#[from] VcfParseError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors detected before any record is processed
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Tumour sample name is not among the VCF samples
    #[error("Tumour sample '{name}' not found among samples [{}]", .available.join(", "))]
    TumourNotFound { name: String, available: Vec<String> },

    /// Only a single tumour/normal pair is supported
    #[error("Expected exactly 2 samples (tumour and normal), found {found}")]
    SampleCount { found: usize },

    /// Field name cannot appear as a VCF key
    #[error("Invalid field name '{0}'")]
    InvalidFieldName(String),

    /// Threshold outside its allowed range
    #[error("Invalid value for {name}: {value} ({reason})")]
    InvalidThreshold {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Errors reading a numeric field from a record
#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    /// Field key absent from FORMAT/INFO or from the sample column
    #[error("Field '{field}' missing for {scope} at {chrom}:{pos}")]
    Missing {
        field: String,
        scope: String,
        chrom: String,
        pos: u64,
    },

    /// Field present but holding the '.' missing marker
    #[error("Field '{field}' has no value for {scope} at {chrom}:{pos}")]
    MissingValue {
        field: String,
        scope: String,
        chrom: String,
        pos: u64,
    },

    /// Field value is not a number
    #[error("Field '{field}' value '{value}' for {scope} at {chrom}:{pos} is not a number")]
    InvalidValue {
        field: String,
        value: String,
        scope: String,
        chrom: String,
        pos: u64,
    },
}

/// Result type alias for purity operations
pub type Result<T> = std::result::Result<T, PurityError>;

/// Result type alias for configuration checks
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for field extraction
pub type FieldResult<T> = std::result::Result<T, FieldError>;
