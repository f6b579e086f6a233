//! vcf-purity - Tumour purity from paired tumour/normal VCFs
//!
//! Collects tumour allele frequencies that pass a configurable filter chain
//! and reports the 90th, 99th and 99.9th percentiles as lower, best and
//! upper purity estimates.
//!
//! # Example
//!
//! ```ignore
//! use vcf_purity::{estimate_vcf, open_input, write_estimate, PurityConfig};
//!
//! let mut config = PurityConfig::new("TUMOR");
//! config.pass_only = true;
//! let config = config.validate()?;
//!
//! let logger = env_logger::Builder::new().build();
//! let input = open_input(Some("somatic.vcf.gz".as_ref()))?;
//! let result = estimate_vcf(input, &config, &logger)?;
//! write_estimate(&mut std::io::stdout(), &result.estimate, false)?;
//! ```

/// Emit a log record through an explicit `log::Log` handle
///
/// Same shape as the `log` macros, with the logger and level first:
/// `log_to!(logger, Level::Debug, "skipping {}", reason)`.
#[macro_export]
macro_rules! log_to {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger: &dyn ::log::Log = $logger;
        let level: ::log::Level = $level;
        let metadata = ::log::Metadata::builder()
            .level(level)
            .target(module_path!())
            .build();
        if logger.enabled(&metadata) {
            logger.log(
                &::log::Record::builder()
                    .args(format_args!($($arg)+))
                    .level(level)
                    .target(module_path!())
                    .module_path_static(Some(module_path!()))
                    .file_static(Some(file!()))
                    .line(Some(line!()))
                    .build(),
            );
        }
    }};
}

pub mod core;
pub mod formats;

// Re-export commonly used types
pub use self::core::{
    open_input, write_estimate, AfSource, ConfigError, Decision, Estimation, FieldError,
    FieldName, FilterStats, PurityConfig, PurityError, PurityEstimate, PurityEstimator,
    SkipReason, VariantRecord,
};
pub use formats::vcf::{estimate_vcf, VcfParseError, VcfReader};
