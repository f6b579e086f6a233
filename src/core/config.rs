//! Run configuration
//!
//! `PurityConfig` is built once at startup, validated, and then only read.

use std::fmt;

use super::error::{ConfigError, ConfigResult};

/// Per-sample depth field consulted by the minimum depth filter
pub const DP_FIELD: &str = "DP";

/// Default allele frequency field (Mutect2 style)
pub const DEFAULT_AF_FIELD: &str = "AF";

/// Where the allele frequency is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AfSource {
    /// Per-sample FORMAT field; tumour and germline values are available
    #[default]
    Format,
    /// Record-level INFO field; only a single (tumour) value exists
    Info,
}

/// A VCF key name checked to be usable for FORMAT/INFO lookups
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldName(String);

impl FieldName {
    pub fn new(name: impl Into<String>) -> ConfigResult<Self> {
        let name = name.into();
        let valid = !name.is_empty()
            && !name
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, ':' | ';' | '=' | ','));
        if valid {
            Ok(Self(name))
        } else {
            Err(ConfigError::InvalidFieldName(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FieldName {
    fn default() -> Self {
        Self(DEFAULT_AF_FIELD.to_string())
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable parameters of one purity run
#[derive(Debug, Clone, PartialEq)]
pub struct PurityConfig {
    /// Name of the tumour sample as it appears in the #CHROM line
    pub tumour: String,
    pub af_source: AfSource,
    pub af_field: FieldName,
    /// Tumour AF below this is excluded (0 disables)
    pub min_af: f64,
    /// Tumour DP below this is excluded (0 disables)
    pub min_dp: f64,
    pub pass_only: bool,
    /// Exclude sites heterozygous in the germline sample (possible LOH)
    pub filter_germline_het: bool,
    pub just_best: bool,
}

impl PurityConfig {
    /// Configuration with default thresholds for the given tumour sample
    pub fn new(tumour: impl Into<String>) -> Self {
        Self {
            tumour: tumour.into(),
            af_source: AfSource::default(),
            af_field: FieldName::default(),
            min_af: 0.0,
            min_dp: 0.0,
            pass_only: false,
            filter_germline_het: false,
            just_best: false,
        }
    }

    /// Check thresholds; returns the configuration unchanged on success
    pub fn validate(self) -> ConfigResult<Self> {
        if !self.min_af.is_finite() || !(0.0..=1.0).contains(&self.min_af) {
            return Err(ConfigError::InvalidThreshold {
                name: "min_af",
                value: self.min_af,
                reason: "must be between 0 and 1",
            });
        }
        if !self.min_dp.is_finite() || self.min_dp < 0.0 {
            return Err(ConfigError::InvalidThreshold {
                name: "min_dp",
                value: self.min_dp,
                reason: "must be zero or positive",
            });
        }
        Ok(self)
    }

    /// Germline het filtering only makes sense with per-sample AFs
    pub fn germline_het_active(&self) -> bool {
        self.filter_germline_het && self.af_source == AfSource::Format
    }

    pub fn depth_filter_active(&self) -> bool {
        self.min_dp > 0.0
    }
}
