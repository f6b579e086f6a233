//! Allele frequency extraction, the per-record filter chain and aggregation
//!
//! Each record goes through, in order: pass-only, AF extraction, germline
//! heterozygosity, minimum AF and minimum depth. Records that survive have
//! their tumour AF collected for the percentile estimate.

use log::{Level, Log};
use std::fmt;

use super::config::{AfSource, PurityConfig, DP_FIELD};
use super::error::{ConfigResult, FieldError, FieldResult};
use super::samples::SamplePair;
use super::stats::{PurityEstimate, FALLBACK_ESTIMATE};
use super::variant::VariantRecord;

/// Germline AF bounds (exclusive) treated as heterozygous
pub const GERMLINE_HET_RANGE: (f64, f64) = (0.35, 0.65);

/// True when `gaf` lies strictly inside the germline het interval
pub fn is_germline_het(gaf: f64) -> bool {
    GERMLINE_HET_RANGE.0 < gaf && gaf < GERMLINE_HET_RANGE.1
}

/// Why a record was left out of the estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NonPass,
    GermlineHet,
    LowAf,
    LowDepth,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SkipReason::NonPass => "non-pass",
            SkipReason::GermlineHet => "germline het",
            SkipReason::LowAf => "low af",
            SkipReason::LowDepth => "low depth",
        };
        f.write_str(s)
    }
}

/// Outcome of running one record through the filter chain
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Tumour AF added to the sample set
    Included(f64),
    Skipped(SkipReason),
}

/// Tumour AF and, in FORMAT mode, the germline AF of one record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AfPair {
    pub tumour: f64,
    pub germline: Option<f64>,
}

/// Running counters over the processed records
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FilterStats {
    pub total: usize,
    pub included: usize,
    pub skipped: usize,
    pub non_pass: usize,
    pub germline_het: usize,
    pub low_af: usize,
    pub low_depth: usize,
    /// Smallest and largest germline AF seen (FORMAT mode only)
    pub gaf_range: Option<(f64, f64)>,
}

impl FilterStats {
    fn record_skip(&mut self, reason: SkipReason) {
        self.skipped += 1;
        match reason {
            SkipReason::NonPass => self.non_pass += 1,
            SkipReason::GermlineHet => self.germline_het += 1,
            SkipReason::LowAf => self.low_af += 1,
            SkipReason::LowDepth => self.low_depth += 1,
        }
    }

    fn observe_gaf(&mut self, gaf: f64) {
        self.gaf_range = Some(match self.gaf_range {
            Some((lo, hi)) => (lo.min(gaf), hi.max(gaf)),
            None => (gaf, gaf),
        });
    }

    fn gaf_range_label(&self) -> String {
        match self.gaf_range {
            Some((lo, hi)) => format!("({}, {})", lo, hi),
            None => "n/a".to_string(),
        }
    }
}

/// Final result of a run
#[derive(Debug, Clone, PartialEq)]
pub struct Estimation {
    pub estimate: PurityEstimate,
    pub stats: FilterStats,
    /// Set when no AF was collected and the fallback estimate was used
    pub fallback: bool,
}

enum ValueIssue {
    Missing,
    Invalid,
}

/// First element of a `,`-separated numeric VCF value
fn first_number(raw: &str) -> Result<f64, ValueIssue> {
    let first = raw.split(',').next().unwrap_or("").trim();
    if first == "." {
        return Err(ValueIssue::Missing);
    }
    match first.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValueIssue::Invalid),
    }
}

/// Filter chain and AF aggregator for one tumour/normal pair
pub struct PurityEstimator<'a> {
    config: &'a PurityConfig,
    samples: SamplePair,
    sample_names: Vec<String>,
    logger: &'a dyn Log,
    afs: Vec<f64>,
    stats: FilterStats,
}

impl<'a> PurityEstimator<'a> {
    /// Resolve the tumour/germline pair from the VCF sample names
    pub fn new<S: AsRef<str>>(
        config: &'a PurityConfig,
        sample_names: &[S],
        logger: &'a dyn Log,
    ) -> ConfigResult<Self> {
        let samples = SamplePair::resolve(sample_names, &config.tumour)?;
        crate::log_to!(
            logger,
            Level::Debug,
            "sample_id {} germline_id {}",
            samples.tumour,
            samples.germline
        );

        Ok(Self {
            config,
            samples,
            sample_names: sample_names.iter().map(|s| s.as_ref().to_string()).collect(),
            logger,
            afs: Vec::new(),
            stats: FilterStats::default(),
        })
    }

    pub fn samples(&self) -> SamplePair {
        self.samples
    }

    /// AFs collected so far, in the order they were accepted
    pub fn afs(&self) -> &[f64] {
        &self.afs
    }

    pub fn stats(&self) -> &FilterStats {
        &self.stats
    }

    fn sample_scope(&self, index: usize) -> String {
        format!("sample {}", self.sample_names[index])
    }

    fn format_number<V: VariantRecord + ?Sized>(
        &self,
        record: &V,
        field: &str,
        sample: usize,
    ) -> FieldResult<f64> {
        let raw = record
            .format_value(field, sample)
            .ok_or_else(|| FieldError::Missing {
                field: field.to_string(),
                scope: self.sample_scope(sample),
                chrom: record.chrom().to_string(),
                pos: record.pos(),
            })?;
        first_number(raw).map_err(|issue| self.value_error(record, field, raw, self.sample_scope(sample), issue))
    }

    fn info_number<V: VariantRecord + ?Sized>(&self, record: &V, field: &str) -> FieldResult<f64> {
        let raw = record.info_value(field).ok_or_else(|| FieldError::Missing {
            field: field.to_string(),
            scope: "INFO".to_string(),
            chrom: record.chrom().to_string(),
            pos: record.pos(),
        })?;
        first_number(raw).map_err(|issue| self.value_error(record, field, raw, "INFO".to_string(), issue))
    }

    fn value_error<V: VariantRecord + ?Sized>(
        &self,
        record: &V,
        field: &str,
        raw: &str,
        scope: String,
        issue: ValueIssue,
    ) -> FieldError {
        let chrom = record.chrom().to_string();
        let pos = record.pos();
        match issue {
            ValueIssue::Missing => FieldError::MissingValue {
                field: field.to_string(),
                scope,
                chrom,
                pos,
            },
            ValueIssue::Invalid => FieldError::InvalidValue {
                field: field.to_string(),
                value: raw.to_string(),
                scope,
                chrom,
                pos,
            },
        }
    }

    /// Read tumour (and germline, in FORMAT mode) AF from a record
    pub fn extract_af<V: VariantRecord + ?Sized>(&self, record: &V) -> FieldResult<AfPair> {
        let field = self.config.af_field.as_str();
        match self.config.af_source {
            AfSource::Info => Ok(AfPair {
                tumour: self.info_number(record, field)?,
                germline: None,
            }),
            AfSource::Format => {
                let germline = self.format_number(record, field, self.samples.germline)?;
                let tumour = self.format_number(record, field, self.samples.tumour)?;
                Ok(AfPair {
                    tumour,
                    germline: Some(germline),
                })
            }
        }
    }

    fn skip<V: VariantRecord + ?Sized>(&mut self, record: &V, reason: SkipReason) -> Decision {
        crate::log_to!(
            self.logger,
            Level::Debug,
            "skipping {} at {}:{}",
            reason,
            record.chrom(),
            record.pos()
        );
        self.stats.record_skip(reason);
        Decision::Skipped(reason)
    }

    /// Run one record through the filter chain.
    ///
    /// A missing or unreadable field aborts with an error; the record is
    /// then counted in `total` only.
    pub fn process<V: VariantRecord + ?Sized>(&mut self, record: &V) -> FieldResult<Decision> {
        self.stats.total += 1;

        if self.config.pass_only && record.failed_filter().is_some() {
            return Ok(self.skip(record, SkipReason::NonPass));
        }

        let af = self.extract_af(record)?;

        if let Some(gaf) = af.germline {
            self.stats.observe_gaf(gaf);
            crate::log_to!(
                self.logger,
                Level::Debug,
                "gaf {} range {}",
                gaf,
                self.stats.gaf_range_label()
            );
            if self.config.germline_het_active() && is_germline_het(gaf) {
                return Ok(self.skip(record, SkipReason::GermlineHet));
            }
        }

        if af.tumour < self.config.min_af {
            return Ok(self.skip(record, SkipReason::LowAf));
        }

        if self.config.depth_filter_active() {
            let dp = self.format_number(record, DP_FIELD, self.samples.tumour)?;
            if dp < self.config.min_dp {
                return Ok(self.skip(record, SkipReason::LowDepth));
            }
        }

        crate::log_to!(self.logger, Level::Debug, "appending {} to afs", af.tumour);
        self.afs.push(af.tumour);
        self.stats.included += 1;
        Ok(Decision::Included(af.tumour))
    }

    /// Compute the percentile estimate over everything collected
    pub fn finish(self) -> Estimation {
        let (estimate, fallback) = match PurityEstimate::from_afs(&self.afs) {
            Some(estimate) => {
                crate::log_to!(self.logger, Level::Debug, "{} afs: {:?}", self.afs.len(), self.afs);
                (estimate, false)
            }
            None => {
                crate::log_to!(self.logger, Level::Warn, "No afs");
                (FALLBACK_ESTIMATE, true)
            }
        };

        crate::log_to!(
            self.logger,
            Level::Info,
            "done. skipped {} included {}. gaf range {}",
            self.stats.skipped,
            self.stats.included,
            self.stats.gaf_range_label()
        );

        Estimation {
            estimate,
            stats: self.stats,
            fallback,
        }
    }
}
