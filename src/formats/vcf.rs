//! VCF format adapter
//!
//! Streams a tumour/normal VCF with zero-copy record views and feeds the
//! records to the purity filter chain.

use crate::core::io::LineReader;
use crate::core::{Estimation, PurityConfig, PurityEstimator, VariantRecord};
use log::{Level, Log};
use memchr::memchr;
use std::io::BufRead;

/// Column index of the first sample
const FIRST_SAMPLE_COLUMN: usize = 9;

/// Zero-copy VCF record view for parsing
/// Only parses CHROM and POS immediately, other fields are kept as byte slices
pub struct VcfRecordView<'a> {
    /// Original line bytes
    line: &'a [u8],
    /// Chromosome name
    pub chrom: &'a str,
    /// Position (1-based)
    pub pos: u64,
    /// Field boundaries (start, end) for lazy access
    field_bounds: Vec<(usize, usize)>,
}

impl<'a> VcfRecordView<'a> {
    /// Parse a VCF line with minimal allocation
    /// Only parses CHROM and POS immediately
    pub fn parse(line: &'a [u8]) -> Result<Self, VcfParseError> {
        if line.is_empty() {
            return Err(VcfParseError::EmptyLine);
        }

        // Find field boundaries using memchr for tab characters
        let mut field_bounds = Vec::with_capacity(11);
        let mut start_pos = 0;
        while let Some(tab_pos) = memchr(b'\t', &line[start_pos..]) {
            field_bounds.push((start_pos, start_pos + tab_pos));
            start_pos += tab_pos + 1;
        }
        field_bounds.push((start_pos, line.len()));

        // VCF requires at least 8 fields (CHROM, POS, ID, REF, ALT, QUAL, FILTER, INFO)
        if field_bounds.len() < 8 {
            return Err(VcfParseError::TooFewFields {
                expected: 8,
                found: field_bounds.len(),
            });
        }

        let chrom = std::str::from_utf8(&line[field_bounds[0].0..field_bounds[0].1])
            .map_err(|_| VcfParseError::InvalidUtf8("CHROM"))?;

        let pos_str = std::str::from_utf8(&line[field_bounds[1].0..field_bounds[1].1])
            .map_err(|_| VcfParseError::InvalidUtf8("POS"))?;
        let pos: u64 = pos_str
            .parse()
            .map_err(|_| VcfParseError::InvalidNumber("POS", pos_str.to_string()))?;

        Ok(Self {
            line,
            chrom,
            pos,
            field_bounds,
        })
    }

    /// Get the number of fields
    pub fn field_count(&self) -> usize {
        self.field_bounds.len()
    }

    /// Get field as string slice (lazy access)
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.field_bounds
            .get(index)
            .and_then(|(start, end)| std::str::from_utf8(&self.line[*start..*end]).ok())
    }

    /// Get FILTER field (field 6)
    pub fn filter(&self) -> Option<&'a str> {
        self.field(6)
    }

    /// Get INFO field (field 7)
    pub fn info(&self) -> Option<&'a str> {
        self.field(7)
    }

    /// Get FORMAT field (field 8) if present
    pub fn format(&self) -> Option<&'a str> {
        self.field(8)
    }

    /// Number of sample columns
    pub fn sample_count(&self) -> usize {
        self.field_count().saturating_sub(FIRST_SAMPLE_COLUMN)
    }

    /// Get a sample column by 0-based sample index
    pub fn sample(&self, index: usize) -> Option<&'a str> {
        self.field(FIRST_SAMPLE_COLUMN + index)
    }
}

impl VariantRecord for VcfRecordView<'_> {
    fn chrom(&self) -> &str {
        self.chrom
    }

    fn pos(&self) -> u64 {
        self.pos
    }

    fn failed_filter(&self) -> Option<&str> {
        match self.filter() {
            None | Some("") | Some(".") | Some("PASS") => None,
            Some(name) => Some(name),
        }
    }

    fn format_value(&self, key: &str, sample: usize) -> Option<&str> {
        let key_index = self.format()?.split(':').position(|k| k == key)?;
        // trailing keys may be dropped from a sample column
        self.sample(sample)?.split(':').nth(key_index)
    }

    fn info_value(&self, key: &str) -> Option<&str> {
        let info = self.info()?;
        if info == "." {
            return None;
        }
        info.split(';').find_map(|item| match item.split_once('=') {
            Some((k, v)) if k == key => Some(v),
            None if item == key => Some(""),
            _ => None,
        })
    }
}

/// VCF parsing error
#[derive(Debug, thiserror::Error)]
pub enum VcfParseError {
    #[error("Empty line")]
    EmptyLine,

    #[error("Too few fields: expected at least {expected}, found {found}")]
    TooFewFields { expected: usize, found: usize },

    #[error("Invalid UTF-8 in field: {0}")]
    InvalidUtf8(&'static str),

    #[error("Invalid number in field {0}: {1}")]
    InvalidNumber(&'static str, String),

    /// No #CHROM line before the first record or end of input
    #[error("Missing #CHROM header line (line {line})")]
    MissingHeader { line: usize },

    #[error("Invalid record at line {line}: {source}")]
    InvalidRecord {
        line: usize,
        #[source]
        source: Box<VcfParseError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Streaming VCF reader
///
/// The header is consumed on construction; records are then handed out
/// one at a time as views into an internal line buffer.
pub struct VcfReader<R: BufRead> {
    lines: LineReader<R>,
    samples: Vec<String>,
}

impl<R: BufRead> VcfReader<R> {
    /// Read the meta lines and the #CHROM line
    pub fn new(reader: R) -> Result<Self, VcfParseError> {
        let mut lines = LineReader::new(reader);

        loop {
            if !lines.advance()? {
                return Err(VcfParseError::MissingHeader {
                    line: lines.line_number(),
                });
            }
            let line = lines.line();
            if line.starts_with("##") || line.trim().is_empty() {
                continue;
            }
            if line.starts_with("#CHROM") {
                break;
            }
            return Err(VcfParseError::MissingHeader {
                line: lines.line_number(),
            });
        }

        let samples = lines
            .line()
            .split('\t')
            .skip(FIRST_SAMPLE_COLUMN)
            .map(str::to_string)
            .collect();

        Ok(Self { lines, samples })
    }

    /// Sample names from the #CHROM line, in column order
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Next data record, skipping blank lines; `None` at end of input
    pub fn next_record(&mut self) -> Option<Result<VcfRecordView<'_>, VcfParseError>> {
        loop {
            match self.lines.advance() {
                Ok(true) => {}
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
            }
            if !self.lines.line().trim().is_empty() {
                break;
            }
        }

        let line = self.lines.line_number();
        Some(
            VcfRecordView::parse(self.lines.line().as_bytes()).map_err(|e| VcfParseError::InvalidRecord {
                line,
                source: Box::new(e),
            }),
        )
    }
}

/// Estimate purity from a VCF stream
///
/// # Arguments
/// * `input` - VCF text (already decompressed)
/// * `config` - Validated run configuration
/// * `logger` - Destination for diagnostic messages
///
/// # Returns
/// The estimate and the filter statistics. Stops at the first malformed
/// record or unreadable field.
pub fn estimate_vcf<R: BufRead>(
    input: R,
    config: &PurityConfig,
    logger: &dyn Log,
) -> crate::core::Result<Estimation> {
    let mut vcf = VcfReader::new(input)?;
    crate::log_to!(logger, Level::Debug, "samples: {}", vcf.samples().join(", "));

    let mut estimator = PurityEstimator::new(config, vcf.samples(), logger)?;
    while let Some(record) = vcf.next_record() {
        estimator.process(&record?)?;
    }

    Ok(estimator.finish())
}
