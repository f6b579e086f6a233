//! Variant record abstraction consumed by the filter chain
//!
//! The filter chain never touches VCF text directly; any source that can
//! answer these lookups can be estimated over.

/// Read-only view of one variant site
pub trait VariantRecord {
    /// Chromosome name
    fn chrom(&self) -> &str;

    /// 1-based position
    fn pos(&self) -> u64;

    /// Name of the failing filter, or `None` when the site passed
    fn failed_filter(&self) -> Option<&str>;

    /// Raw value of FORMAT key `key` for the sample at `sample`
    fn format_value(&self, key: &str, sample: usize) -> Option<&str>;

    /// Raw value of INFO key `key`; flags yield an empty string
    fn info_value(&self, key: &str) -> Option<&str>;
}
