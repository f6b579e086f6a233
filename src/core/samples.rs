//! Tumour/normal sample resolution

use super::error::{ConfigError, ConfigResult};

/// Column indices of the tumour and its paired germline sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePair {
    pub tumour: usize,
    pub germline: usize,
}

impl SamplePair {
    /// Locate `tumour` in `samples` by exact name match.
    ///
    /// Exactly two samples must be present; the germline sample is the
    /// other one.
    pub fn resolve<S: AsRef<str>>(samples: &[S], tumour: &str) -> ConfigResult<Self> {
        if samples.len() != 2 {
            return Err(ConfigError::SampleCount { found: samples.len() });
        }

        let tumour_idx = samples
            .iter()
            .position(|s| s.as_ref() == tumour)
            .ok_or_else(|| ConfigError::TumourNotFound {
                name: tumour.to_string(),
                available: samples.iter().map(|s| s.as_ref().to_string()).collect(),
            })?;

        Ok(Self {
            tumour: tumour_idx,
            germline: 1 - tumour_idx,
        })
    }
}
