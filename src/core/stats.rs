//! Percentile statistics and the purity estimate

/// Percentile ranks reported as lower, best and upper
pub const PERCENTILES: [f64; 3] = [90.0, 99.0, 99.9];

/// Estimate used when no allele frequency survived the filters
pub const FALLBACK_ESTIMATE: PurityEstimate = PurityEstimate {
    lower: 0.0,
    best: 0.5,
    upper: 1.0,
};

/// Linearly interpolated percentiles of `values`.
///
/// For each rank `p` (0..=100) the fractional index `p / 100 * (n - 1)`
/// into the sorted data is blended between its two neighbouring order
/// statistics. Returns `None` for empty input. NaN values sort last.
pub fn percentiles(values: &[f64], ranks: &[f64]) -> Option<Vec<f64>> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    Some(ranks.iter().map(|&p| interpolate(&sorted, p)).collect())
}

fn interpolate(sorted: &[f64], rank: f64) -> f64 {
    let last = sorted.len() - 1;
    let pos = (rank / 100.0).clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(last);
    lerp(sorted[lo], sorted[hi], pos - lo as f64)
}

/// Blend from `a` to `b`, anchored on the nearer end so both endpoints
/// are reproduced exactly
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    let diff = b - a;
    if t < 0.5 {
        a + diff * t
    } else {
        b - diff * (1.0 - t)
    }
}

/// Purity estimate reported to the user
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurityEstimate {
    /// 90th percentile
    pub lower: f64,
    /// 99th percentile
    pub best: f64,
    /// 99.9th percentile
    pub upper: f64,
}

impl PurityEstimate {
    /// Estimate from collected allele frequencies, `None` if there are none
    pub fn from_afs(afs: &[f64]) -> Option<Self> {
        let p = percentiles(afs, &PERCENTILES)?;
        Some(Self {
            lower: p[0],
            best: p[1],
            upper: p[2],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_input() {
        assert!(percentiles(&[], &[50.0]).is_none());
        assert!(PurityEstimate::from_afs(&[]).is_none());
    }

    #[test]
    fn test_single_value() {
        let p = percentiles(&[0.3], &[0.0, 50.0, 100.0]).unwrap();
        assert_eq!(p, vec![0.3, 0.3, 0.3]);
    }

    #[test]
    fn test_three_values() {
        let est = PurityEstimate::from_afs(&[0.6, 0.2, 0.4]).unwrap();
        assert!(approx(est.lower, 0.56));
        assert!(approx(est.best, 0.596));
        assert!(approx(est.upper, 0.5996));
    }

    #[test]
    fn test_median_and_extremes() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let p = percentiles(&values, &[0.0, 50.0, 100.0]).unwrap();
        assert!(approx(p[0], 1.0));
        assert!(approx(p[1], 2.5));
        assert!(approx(p[2], 4.0));
    }

    #[test]
    fn test_interpolation_between_ranks() {
        // rank 25 over 5 values lands exactly on index 1
        let values = [10.0, 20.0, 30.0, 40.0, 50.0];
        let p = percentiles(&values, &[25.0, 30.0]).unwrap();
        assert!(approx(p[0], 20.0));
        assert!(approx(p[1], 22.0));
    }

    #[test]
    fn test_input_order_irrelevant() {
        let a = percentiles(&[0.1, 0.9, 0.5, 0.3], &PERCENTILES).unwrap();
        let b = percentiles(&[0.9, 0.3, 0.1, 0.5], &PERCENTILES).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_fallback_values() {
        assert_eq!(FALLBACK_ESTIMATE.lower, 0.0);
        assert_eq!(FALLBACK_ESTIMATE.best, 0.5);
        assert_eq!(FALLBACK_ESTIMATE.upper, 1.0);
    }
}
