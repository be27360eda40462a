//! Descriptive statistics shared by the tests, the outlier filters and the plots

use groupwise_core::{Error, Result};

/// Arithmetic mean; `None` for an empty sample
pub fn mean(sample: &[f64]) -> Option<f64> {
    if sample.is_empty() {
        return None;
    }
    Some(sample.iter().sum::<f64>() / sample.len() as f64)
}

/// Unbiased sample variance (n - 1 denominator); `None` below two observations
pub fn sample_variance(sample: &[f64]) -> Option<f64> {
    if sample.len() < 2 {
        return None;
    }
    let m = mean(sample)?;
    let ss: f64 = sample.iter().map(|x| (x - m).powi(2)).sum();
    Some(ss / (sample.len() - 1) as f64)
}

/// Sample standard deviation
pub fn sample_std(sample: &[f64]) -> Option<f64> {
    sample_variance(sample).map(f64::sqrt)
}

/// Linear-interpolation quantile (Hyndman-Fan type 7) of pre-sorted data
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::InvalidInput(format!("Quantile {p} must be in [0, 1]")));
    }
    match sorted.len() {
        0 => Err(Error::InsufficientData {
            expected: 1,
            actual: 0,
        }),
        1 => Ok(sorted[0]),
        n => {
            let h = (n - 1) as f64 * p;
            let lo = h.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            Ok(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
        }
    }
}

/// Sort a copy of the sample
pub fn sorted(sample: &[f64]) -> Vec<f64> {
    let mut v = sample.to_vec();
    v.sort_by(|a, b| a.total_cmp(b));
    v
}

/// Median of an unsorted sample
pub fn median(sample: &[f64]) -> Result<f64> {
    quantile_sorted(&sorted(sample), 0.5)
}

/// Median absolute deviation around the median (unscaled)
pub fn mad(sample: &[f64]) -> Result<f64> {
    let center = median(sample)?;
    let deviations: Vec<f64> = sample.iter().map(|x| (x - center).abs()).collect();
    median(&deviations)
}

/// Consistency factor that makes MAD comparable to a standard deviation
pub const MAD_NORMAL_CONSISTENCY: f64 = 1.4826;

/// Minimum, quartiles and maximum
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl FiveNumberSummary {
    /// Summarise an unsorted sample
    pub fn from_sample(sample: &[f64]) -> Result<Self> {
        let s = sorted(sample);
        Ok(Self {
            min: quantile_sorted(&s, 0.0)?,
            q1: quantile_sorted(&s, 0.25)?,
            median: quantile_sorted(&s, 0.5)?,
            q3: quantile_sorted(&s, 0.75)?,
            max: quantile_sorted(&s, 1.0)?,
        })
    }

    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Values in the order box charts expect
    pub fn to_vec(&self) -> Vec<f64> {
        vec![self.min, self.q1, self.median, self.q3, self.max]
    }
}

/// Average ranks (1-based) of the pooled sample, ties sharing their mean rank
///
/// Also returns the sizes of every tie group with more than one member.
pub fn average_ranks(sample: &[f64]) -> (Vec<f64>, Vec<usize>) {
    let mut order: Vec<usize> = (0..sample.len()).collect();
    order.sort_by(|&a, &b| sample[a].total_cmp(&sample[b]));

    let mut ranks = vec![0.0; sample.len()];
    let mut ties = Vec::new();
    let mut i = 0;
    while i < order.len() {
        let mut j = i + 1;
        while j < order.len() && sample[order[j]] == sample[order[i]] {
            j += 1;
        }
        // Positions i..j share ranks i+1..=j
        let rank = (i + 1 + j) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = rank;
        }
        if j - i > 1 {
            ties.push(j - i);
        }
        i = j;
    }
    (ranks, ties)
}
