//! Box-Cox power transform with maximum-likelihood lambda

use crate::descriptive::mean;
use groupwise_core::{Error, Result};

/// Search interval for lambda
pub const LAMBDA_BOUNDS: (f64, f64) = (-5.0, 5.0);

const GOLDEN: f64 = 0.618_033_988_749_894_9;
const TOLERANCE: f64 = 1e-8;
const MAX_ITERATIONS: usize = 200;

/// Box-Cox transform of one positive value
pub fn transform(x: f64, lambda: f64) -> f64 {
    if lambda.abs() < 1e-12 {
        x.ln()
    } else {
        (x.powf(lambda) - 1.0) / lambda
    }
}

/// Profile log-likelihood of lambda for a positive sample
pub fn log_likelihood(sample: &[f64], lambda: f64) -> f64 {
    let n = sample.len() as f64;
    let transformed: Vec<f64> = sample.iter().map(|&x| transform(x, lambda)).collect();
    let m = mean(&transformed).unwrap_or_default();
    let variance = transformed.iter().map(|y| (y - m).powi(2)).sum::<f64>() / n;
    let log_sum: f64 = sample.iter().map(|x| x.ln()).sum();
    -n / 2.0 * variance.ln() + (lambda - 1.0) * log_sum
}

/// Lambda maximising the profile log-likelihood over [`LAMBDA_BOUNDS`]
///
/// Golden-section search; the sample must be strictly positive and hold at
/// least two distinct values.
pub fn optimal_lambda(sample: &[f64]) -> Result<f64> {
    validate(sample)?;

    let (mut a, mut b) = LAMBDA_BOUNDS;
    let mut c = b - GOLDEN * (b - a);
    let mut d = a + GOLDEN * (b - a);
    let mut fc = log_likelihood(sample, c);
    let mut fd = log_likelihood(sample, d);

    for _ in 0..MAX_ITERATIONS {
        if (b - a).abs() < TOLERANCE {
            break;
        }
        if fc > fd {
            b = d;
            d = c;
            fd = fc;
            c = b - GOLDEN * (b - a);
            fc = log_likelihood(sample, c);
        } else {
            a = c;
            c = d;
            fc = fd;
            d = a + GOLDEN * (b - a);
            fd = log_likelihood(sample, d);
        }
    }

    let lambda = (a + b) / 2.0;
    if !lambda.is_finite() {
        return Err(Error::Computation("Box-Cox lambda search diverged".into()));
    }
    Ok(lambda)
}

fn validate(sample: &[f64]) -> Result<()> {
    if sample.iter().any(|&x| x <= 0.0 || !x.is_finite()) {
        return Err(Error::InvalidInput(
            "Box-Cox requires strictly positive finite values".into(),
        ));
    }
    let first = sample.first().copied().ok_or(Error::InsufficientData {
        expected: 2,
        actual: 0,
    })?;
    if sample.iter().all(|&x| x == first) {
        return Err(Error::degenerate_variance("Box-Cox input"));
    }
    Ok(())
}

/// A fitted transform: shift, then power transform with `lambda`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCoxFit {
    pub lambda: f64,
    /// Added to every value before transforming
    pub shift: f64,
}

impl BoxCoxFit {
    /// Fit a sample, shifting it by `|min| + offset` when any value is non-positive
    pub fn fit(sample: &[f64], offset: f64) -> Result<Self> {
        let min = sample
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min);
        let shift = if min <= 0.0 { min.abs() + offset } else { 0.0 };
        let shifted: Vec<f64> = sample.iter().map(|x| x + shift).collect();
        let lambda = optimal_lambda(&shifted)?;
        Ok(Self { lambda, shift })
    }

    /// Apply the fitted transform
    pub fn apply(&self, x: f64) -> f64 {
        transform(x + self.shift, self.lambda)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_special_cases() {
        assert_relative_eq!(transform(5.0, 1.0), 4.0);
        assert_relative_eq!(transform(std::f64::consts::E, 0.0), 1.0);
        assert_relative_eq!(transform(4.0, 0.5), 2.0);
    }

    #[test]
    fn test_lognormal_like_sample_prefers_log() {
        let sample: Vec<f64> = [-2.0, -1.0, -0.5, 0.0, 0.5, 1.0, 2.0]
            .iter()
            .map(|x: &f64| x.exp())
            .collect();
        let lambda = optimal_lambda(&sample).unwrap();
        assert!(lambda.abs() < 0.5, "lambda = {lambda}");
        assert!(log_likelihood(&sample, lambda) >= log_likelihood(&sample, 1.0));
        assert!(log_likelihood(&sample, lambda) + 1e-9 >= log_likelihood(&sample, 0.0));
    }

    #[test]
    fn test_lambda_stays_in_bounds() {
        let lambda = optimal_lambda(&[1.0, 1.0, 1.0, 1.0, 100.0]).unwrap();
        assert!((LAMBDA_BOUNDS.0..=LAMBDA_BOUNDS.1).contains(&lambda));
    }

    #[test]
    fn test_invalid_samples() {
        assert!(optimal_lambda(&[1.0, -2.0, 3.0]).is_err());
        assert!(optimal_lambda(&[2.0, 2.0, 2.0]).is_err());
        assert!(optimal_lambda(&[]).is_err());
    }

    #[test]
    fn test_fit_shifts_non_positive_samples() {
        let fit = BoxCoxFit::fit(&[-2.0, 0.0, 1.0, 3.0], 1.0).unwrap();
        assert_relative_eq!(fit.shift, 3.0);
        assert!(fit.apply(-2.0).is_finite());

        let fit = BoxCoxFit::fit(&[1.0, 2.0, 4.0], 1.0).unwrap();
        assert_relative_eq!(fit.shift, 0.0);
    }
}
