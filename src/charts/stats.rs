//! Regression and correlation statistics
//!
//! Ordinary-least-squares fit for scatter trendlines, plus a Pearson
//! correlation summary for the selected outcome/indicator pair.

use serde::Serialize;

/// Result of a simple linear regression `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OlsFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination; 1.0 when y is constant
    pub r_squared: f64,
    pub sample_size: usize,
}

impl OlsFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit an OLS line through `(x, y)`.
///
/// Returns `None` for mismatched lengths, fewer than two points, non-finite
/// input or zero variance in `x`.
pub fn ols_fit(x: &[f64], y: &[f64]) -> Option<OlsFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let sxx: f64 = x.iter().map(|a| (a - mean_x).powi(2)).sum();
    let sxy: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (a - mean_x) * (b - mean_y))
        .sum();

    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let ss_tot: f64 = y.iter().map(|b| (b - mean_y).powi(2)).sum();
    let ss_res: f64 = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| (b - (slope * a + intercept)).powi(2))
        .sum();

    let r_squared = if ss_tot == 0.0 {
        1.0
    } else {
        1.0 - ss_res / ss_tot
    };

    Some(OlsFit {
        slope,
        intercept,
        r_squared,
        sample_size: x.len(),
    })
}

/// Calculate Pearson correlation coefficient
///
/// Returns a value between -1 and 1:
/// - 1: perfect positive correlation
/// - 0: no correlation
/// - -1: perfect negative correlation
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;

    let sum_x: f64 = x.iter().sum();
    let sum_y: f64 = y.iter().sum();
    let sum_xy: f64 = x.iter().zip(y.iter()).map(|(a, b)| a * b).sum();
    let sum_x2: f64 = x.iter().map(|a| a * a).sum();
    let sum_y2: f64 = y.iter().map(|b| b * b).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x.powi(2)) * (n * sum_y2 - sum_y.powi(2))).sqrt();

    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Correlation between the selected indicator and outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    /// Pearson correlation coefficient (-1 to 1), rounded to 2 decimals
    pub coefficient: f64,
    /// Human-readable strength: "strong", "moderate", "weak", "negligible"
    pub strength: String,
    /// Direction: "positive", "negative" or "none"
    pub direction: String,
    /// Number of states used
    pub sample_size: usize,
}

impl Correlation {
    /// Summarize the correlation of two paired samples. `None` below two points.
    pub fn between(x: &[f64], y: &[f64]) -> Option<Self> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }

        let r = pearson_correlation(x, y);
        if r.is_nan() {
            return None;
        }

        let direction = if r > 0.0 {
            "positive"
        } else if r < 0.0 {
            "negative"
        } else {
            "none"
        };

        Some(Self {
            coefficient: (r * 100.0).round() / 100.0,
            strength: correlation_strength(r).to_string(),
            direction: direction.to_string(),
            sample_size: x.len(),
        })
    }
}

/// Convert correlation coefficient to human-readable strength
fn correlation_strength(r: f64) -> &'static str {
    let abs_r = r.abs();
    if abs_r > 0.7 {
        "strong"
    } else if abs_r > 0.5 {
        "moderate"
    } else if abs_r > 0.3 {
        "weak"
    } else {
        "negligible"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ols_exact_line() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![3.0, 5.0, 7.0, 9.0];
        let fit = ols_fit(&x, &y).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.r_squared - 1.0).abs() < 1e-12);
        assert_eq!(fit.sample_size, 4);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_ols_noisy() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 5.0, 4.0, 5.0];
        let fit = ols_fit(&x, &y).unwrap();
        // slope = sxy / sxx = 6 / 10, intercept = 4 - 0.6 * 3
        assert!((fit.slope - 0.6).abs() < 1e-12);
        assert!((fit.intercept - 2.2).abs() < 1e-12);
        // ss_res = 2.4, ss_tot = 6
        assert!((fit.r_squared - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_ols_degenerate() {
        assert!(ols_fit(&[], &[]).is_none());
        assert!(ols_fit(&[1.0], &[2.0]).is_none());
        assert!(ols_fit(&[1.0, 2.0], &[2.0]).is_none());
        assert!(ols_fit(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]).is_none());
        assert!(ols_fit(&[1.0, f64::INFINITY], &[1.0, 2.0]).is_none());
    }

    #[test]
    fn test_ols_constant_y() {
        let fit = ols_fit(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap();
        assert_eq!(fit.slope, 0.0);
        assert_eq!(fit.intercept, 4.0);
        assert_eq!(fit.r_squared, 1.0);
    }

    #[test]
    fn test_pearson_correlation_perfect_positive() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let r = pearson_correlation(&x, &y);
        assert!((r - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_pearson_correlation_perfect_negative() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![10.0, 8.0, 6.0, 4.0, 2.0];
        let r = pearson_correlation(&x, &y);
        assert!((r + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_pearson_correlation_empty() {
        assert_eq!(pearson_correlation(&[], &[]), 0.0);
    }

    #[test]
    fn test_correlation_strength() {
        assert_eq!(correlation_strength(0.8), "strong");
        assert_eq!(correlation_strength(-0.75), "strong");
        assert_eq!(correlation_strength(0.6), "moderate");
        assert_eq!(correlation_strength(0.4), "weak");
        assert_eq!(correlation_strength(-0.35), "weak");
        assert_eq!(correlation_strength(0.2), "negligible");
    }

    #[test]
    fn test_correlation_between() {
        let corr = Correlation::between(&[1.0, 2.0, 3.0], &[6.0, 4.0, 2.0]).unwrap();
        assert_eq!(corr.coefficient, -1.0);
        assert_eq!(corr.strength, "strong");
        assert_eq!(corr.direction, "negative");
        assert_eq!(corr.sample_size, 3);

        assert!(Correlation::between(&[1.0], &[1.0]).is_none());
    }

    #[test]
    fn test_correlation_serializes() {
        let corr = Correlation {
            coefficient: 0.72,
            strength: "strong".to_string(),
            direction: "positive".to_string(),
            sample_size: 50,
        };

        let json = serde_json::to_string(&corr).unwrap();
        assert!(json.contains("\"coefficient\":0.72"));
        assert!(json.contains("\"strength\":\"strong\""));
    }
}
