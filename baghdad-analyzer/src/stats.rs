//! Small numeric helpers shared by the report sections.

/// Residual spreads below this are treated as zero.
const STD_EPSILON: f64 = 1e-9;

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Formats a fraction as a percentage with two decimals, `0.5` -> `"50.00%"`.
pub fn pct(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Quantile with linear interpolation between the closest ranks.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Share of `values` at or below `threshold`; zero for no values.
pub fn share_at_most(values: &[f64], threshold: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().filter(|v| **v <= threshold).count() as f64 / values.len() as f64
}

/// Population standard deviation.
pub fn std_dev(values: &[f64]) -> Option<f64> {
    let mean = mean(values)?;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Ordinary least squares of `y` on `x`. `None` when `x` has no spread.
    pub fn ols(x: &[f64], y: &[f64]) -> Option<Self> {
        if x.len() != y.len() || x.len() < 2 {
            return None;
        }
        let mean_x = mean(x)?;
        let mean_y = mean(y)?;

        let (sxx, sxy) = x
            .iter()
            .zip(y)
            .fold((0.0, 0.0), |(sxx, sxy), (xi, yi)| {
                let dx = xi - mean_x;
                (sxx + dx * dx, sxy + dx * (yi - mean_y))
            });
        if sxx == 0.0 {
            return None;
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn residuals(&self, x: &[f64], y: &[f64]) -> Vec<f64> {
        x.iter().zip(y).map(|(xi, yi)| yi - self.predict(*xi)).collect()
    }
}

/// `(r - mean(r)) / std(r)`, with a zero spread treated as one.
pub fn z_scores(values: &[f64]) -> Vec<f64> {
    let (Some(mean), Some(std)) = (mean(values), std_dev(values)) else {
        return vec![];
    };
    let std = if std <= STD_EPSILON { 1.0 } else { std };
    values.iter().map(|v| (v - mean) / std).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn percent_strings_keep_two_places() {
        assert_eq!(pct(0.5), "50.00%");
        assert_eq!(pct(0.0), "0.00%");
        assert_eq!(pct(0.123456), "12.35%");
    }

    #[test]
    fn quantile_interpolates_between_ranks() {
        let p95 = quantile(&[20.0, 40.0], 0.95).unwrap();
        assert!((p95 - 39.0).abs() < TOLERANCE);
        assert_eq!(quantile(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.5), Some(3.0));
        assert_eq!(quantile(&[7.0], 0.95), Some(7.0));
        assert_eq!(quantile(&[], 0.95), None);
    }

    #[test]
    fn share_is_monotone_in_threshold() {
        let minutes = [12.0, 25.0, 30.0, 31.0, 44.0, 60.0];
        let shares: Vec<f64> = [25.0, 30.0, 35.0, 40.0]
            .iter()
            .map(|t| share_at_most(&minutes, *t))
            .collect();
        assert!(shares.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(shares[1], 0.5);
        assert_eq!(share_at_most(&[], 30.0), 0.0);
    }

    #[test]
    fn exact_line_is_recovered() {
        let x: Vec<f64> = (1..=20).map(|i| i as f64 * 0.5).collect();
        let y: Vec<f64> = x.iter().map(|d| 5.0 * d + 2.0).collect();

        let fit = LinearFit::ols(&x, &y).unwrap();
        assert!((fit.slope - 5.0).abs() < TOLERANCE);
        assert!((fit.intercept - 2.0).abs() < TOLERANCE);
        assert!(fit.residuals(&x, &y).iter().all(|r| r.abs() < TOLERANCE));
    }

    #[test]
    fn flat_x_has_no_fit() {
        assert_eq!(LinearFit::ols(&[3.0, 3.0, 3.0], &[1.0, 2.0, 3.0]), None);
        assert_eq!(LinearFit::ols(&[1.0], &[1.0]), None);
    }

    #[test]
    fn zero_spread_gives_zero_scores() {
        assert_eq!(z_scores(&[0.0, 0.0, 0.0]), vec![0.0, 0.0, 0.0]);
        let z = z_scores(&[1.0, 3.0]);
        assert!((z[0] + 1.0).abs() < TOLERANCE);
        assert!((z[1] - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn std_dev_is_the_population_one() {
        let std = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((std - 2.0).abs() < TOLERANCE);
    }
}
