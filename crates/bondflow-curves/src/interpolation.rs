//! Interpolation methods for pillar curves.

use serde::{Deserialize, Serialize};

/// Interpolation methods for [`ZeroCurve`](crate::ZeroCurve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMethod {
    /// Linear interpolation on zero rates.
    #[default]
    Linear,

    /// Linear interpolation on log discount factors (piecewise flat forwards).
    LogLinear,
}

impl InterpolationMethod {
    /// Locates `t` in `times` and returns the bracketing indices and weight
    /// of the upper node. `times` must be sorted and non-empty, and `t` must
    /// lie within `[times[0], times[last]]`.
    pub(crate) fn bracket(times: &[f64], t: f64) -> (usize, usize, f64) {
        let hi = times.partition_point(|&x| x < t).min(times.len() - 1);
        if hi == 0 {
            return (0, 0, 0.0);
        }
        let lo = hi - 1;
        let span = times[hi] - times[lo];
        let w = if span > 0.0 { (t - times[lo]) / span } else { 1.0 };
        (lo, hi, w)
    }

    /// Linearly interpolates `values` at `t`.
    pub(crate) fn linear(times: &[f64], values: &[f64], t: f64) -> f64 {
        let (lo, hi, w) = Self::bracket(times, t);
        values[lo] + w * (values[hi] - values[lo])
    }
}

impl std::fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Linear => "Linear",
            Self::LogLinear => "Log-Linear",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_midpoint() {
        let times = [1.0, 2.0, 4.0];
        let values = [0.01, 0.02, 0.04];
        assert!((InterpolationMethod::linear(&times, &values, 3.0) - 0.03).abs() < 1e-15);
        assert_eq!(InterpolationMethod::linear(&times, &values, 1.0), 0.01);
        assert_eq!(InterpolationMethod::linear(&times, &values, 4.0), 0.04);
    }

    #[test]
    fn test_bracket_below_first_node() {
        let times = [1.0, 2.0];
        assert_eq!(InterpolationMethod::bracket(&times, 0.5), (0, 0, 0.0));
    }

    #[test]
    fn test_display() {
        assert_eq!(InterpolationMethod::LogLinear.to_string(), "Log-Linear");
    }
}
