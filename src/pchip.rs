// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Monotone piecewise cubic Hermite interpolation (PCHIP).
//!
//! This module provides the [`Pchip`] interpolator used to resample keypoint
//! signals. Unlike an unconstrained cubic spline, the fitted curve never leaves
//! the range spanned by two neighbouring samples, so it preserves monotone runs
//! and does not overshoot local extrema.
//!
//! Derivatives follow the Fritsch-Carlson scheme with a weighted harmonic mean at
//! interior samples and a one-sided, shape-preserving three-point estimate at the
//! two ends.

use ndarray::{Array1, ArrayView1};

use crate::error::{ResampleError, Result};

/// Evenly spaced parameters over the closed unit interval.
///
/// Point `i` is exactly `i / (n - 1)`, so the first point is `0.0` and the last
/// is `1.0`. Grids of equal length are bit-identical.
///
/// # Arguments
///
/// * `n` - Number of points. `linspace(1)` is `[0.0]` and `linspace(0)` is empty.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::zeros(1),
        _ => {
            let last = (n - 1) as f64;
            (0..n).map(|i| i as f64 / last).collect()
        }
    }
}

/// Shape-preserving piecewise cubic interpolant through `(x, y)` samples.
#[derive(Debug, Clone)]
pub struct Pchip {
    x: Vec<f64>,
    y: Vec<f64>,
    slopes: Vec<f64>,
}

impl Pchip {
    /// Fit an interpolant through the given samples.
    ///
    /// # Arguments
    ///
    /// * `x` - Sample positions, strictly increasing.
    /// * `y` - Sample values, same length as `x`.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::Interpolation`] if the lengths differ, fewer than two
    /// samples are given, or `x` is not strictly increasing.
    pub fn new(x: ArrayView1<'_, f64>, y: ArrayView1<'_, f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(ResampleError::Interpolation(format!(
                "sample positions and values differ in length ({} vs {})",
                x.len(),
                y.len()
            )));
        }
        if x.len() < 2 {
            return Err(ResampleError::Interpolation(format!(
                "at least two samples are required, got {}",
                x.len()
            )));
        }

        let x: Vec<f64> = x.iter().copied().collect();
        let y: Vec<f64> = y.iter().copied().collect();

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        if h.iter().any(|&hk| hk.is_nan() || hk <= 0.0) {
            return Err(ResampleError::Interpolation(
                "sample positions must be strictly increasing".to_string(),
            ));
        }
        let secants: Vec<f64> = y
            .windows(2)
            .zip(&h)
            .map(|(w, &hk)| (w[1] - w[0]) / hk)
            .collect();

        let slopes = hermite_slopes(&h, &secants);
        Ok(Self { x, y, slopes })
    }

    /// Number of samples the interpolant was fitted through.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Always `false`; an interpolant has at least two samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Derivative of the interpolant at each sample position.
    #[must_use]
    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    /// Evaluate the interpolant at `t`.
    ///
    /// Values outside the sampled domain are extrapolated with the boundary cubic.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> f64 {
        let last = self.x.len() - 2;
        let k = self
            .x
            .partition_point(|&xi| xi <= t)
            .saturating_sub(1)
            .min(last);

        let h = self.x[k + 1] - self.x[k];
        let s = (t - self.x[k]) / h;
        let s2 = s * s;
        let s3 = s2 * s;

        let h00 = 2.0f64.mul_add(s3, -3.0 * s2) + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = (-2.0f64).mul_add(s3, 3.0 * s2);
        let h11 = s3 - s2;

        h00 * self.y[k]
            + h10 * h * self.slopes[k]
            + h01 * self.y[k + 1]
            + h11 * h * self.slopes[k + 1]
    }

    /// Evaluate the interpolant at every position in `ts`.
    #[must_use]
    pub fn evaluate_many(&self, ts: ArrayView1<'_, f64>) -> Array1<f64> {
        ts.mapv(|t| self.evaluate(t))
    }
}

/// Sign of `v` as -1, 0 or 1. NaN counts as 0.
fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

/// Derivatives at each sample from interval widths `h` and secant slopes `m`.
fn hermite_slopes(h: &[f64], m: &[f64]) -> Vec<f64> {
    let n = m.len() + 1;
    if n == 2 {
        return vec![m[0], m[0]];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        let (m0, m1) = (m[k - 1], m[k]);
        // Local extremum or flat segment: hold the curve level.
        if sign(m0) == 0 || sign(m1) == 0 || sign(m0) != sign(m1) {
            continue;
        }
        let w1 = 2.0f64.mul_add(h[k], h[k - 1]);
        let w2 = 2.0f64.mul_add(h[k - 1], h[k]);
        d[k] = (w1 + w2) / (w1 / m0 + w2 / m1);
    }

    d[0] = edge_slope(h[0], h[1], m[0], m[1]);
    d[n - 1] = edge_slope(h[n - 2], h[n - 3], m[n - 2], m[n - 3]);
    d
}

/// One-sided three-point derivative estimate at a boundary sample.
fn edge_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = 2.0f64.mul_add(h0, h1).mul_add(m0, -h0 * m1) / (h0 + h1);
    // A NaN neighbour must not leak into the boundary sample.
    if d.is_nan() || sign(d) != sign(m0) {
        0.0
    } else if sign(m0) != sign(m1) && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}
