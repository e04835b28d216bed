//! Least-squares fitting routines for leaf trackers.

use crate::function::{Function, LinearFunction, Parabola, Polynomial};
use nalgebra::{DMatrix, DVector};
use std::fmt;

const EPS: f64 = 1e-12;

/// Fitting routine plugged into [`RegressionTracker`](super::RegressionTracker).
pub trait Fit: Clone + fmt::Debug {
    type Output: Function + Clone + fmt::Debug;

    /// Distinct times needed to determine the model (degree + 1).
    fn minimum_points(&self) -> usize;

    /// Fit the model; `None` if the system is degenerate.
    fn fit(&self, times: &[f64], values: &[f64]) -> Option<Self::Output>;
}

/// Degree 0: the mean value.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConstantFit;

impl Fit for ConstantFit {
    type Output = Polynomial;

    fn minimum_points(&self) -> usize {
        1
    }

    fn fit(&self, _times: &[f64], values: &[f64]) -> Option<Polynomial> {
        if values.is_empty() {
            return None;
        }
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Polynomial::constant(mean))
    }
}

/// Degree 1, closed form.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearFit;

impl Fit for LinearFit {
    type Output = LinearFunction;

    fn minimum_points(&self) -> usize {
        2
    }

    fn fit(&self, times: &[f64], values: &[f64]) -> Option<LinearFunction> {
        let n = times.len();
        if n < 2 || n != values.len() {
            return None;
        }
        let inv_n = 1.0 / n as f64;
        let mean_t = times.iter().sum::<f64>() * inv_n;
        let mean_v = values.iter().sum::<f64>() * inv_n;
        let mut sxx = 0.0;
        let mut sxy = 0.0;
        for (&t, &v) in times.iter().zip(values) {
            let dt = t - mean_t;
            sxx += dt * dt;
            sxy += dt * (v - mean_v);
        }
        if sxx <= EPS {
            return None;
        }
        let slope = sxy / sxx;
        Some(LinearFunction::new(slope, mean_v - slope * mean_t))
    }
}

/// Degree 2.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParabolaFit;

impl Fit for ParabolaFit {
    type Output = Parabola;

    fn minimum_points(&self) -> usize {
        3
    }

    fn fit(&self, times: &[f64], values: &[f64]) -> Option<Parabola> {
        fit_polynomial(times, values, 2).map(|p| Parabola::from(&p))
    }
}

/// Arbitrary (low) degree.
#[derive(Clone, Copy, Debug)]
pub struct PolyFit {
    pub degree: usize,
}

impl Fit for PolyFit {
    type Output = Polynomial;

    fn minimum_points(&self) -> usize {
        self.degree + 1
    }

    fn fit(&self, times: &[f64], values: &[f64]) -> Option<Polynomial> {
        if self.degree == 0 {
            return ConstantFit.fit(times, values);
        }
        fit_polynomial(times, values, self.degree)
    }
}

/// Least-squares polynomial of the given degree through `(times, values)`.
///
/// Times are centered on their mean and scaled to `[-1, 1]` before the
/// Vandermonde system is solved, which keeps it well conditioned for
/// timestamps far from zero. The solution is mapped back to raw time.
pub fn fit_polynomial(times: &[f64], values: &[f64], degree: usize) -> Option<Polynomial> {
    let n = times.len();
    if n == 0 || n != values.len() || n < degree + 1 {
        return None;
    }

    let shift = times.iter().sum::<f64>() / n as f64;
    let spread = times.iter().map(|t| (t - shift).abs()).fold(0.0, f64::max);
    let scale = if spread > EPS { spread } else { 1.0 };

    let vandermonde =
        DMatrix::from_fn(n, degree + 1, |r, c| ((times[r] - shift) / scale).powi(c as i32));
    let rhs = DVector::from_column_slice(values);
    let solution = vandermonde.svd(true, true).solve(&rhs, EPS).ok()?;

    let coefficients: Vec<f64> = solution
        .iter()
        .enumerate()
        .map(|(k, c)| c / scale.powi(k as i32))
        .collect();
    if coefficients.iter().any(|c| !c.is_finite()) {
        return None;
    }
    Some(Polynomial::new(coefficients).shifted(shift))
}
