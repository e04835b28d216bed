use super::regression::{ConstantFit, Fit, LinearFit, ParabolaFit, PolyFit};
use super::SimpleTracker;
use crate::tolerance::Tolerance;

pub type ConstantRegressionTracker = RegressionTracker<ConstantFit>;
pub type LinearTracker = RegressionTracker<LinearFit>;
pub type ParabolaTracker = RegressionTracker<ParabolaFit>;
pub type PolyTracker = RegressionTracker<PolyFit>;

/// Bounded point buffer plus a regression refitted on demand.
///
/// A regression is attempted once the buffer holds at least
/// `fit.minimum_points() + tolerance_points` distinct times; the extra
/// tolerance points keep a barely-determined fit (e.g. a line through two
/// points) from being trusted as a validity reference.
#[derive(Clone, Debug)]
pub struct RegressionTracker<R: Fit> {
    fit: R,
    times: Vec<f64>,
    values: Vec<f64>,
    max_points: usize,
    required_points: usize,
    tolerance: Tolerance,
    regression: Option<R::Output>,
}

impl<R: Fit> RegressionTracker<R> {
    pub fn new(fit: R, max_points: usize, tolerance_points: usize) -> Self {
        let required_points = fit.minimum_points() + tolerance_points;
        Self {
            fit,
            times: Vec::with_capacity(max_points.min(1024)),
            values: Vec::with_capacity(max_points.min(1024)),
            max_points,
            required_points,
            tolerance: Tolerance::default(),
            regression: None,
        }
    }

    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn fit(&self) -> &R {
        &self.fit
    }

    fn distinct_times(&self) -> usize {
        let mut sorted = self.times.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        sorted.dedup();
        sorted.len()
    }
}

impl RegressionTracker<LinearFit> {
    pub fn linear(max_points: usize, tolerance_points: usize) -> Self {
        Self::new(LinearFit, max_points, tolerance_points)
    }

    pub fn slope(&self) -> Option<f64> {
        self.regression.map(|f| f.slope)
    }

    pub fn intercept(&self) -> Option<f64> {
        self.regression.map(|f| f.intercept)
    }
}

impl RegressionTracker<ParabolaFit> {
    pub fn parabola(max_points: usize, tolerance_points: usize) -> Self {
        Self::new(ParabolaFit, max_points, tolerance_points)
    }
}

impl RegressionTracker<PolyFit> {
    pub fn polynomial(degree: usize, max_points: usize, tolerance_points: usize) -> Self {
        Self::new(PolyFit { degree }, max_points, tolerance_points)
    }
}

impl<R: Fit> SimpleTracker for RegressionTracker<R> {
    type F = R::Output;

    fn times(&self) -> &[f64] {
        &self.times
    }

    fn values(&self) -> &[f64] {
        &self.values
    }

    fn max_points(&self) -> usize {
        self.max_points
    }

    fn required_points(&self) -> usize {
        self.required_points
    }

    fn regression(&self) -> Option<&R::Output> {
        self.regression.as_ref()
    }

    fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.tolerance = tolerance;
    }

    fn add_deferred(&mut self, value: f64, time: f64) {
        self.times.push(time);
        self.values.push(value);
        if self.times.len() > self.max_points {
            self.times.remove(0);
            self.values.remove(0);
        }
    }

    fn update_regression(&mut self) {
        self.regression = if self.distinct_times() >= self.required_points {
            self.fit.fit(&self.times, &self.values)
        } else {
            None
        };
    }

    fn reset(&mut self) {
        self.times.clear();
        self.values.clear();
        self.update_regression();
    }

    fn remove_last(&mut self) {
        if self.times.pop().is_some() {
            self.values.pop();
            self.update_regression();
        }
    }
}
