use super::{Fallback, SimpleTracker};
use crate::function::Function;
use crate::tolerance::Tolerance;
use std::f64::consts::TAU;

/// Leaf tracker for angles given in `[0, 2π)`.
///
/// Values are unwrapped onto the continuous branch closest to the current
/// prediction (the regression, else the last value) before they reach the
/// inner tracker, so a rotation crossing `0` or `2π` stays a straight line.
#[derive(Clone, Debug)]
pub struct AngularWrapper<T: SimpleTracker> {
    inner: T,
}

impl<T: SimpleTracker> AngularWrapper<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Shift `value` by whole turns towards the predicted value at `time`.
    pub fn linearify(&self, value: f64, time: f64) -> f64 {
        let guess = match self.inner.regression() {
            Some(f) => f.at(time),
            None => match self.inner.values().last() {
                Some(&last) => last,
                None => return value,
            },
        };
        let rotations = ((guess - value + std::f64::consts::PI) / TAU).floor();
        value + rotations * TAU
    }

    /// Predicted angle at `time`, wrapped back into `[0, 2π)`.
    pub fn wrapped_prediction(&self, time: f64) -> Option<f64> {
        self.inner.regression().map(|f| f.at(time).rem_euclid(TAU))
    }
}

impl<T: SimpleTracker> SimpleTracker for AngularWrapper<T> {
    type F = T::F;

    fn times(&self) -> &[f64] {
        self.inner.times()
    }

    fn values(&self) -> &[f64] {
        self.inner.values()
    }

    fn max_points(&self) -> usize {
        self.inner.max_points()
    }

    fn required_points(&self) -> usize {
        self.inner.required_points()
    }

    fn regression(&self) -> Option<&T::F> {
        self.inner.regression()
    }

    fn tolerance(&self) -> Tolerance {
        self.inner.tolerance()
    }

    fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.inner.set_tolerance(tolerance);
    }

    fn add_deferred(&mut self, value: f64, time: f64) {
        let value = self.linearify(value, time);
        self.inner.add_deferred(value, time);
    }

    fn update_regression(&mut self) {
        self.inner.update_regression();
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn remove_last(&mut self) {
        self.inner.remove_last();
    }

    fn is_valid_with(
        &self,
        value: f64,
        time: f64,
        tolerance: Tolerance,
        fallback: Fallback,
    ) -> bool {
        let value = self.linearify(value, time);
        self.inner.is_valid_with(value, time, tolerance, fallback)
    }
}
