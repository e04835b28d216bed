use super::regression::ConstantFit;
use super::simple::RegressionTracker;
use super::{Fallback, SimpleTracker};
use crate::function::Polynomial;
use crate::tolerance::Tolerance;

/// Tracks a constant value; time is the insertion count.
#[derive(Clone, Debug)]
pub struct ConstantTracker {
    inner: RegressionTracker<ConstantFit>,
    count: f64,
}

impl Default for ConstantTracker {
    fn default() -> Self {
        Self::new(50, 1, Tolerance::default())
    }
}

impl ConstantTracker {
    pub fn new(max_points: usize, tolerance_points: usize, tolerance: Tolerance) -> Self {
        Self {
            inner: RegressionTracker::new(ConstantFit, max_points, tolerance_points)
                .with_tolerance(tolerance),
            count: 0.0,
        }
    }

    /// Mean of the retained values, once enough values are available.
    pub fn average(&self) -> Option<f64> {
        self.inner.regression().map(|p: &Polynomial| p.coefficients[0])
    }

    pub fn values(&self) -> &[f64] {
        self.inner.values()
    }

    pub fn last_value(&self) -> Option<f64> {
        self.inner.values().last().copied()
    }

    pub fn tolerance(&self) -> Tolerance {
        self.inner.tolerance()
    }

    pub fn add_value(&mut self, value: f64) {
        self.inner.add(value, self.count);
        self.count += 1.0;
    }

    pub fn is_value_valid(&self, value: f64, fallback: Fallback) -> bool {
        self.inner.is_valid(value, self.count, fallback)
    }

    pub fn is_value_valid_with(
        &self,
        value: f64,
        tolerance: Tolerance,
        fallback: Fallback,
    ) -> bool {
        self.inner.is_valid_with(value, self.count, tolerance, fallback)
    }

    /// Add `value` unless it is an outlier against the current mean.
    /// Values are always accepted while there is no mean yet.
    pub fn add_value_if_valid(&mut self, value: f64) -> bool {
        if !self.is_value_valid(value, Fallback::Valid) {
            return false;
        }
        self.add_value(value);
        true
    }

    pub fn remove_last(&mut self) {
        self.inner.remove_last();
    }

    /// Population variance around the mean.
    pub fn variance(&self) -> Option<f64> {
        let mean = self.average()?;
        let values = self.inner.values();
        Some(values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64)
    }
}

/// Constant tracker whose most recent value may be provisional.
///
/// A behavior updates the preliminary value every time its current segment
/// changes and finalizes it when the segment ends, so each segment
/// contributes exactly one value to the mean.
#[derive(Clone, Debug, Default)]
pub struct PreliminaryTracker {
    tracker: ConstantTracker,
    last_is_preliminary: bool,
}

impl PreliminaryTracker {
    pub fn new(max_points: usize, tolerance_points: usize, tolerance: Tolerance) -> Self {
        Self {
            tracker: ConstantTracker::new(max_points, tolerance_points, tolerance),
            last_is_preliminary: false,
        }
    }

    pub fn tracker(&self) -> &ConstantTracker {
        &self.tracker
    }

    pub fn average(&self) -> Option<f64> {
        self.tracker.average()
    }

    /// The mean if available, else the most recent value.
    pub fn estimate(&self) -> Option<f64> {
        self.tracker.average().or_else(|| self.tracker.last_value())
    }

    pub fn has_preliminary(&self) -> bool {
        self.last_is_preliminary
    }

    pub fn is_value_valid(&self, value: f64) -> bool {
        self.tracker.is_value_valid(value, Fallback::Valid)
    }

    /// Add a final value; a pending preliminary value is kept and finalized.
    pub fn add_final(&mut self, value: f64) {
        self.finalize_preliminary();
        self.tracker.add_value(value);
    }

    /// Add a preliminary value; a pending preliminary value is kept and finalized.
    pub fn add_preliminary(&mut self, value: f64) {
        self.finalize_preliminary();
        self.tracker.add_value(value);
        self.last_is_preliminary = true;
    }

    pub fn finalize_preliminary(&mut self) {
        self.last_is_preliminary = false;
    }

    pub fn remove_preliminary(&mut self) {
        if self.last_is_preliminary {
            self.tracker.remove_last();
        }
        self.last_is_preliminary = false;
    }

    /// Replace the pending preliminary value, if any.
    pub fn update_preliminary(&mut self, value: f64) {
        self.remove_preliminary();
        self.add_preliminary(value);
    }

    /// Replace the pending preliminary value if `value` is valid against the
    /// mean of the remaining values; otherwise just clear it.
    pub fn update_preliminary_if_valid(&mut self, value: f64) {
        self.remove_preliminary();
        if self.is_value_valid(value) {
            self.add_preliminary(value);
        }
    }
}
