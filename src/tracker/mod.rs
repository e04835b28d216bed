//! Single-segment ("leaf") trackers.
//!
//! A leaf tracker accumulates a bounded window of `(time, value)` pairs and,
//! once it has seen enough distinct times, fits one closed-form function to
//! them. Validity checks compare a candidate point against that regression
//! using the tracker's [`Tolerance`]. Without a regression the caller picks a
//! [`Fallback`]; the composite tracker uses [`Fallback::Valid`] ("too little
//! data, everything is provisionally accepted").
//!
//! All concrete trackers share [`RegressionTracker`] and differ only in their
//! [`Fit`] routine:
//!
//! - [`ConstantFit`]: degree 0, the running mean.
//! - [`LinearFit`]: degree 1, closed-form least squares.
//! - [`ParabolaFit`] / [`PolyFit`]: degree 2 / n, least squares on a centered
//!   and scaled Vandermonde system solved by SVD.
//!
//! The specialised trackers ([`ConstantTracker`], [`PreliminaryTracker`],
//! [`MedianTracker`], [`AngularWrapper`]) build on top of these.

mod angular;
mod constant;
mod median;
mod regression;
mod simple;

pub use angular::AngularWrapper;
pub use constant::{ConstantTracker, PreliminaryTracker};
pub use median::MedianTracker;
pub use regression::{fit_polynomial, ConstantFit, Fit, LinearFit, ParabolaFit, PolyFit};
pub use simple::{
    ConstantRegressionTracker, LinearTracker, ParabolaTracker, PolyTracker, RegressionTracker,
};

use crate::function::Function;
use crate::tolerance::Tolerance;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a validity check answers when no regression is available.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    #[default]
    Valid,
    Invalid,
    /// Compare against the most recent value; valid when there is none.
    UseLastValue,
}

/// Contract shared by all leaf trackers.
pub trait SimpleTracker {
    /// Function type of the regression.
    type F: Function + Clone + fmt::Debug;

    fn times(&self) -> &[f64];
    fn values(&self) -> &[f64];

    /// Capacity; the oldest point is dropped once it is exceeded.
    fn max_points(&self) -> usize;

    /// Distinct times required before a regression is attempted.
    fn required_points(&self) -> usize;

    fn regression(&self) -> Option<&Self::F>;

    fn tolerance(&self) -> Tolerance;
    fn set_tolerance(&mut self, tolerance: Tolerance);

    /// Add a point without refitting. Call
    /// [`update_regression`](Self::update_regression) afterwards.
    fn add_deferred(&mut self, value: f64, time: f64);

    fn update_regression(&mut self);

    /// Drop all points and the regression.
    fn reset(&mut self);

    /// Drop the most recent point and refit. No-op on an empty tracker.
    fn remove_last(&mut self);

    fn add(&mut self, value: f64, time: f64) {
        self.add_deferred(value, time);
        self.update_regression();
    }

    fn has_regression(&self) -> bool {
        self.regression().is_some()
    }

    fn is_valid(&self, value: f64, time: f64, fallback: Fallback) -> bool {
        self.is_valid_with(value, time, self.tolerance(), fallback)
    }

    /// Validity check with an explicit tolerance; the tracker's own is left untouched.
    fn is_valid_with(
        &self,
        value: f64,
        time: f64,
        tolerance: Tolerance,
        fallback: Fallback,
    ) -> bool {
        if let Some(f) = self.regression() {
            return tolerance.admits(f, value, time);
        }
        match fallback {
            Fallback::Valid => true,
            Fallback::Invalid => false,
            Fallback::UseLastValue => self
                .values()
                .last()
                .map_or(true, |&last| tolerance.is_within(last, value, None)),
        }
    }

    /// Mean squared residual of the retained points against the regression.
    fn variance(&self) -> Option<f64> {
        let f = self.regression()?;
        let n = self.times().len();
        if n == 0 {
            return None;
        }
        let sum: f64 = self
            .times()
            .iter()
            .zip(self.values())
            .map(|(&t, &v)| (f.at(t) - v).powi(2))
            .sum();
        Some(sum / n as f64)
    }
}
