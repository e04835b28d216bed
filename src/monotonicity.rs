//! Strict or weak monotonicity checks on an incoming value stream.
//!
//! Composite trackers use this on the time axis: time may run forwards or
//! backwards, but once the direction is known it is fixed.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Increasing,
    Decreasing,
    /// Either direction; fixed by the first strict inequality.
    Both,
}

impl Direction {
    /// `+1` for increasing, `-1` for decreasing, `None` while undecided.
    pub fn sign(&self) -> Option<f64> {
        match self {
            Direction::Increasing => Some(1.0),
            Direction::Decreasing => Some(-1.0),
            Direction::Both => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct MonotonicityChecker {
    direction: Direction,
    strict: bool,
    last_value: Option<f64>,
}

impl MonotonicityChecker {
    pub fn new(direction: Direction, strict: bool) -> Self {
        Self {
            direction,
            strict,
            last_value: None,
        }
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[inline]
    pub fn last_value(&self) -> Option<f64> {
        self.last_value
    }

    /// Whether `value` would pass [`verify`](Self::verify), without recording it.
    pub fn would_accept(&self, value: f64) -> bool {
        let Some(last) = self.last_value else {
            return true;
        };
        match self.direction {
            Direction::Increasing => {
                if self.strict {
                    value > last
                } else {
                    value >= last
                }
            }
            Direction::Decreasing => {
                if self.strict {
                    value < last
                } else {
                    value <= last
                }
            }
            Direction::Both => value != last || !self.strict,
        }
    }

    /// Check `value` against the last recorded value and record it on success.
    ///
    /// The first value always succeeds. While the direction is `Both`, the
    /// first strict inequality fixes it.
    pub fn verify(&mut self, value: f64) -> bool {
        self.verify_impl(value, false)
    }

    /// Like [`verify`](Self::verify), but records the value even on failure.
    pub fn verify_or_update(&mut self, value: f64) -> bool {
        self.verify_impl(value, true)
    }

    fn verify_impl(&mut self, value: f64, update_on_failure: bool) -> bool {
        let ok = self.would_accept(value);
        if let (Some(last), Direction::Both) = (self.last_value, self.direction) {
            if value < last {
                self.direction = Direction::Decreasing;
            } else if value > last {
                self.direction = Direction::Increasing;
            }
        }
        if ok || update_on_failure {
            self.last_value = Some(value);
        }
        ok
    }
}
