//! Closed floating-point ranges that remember their direction.
//!
//! Trackers may run on a decreasing time axis, so a range is *not* normalized
//! on construction: `lower` is the bound that comes first in the stream and
//! `upper` the more recent one. Use [`SimpleRange::regularized`] when an
//! ordinary `lower <= upper` interval is needed.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimpleRange {
    pub lower: f64,
    pub upper: f64,
}

impl SimpleRange {
    /// `(-inf, +inf)`.
    pub const OPEN: SimpleRange = SimpleRange {
        lower: f64::NEG_INFINITY,
        upper: f64::INFINITY,
    };

    /// `[0, 1]`, the neutral relative guess range.
    pub const UNIT: SimpleRange = SimpleRange {
        lower: 0.0,
        upper: 1.0,
    };

    #[inline]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// Range of the given diameter centered on `center`.
    pub fn around(center: f64, diameter: f64) -> Self {
        Self::new(center - diameter / 2.0, center + diameter / 2.0)
    }

    #[inline]
    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Signed size; negative for an inverted range.
    #[inline]
    pub fn size(&self) -> f64 {
        self.upper - self.lower
    }

    /// Same bounds with `lower <= upper`.
    pub fn regularized(&self) -> Self {
        Self::new(self.lower.min(self.upper), self.lower.max(self.upper))
    }

    /// `upper < lower`. A single point is not empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.upper < self.lower
    }

    #[inline]
    pub fn is_single_point(&self) -> bool {
        self.upper == self.lower
    }

    /// `false` for an empty range.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        self.lower <= x && x <= self.upper
    }

    pub fn shifted(&self, amount: f64) -> Self {
        Self::new(self.lower + amount, self.upper + amount)
    }

    /// Map a range given relative to `self` (0 = `lower`, 1 = `upper`) to
    /// absolute coordinates. Direction is preserved.
    pub fn interpolate(&self, relative: &SimpleRange) -> Self {
        let size = self.size();
        Self::new(
            self.lower + relative.lower * size,
            self.lower + relative.upper * size,
        )
    }

    /// Empty if the ranges do not overlap; use [`SimpleRange::OPEN`] as the neutral element.
    pub fn intersection(&self, other: &SimpleRange) -> Self {
        Self::new(self.lower.max(other.lower), self.upper.min(other.upper))
    }

    /// Only meaningful for non-empty ranges.
    pub fn clamp(&self, x: f64) -> f64 {
        x.max(self.lower).min(self.upper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolate_keeps_direction() {
        let decreasing = SimpleRange::new(10.0, 6.0);
        let mapped = decreasing.interpolate(&SimpleRange::new(0.25, 1.0));
        assert_eq!(mapped, SimpleRange::new(9.0, 6.0));
        assert!(mapped.is_empty());
        assert_eq!(mapped.regularized(), SimpleRange::new(6.0, 9.0));
    }

    #[test]
    fn single_point_is_not_empty() {
        let r = SimpleRange::new(2.0, 2.0);
        assert!(r.is_single_point());
        assert!(!r.is_empty());
        assert!(r.contains(2.0));
    }

    #[test]
    fn intersection_and_clamp() {
        let r = SimpleRange::new(0.0, 4.0).intersection(&SimpleRange::new(2.0, 8.0));
        assert_eq!(r, SimpleRange::new(2.0, 4.0));
        assert_eq!(r.clamp(7.0), 4.0);
        assert_eq!(SimpleRange::OPEN.intersection(&r), r);
        assert_eq!(SimpleRange::around(1.0, 2.0), SimpleRange::new(0.0, 2.0));
    }
}
