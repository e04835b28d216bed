use super::Function;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// `f(x) = slope * x + intercept`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LinearFunction {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFunction {
    #[inline]
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Line through two points with distinct x values.
    pub fn through(p1: (f64, f64), p2: (f64, f64)) -> Self {
        let slope = (p1.1 - p2.1) / (p1.0 - p2.0);
        Self {
            slope,
            intercept: p1.1 - slope * p1.0,
        }
    }

    /// Line with the given slope passing through `(x, y)`.
    #[inline]
    pub fn with_slope_through(slope: f64, x: f64, y: f64) -> Self {
        Self {
            slope,
            intercept: y - slope * x,
        }
    }

    /// The inverse function, such that `self.at(inverse.at(x)) == x`.
    /// Undefined (non-finite coefficients) for a zero slope.
    pub fn inverse(&self) -> Self {
        Self {
            slope: 1.0 / self.slope,
            intercept: -self.intercept / self.slope,
        }
    }

    /// `g(x) = f(x + amount)`.
    pub fn shifted_left(&self, amount: f64) -> Self {
        Self {
            slope: self.slope,
            intercept: self.intercept + self.slope * amount,
        }
    }
}

impl Function for LinearFunction {
    #[inline]
    fn at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    #[inline]
    fn slope_at(&self, _x: f64) -> f64 {
        self.slope
    }
}

impl Add for LinearFunction {
    type Output = LinearFunction;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.slope + rhs.slope, self.intercept + rhs.intercept)
    }
}

impl Sub for LinearFunction {
    type Output = LinearFunction;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for LinearFunction {
    type Output = LinearFunction;

    fn neg(self) -> Self {
        Self::new(-self.slope, -self.intercept)
    }
}

impl Add<f64> for LinearFunction {
    type Output = LinearFunction;

    fn add(self, offset: f64) -> Self {
        Self::new(self.slope, self.intercept + offset)
    }
}

impl Mul<f64> for LinearFunction {
    type Output = LinearFunction;

    fn mul(self, factor: f64) -> Self {
        Self::new(self.slope * factor, self.intercept * factor)
    }
}

impl fmt::Display for LinearFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}x + {:.3}", self.slope, self.intercept)
    }
}
