use super::{Function, LinearFunction, Polynomial};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// `f(x) = a * x^2 + b * x + c`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parabola {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Parabola {
    #[inline]
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    #[inline]
    pub fn derivative(&self) -> LinearFunction {
        LinearFunction::new(2.0 * self.a, self.b)
    }

    /// Apex of the parabola, `None` when it degenerates to a line.
    pub fn vertex(&self) -> Option<(f64, f64)> {
        if self.a == 0.0 {
            return None;
        }
        let x = -self.b / (2.0 * self.a);
        Some((x, self.at(x)))
    }

    /// `g(x) = f(x + amount)`; the leading coefficient is unchanged.
    pub fn shifted_left(&self, amount: f64) -> Self {
        Self {
            a: self.a,
            b: self.derivative().at(amount),
            c: self.at(amount),
        }
    }
}

impl Function for Parabola {
    #[inline]
    fn at(&self, x: f64) -> f64 {
        (self.a * x + self.b) * x + self.c
    }

    #[inline]
    fn slope_at(&self, x: f64) -> f64 {
        2.0 * self.a * x + self.b
    }
}

impl From<&Polynomial> for Parabola {
    /// Missing higher coefficients are zero; coefficients above degree 2 are ignored.
    fn from(poly: &Polynomial) -> Self {
        let coefficient = |i: usize| poly.coefficients.get(i).copied().unwrap_or(0.0);
        Self::new(coefficient(2), coefficient(1), coefficient(0))
    }
}

impl From<Parabola> for Polynomial {
    fn from(p: Parabola) -> Self {
        Polynomial::new(vec![p.c, p.b, p.a])
    }
}

impl Add for Parabola {
    type Output = Parabola;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.a + rhs.a, self.b + rhs.b, self.c + rhs.c)
    }
}

impl Sub for Parabola {
    type Output = Parabola;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for Parabola {
    type Output = Parabola;

    fn neg(self) -> Self {
        Self::new(-self.a, -self.b, -self.c)
    }
}

impl Add<f64> for Parabola {
    type Output = Parabola;

    fn add(self, offset: f64) -> Self {
        Self::new(self.a, self.b, self.c + offset)
    }
}

impl Mul<f64> for Parabola {
    type Output = Parabola;

    fn mul(self, factor: f64) -> Self {
        Self::new(self.a * factor, self.b * factor, self.c * factor)
    }
}

impl fmt::Display for Parabola {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}x^2 + {:.3}x + {:.3}", self.a, self.b, self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifted_left_keeps_shape() {
        let p = Parabola::new(-1.0, 10.0, 2.0);
        let shifted = p.shifted_left(3.0);
        for x in [-2.0, 0.0, 1.5, 4.0] {
            assert!((shifted.at(x) - p.at(x + 3.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn vertex_of_jump_parabola() {
        let p = Parabola::new(-1.0, 10.0, 0.0);
        let (x, y) = p.vertex().unwrap();
        assert!((x - 5.0).abs() < 1e-12);
        assert!((y - 25.0).abs() < 1e-12);
        assert!(Parabola::new(0.0, 1.0, 0.0).vertex().is_none());
    }

    #[test]
    fn polynomial_conversion_round_trips_coefficients() {
        let poly = Polynomial::new(vec![3.0, 2.0]);
        let p = Parabola::from(&poly);
        assert_eq!(p, Parabola::new(0.0, 2.0, 3.0));
    }
}
