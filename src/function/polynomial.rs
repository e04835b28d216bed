use super::Function;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Polynomial with coefficients stored lowest order first (`x^0, x^1, ...`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polynomial {
    pub coefficients: Vec<f64>,
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Self { coefficients }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Degree of the polynomial; `None` for the empty (zero) polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coefficients.len().checked_sub(1)
    }

    pub fn derivative(&self) -> Polynomial {
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, c)| i as f64 * c)
            .collect();
        Polynomial::new(coefficients)
    }

    /// Re-expand `q(x) = p(x - amount)` in powers of `x`.
    pub fn shifted(&self, amount: f64) -> Polynomial {
        let n = self.coefficients.len();
        let mut out = vec![0.0; n];
        // (x - s)^i = sum_k C(i, k) x^k (-s)^(i-k)
        for (i, &c) in self.coefficients.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            let mut binom = 1.0;
            for k in 0..=i {
                out[k] += c * binom * (-amount).powi((i - k) as i32);
                binom = binom * (i - k) as f64 / (k + 1) as f64;
            }
        }
        Polynomial::new(out)
    }

    /// Leading coefficient (`a` in `a x^n + b x^(n-1) + ...`).
    pub fn a(&self) -> f64 {
        self.from_top(0)
    }

    pub fn b(&self) -> f64 {
        self.from_top(1)
    }

    pub fn c(&self) -> f64 {
        self.from_top(2)
    }

    fn from_top(&self, offset: usize) -> f64 {
        self.degree()
            .and_then(|d| d.checked_sub(offset))
            .map(|i| self.coefficients[i])
            .unwrap_or(0.0)
    }
}

impl Function for Polynomial {
    #[inline]
    fn at(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    fn slope_at(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .enumerate()
            .skip(1)
            .rev()
            .fold(0.0, |acc, (i, &c)| acc * x + i as f64 * c)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(degree) = self.degree() else {
            return Ok(());
        };
        for i in (2..=degree).rev() {
            if self.coefficients[i] != 0.0 {
                write!(f, "{:.3}x^{} + ", self.coefficients[i], i)?;
            }
        }
        if degree >= 1 {
            write!(f, "{:.3}x + ", self.coefficients[1])?;
        }
        write!(f, "{:.3}", self.coefficients[0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horner_evaluation() {
        let p = Polynomial::new(vec![1.0, -2.0, 3.0]);
        assert!((p.at(2.0) - 9.0).abs() < 1e-12);
        assert!((p.slope_at(2.0) - 10.0).abs() < 1e-12);
        assert_eq!(p.derivative(), Polynomial::new(vec![-2.0, 6.0]));
    }

    #[test]
    fn shifted_matches_translated_evaluation() {
        let p = Polynomial::new(vec![0.5, -1.0, 0.25, 2.0]);
        let q = p.shifted(1.75);
        for x in [-3.0, -0.5, 0.0, 1.0, 4.5] {
            assert!((q.at(x) - p.at(x - 1.75)).abs() < 1e-9, "x={x}");
        }
    }

    #[test]
    fn convenience_coefficients_count_from_the_top() {
        let p = Polynomial::new(vec![3.0, 2.0, 1.0]);
        assert_eq!((p.a(), p.b(), p.c()), (1.0, 2.0, 3.0));
        assert_eq!(Polynomial::constant(4.0).b(), 0.0);
        assert_eq!(Polynomial::new(vec![]).degree(), None);
    }

    #[test]
    fn display_skips_zero_high_terms() {
        let p = Polynomial::new(vec![1.0, 0.0, 0.0, 2.0]);
        assert_eq!(p.to_string(), "2.000x^3 + 0.000x + 1.000");
    }
}
