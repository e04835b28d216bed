use super::{LinearFunction, Parabola};

/// Relative size below which a leading coefficient counts as zero.
const DEGENERATE_EPS: f64 = 1e-12;

pub struct LinearSolver;

impl LinearSolver {
    /// Root of `line(x) = 0`; `None` for a horizontal line.
    pub fn zero(line: &LinearFunction) -> Option<f64> {
        if line.slope == 0.0 {
            return None;
        }
        Some(-line.intercept / line.slope)
    }
}

pub struct QuadraticSolver;

impl QuadraticSolver {
    /// Both real roots of `a x^2 + b x + c = 0`, ascending.
    ///
    /// A vanishing `a` degrades to the linear root, returned twice. A double
    /// root is also returned twice. `None` when there is no real solution.
    pub fn solve(a: f64, b: f64, c: f64) -> Option<(f64, f64)> {
        let scale = b.abs().max(c.abs()).max(1.0);
        if a.abs() <= DEGENERATE_EPS * scale {
            if b == 0.0 {
                return None;
            }
            let x = -c / b;
            return Some((x, x));
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        // Cancellation-free form: q = -(b + sign(b) sqrt(d)) / 2.
        let q = -0.5 * (b + b.signum() * sqrt_d);
        if q == 0.0 {
            // b == 0 and c == 0: double root at zero.
            return Some((0.0, 0.0));
        }
        let x1 = q / a;
        let x2 = c / q;
        Some(if x1 <= x2 { (x1, x2) } else { (x2, x1) })
    }

    /// The root of `a x^2 + b x + c = 0` closest to `guess`.
    pub fn solve_nearest(a: f64, b: f64, c: f64, guess: f64) -> Option<f64> {
        let (x1, x2) = Self::solve(a, b, c)?;
        if (x1 - guess).abs() < (x2 - guess).abs() {
            Some(x1)
        } else {
            Some(x2)
        }
    }

    /// Solve `parabola(x) = value`, returning the root closest to `guess`.
    pub fn solve_parabola(parabola: &Parabola, value: f64, guess: f64) -> Option<f64> {
        Self::solve_nearest(parabola.a, parabola.b, parabola.c - value, guess)
    }
}
