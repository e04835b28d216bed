//! Scalar functions used as segment models.
//!
//! Every leaf tracker produces one of these as its regression, and behaviors
//! produce them as guesses for the next segment. The composite tracker only
//! needs to evaluate a function and its local slope; arithmetic and root
//! solving are provided for behaviors that intersect consecutive segments.

mod linear;
mod parabola;
mod polynomial;
mod solvers;

pub use linear::LinearFunction;
pub use parabola::Parabola;
pub use polynomial::Polynomial;
pub use solvers::{LinearSolver, QuadraticSolver};

/// Step used by the default numeric slope estimate.
const SLOPE_STEP: f64 = 1e-6;

/// A function from the reals to the reals.
pub trait Function {
    /// Value at `x`.
    fn at(&self, x: f64) -> f64;

    /// First derivative at `x`.
    ///
    /// The default is a central difference; closed-form models override it.
    fn slope_at(&self, x: f64) -> f64 {
        (self.at(x + SLOPE_STEP) - self.at(x - SLOPE_STEP)) / (2.0 * SLOPE_STEP)
    }
}

impl<F: Function + ?Sized> Function for &F {
    #[inline]
    fn at(&self, x: f64) -> f64 {
        (**self).at(x)
    }

    #[inline]
    fn slope_at(&self, x: f64) -> f64 {
        (**self).slope_at(x)
    }
}
