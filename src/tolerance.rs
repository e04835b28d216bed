//! Admissible deviation between a predicted and an observed value.
//!
//! Three models are supported:
//!
//! - `Absolute { delta }`: a vertical band of half-height `delta` around the
//!   prediction.
//! - `Relative { ratio }`: a vertical band whose half-height scales with the
//!   magnitude of the prediction.
//! - `Absolute2D { dy, dx }`: an ellipse with semi-axes `(dx, dy)` around the
//!   observation. A point is admitted when the ellipse touches the predicted
//!   graph, i.e. deviations of `(0, dy)`, `(dx, 0)`, `(0.7 dx, 0.7 dy)`, ...
//!   are all allowed. This is the natural model when the tracked value is an
//!   angle coupled to a pixel distance and both axes carry their own noise.
//!
//! Notes
//! - Near the prediction the graph is approximated by its tangent, which
//!   gives the closed-form test `d^2 <= dy^2 + s^2 dx^2` for a vertical
//!   deviation `d` and tangent slope `s`.
//! - [`Tolerance::admits`] additionally samples curved functions inside
//!   `(t - dx, t + dx)`, so strongly bent graphs are not judged by their
//!   tangent alone.

use crate::function::Function;
use serde::{Deserialize, Serialize};

/// Number of samples per side used by the sampled ellipse test.
const ELLIPSE_PROBES: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tolerance {
    Absolute {
        delta: f64,
    },
    Relative {
        ratio: f64,
    },
    #[serde(rename = "absolute_2d")]
    Absolute2D {
        dy: f64,
        dx: f64,
    },
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Absolute { delta: 0.0 }
    }
}

impl Tolerance {
    /// Check an observation against a prediction.
    ///
    /// `tangent_slope` is the slope of the predicting function at the
    /// observation time; it is only used by `Absolute2D`. Without it only the
    /// vertical semi-axis applies.
    pub fn is_within(&self, predicted: f64, actual: f64, tangent_slope: Option<f64>) -> bool {
        let d = predicted - actual;
        match *self {
            Tolerance::Absolute { delta } => d.abs() <= delta,
            Tolerance::Relative { ratio } => d.abs() <= ratio * predicted.abs(),
            Tolerance::Absolute2D { dy, dx } => {
                if d.abs() <= dy {
                    return true;
                }
                let Some(slope) = tangent_slope.filter(|s| s.is_finite()) else {
                    return false;
                };
                if slope != 0.0 && d.abs() / slope.abs() <= dx {
                    return true;
                }
                d * d <= dy * dy + slope * slope * dx * dx
            }
        }
    }

    /// Check `(time, value)` against the graph of `f`.
    pub fn admits<F: Function + ?Sized>(&self, f: &F, value: f64, time: f64) -> bool {
        let predicted = f.at(time);
        match *self {
            Tolerance::Absolute2D { dy, dx } => {
                if self.is_within(predicted, value, Some(f.slope_at(time))) {
                    return true;
                }
                dx > 0.0 && dy > 0.0 && curved_ellipse_check(f, value, time, dx, dy)
            }
            _ => self.is_within(predicted, value, None),
        }
    }

    /// Half-height of the admitted vertical band around a line with the given
    /// slope. `reference` is the predicted value the band is centered on; it
    /// only matters for relative tolerances.
    pub fn vertical_extent(&self, slope: f64, reference: f64) -> f64 {
        match *self {
            Tolerance::Absolute { delta } => delta,
            Tolerance::Relative { ratio } => (ratio * reference).abs(),
            Tolerance::Absolute2D { dy, dx } => (dy * dy + slope * slope * dx * dx).sqrt(),
        }
    }
}

fn curved_ellipse_check<F: Function + ?Sized>(
    f: &F,
    value: f64,
    time: f64,
    dx: f64,
    dy: f64,
) -> bool {
    // The graph crosses the horizontal through the point within +-dx.
    let m = f.at(time) - value;
    let l = f.at(time - dx) - value;
    let r = f.at(time + dx) - value;
    if m.signum() != l.signum() || m.signum() != r.signum() {
        return true;
    }

    // Probe towards the side the graph is heading to first.
    let step = dx / ELLIPSE_PROBES as f64;
    let left = (1..ELLIPSE_PROBES).map(|k| time - k as f64 * step);
    let right = (1..ELLIPSE_PROBES).map(|k| time + k as f64 * step);
    let inside = |x: f64| {
        let ex = (x - time) / dx;
        let ey = (f.at(x) - value) / dy;
        ex * ex + ey * ey <= 1.0
    };
    if f.slope_at(time) > 0.0 {
        left.chain(right).any(inside)
    } else {
        right.chain(left).any(inside)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::{LinearFunction, Parabola};

    #[test]
    fn absolute_and_relative_bands() {
        let abs = Tolerance::Absolute { delta: 0.5 };
        assert!(abs.is_within(3.0, 3.5, None));
        assert!(!abs.is_within(3.0, 3.51, None));

        let rel = Tolerance::Relative { ratio: 0.1 };
        assert!(rel.is_within(-20.0, -18.0, None));
        assert!(!rel.is_within(-20.0, -17.9, None));
        assert!(rel.is_within(0.0, 0.0, None));
    }

    #[test]
    fn ellipse_uses_the_tangent() {
        let tol = Tolerance::Absolute2D { dy: 0.1, dx: 0.5 };
        // Steep graph: a point far above it in y is still close in x.
        assert!(tol.is_within(0.0, 1.9, Some(4.0)));
        assert!(!tol.is_within(0.0, 1.9, Some(0.0)));
        assert!(!tol.is_within(0.0, 1.9, None));
        // Diagonal deviation inside the ellipse but outside both projections.
        let d = (0.1f64 * 0.1 + 1.0 * 0.5 * 0.5).sqrt() * 0.99;
        assert!(tol.is_within(0.0, d, Some(1.0)));
        assert!(!tol.is_within(0.0, d * 1.05, Some(1.0)));
    }

    #[test]
    fn admits_evaluates_the_function() {
        let line = LinearFunction::new(2.0, 1.0);
        let tol = Tolerance::Absolute { delta: 0.1 };
        assert!(tol.admits(&line, 5.05, 2.0));
        assert!(!tol.admits(&line, 5.2, 2.0));
    }

    #[test]
    fn admits_samples_curved_graphs() {
        // At the apex the tangent is flat, but the graph bends down within dx.
        let p = Parabola::new(-4.0, 0.0, 0.0);
        let tol = Tolerance::Absolute2D { dy: 0.05, dx: 0.5 };
        assert!(!tol.is_within(p.at(0.0), -0.6, Some(p.slope_at(0.0))));
        assert!(tol.admits(&p, -0.6, 0.0));
        assert!(!tol.admits(&p, 0.6, 0.0));
    }

    #[test]
    fn vertical_extent_matches_the_tangent_test() {
        let tol = Tolerance::Absolute2D { dy: 0.2, dx: 0.3 };
        let extent = tol.vertical_extent(1.5, 0.0);
        assert!(tol.is_within(0.0, extent * 0.999, Some(1.5)));
        assert!(!tol.is_within(0.0, extent * 1.001, Some(1.5)));
    }

    #[test]
    fn tolerance_deserializes_from_tagged_json() {
        let tol: Tolerance =
            serde_json::from_str(r#"{"kind":"absolute_2d","dy":0.1,"dx":0.02}"#).unwrap();
        assert_eq!(tol, Tolerance::Absolute2D { dy: 0.1, dx: 0.02 });
        let tol: Tolerance = serde_json::from_str(r#"{"kind":"relative","ratio":0.05}"#).unwrap();
        assert_eq!(tol, Tolerance::Relative { ratio: 0.05 });
    }
}
