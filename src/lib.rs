#![doc = include_str!("../README.md")]

pub mod composite;
pub mod config;
pub mod diagnostics;
pub mod function;
pub mod monotonicity;
pub mod range;
pub mod tolerance;
pub mod tracker;

// --- High-level re-exports -------------------------------------------------

pub use crate::composite::{
    CompositeOptions, CompositeTracker, DecisionCharacteristics, Guesses, Segment, TrackerBehavior,
    TrackerView,
};
pub use crate::range::SimpleRange;
pub use crate::tolerance::Tolerance;

// --- Prelude ---------------------------------------------------------------

/// Everything needed to write a behavior and drive a tracker.
pub mod prelude {
    pub use crate::composite::{
        CompositeOptions, CompositeTracker, DecisionCharacteristics, Guesses, Segment,
        TrackerBehavior, TrackerView,
    };
    pub use crate::function::{Function, LinearFunction, Parabola, Polynomial, QuadraticSolver};
    pub use crate::monotonicity::Direction;
    pub use crate::range::SimpleRange;
    pub use crate::tolerance::Tolerance;
    pub use crate::tracker::{
        ConstantTracker, Fallback, LinearTracker, ParabolaTracker, PolyTracker, PreliminaryTracker,
        SimpleTracker,
    };
}
