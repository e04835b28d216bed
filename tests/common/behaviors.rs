use composite_tracker::function::{
    Function, LinearFunction, LinearSolver, Parabola, QuadraticSolver,
};
use composite_tracker::tolerance::Tolerance;
use composite_tracker::tracker::{LinearTracker, ParabolaTracker, PreliminaryTracker, SimpleTracker};
use composite_tracker::range::SimpleRange;
use composite_tracker::{TrackerBehavior, TrackerView};

/// Always predicts the same line for the next segment.
pub struct Scripted {
    pub next: Option<LinearFunction>,
    pub max_points: usize,
    pub tolerance_points: usize,
}

impl TrackerBehavior for Scripted {
    type Tracker = LinearTracker;

    fn current_segment_updated(&mut self, _view: &TrackerView<'_, LinearTracker>) -> Option<f64> {
        None
    }

    fn will_finalize_and_advance(&mut self, _view: &TrackerView<'_, LinearTracker>) {}

    fn tracker_for_next_segment(&mut self) -> LinearTracker {
        LinearTracker::linear(self.max_points, self.tolerance_points)
    }

    fn guess_for_next_segment(
        &self,
        _view: &TrackerView<'_, LinearTracker>,
        _: f64,
        _: f64,
    ) -> Option<LinearFunction> {
        self.next
    }
}

/// Next segment continues from the split point with a known slope. The
/// start time of a segment is its intersection with the previous one.
pub struct KnownSlope {
    pub slope: f64,
    pub advances: usize,
}

impl KnownSlope {
    pub fn new(slope: f64) -> Self {
        Self { slope, advances: 0 }
    }
}

impl TrackerBehavior for KnownSlope {
    type Tracker = LinearTracker;

    fn current_segment_updated(&mut self, view: &TrackerView<'_, LinearTracker>) -> Option<f64> {
        let current = view.current.regression()?;
        let previous = view.last_finalized()?.regression()?;
        LinearSolver::zero(&(*current - *previous))
    }

    fn will_finalize_and_advance(&mut self, _view: &TrackerView<'_, LinearTracker>) {
        self.advances += 1;
    }

    fn tracker_for_next_segment(&mut self) -> LinearTracker {
        LinearTracker::linear(50, 1)
    }

    fn guess_for_next_segment(
        &self,
        _view: &TrackerView<'_, LinearTracker>,
        split_time: f64,
        split_value: f64,
    ) -> Option<LinearFunction> {
        Some(LinearFunction::with_slope_through(self.slope, split_time, split_value))
    }
}

/// Like [`KnownSlope`], with a custom split range. `relative` maps the span
/// from the last current point to the first point of a possible next segment;
/// the result is then widened by `widen` towards older times.
pub struct SplitRange {
    pub slope: f64,
    pub relative: SimpleRange,
    pub widen: f64,
}

impl TrackerBehavior for SplitRange {
    type Tracker = LinearTracker;

    fn current_segment_updated(&mut self, _view: &TrackerView<'_, LinearTracker>) -> Option<f64> {
        None
    }

    fn will_finalize_and_advance(&mut self, _view: &TrackerView<'_, LinearTracker>) {}

    fn tracker_for_next_segment(&mut self) -> LinearTracker {
        LinearTracker::linear(50, 1)
    }

    fn guess_for_next_segment(
        &self,
        _view: &TrackerView<'_, LinearTracker>,
        split_time: f64,
        split_value: f64,
    ) -> Option<LinearFunction> {
        Some(LinearFunction::with_slope_through(self.slope, split_time, split_value))
    }

    fn relative_guess_range(&self) -> SimpleRange {
        self.relative
    }

    fn adapted_guess_range(
        &self,
        view: &TrackerView<'_, LinearTracker>,
        proposed: SimpleRange,
    ) -> SimpleRange {
        let forward = view.time_direction.sign().unwrap_or(1.0);
        SimpleRange::new(proposed.lower - forward * self.widen, proposed.upper)
    }
}

/// Ballistic jumps from a fixed ground height. Gravity and jump velocity are
/// learned per segment; the next segment is guessed as a jump starting at
/// the split point.
pub struct Jumping {
    pub ground: f64,
    pub gravity: PreliminaryTracker,
    pub velocity: PreliminaryTracker,
}

impl Jumping {
    pub fn new(ground: f64) -> Self {
        Self {
            ground,
            gravity: PreliminaryTracker::new(50, 0, Tolerance::Relative { ratio: 0.1 }),
            velocity: PreliminaryTracker::new(50, 0, Tolerance::Relative { ratio: 0.1 }),
        }
    }
}

impl TrackerBehavior for Jumping {
    type Tracker = ParabolaTracker;

    fn current_segment_updated(&mut self, view: &TrackerView<'_, ParabolaTracker>) -> Option<f64> {
        let parabola = view.current.regression()?;
        let first = *view.current.tracker.times().first()?;
        let start = QuadraticSolver::solve_parabola(parabola, self.ground, first)?;
        self.gravity.update_preliminary_if_valid(parabola.a);
        self.velocity.update_preliminary_if_valid(parabola.slope_at(start));
        Some(start)
    }

    fn will_finalize_and_advance(&mut self, _view: &TrackerView<'_, ParabolaTracker>) {
        self.gravity.finalize_preliminary();
        self.velocity.finalize_preliminary();
    }

    fn tracker_for_next_segment(&mut self) -> ParabolaTracker {
        ParabolaTracker::parabola(50, 1)
    }

    fn guess_for_next_segment(
        &self,
        _view: &TrackerView<'_, ParabolaTracker>,
        split_time: f64,
        split_value: f64,
    ) -> Option<Parabola> {
        let a = self.gravity.estimate()?;
        let v = self.velocity.estimate()?;
        let jump = Parabola::new(a, v, split_value);
        Some(jump.shifted_left(-split_time))
    }
}
