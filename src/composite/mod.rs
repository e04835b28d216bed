//! Composite tracking: a piecewise function made of leaf-tracker segments.
//!
//! Every incoming point is classified against
//! - the current segment: its regression, else the guesses it was created
//!   with, else nothing (too little data, accepted), and
//! - a corridor of guesses for the next segment, rebuilt from the current
//!   segment and the caller's [`TrackerBehavior`] whenever the point misses
//!   the current segment.
//!
//! Classified points go through a [`DecisionWindow`]. Once enough points
//! matched the next segment, the current segment is finalized and a new one
//! is seeded with those points; the corridor becomes its guesses.
//!
//! Notes
//! - Time must be strictly monotone per tracker. Its direction is fixed by
//!   the first two points. A violation is a caller bug and panics.
//! - Segment indices start at 0 and grow by one per advance;
//!   `current_segment().index == finalized_segments().len()` always holds.
//! - The behavior never gets a back-reference to the tracker; hooks receive
//!   a read-only [`TrackerView`].
//!
//! Complexity
//! - `integrity_check`/`add` are O(window + leaf capacity) plus one leaf
//!   refit per flushed batch.

mod guesses;
mod options;
mod window;

pub use guesses::Guesses;
pub use options::{CharacteristicsError, CompositeOptions, DecisionCharacteristics};
pub use window::{DecisionWindow, Matching, WindowDecision};

use crate::diagnostics::{DataPoint, TrackerEvent};
use crate::function::Function;
use crate::monotonicity::{Direction, MonotonicityChecker};
use crate::range::SimpleRange;
use crate::tolerance::Tolerance;
use crate::tracker::{Fallback, SimpleTracker};
use log::{debug, error, trace, warn};
use std::mem;

/// Function type produced by a behavior's leaf tracker.
pub type SegmentFn<B> = <<B as TrackerBehavior>::Tracker as SimpleTracker>::F;

#[derive(Clone, Debug)]
pub struct Segment<T: SimpleTracker> {
    pub index: u32,
    pub tracker: T,
    /// Corridor the segment was created with; used while it has no regression.
    pub guesses: Option<Guesses<T::F>>,
    /// Start time as last reported by the behavior.
    pub supposed_start_time: Option<f64>,
}

impl<T: SimpleTracker> Segment<T> {
    /// Regression if available, else `None`.
    pub fn regression(&self) -> Option<&T::F> {
        self.tracker.regression()
    }

    fn matches(&self, value: f64, time: f64, tolerance: &Tolerance) -> bool {
        if self.tracker.has_regression() {
            return self.tracker.is_valid(value, time, Fallback::Valid);
        }
        match &self.guesses {
            Some(guesses) => guesses.admits(value, time, tolerance),
            None => true,
        }
    }
}

/// Read-only state handed to [`TrackerBehavior`] hooks.
pub struct TrackerView<'a, T: SimpleTracker> {
    pub current: &'a Segment<T>,
    pub finalized: &'a [Segment<T>],
    /// `Both` until the first two points were seen.
    pub time_direction: Direction,
    pub tolerance: Tolerance,
}

impl<'a, T: SimpleTracker> TrackerView<'a, T> {
    pub fn last_finalized(&self) -> Option<&'a Segment<T>> {
        self.finalized.last()
    }

    pub fn current_segment_index(&self) -> u32 {
        self.current.index
    }
}

fn view<'a, T: SimpleTracker>(
    current: &'a Segment<T>,
    finalized: &'a [Segment<T>],
    monotonicity: &MonotonicityChecker,
    tolerance: Tolerance,
) -> TrackerView<'a, T> {
    TrackerView {
        current,
        finalized,
        time_direction: monotonicity.direction(),
        tolerance,
    }
}

/// Domain knowledge plugged into a [`CompositeTracker`].
pub trait TrackerBehavior {
    type Tracker: SimpleTracker;

    /// Called whenever points were added to the current segment, at least
    /// once per segment. Returns the time the segment supposedly started at,
    /// e.g. from intersecting it with the previous segment.
    fn current_segment_updated(&mut self, view: &TrackerView<'_, Self::Tracker>) -> Option<f64>;

    /// Called exactly once per segment, right before it is finalized. The
    /// segment has a regression or guesses (or neither, for a first segment
    /// that never got enough points).
    fn will_finalize_and_advance(&mut self, view: &TrackerView<'_, Self::Tracker>);

    /// Empty tracker for the next segment. Called once at construction and
    /// after each [`will_finalize_and_advance`](Self::will_finalize_and_advance).
    /// Its tolerance is overwritten with the composite tolerance.
    fn tracker_for_next_segment(&mut self) -> Self::Tracker;

    /// Guess for the next segment if it started at `(split_time, split_value)`.
    /// `None` if there is not enough information.
    fn guess_for_next_segment(
        &self,
        view: &TrackerView<'_, Self::Tracker>,
        split_time: f64,
        split_value: f64,
    ) -> Option<<Self::Tracker as SimpleTracker>::F>;

    /// Where, relative to the span between the last point of the current
    /// segment (0) and the first point of a possible next segment (1), the
    /// split may lie.
    fn relative_guess_range(&self) -> SimpleRange {
        SimpleRange::UNIT
    }

    /// Adapt the absolute split range. Keep its direction: `lower` is the
    /// older bound.
    fn adapted_guess_range(
        &self,
        _view: &TrackerView<'_, Self::Tracker>,
        proposed: SimpleRange,
    ) -> SimpleRange {
        proposed
    }
}

pub struct CompositeTracker<B: TrackerBehavior> {
    behavior: B,
    options: CompositeOptions,
    finalized: Vec<Segment<B::Tracker>>,
    current: Segment<B::Tracker>,
    next_guesses: Option<Guesses<SegmentFn<B>>>,
    window: DecisionWindow,
    monotonicity: MonotonicityChecker,
    events: Vec<TrackerEvent>,
}

impl<B: TrackerBehavior> CompositeTracker<B> {
    /// Panics if `options.decision` is invalid.
    pub fn new(mut behavior: B, options: CompositeOptions) -> Self {
        if let Err(e) = options.decision.validate() {
            panic!("{e}");
        }
        let mut tracker = behavior.tracker_for_next_segment();
        tracker.set_tolerance(options.tolerance);
        Self {
            behavior,
            options,
            finalized: Vec::new(),
            current: Segment {
                index: 0,
                tracker,
                guesses: None,
                supposed_start_time: None,
            },
            next_guesses: None,
            window: DecisionWindow::new(options.decision),
            monotonicity: MonotonicityChecker::new(Direction::Both, true),
            events: Vec::new(),
        }
    }

    /// Whether the point may be added. Call before [`add`](Self::add).
    ///
    /// Nothing is committed: after a rejection the same time may be checked
    /// again, e.g. with a corrected value.
    ///
    /// Panics if `time` breaks the monotone order of previously added times.
    pub fn integrity_check(&mut self, value: f64, time: f64) -> bool {
        if !self.monotonicity.would_accept(time) {
            self.time_order_violated(time);
        }

        if self.current_matches(value, time) || self.next_matches(value, time) {
            return true;
        }
        trace!(
            "composite: rejected ({time:.4}, {value:.4}) in segment {}",
            self.current.index
        );
        self.record(TrackerEvent::Rejected {
            point: DataPoint::new(time, value),
            segment: self.current.index,
        });
        false
    }

    /// Add a point that passed [`integrity_check`](Self::integrity_check).
    ///
    /// Panics if `time` breaks the monotone order of previously added times.
    pub fn add(&mut self, value: f64, time: f64) {
        if !self.monotonicity.verify(time) {
            self.time_order_violated(time);
        }
        let point = DataPoint::new(time, value);

        let matching = if self.current_matches(value, time) {
            Matching::Current
        } else if self.next_matches(value, time) {
            Matching::Next
        } else {
            warn!("composite: ignoring ({time:.4}, {value:.4}), it matches no segment");
            self.record(TrackerEvent::Rejected {
                point,
                segment: self.current.index,
            });
            return;
        };

        match self.window.add(point, matching) {
            WindowDecision::Pending => {
                trace!("composite: buffered ({time:.4}, {value:.4}) as {matching:?}");
            }
            WindowDecision::Flush(points) => self.flush(&points),
            WindowDecision::Advance { next, discarded } => self.advance(&next, &discarded),
            WindowDecision::Cancel { flushed, dropped } => {
                debug!(
                    "composite: decision cancelled in segment {}, dropped {} point(s), flushed {}",
                    self.current.index,
                    dropped.len(),
                    flushed.len()
                );
                for &p in &dropped {
                    self.record(TrackerEvent::Discarded {
                        point: p,
                        segment: self.current.index,
                    });
                }
                self.flush(&flushed);
            }
        }
    }

    pub fn current_segment(&self) -> &Segment<B::Tracker> {
        &self.current
    }

    pub fn finalized_segments(&self) -> &[Segment<B::Tracker>] {
        &self.finalized
    }

    /// Finalized segments followed by the current one.
    pub fn all_segments(&self) -> impl Iterator<Item = &Segment<B::Tracker>> {
        self.finalized.iter().chain(std::iter::once(&self.current))
    }

    pub fn current_segment_index(&self) -> u32 {
        self.current.index
    }

    /// Corridor computed for the most recent point that missed the current segment.
    pub fn next_segment_guesses(&self) -> Option<&Guesses<SegmentFn<B>>> {
        self.next_guesses.as_ref()
    }

    pub fn tolerance(&self) -> Tolerance {
        self.options.tolerance
    }

    /// Applies to the current segment and all later ones.
    pub fn set_tolerance(&mut self, tolerance: Tolerance) {
        self.options.tolerance = tolerance;
        self.current.tracker.set_tolerance(tolerance);
    }

    pub fn options(&self) -> &CompositeOptions {
        &self.options
    }

    pub fn time_direction(&self) -> Direction {
        self.monotonicity.direction()
    }

    pub fn decision_window(&self) -> &DecisionWindow {
        &self.window
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    pub fn view(&self) -> TrackerView<'_, B::Tracker> {
        view(&self.current, &self.finalized, &self.monotonicity, self.options.tolerance)
    }

    /// Events recorded since the last call. Always empty unless
    /// `record_events` is set; the log is only ever emptied here.
    pub fn drain_events(&mut self) -> Vec<TrackerEvent> {
        mem::take(&mut self.events)
    }

    fn record(&mut self, event: TrackerEvent) {
        if self.options.record_events {
            self.events.push(event);
        }
    }

    fn time_order_violated(&self, time: f64) -> ! {
        let previous = self.monotonicity.last_value().unwrap_or(f64::NAN);
        let direction = self.monotonicity.direction();
        let message = format!(
            "time not in monotone order: attempted {time}, previous {previous}, \
             direction {direction:?}"
        );
        error!("composite: {message}");
        panic!("{message}");
    }

    fn current_matches(&mut self, value: f64, time: f64) -> bool {
        self.current.tracker.set_tolerance(self.options.tolerance);
        self.next_guesses = None;
        self.current.matches(value, time, &self.options.tolerance)
    }

    /// Refreshes the corridor, then checks the point against it.
    fn next_matches(&mut self, value: f64, time: f64) -> bool {
        if self.options.assume_no_invalid_data_points {
            return true;
        }
        self.update_next_guesses(time);
        self.next_guesses
            .as_ref()
            .is_some_and(|g| g.admits(value, time, &self.options.tolerance))
    }

    fn update_next_guesses(&mut self, time: f64) {
        self.next_guesses = None;

        // The split lies between the last point of the current segment and
        // the point that opened the running decision, or this point.
        let Some(&time_a) = self.current.tracker.times().last() else {
            return;
        };
        let time_b = self.window.decision_initiator().map_or(time, |p| p.time);

        let v = view(&self.current, &self.finalized, &self.monotonicity, self.options.tolerance);
        let relative = self.behavior.relative_guess_range();
        let proposed = SimpleRange::new(time_a, time_b).interpolate(&relative);
        let range = self.behavior.adapted_guess_range(&v, proposed);
        let slots = if range.is_single_point() {
            vec![range.lower]
        } else {
            vec![range.lower, range.upper]
        };

        let functions = match (self.current.tracker.regression(), &self.current.guesses) {
            (Some(regression), _) => std::slice::from_ref(regression),
            (None, Some(guesses)) => guesses.all(),
            // Only possible for the first segment.
            (None, None) => return,
        };

        let mut candidates = Vec::with_capacity(functions.len() * slots.len());
        for f in functions {
            for &split in &slots {
                if let Some(guess) = self.behavior.guess_for_next_segment(&v, split, f.at(split)) {
                    candidates.push((guess, split));
                }
            }
        }
        self.next_guesses = Guesses::enclosing(candidates, range.upper);
    }

    fn flush(&mut self, points: &[DataPoint]) {
        if points.is_empty() {
            return;
        }
        for &p in points {
            self.current.tracker.add_deferred(p.value, p.time);
            self.record(TrackerEvent::Accepted {
                point: p,
                segment: self.current.index,
            });
        }
        self.current.tracker.update_regression();
        self.notify_current_updated();
    }

    fn advance(&mut self, next: &[DataPoint], discarded: &[DataPoint]) {
        for &p in discarded {
            self.record(TrackerEvent::Discarded {
                point: p,
                segment: self.current.index,
            });
        }

        let v = view(&self.current, &self.finalized, &self.monotonicity, self.options.tolerance);
        self.behavior.will_finalize_and_advance(&v);

        let seed_time = next.first().map_or(f64::NAN, |p| p.time);
        let start_time_guess = self
            .current
            .tracker
            .times()
            .last()
            .map_or(seed_time, |&last| 0.5 * (last + seed_time));

        let mut tracker = self.behavior.tracker_for_next_segment();
        tracker.set_tolerance(self.options.tolerance);
        for p in next {
            tracker.add_deferred(p.value, p.time);
        }
        tracker.update_regression();

        let index = self.current.index + 1;
        let segment = Segment {
            index,
            tracker,
            guesses: self.next_guesses.take(),
            supposed_start_time: None,
        };
        let finished = mem::replace(&mut self.current, segment);
        self.finalized.push(finished);

        debug!(
            "composite: advanced to segment {index} (start ~ {start_time_guess:.4}, \
             {} seed point(s), {} discarded)",
            next.len(),
            discarded.len()
        );
        self.record(TrackerEvent::Advanced {
            index,
            start_time_guess,
        });
        for &p in next {
            self.record(TrackerEvent::Accepted {
                point: p,
                segment: index,
            });
        }
        self.notify_current_updated();
    }

    fn notify_current_updated(&mut self) {
        let v = view(&self.current, &self.finalized, &self.monotonicity, self.options.tolerance);
        let start_time = self.behavior.current_segment_updated(&v);
        self.current.supposed_start_time = start_time;
        self.record(TrackerEvent::StartTimeUpdated {
            index: self.current.index,
            start_time,
        });
    }
}
