//! Decision window for segment switches.
//!
//! The first point that matches the next segment (but not the current one)
//! opens a decision. Subsequent points are buffered with their tag until
//! either enough points matched the next segment (advance) or too many
//! matched the current segment (cancel). While no decision is open, points
//! matching the current segment pass straight through.
//!
//! Notes
//! - The buffer is empty between decisions; whenever it is not, it starts
//!   with a `Next` point.
//! - Exactly one outcome is produced per appended point; advance is
//!   checked before cancel.

use super::options::DecisionCharacteristics;
use crate::diagnostics::DataPoint;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Matching {
    Current,
    Next,
}

/// Result of appending one point to a [`DecisionWindow`].
#[derive(Clone, Debug, PartialEq)]
pub enum WindowDecision {
    /// The point is buffered; no decision yet.
    Pending,
    /// Points that definitely belong to the current segment.
    Flush(Vec<DataPoint>),
    /// Switch segments. `next` seeds the new segment in order, `discarded`
    /// matched the old segment during the decision and are dropped.
    Advance {
        next: Vec<DataPoint>,
        discarded: Vec<DataPoint>,
    },
    /// Too many current points: the leading next points are `dropped` and the
    /// current run after them is `flushed`. Later points stay buffered.
    Cancel {
        flushed: Vec<DataPoint>,
        dropped: Vec<DataPoint>,
    },
}

#[derive(Clone, Debug)]
pub struct DecisionWindow {
    characteristics: DecisionCharacteristics,
    buffer: Vec<(DataPoint, Matching)>,
}

impl DecisionWindow {
    /// Panics if the characteristics are invalid.
    pub fn new(characteristics: DecisionCharacteristics) -> Self {
        if let Err(e) = characteristics.validate() {
            panic!("{e}");
        }
        Self {
            characteristics,
            buffer: Vec::new(),
        }
    }

    pub fn characteristics(&self) -> DecisionCharacteristics {
        self.characteristics
    }

    /// The point that opened the running decision.
    pub fn decision_initiator(&self) -> Option<DataPoint> {
        self.buffer.first().map(|(p, _)| *p)
    }

    pub fn points(&self) -> &[(DataPoint, Matching)] {
        &self.buffer
    }

    pub fn is_deciding(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Abandon the running decision without emitting anything.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn add(&mut self, point: DataPoint, matching: Matching) -> WindowDecision {
        if self.buffer.is_empty() && matching == Matching::Current {
            return WindowDecision::Flush(vec![point]);
        }
        self.buffer.push((point, matching));

        let n_next = self.count(Matching::Next);
        let n_current = self.count(Matching::Current);

        if n_next >= self.characteristics.points_matching_next_segment as usize {
            let (next, discarded): (Vec<_>, Vec<_>) =
                self.buffer.drain(..).partition(|(_, m)| *m == Matching::Next);
            return WindowDecision::Advance {
                next: next.into_iter().map(|(p, _)| p).collect(),
                discarded: discarded.into_iter().map(|(p, _)| p).collect(),
            };
        }

        let max_current = self.characteristics.max_intermediate_points_matching_current_segment;
        if n_current > max_current as usize {
            let dropped_len = self.leading_run(0, Matching::Next);
            let flushed_len = self.leading_run(dropped_len, Matching::Current);
            let mut taken = self.buffer.drain(..dropped_len + flushed_len).map(|(p, _)| p);
            let dropped: Vec<DataPoint> = taken.by_ref().take(dropped_len).collect();
            let flushed: Vec<DataPoint> = taken.collect();
            return WindowDecision::Cancel { flushed, dropped };
        }

        WindowDecision::Pending
    }

    fn count(&self, matching: Matching) -> usize {
        self.buffer.iter().filter(|(_, m)| *m == matching).count()
    }

    fn leading_run(&self, from: usize, matching: Matching) -> usize {
        self.buffer[from..].iter().take_while(|(_, m)| *m == matching).count()
    }
}
