use crate::function::Function;
use crate::tolerance::Tolerance;
use serde::Serialize;

/// Corridor of one or two candidate functions for a segment that has no
/// regression yet.
#[derive(Clone, Debug, Serialize)]
pub struct Guesses<F> {
    all: Vec<F>,
    start_times: Vec<f64>,
}

impl<F: Function> Guesses<F> {
    /// Pick the lowest and highest candidate, compared by their value at
    /// `most_recent_time`. Each candidate carries the split time it was made
    /// for. `None` without candidates.
    pub fn enclosing(candidates: Vec<(F, f64)>, most_recent_time: f64) -> Option<Self> {
        let value = |c: &(F, f64)| c.0.at(most_recent_time);
        let cmp = |a: &(F, f64), b: &(F, f64)| {
            value(a)
                .partial_cmp(&value(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        };

        let min_idx = (0..candidates.len()).min_by(|&i, &j| cmp(&candidates[i], &candidates[j]))?;
        let max_idx = (0..candidates.len())
            .max_by(|&i, &j| cmp(&candidates[i], &candidates[j]))
            .unwrap_or(min_idx);

        let mut lower = None;
        let mut upper = None;
        for (idx, candidate) in candidates.into_iter().enumerate() {
            if idx == min_idx {
                lower = Some(candidate);
            } else if idx == max_idx {
                upper = Some(candidate);
            }
        }

        // Lower guess first.
        let (all, start_times) = lower.into_iter().chain(upper).unzip();
        Some(Self { all, start_times })
    }

    /// A corridor of exactly one function.
    pub fn single(f: F, start_time: f64) -> Self {
        Self {
            all: vec![f],
            start_times: vec![start_time],
        }
    }

    /// The candidates, lower one first. Never empty.
    pub fn all(&self) -> &[F] {
        &self.all
    }

    /// Split times the candidates were made for, parallel to [`all`](Self::all).
    pub fn start_times(&self) -> &[f64] {
        &self.start_times
    }

    pub fn lower(&self) -> &F {
        &self.all[0]
    }

    pub fn upper(&self) -> &F {
        &self.all[self.all.len() - 1]
    }

    /// The value lies between the candidates at `time`, or is within
    /// `tolerance` of one of them.
    pub fn admits(&self, value: f64, time: f64, tolerance: &Tolerance) -> bool {
        let (lo, hi) = self
            .all
            .iter()
            .map(|f| f.at(time))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo <= value && value <= hi {
            return true;
        }
        self.all.iter().any(|f| tolerance.admits(f, value, time))
    }
}
