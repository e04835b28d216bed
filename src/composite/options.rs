use crate::tolerance::Tolerance;
use serde::Deserialize;
use std::fmt;

/// How and when a segment switch is decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct DecisionCharacteristics {
    /// Points that must match the next segment before the switch is made.
    /// Must be positive.
    pub points_matching_next_segment: u32,
    /// While next-segment points are being collected, at most this many
    /// points may still match the current segment. One more cancels the
    /// decision. Irrelevant when `points_matching_next_segment == 1`.
    pub max_intermediate_points_matching_current_segment: u32,
}

impl Default for DecisionCharacteristics {
    fn default() -> Self {
        Self::new(3, 1)
    }
}

impl DecisionCharacteristics {
    pub const fn new(
        points_matching_next_segment: u32,
        max_intermediate_points_matching_current_segment: u32,
    ) -> Self {
        Self {
            points_matching_next_segment,
            max_intermediate_points_matching_current_segment,
        }
    }

    pub fn validate(&self) -> Result<(), CharacteristicsError> {
        if self.points_matching_next_segment == 0 {
            return Err(CharacteristicsError::NoPointsMatchingNextSegment);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CharacteristicsError {
    NoPointsMatchingNextSegment,
}

impl fmt::Display for CharacteristicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharacteristicsError::NoPointsMatchingNextSegment => {
                write!(f, "invalid decision: points_matching_next_segment must be at least 1")
            }
        }
    }
}

impl std::error::Error for CharacteristicsError {}

/// Options of a [`CompositeTracker`](super::CompositeTracker).
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct CompositeOptions {
    /// Tolerance for segment trackers and guesses; injected into every new
    /// segment tracker.
    pub tolerance: Tolerance,
    pub decision: DecisionCharacteristics,
    /// Treat every point that misses the current segment as belonging to
    /// the next one. No guesses are made and `integrity_check` never rejects.
    #[serde(default)]
    pub assume_no_invalid_data_points: bool,
    /// Keep a log of [`TrackerEvent`](crate::diagnostics::TrackerEvent)s,
    /// read with `drain_events`. The log is unbounded: callers that set this
    /// must drain it regularly, e.g. after every `add`.
    #[serde(default)]
    pub record_events: bool,
}

impl CompositeOptions {
    pub fn new(tolerance: Tolerance, decision: DecisionCharacteristics) -> Self {
        Self {
            tolerance,
            decision,
            assume_no_invalid_data_points: false,
            record_events: false,
        }
    }

    pub fn with_events(mut self) -> Self {
        self.record_events = true;
        self
    }

    pub fn assuming_no_invalid_data_points(mut self) -> Self {
        self.assume_no_invalid_data_points = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_next_points_is_rejected() {
        let err = DecisionCharacteristics::new(0, 2).validate().unwrap_err();
        assert_eq!(err, CharacteristicsError::NoPointsMatchingNextSegment);
        assert!(err.to_string().contains("points_matching_next_segment"));
        assert!(DecisionCharacteristics::new(1, 0).validate().is_ok());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let json = r#"{
            "tolerance": {"kind": "absolute", "delta": 0.1},
            "decision": {
                "points_matching_next_segment": 2,
                "max_intermediate_points_matching_current_segment": 0
            }
        }"#;
        let options: CompositeOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.decision, DecisionCharacteristics::new(2, 0));
        assert!(!options.record_events);
        assert!(!options.assume_no_invalid_data_points);
    }
}
