//! Tracker events and a caller-owned data set for plotting.
//!
//! A [`CompositeTracker`](crate::composite::CompositeTracker) created with
//! `record_events` keeps a log of what happened to every point; the caller
//! drains it and may feed it into a [`DataSetRecorder`], which keeps all
//! points (valid, rejected and discarded) tagged with their segment.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DataPoint {
    pub time: f64,
    pub value: f64,
}

impl DataPoint {
    pub fn new(time: f64, value: f64) -> Self {
        Self { time, value }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TrackerEvent {
    /// Point added to the tracker of segment `segment`.
    Accepted { point: DataPoint, segment: u32 },
    /// Point failed the integrity check.
    Rejected { point: DataPoint, segment: u32 },
    /// Point was buffered during a decision and then dropped.
    Discarded { point: DataPoint, segment: u32 },
    /// Segment `index` was created. `start_time_guess` is the midpoint
    /// between the previous segment's last time and the first seed time.
    Advanced { index: u32, start_time_guess: f64 },
    /// The behavior reported a (new) start time for segment `index`.
    StartTimeUpdated { index: u32, start_time: Option<f64> },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointClass {
    Valid,
    Invalid,
    Discarded,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RecordedPoint {
    pub segment: u32,
    pub time: f64,
    pub value: f64,
    pub class: PointClass,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct DataSetRecorder {
    points: Vec<RecordedPoint>,
    /// Supposed start time per segment, as last reported.
    start_times: Vec<Option<f64>>,
    current_segment: u32,
}

impl DataSetRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: &TrackerEvent) {
        let (point, segment, class) = match *event {
            TrackerEvent::Accepted { point, segment } => (point, segment, PointClass::Valid),
            TrackerEvent::Rejected { point, segment } => (point, segment, PointClass::Invalid),
            TrackerEvent::Discarded { point, segment } => (point, segment, PointClass::Discarded),
            TrackerEvent::Advanced { index, .. } => {
                self.current_segment = self.current_segment.max(index);
                return;
            }
            TrackerEvent::StartTimeUpdated { index, start_time } => {
                let idx = index as usize;
                if self.start_times.len() <= idx {
                    self.start_times.resize(idx + 1, None);
                }
                self.start_times[idx] = start_time;
                return;
            }
        };
        self.points.push(RecordedPoint {
            segment,
            time: point.time,
            value: point.value,
            class,
        });
    }

    pub fn record_all<'a, I: IntoIterator<Item = &'a TrackerEvent>>(&mut self, events: I) {
        for event in events {
            self.record(event);
        }
    }

    pub fn points(&self) -> &[RecordedPoint] {
        &self.points
    }

    /// Points of the `count` most recent segments (the current one included).
    pub fn points_for_recent_segments(&self, count: u32) -> Vec<RecordedPoint> {
        if count == 0 {
            return Vec::new();
        }
        let first = self.current_segment.saturating_sub(count - 1);
        self.points.iter().filter(|p| p.segment >= first).copied().collect()
    }

    pub fn start_time(&self, segment: u32) -> Option<f64> {
        self.start_times.get(segment as usize).copied().flatten()
    }

    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| format!("Failed to serialize data set: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_filters_recent_segments() {
        let mut rec = DataSetRecorder::new();
        let events = vec![
            TrackerEvent::Accepted {
                point: DataPoint::new(0.0, 1.0),
                segment: 0,
            },
            TrackerEvent::Rejected {
                point: DataPoint::new(1.0, 9.0),
                segment: 0,
            },
            TrackerEvent::Advanced {
                index: 1,
                start_time_guess: 1.5,
            },
            TrackerEvent::Discarded {
                point: DataPoint::new(2.0, 2.0),
                segment: 0,
            },
            TrackerEvent::Accepted {
                point: DataPoint::new(3.0, 0.0),
                segment: 1,
            },
            TrackerEvent::StartTimeUpdated {
                index: 1,
                start_time: Some(1.8),
            },
        ];
        rec.record_all(&events);
        assert_eq!(rec.points().len(), 4);
        let recent = rec.points_for_recent_segments(1);
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].time, 3.0);
        assert_eq!(rec.points_for_recent_segments(2).len(), 4);
        assert_eq!(rec.start_time(1), Some(1.8));
        assert_eq!(rec.start_time(0), None);
    }

    #[test]
    fn recorder_serializes_to_json() {
        let mut rec = DataSetRecorder::new();
        rec.record(&TrackerEvent::Rejected {
            point: DataPoint::new(0.5, 2.0),
            segment: 0,
        });
        let json = rec.to_json().unwrap();
        assert!(json.contains("\"class\": \"invalid\""));
    }

    #[test]
    fn events_serialize_with_tag() {
        let event = TrackerEvent::Advanced {
            index: 2,
            start_time_guess: 4.0,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"event":"advanced","index":2,"start_time_guess":4.0}"#);
    }
}
