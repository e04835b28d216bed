#![allow(dead_code)]

pub mod behaviors;
pub mod series;

/// Feed a point through `integrity_check` and `add`; returns whether it was accepted.
pub fn feed<B: composite_tracker::TrackerBehavior>(
    tracker: &mut composite_tracker::CompositeTracker<B>,
    time: f64,
    value: f64,
) -> bool {
    if tracker.integrity_check(value, time) {
        tracker.add(value, time);
        true
    } else {
        false
    }
}
