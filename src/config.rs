//! JSON configuration for composite trackers.

use crate::composite::CompositeOptions;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Capacity settings for the leaf trackers a behavior creates per segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LeafOptions {
    /// Maximum number of points kept per segment; older points are dropped.
    pub max_points: usize,
    /// Distinct points required on top of the model's minimum before a
    /// regression is trusted.
    pub tolerance_points: usize,
}

impl Default for LeafOptions {
    fn default() -> Self {
        Self {
            max_points: 500,
            tolerance_points: 1,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct TrackerConfig {
    pub composite: CompositeOptions,
    #[serde(default)]
    pub leaf: LeafOptions,
}

pub fn load_config(path: &Path) -> Result<TrackerConfig, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    from_json_str(&contents).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

/// Parse and validate a configuration.
pub fn from_json_str(contents: &str) -> Result<TrackerConfig, String> {
    let config: TrackerConfig = serde_json::from_str(contents).map_err(|e| e.to_string())?;
    config.composite.decision.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composite::DecisionCharacteristics;
    use crate::tolerance::Tolerance;

    #[test]
    fn parses_full_config() {
        let json = r#"{
            "composite": {
                "tolerance": {"kind": "absolute_2d", "dy": 0.05, "dx": 0.01},
                "decision": {
                    "points_matching_next_segment": 3,
                    "max_intermediate_points_matching_current_segment": 1
                },
                "record_events": true
            },
            "leaf": {"max_points": 200}
        }"#;
        let config = from_json_str(json).unwrap();
        assert_eq!(config.composite.tolerance, Tolerance::Absolute2D { dy: 0.05, dx: 0.01 });
        assert_eq!(config.composite.decision, DecisionCharacteristics::new(3, 1));
        assert!(config.composite.record_events);
        assert_eq!(config.leaf.max_points, 200);
        assert_eq!(config.leaf.tolerance_points, 1);
    }

    #[test]
    fn rejects_invalid_characteristics() {
        let json = r#"{
            "composite": {
                "tolerance": {"kind": "absolute", "delta": 1.0},
                "decision": {
                    "points_matching_next_segment": 0,
                    "max_intermediate_points_matching_current_segment": 0
                }
            }
        }"#;
        let err = from_json_str(json).unwrap_err();
        assert!(err.contains("points_matching_next_segment"), "{err}");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = load_config(Path::new("/nonexistent/tracker.json")).unwrap_err();
        assert!(err.starts_with("Failed to read config /nonexistent/tracker.json"), "{err}");
    }
}
