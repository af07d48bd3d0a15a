use serde::{Deserialize, Serialize};

use crate::constants::{
    GOAL_ATTEMPTS, MIN_PREDICTION_PERCENT, WEIGHT_GOALS, WEIGHT_HOME, WEIGHT_POINTS, WEIGHT_WINS,
};
use crate::error::Result;

/// Weights turning a standings record into a strength score.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionWeights {
    pub points: f64,
    pub wins: f64,
    pub goal_difference: f64,
    /// Uplift applied to the home side's own strength (0.1 = 10%)
    pub home_advantage: f64,
}

impl Default for PredictionWeights {
    fn default() -> Self {
        PredictionWeights {
            points: WEIGHT_POINTS,
            wins: WEIGHT_WINS,
            goal_difference: WEIGHT_GOALS,
            home_advantage: WEIGHT_HOME,
        }
    }
}

/// Tunables for prediction and simulation.
///
/// Missing fields in a JSON document fall back to the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueConfig {
    pub weights: PredictionWeights,

    /// Per-entry floor when strengths are non-zero
    pub min_percentage: f64,

    /// Scoring attempts per side in a simulated match
    pub goal_attempts: u16,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        LeagueConfig {
            weights: PredictionWeights::default(),
            min_percentage: MIN_PREDICTION_PERCENT,
            goal_attempts: GOAL_ATTEMPTS,
        }
    }
}

impl LeagueConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LeagueError;

    #[test]
    fn test_defaults_match_constants() {
        let config = LeagueConfig::default();
        assert_eq!(config.weights.points, 0.4);
        assert_eq!(config.weights.wins, 0.3);
        assert_eq!(config.weights.goal_difference, 0.2);
        assert_eq!(config.weights.home_advantage, 0.1);
        assert_eq!(config.min_percentage, 2.0);
        assert_eq!(config.goal_attempts, 5);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = LeagueConfig::from_json(r#"{"weights": {"home_advantage": 0.25}}"#).unwrap();
        assert_eq!(config.weights.home_advantage, 0.25);
        assert_eq!(config.weights.points, 0.4);
        assert_eq!(config.goal_attempts, 5);
    }

    #[test]
    fn test_json_round_trip() {
        let config = LeagueConfig {
            goal_attempts: 7,
            ..LeagueConfig::default()
        };
        let parsed = LeagueConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let err = LeagueConfig::from_json("{\"goal_attempts\": -1}").unwrap_err();
        assert!(matches!(err, LeagueError::Config(_)));
    }

    #[test]
    fn test_goal_attempts_above_u16_rejected() {
        let err = LeagueConfig::from_json(r#"{"goal_attempts": 70000}"#).unwrap_err();
        assert!(matches!(err, LeagueError::Config(_)));

        let config = LeagueConfig::from_json(r#"{"goal_attempts": 65535}"#).unwrap();
        assert_eq!(config.goal_attempts, u16::MAX);
    }
}
