//! League Core - round-robin league simulation engine.
//!
//! Maintains standings incrementally and reversibly, predicts weekly
//! outcomes from the current standings, and resolves scores through bounded
//! random trials. Storage and fixture pairing are injected; Python bindings
//! are available behind the `python` feature.

pub mod config;
pub mod constants;
pub mod error;
pub mod fixture;
pub mod league;
pub mod outcome;
pub mod prediction;
pub mod projection;
pub mod standings;
pub mod store;
pub mod team;

#[cfg(feature = "python")]
mod python;

pub use config::{LeagueConfig, PredictionWeights};
pub use constants::{
    GOAL_ATTEMPTS, MIN_PREDICTION_PERCENT, POINTS_FOR_DRAW, POINTS_FOR_WIN, WEIGHT_GOALS,
    WEIGHT_HOME, WEIGHT_POINTS, WEIGHT_WINS,
};
pub use error::{LeagueError, Result};
pub use fixture::{Fixture, MatchOutcome, MatchScore, NewFixture, Pairing};
pub use league::{InMemoryLeague, LeagueService, TableRow};
pub use outcome::{expected_goals, goal_distribution, outcome_probabilities, simulate_score};
pub use prediction::{normalize_percentages, predict_fixtures, team_strength, PredictionEntry};
pub use projection::{project_season, SeasonProjection, TeamProjection};
pub use standings::{stage_result, StagedUpdate, StandingsRecord};
pub use store::{
    FixtureScheduler, InMemoryLeaderboard, InMemoryMatchStore, LeaderboardStore, MatchStore,
};
pub use team::{FixtureId, Season, SeasonId, Team, TeamId};
