use thiserror::Error;

use crate::team::{SeasonId, TeamId};

/// Errors raised by the league engine.
///
/// A correction on an unknown fixture is intentionally absent here: it is a
/// silent no-op, not a failure.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error("No matches scheduled for week {week} of {season}")]
    NoMatchesScheduled { season: SeasonId, week: u32 },

    #[error("No standings record for {team} in {season}")]
    MissingStandingsRecord { season: SeasonId, team: TeamId },

    #[error("Invalid scoring distribution: {0}")]
    Distribution(#[from] statrs::StatsError),

    #[error("Invalid league configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl LeagueError {
    /// Whether the error means stored standings are out of step with fixtures.
    pub fn is_consistency_error(&self) -> bool {
        matches!(self, LeagueError::MissingStandingsRecord { .. })
    }
}

pub type Result<T> = std::result::Result<T, LeagueError>;
