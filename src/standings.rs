use serde::{Deserialize, Serialize};

use crate::constants::{POINTS_FOR_DRAW, POINTS_FOR_WIN};
use crate::error::{LeagueError, Result};
use crate::fixture::{Fixture, MatchOutcome, MatchScore};
use crate::store::LeaderboardStore;
use crate::team::{SeasonId, TeamId};

/// Running aggregate of one team's results within one season.
///
/// Records only change through [`StandingsRecord::apply`] and
/// [`StandingsRecord::revert`], which keep
/// `played_matches == won + drawn + lost` and `points == 3 * won + drawn`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StandingsRecord {
    pub played_matches: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goal_difference: i32,
    pub points: i32,
}

impl StandingsRecord {
    /// A zeroed record for a team entering a season.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one match, given the scores from this team's perspective.
    #[must_use]
    pub fn apply(self, team_score: u16, opponent_score: u16) -> Self {
        self.shift(team_score, opponent_score, 1)
    }

    /// Exact inverse of [`apply`](Self::apply) for the same score pair.
    #[must_use]
    pub fn revert(self, team_score: u16, opponent_score: u16) -> Self {
        self.shift(team_score, opponent_score, -1)
    }

    fn shift(mut self, team_score: u16, opponent_score: u16, sign: i32) -> Self {
        self.played_matches += sign;
        self.goal_difference += sign * (i32::from(team_score) - i32::from(opponent_score));

        match MatchOutcome::from_scores(team_score, opponent_score) {
            MatchOutcome::Win => {
                self.won += sign;
                self.points += sign * POINTS_FOR_WIN;
            }
            MatchOutcome::Loss => {
                self.lost += sign;
            }
            MatchOutcome::Draw => {
                self.drawn += sign;
                self.points += sign * POINTS_FOR_DRAW;
            }
        }

        self
    }

    /// Whether the counting invariants hold.
    pub fn is_consistent(&self) -> bool {
        self.played_matches == self.won + self.drawn + self.lost
            && self.points == POINTS_FOR_WIN * self.won + POINTS_FOR_DRAW * self.drawn
    }
}

/// New standings for both sides of a fixture, computed before anything is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StagedUpdate {
    pub season: SeasonId,
    pub home: (TeamId, StandingsRecord),
    pub away: (TeamId, StandingsRecord),
}

impl StagedUpdate {
    /// Write both records.
    pub fn commit<L: LeaderboardStore + ?Sized>(self, store: &mut L) {
        store.put(self.season, self.home.0, self.home.1);
        store.put(self.season, self.away.0, self.away.1);
    }
}

/// Compute the standings effect of scoring `fixture` with `score`.
///
/// When `previous` is set, the old result is reverted first, in the order
/// revert-home, revert-away, apply-home, apply-away. Fails without side
/// effects if either team has no standings record.
pub fn stage_result<L: LeaderboardStore + ?Sized>(
    store: &L,
    fixture: &Fixture,
    score: MatchScore,
    previous: Option<MatchScore>,
) -> Result<StagedUpdate> {
    let season = fixture.season;
    let lookup = |team: TeamId| {
        store
            .get(season, team)
            .ok_or(LeagueError::MissingStandingsRecord { season, team })
    };

    let mut home = lookup(fixture.home)?;
    let mut away = lookup(fixture.away)?;

    if let Some(old) = previous {
        home = home.revert(old.home, old.away);
        away = away.revert(old.away, old.home);
    }

    home = home.apply(score.home, score.away);
    away = away.apply(score.away, score.home);

    Ok(StagedUpdate {
        season,
        home: (fixture.home, home),
        away: (fixture.away, away),
    })
}
