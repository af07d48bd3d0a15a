use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::team::{FixtureId, SeasonId, TeamId};

/// Goals scored by each side of a fixture.
///
/// Both scores are always written together, so a fixture is never partially
/// scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchScore {
    pub home: u16,
    pub away: u16,
}

impl MatchScore {
    pub fn new(home: u16, away: u16) -> Self {
        MatchScore { home, away }
    }

    /// Score pair as seen by the away side: (own goals, opponent goals)
    pub fn reversed(&self) -> Self {
        MatchScore {
            home: self.away,
            away: self.home,
        }
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.home, self.away)
    }
}

/// Result of a match from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Win,
    Draw,
    Loss,
}

impl MatchOutcome {
    pub fn from_scores(team_score: u16, opponent_score: u16) -> Self {
        match team_score.cmp(&opponent_score) {
            Ordering::Greater => MatchOutcome::Win,
            Ordering::Less => MatchOutcome::Loss,
            Ordering::Equal => MatchOutcome::Draw,
        }
    }
}

/// A home/away pairing produced by a fixture scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub home: TeamId,
    pub away: TeamId,
}

impl Pairing {
    pub fn new(home: TeamId, away: TeamId) -> Self {
        Pairing { home, away }
    }
}

/// Fixture data before the match store assigns it an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewFixture {
    pub season: SeasonId,
    pub week: u32,
    pub home: TeamId,
    pub away: TeamId,
}

/// A single scheduled match within a season and week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub season: SeasonId,
    pub week: u32,
    pub home: TeamId,
    pub away: TeamId,
    pub score: Option<MatchScore>,
}

impl Fixture {
    pub fn from_new(id: FixtureId, fixture: NewFixture) -> Self {
        Fixture {
            id,
            season: fixture.season,
            week: fixture.week,
            home: fixture.home,
            away: fixture.away,
            score: None,
        }
    }

    pub fn is_played(&self) -> bool {
        self.score.is_some()
    }

    pub fn involves(&self, team: TeamId) -> bool {
        self.home == team || self.away == team
    }
}

impl fmt::Display for Fixture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.score {
            Some(score) => write!(f, "{} {} {} (week {})", self.home, score, self.away, self.week),
            None => write!(f, "{} v {} (week {})", self.home, self.away, self.week),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_from_scores() {
        assert_eq!(MatchOutcome::from_scores(2, 1), MatchOutcome::Win);
        assert_eq!(MatchOutcome::from_scores(0, 3), MatchOutcome::Loss);
        assert_eq!(MatchOutcome::from_scores(1, 1), MatchOutcome::Draw);
    }

    #[test]
    fn test_new_fixture_is_unplayed() {
        let fixture = Fixture::from_new(
            FixtureId(1),
            NewFixture {
                season: SeasonId(1),
                week: 1,
                home: TeamId(1),
                away: TeamId(2),
            },
        );
        assert!(!fixture.is_played());
        assert!(fixture.involves(TeamId(2)));
        assert!(!fixture.involves(TeamId(3)));
    }

    #[test]
    fn test_reversed_score() {
        assert_eq!(MatchScore::new(3, 1).reversed(), MatchScore::new(1, 3));
    }
}
