use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::config::LeagueConfig;
use crate::error::Result;
use crate::fixture::{Fixture, MatchScore, NewFixture};
use crate::outcome::simulate_score;
use crate::prediction::{predict_fixtures, PredictionEntry};
use crate::standings::{stage_result, StandingsRecord};
use crate::store::{
    FixtureScheduler, InMemoryLeaderboard, InMemoryMatchStore, LeaderboardStore, MatchStore,
};
use crate::team::{FixtureId, SeasonId, TeamId};

/// One row of an ordered league table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// 1-based
    pub position: usize,
    pub team: TeamId,
    pub record: StandingsRecord,
}

/// Sequences fixture generation, prediction, simulation and result
/// recording over a leaderboard and a match store.
///
/// Mutating operations take `&mut self`, so all standings updates of a
/// service are serialized.
#[derive(Clone, Debug)]
pub struct LeagueService<L, M> {
    leaderboard: L,
    matches: M,
    config: LeagueConfig,
}

/// Service over the in-memory stores.
pub type InMemoryLeague = LeagueService<InMemoryLeaderboard, InMemoryMatchStore>;

impl InMemoryLeague {
    pub fn in_memory(config: LeagueConfig) -> Self {
        LeagueService::new(InMemoryLeaderboard::new(), InMemoryMatchStore::new(), config)
    }
}

impl<L: LeaderboardStore, M: MatchStore> LeagueService<L, M> {
    pub fn new(leaderboard: L, matches: M, config: LeagueConfig) -> Self {
        LeagueService {
            leaderboard,
            matches,
            config,
        }
    }

    pub fn config(&self) -> &LeagueConfig {
        &self.config
    }

    pub fn leaderboard(&self) -> &L {
        &self.leaderboard
    }

    pub fn matches(&self) -> &M {
        &self.matches
    }

    /// Give a team a zeroed standings record if it has none.
    ///
    /// Returns true when a record was created.
    pub fn enroll_team(&mut self, season: SeasonId, team: TeamId) -> bool {
        if self.leaderboard.get(season, team).is_some() {
            return false;
        }
        self.leaderboard.put(season, team, StandingsRecord::new());
        true
    }

    /// Replace every fixture of the season with the scheduler's rounds.
    ///
    /// Played fixtures are deleted too. Weeks are numbered from 1 and
    /// standings are left untouched. Returns the number of fixtures created.
    pub fn generate_fixtures<S: FixtureScheduler + ?Sized>(
        &mut self,
        season: SeasonId,
        teams: &[TeamId],
        scheduler: &S,
    ) -> usize {
        let removed = self.matches.delete_all_for_season(season);
        let rounds = scheduler.generate(teams);

        let mut created = 0;
        for (index, round) in rounds.iter().enumerate() {
            let week = index as u32 + 1;
            for pairing in round {
                self.matches.create(NewFixture {
                    season,
                    week,
                    home: pairing.home,
                    away: pairing.away,
                });
                created += 1;
            }
        }

        info!(
            "Generated {} fixtures over {} weeks for {} (removed {})",
            created,
            rounds.len(),
            season,
            removed
        );
        created
    }

    /// Predicted percentages for every team playing in the week.
    pub fn predict_week(&self, season: SeasonId, week: u32) -> Result<Vec<PredictionEntry>> {
        let fixtures = self.matches.list_week(season, week);
        predict_fixtures(&self.leaderboard, season, week, &fixtures, &self.config)
    }

    /// Simulate every unscored fixture of the week.
    ///
    /// Predictions are recomputed before each fixture, so results earlier in
    /// the week feed into later ones. Returns the fixtures played; an empty
    /// week plays nothing.
    pub fn simulate_week<R: Rng + ?Sized>(
        &mut self,
        season: SeasonId,
        week: u32,
        rng: &mut R,
    ) -> Result<Vec<Fixture>> {
        let mut played = Vec::new();

        for fixture in self.matches.list_week(season, week) {
            if fixture.is_played() {
                continue;
            }

            let predictions: HashMap<TeamId, i32> = self
                .predict_week(season, week)?
                .into_iter()
                .map(|entry| (entry.team, entry.percentage))
                .collect();
            let home_percentage = predictions.get(&fixture.home).copied().unwrap_or(0);
            let away_percentage = predictions.get(&fixture.away).copied().unwrap_or(0);

            let score = simulate_score(
                home_percentage,
                away_percentage,
                self.config.goal_attempts,
                rng,
            );
            self.record_result(&fixture, score, None)?;

            debug!(
                "Simulated {} ({}% v {}%): {}",
                fixture.id, home_percentage, away_percentage, score
            );
            played.push(Fixture {
                score: Some(score),
                ..fixture
            });
        }

        Ok(played)
    }

    /// Simulate all weeks of the season in ascending order.
    ///
    /// Returns the number of fixtures played.
    pub fn simulate_season<R: Rng + ?Sized>(
        &mut self,
        season: SeasonId,
        rng: &mut R,
    ) -> Result<usize> {
        let mut played = 0;
        for week in self.weeks(season) {
            played += self.simulate_week(season, week, rng)?.len();
        }
        info!("Simulated {} fixtures for {}", played, season);
        Ok(played)
    }

    /// Manually set the result of a fixture.
    ///
    /// An unknown fixture is a silent no-op. An already scored fixture has
    /// its old result reverted before the new one is applied.
    pub fn update_match_result(&mut self, fixture_id: FixtureId, score: MatchScore) -> Result<()> {
        let Some(fixture) = self.matches.get(fixture_id) else {
            debug!("Ignoring result for unknown {}", fixture_id);
            return Ok(());
        };

        self.record_result(&fixture, score, fixture.score)?;
        debug!("Corrected {} to {}", fixture_id, score);
        Ok(())
    }

    /// Standings and score are validated together, then written together.
    fn record_result(
        &mut self,
        fixture: &Fixture,
        score: MatchScore,
        previous: Option<MatchScore>,
    ) -> Result<()> {
        let staged = stage_result(&self.leaderboard, fixture, score, previous)?;
        self.matches.set_score(fixture.id, score);
        staged.commit(&mut self.leaderboard);
        Ok(())
    }

    pub fn standings(&self, season: SeasonId, team: TeamId) -> Option<StandingsRecord> {
        self.leaderboard.get(season, team)
    }

    /// Season standings ordered by points, goal difference and wins, then team id.
    pub fn table(&self, season: SeasonId) -> Vec<TableRow> {
        let mut records = self.leaderboard.season_records(season);
        records.sort_by(|(team_a, a), (team_b, b)| {
            b.points
                .cmp(&a.points)
                .then(b.goal_difference.cmp(&a.goal_difference))
                .then(b.won.cmp(&a.won))
                .then(team_a.cmp(team_b))
        });

        records
            .into_iter()
            .enumerate()
            .map(|(i, (team, record))| TableRow {
                position: i + 1,
                team,
                record,
            })
            .collect()
    }

    /// Distinct week numbers of the season, ascending.
    pub fn weeks(&self, season: SeasonId) -> Vec<u32> {
        self.matches
            .list_season(season)
            .iter()
            .map(|f| f.week)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Fixtures of the season without a result.
    pub fn remaining_fixtures(&self, season: SeasonId) -> Vec<Fixture> {
        self.matches
            .list_season(season)
            .into_iter()
            .filter(|f| !f.is_played())
            .collect()
    }
}
