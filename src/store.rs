//! Storage seams for standings and fixtures.
//!
//! Persistence lives outside the engine; these traits are the keyed
//! operations the engine needs, and the in-memory implementations back the
//! projections, the Python bindings and the tests.

use std::collections::{BTreeMap, HashMap};

use crate::fixture::{Fixture, MatchScore, NewFixture, Pairing};
use crate::standings::StandingsRecord;
use crate::team::{FixtureId, SeasonId, TeamId};

/// Keyed storage of one standings record per (season, team).
pub trait LeaderboardStore {
    fn get(&self, season: SeasonId, team: TeamId) -> Option<StandingsRecord>;

    fn put(&mut self, season: SeasonId, team: TeamId, record: StandingsRecord);

    /// All records of a season, in no particular order.
    fn season_records(&self, season: SeasonId) -> Vec<(TeamId, StandingsRecord)>;
}

/// Keyed storage of fixtures.
pub trait MatchStore {
    /// Fixtures of one week, in creation order.
    fn list_week(&self, season: SeasonId, week: u32) -> Vec<Fixture>;

    /// Fixtures of a season, ordered by week then creation order.
    fn list_season(&self, season: SeasonId) -> Vec<Fixture>;

    fn get(&self, id: FixtureId) -> Option<Fixture>;

    fn create(&mut self, fixture: NewFixture) -> FixtureId;

    /// Write both scores of a fixture. Unknown ids are ignored.
    fn set_score(&mut self, id: FixtureId, score: MatchScore);

    /// Remove every fixture of the season, played or not. Returns the count removed.
    fn delete_all_for_season(&mut self, season: SeasonId) -> usize;
}

/// Source of round-robin pairings, one inner `Vec` per round.
///
/// Home/away assignment is part of the scheduler's contract and is not
/// validated by the engine.
pub trait FixtureScheduler {
    fn generate(&self, teams: &[TeamId]) -> Vec<Vec<Pairing>>;
}

impl<F> FixtureScheduler for F
where
    F: Fn(&[TeamId]) -> Vec<Vec<Pairing>>,
{
    fn generate(&self, teams: &[TeamId]) -> Vec<Vec<Pairing>> {
        self(teams)
    }
}

/// Leaderboard held in a hash map keyed by (season, team).
#[derive(Clone, Debug, Default)]
pub struct InMemoryLeaderboard {
    records: HashMap<(SeasonId, TeamId), StandingsRecord>,
}

impl InMemoryLeaderboard {
    pub fn new() -> Self {
        InMemoryLeaderboard {
            records: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LeaderboardStore for InMemoryLeaderboard {
    fn get(&self, season: SeasonId, team: TeamId) -> Option<StandingsRecord> {
        self.records.get(&(season, team)).copied()
    }

    fn put(&mut self, season: SeasonId, team: TeamId, record: StandingsRecord) {
        self.records.insert((season, team), record);
    }

    fn season_records(&self, season: SeasonId) -> Vec<(TeamId, StandingsRecord)> {
        self.records
            .iter()
            .filter(|((s, _), _)| *s == season)
            .map(|((_, team), record)| (*team, *record))
            .collect()
    }
}

/// Match store held in an ordered map; ids are handed out sequentially from 1.
#[derive(Clone, Debug)]
pub struct InMemoryMatchStore {
    fixtures: BTreeMap<FixtureId, Fixture>,
    next_id: u64,
}

impl InMemoryMatchStore {
    pub fn new() -> Self {
        InMemoryMatchStore {
            fixtures: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}

impl Default for InMemoryMatchStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchStore for InMemoryMatchStore {
    fn list_week(&self, season: SeasonId, week: u32) -> Vec<Fixture> {
        self.fixtures
            .values()
            .filter(|f| f.season == season && f.week == week)
            .copied()
            .collect()
    }

    fn list_season(&self, season: SeasonId) -> Vec<Fixture> {
        let mut fixtures: Vec<Fixture> = self
            .fixtures
            .values()
            .filter(|f| f.season == season)
            .copied()
            .collect();
        // Stable, so creation order is kept within a week
        fixtures.sort_by_key(|f| f.week);
        fixtures
    }

    fn get(&self, id: FixtureId) -> Option<Fixture> {
        self.fixtures.get(&id).copied()
    }

    fn create(&mut self, fixture: NewFixture) -> FixtureId {
        let id = FixtureId(self.next_id);
        self.next_id += 1;
        self.fixtures.insert(id, Fixture::from_new(id, fixture));
        id
    }

    fn set_score(&mut self, id: FixtureId, score: MatchScore) {
        if let Some(fixture) = self.fixtures.get_mut(&id) {
            fixture.score = Some(score);
        }
    }

    fn delete_all_for_season(&mut self, season: SeasonId) -> usize {
        let before = self.fixtures.len();
        self.fixtures.retain(|_, f| f.season != season);
        before - self.fixtures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_fixture(season: u32, week: u32, home: u32, away: u32) -> NewFixture {
        NewFixture {
            season: SeasonId(season),
            week,
            home: TeamId(home),
            away: TeamId(away),
        }
    }

    #[test]
    fn test_leaderboard_get_put() {
        let mut store = InMemoryLeaderboard::new();
        assert!(store.get(SeasonId(1), TeamId(1)).is_none());

        let record = StandingsRecord::new().apply(2, 0);
        store.put(SeasonId(1), TeamId(1), record);
        store.put(SeasonId(2), TeamId(1), StandingsRecord::new());

        assert_eq!(store.get(SeasonId(1), TeamId(1)), Some(record));
        assert_eq!(store.season_records(SeasonId(1)).len(), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_match_store_lists_by_week_in_creation_order() {
        let mut store = InMemoryMatchStore::new();
        let a = store.create(new_fixture(1, 2, 1, 2));
        let b = store.create(new_fixture(1, 1, 3, 4));
        let c = store.create(new_fixture(1, 2, 3, 1));
        store.create(new_fixture(9, 2, 5, 6));

        let week2: Vec<FixtureId> = store
            .list_week(SeasonId(1), 2)
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(week2, vec![a, c]);

        let season: Vec<FixtureId> = store
            .list_season(SeasonId(1))
            .iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(season, vec![b, a, c]);
    }

    #[test]
    fn test_default_store_ids_start_at_one() {
        let mut store = InMemoryMatchStore::default();
        assert_eq!(store.create(new_fixture(1, 1, 1, 2)), FixtureId(1));
        assert_eq!(store.create(new_fixture(1, 1, 3, 4)), FixtureId(2));
    }

    #[test]
    fn test_set_score_and_delete() {
        let mut store = InMemoryMatchStore::new();
        let id = store.create(new_fixture(1, 1, 1, 2));
        store.create(new_fixture(2, 1, 1, 2));

        store.set_score(id, MatchScore::new(1, 0));
        assert_eq!(store.get(id).and_then(|f| f.score), Some(MatchScore::new(1, 0)));

        // Unknown ids are ignored
        store.set_score(FixtureId(999), MatchScore::new(4, 4));

        assert_eq!(store.delete_all_for_season(SeasonId(1)), 1);
        assert!(store.get(id).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_closure_scheduler() {
        let scheduler = |teams: &[TeamId]| vec![vec![Pairing::new(teams[0], teams[1])]];
        let rounds = scheduler.generate(&[TeamId(1), TeamId(2)]);
        assert_eq!(rounds, vec![vec![Pairing::new(TeamId(1), TeamId(2))]]);
    }
}
