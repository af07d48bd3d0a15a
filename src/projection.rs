//! Monte Carlo projection of a season's final table.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::Result;
use crate::league::{LeagueService, TableRow};
use crate::store::{LeaderboardStore, MatchStore};
use crate::team::{SeasonId, TeamId};

/// Projected finish of one team.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamProjection {
    pub team: TeamId,
    /// Share of simulations the team finished first
    pub title_probability: f64,
    pub average_points: f64,
    pub average_position: f64,
}

/// Aggregated outcome of many simulated completions of a season.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonProjection {
    pub simulations: usize,
    /// Sorted by average points, then title probability, descending
    pub teams: Vec<TeamProjection>,
}

impl SeasonProjection {
    pub fn get(&self, team: TeamId) -> Option<&TeamProjection> {
        self.teams.iter().find(|t| t.team == team)
    }
}

#[derive(Default)]
struct Tally {
    titles: usize,
    points: i64,
    positions: usize,
}

/// Play the remaining fixtures of a season `simulations` times.
///
/// Each run works on its own copy of the service with its own generator,
/// seeded from a master generator so that a given `seed` always yields the
/// same projection. Runs execute in parallel.
pub fn project_season<L, M>(
    service: &LeagueService<L, M>,
    season: SeasonId,
    simulations: usize,
    seed: Option<u64>,
) -> Result<SeasonProjection>
where
    L: LeaderboardStore + Clone + Send + Sync,
    M: MatchStore + Clone + Send + Sync,
{
    if simulations == 0 {
        return Ok(SeasonProjection::default());
    }

    let mut master = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let seeds: Vec<u64> = (0..simulations).map(|_| master.gen::<u64>()).collect();

    let tables: Vec<Vec<TableRow>> = seeds
        .par_iter()
        .map(|&sim_seed| -> Result<Vec<TableRow>> {
            let mut run = service.clone();
            let mut rng = ChaCha8Rng::seed_from_u64(sim_seed);
            run.simulate_season(season, &mut rng)?;
            Ok(run.table(season))
        })
        .collect::<Result<_>>()?;

    let mut tallies: HashMap<TeamId, Tally> = HashMap::new();
    for table in &tables {
        for row in table {
            let tally = tallies.entry(row.team).or_default();
            tally.points += i64::from(row.record.points);
            tally.positions += row.position;
            if row.position == 1 {
                tally.titles += 1;
            }
        }
    }

    let n = simulations as f64;
    let mut teams: Vec<TeamProjection> = tallies
        .into_iter()
        .map(|(team, tally)| TeamProjection {
            team,
            title_probability: tally.titles as f64 / n,
            average_points: tally.points as f64 / n,
            average_position: tally.positions as f64 / n,
        })
        .collect();

    teams.sort_by(|a, b| {
        b.average_points
            .total_cmp(&a.average_points)
            .then(b.title_probability.total_cmp(&a.title_probability))
            .then(a.team.cmp(&b.team))
    });

    Ok(SeasonProjection { simulations, teams })
}
