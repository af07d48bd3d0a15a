//! Python bindings over an in-memory league.

use pyo3::exceptions::{PyLookupError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;

use crate::config::LeagueConfig;
use crate::constants::{
    GOAL_ATTEMPTS, MIN_PREDICTION_PERCENT, WEIGHT_GOALS, WEIGHT_HOME, WEIGHT_POINTS, WEIGHT_WINS,
};
use crate::error::LeagueError;
use crate::fixture::{MatchScore, Pairing};
use crate::league::InMemoryLeague;
use crate::outcome::{outcome_probabilities, simulate_score};
use crate::projection::project_season;
use crate::store::MatchStore;
use crate::team::{FixtureId, SeasonId, TeamId};

impl From<LeagueError> for PyErr {
    fn from(err: LeagueError) -> PyErr {
        match &err {
            LeagueError::NoMatchesScheduled { .. } => PyLookupError::new_err(err.to_string()),
            LeagueError::MissingStandingsRecord { .. } => PyRuntimeError::new_err(err.to_string()),
            LeagueError::Distribution(_) | LeagueError::Config(_) => {
                PyValueError::new_err(err.to_string())
            }
        }
    }
}

/// League simulation with its own seeded generator.
#[pyclass(name = "League")]
pub struct PyLeague {
    inner: InMemoryLeague,
    rng: ChaCha8Rng,
}

#[pymethods]
impl PyLeague {
    /// Create a league. `config_json` may override any subset of the defaults.
    #[new]
    #[pyo3(signature = (seed = None, config_json = None))]
    fn new(seed: Option<u64>, config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => LeagueConfig::from_json(json)?,
            None => LeagueConfig::default(),
        };
        let rng = match seed {
            Some(s) => ChaCha8Rng::seed_from_u64(s),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(PyLeague {
            inner: InMemoryLeague::in_memory(config),
            rng,
        })
    }

    /// Enroll a team in a season with empty standings.
    fn enroll(&mut self, season: u32, team: u32) -> bool {
        self.inner.enroll_team(SeasonId(season), TeamId(team))
    }

    /// Replace the season's fixtures with `rounds` of (home, away) pairs.
    fn generate_fixtures(
        &mut self,
        season: u32,
        teams: Vec<u32>,
        rounds: Vec<Vec<(u32, u32)>>,
    ) -> usize {
        let teams: Vec<TeamId> = teams.into_iter().map(TeamId).collect();
        let schedule: Vec<Vec<Pairing>> = rounds
            .into_iter()
            .map(|round| {
                round
                    .into_iter()
                    .map(|(home, away)| Pairing::new(TeamId(home), TeamId(away)))
                    .collect()
            })
            .collect();

        self.inner
            .generate_fixtures(SeasonId(season), &teams, &|_: &[TeamId]| schedule.clone())
    }

    /// List of (team, percentage), highest first.
    fn predict_week(&self, season: u32, week: u32) -> PyResult<Vec<(u32, i32)>> {
        let entries = self.inner.predict_week(SeasonId(season), week)?;
        Ok(entries.into_iter().map(|e| (e.team.0, e.percentage)).collect())
    }

    /// List of (fixture_id, home_score, away_score) for fixtures played.
    fn simulate_week(&mut self, season: u32, week: u32) -> PyResult<Vec<(u64, u16, u16)>> {
        let played = self.inner.simulate_week(SeasonId(season), week, &mut self.rng)?;
        Ok(played
            .into_iter()
            .filter_map(|f| f.score.map(|s| (f.id.0, s.home, s.away)))
            .collect())
    }

    fn simulate_season(&mut self, season: u32) -> PyResult<usize> {
        Ok(self.inner.simulate_season(SeasonId(season), &mut self.rng)?)
    }

    fn update_match_result(
        &mut self,
        fixture_id: u64,
        home_score: u16,
        away_score: u16,
    ) -> PyResult<()> {
        let score = MatchScore::new(home_score, away_score);
        self.inner.update_match_result(FixtureId(fixture_id), score)?;
        Ok(())
    }

    /// List of (fixture_id, week, home, away, score or None).
    fn fixtures(&self, season: u32) -> Vec<(u64, u32, u32, u32, Option<(u16, u16)>)> {
        self.inner
            .matches()
            .list_season(SeasonId(season))
            .into_iter()
            .map(|f| (f.id.0, f.week, f.home.0, f.away.0, f.score.map(|s| (s.home, s.away))))
            .collect()
    }

    fn standings(&self, season: u32, team: u32) -> Option<HashMap<String, i32>> {
        self.inner.standings(SeasonId(season), TeamId(team)).map(|r| {
            HashMap::from([
                ("played_matches".to_string(), r.played_matches),
                ("won".to_string(), r.won),
                ("drawn".to_string(), r.drawn),
                ("lost".to_string(), r.lost),
                ("goal_difference".to_string(), r.goal_difference),
                ("points".to_string(), r.points),
            ])
        })
    }

    /// List of (position, team, points, goal_difference).
    fn table(&self, season: u32) -> Vec<(usize, u32, i32, i32)> {
        self.inner
            .table(SeasonId(season))
            .into_iter()
            .map(|row| (row.position, row.team.0, row.record.points, row.record.goal_difference))
            .collect()
    }

    /// List of (team, title_probability, average_points, average_position).
    #[pyo3(signature = (season, simulations, seed = None))]
    fn project_season(
        &self,
        season: u32,
        simulations: usize,
        seed: Option<u64>,
    ) -> PyResult<Vec<(u32, f64, f64, f64)>> {
        let projection = project_season(&self.inner, SeasonId(season), simulations, seed)?;
        Ok(projection
            .teams
            .into_iter()
            .map(|t| (t.team.0, t.title_probability, t.average_points, t.average_position))
            .collect())
    }

    fn __repr__(&self) -> String {
        format!("League({} fixtures)", self.inner.matches().len())
    }
}

/// Exact (home win, draw, away win) probabilities for two percentages.
#[pyfunction]
#[pyo3(signature = (home_percentage, away_percentage, attempts = GOAL_ATTEMPTS))]
fn py_outcome_probabilities(
    home_percentage: i32,
    away_percentage: i32,
    attempts: u16,
) -> PyResult<(f64, f64, f64)> {
    Ok(outcome_probabilities(home_percentage, away_percentage, attempts)?)
}

/// Simulate one score pair.
#[pyfunction]
#[pyo3(signature = (home_percentage, away_percentage, seed = None))]
fn py_simulate_score(home_percentage: i32, away_percentage: i32, seed: Option<u64>) -> (u16, u16) {
    let mut rng = match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    };
    let score = simulate_score(home_percentage, away_percentage, GOAL_ATTEMPTS, &mut rng);
    (score.home, score.away)
}

/// Python module definition
#[pymodule]
fn league_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyLeague>()?;

    m.add_function(wrap_pyfunction!(py_outcome_probabilities, m)?)?;
    m.add_function(wrap_pyfunction!(py_simulate_score, m)?)?;

    m.add("WEIGHT_POINTS", WEIGHT_POINTS)?;
    m.add("WEIGHT_WINS", WEIGHT_WINS)?;
    m.add("WEIGHT_GOALS", WEIGHT_GOALS)?;
    m.add("WEIGHT_HOME", WEIGHT_HOME)?;
    m.add("MIN_PREDICTION_PERCENT", MIN_PREDICTION_PERCENT)?;
    m.add("GOAL_ATTEMPTS", GOAL_ATTEMPTS)?;

    Ok(())
}
