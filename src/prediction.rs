use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{LeagueConfig, PredictionWeights};
use crate::error::{LeagueError, Result};
use crate::fixture::Fixture;
use crate::standings::StandingsRecord;
use crate::store::LeaderboardStore;
use crate::team::{SeasonId, TeamId};

/// Predicted share of one team in a week's outcomes.
///
/// Percentages of a week sum to exactly 100. After rounding correction the
/// top entry is not guaranteed to stay within [0, 100].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionEntry {
    pub team: TeamId,
    pub percentage: i32,
}

/// Weighted strength of a team from its current standings.
///
/// Negative components count as zero. The home side gets an uplift computed
/// from its own weighted strength.
pub fn team_strength(record: &StandingsRecord, weights: &PredictionWeights, home: bool) -> f64 {
    let mut strength = weights.points * f64::from(record.points.max(0))
        + weights.wins * f64::from(record.won.max(0))
        + weights.goal_difference * f64::from(record.goal_difference.max(0));

    if home {
        strength += weights.home_advantage * strength;
    }

    strength
}

/// One strength per team appearance, home before away, in fixture order.
pub fn fixture_strengths<L: LeaderboardStore + ?Sized>(
    store: &L,
    season: SeasonId,
    fixtures: &[Fixture],
    weights: &PredictionWeights,
) -> Result<Vec<(TeamId, f64)>> {
    let lookup = |team: TeamId| {
        store
            .get(season, team)
            .ok_or(LeagueError::MissingStandingsRecord { season, team })
    };

    let mut strengths = Vec::with_capacity(fixtures.len() * 2);
    for fixture in fixtures {
        let home = lookup(fixture.home)?;
        let away = lookup(fixture.away)?;
        strengths.push((fixture.home, team_strength(&home, weights, true)));
        strengths.push((fixture.away, team_strength(&away, weights, false)));
    }

    Ok(strengths)
}

/// Turn raw strengths into integer percentages summing to 100.
///
/// With a zero total every entry gets an equal share; otherwise each entry
/// gets its proportional share, floored at `min_percentage`. Entries are
/// then sorted (stable, descending) and the rounding remainder is added to
/// the first one only.
pub fn normalize_percentages(
    strengths: &[(TeamId, f64)],
    min_percentage: f64,
) -> Vec<PredictionEntry> {
    if strengths.is_empty() {
        return Vec::new();
    }

    let total: f64 = strengths.iter().map(|(_, s)| s).sum();

    let mut entries: Vec<PredictionEntry> = if total == 0.0 {
        let equal = (100.0 / strengths.len() as f64).round() as i32;
        strengths
            .iter()
            .map(|&(team, _)| PredictionEntry { team, percentage: equal })
            .collect()
    } else {
        strengths
            .iter()
            .map(|&(team, strength)| PredictionEntry {
                team,
                percentage: (100.0 * strength / total).max(min_percentage).round() as i32,
            })
            .collect()
    };

    sort_descending(&mut entries);
    correct_rounding(&mut entries);
    sort_descending(&mut entries);

    entries
}

/// Predictions for a week's fixtures from the current standings.
pub fn predict_fixtures<L: LeaderboardStore + ?Sized>(
    store: &L,
    season: SeasonId,
    week: u32,
    fixtures: &[Fixture],
    config: &LeagueConfig,
) -> Result<Vec<PredictionEntry>> {
    if fixtures.is_empty() {
        return Err(LeagueError::NoMatchesScheduled { season, week });
    }

    let strengths = fixture_strengths(store, season, fixtures, &config.weights)?;
    let entries = normalize_percentages(&strengths, config.min_percentage);

    if let Some(entry) = entries.iter().find(|e| e.percentage < 0) {
        warn!(
            "Rounding correction left {} at {}% for week {} of {}",
            entry.team, entry.percentage, week, season
        );
    }

    Ok(entries)
}

fn sort_descending(entries: &mut [PredictionEntry]) {
    // sort_by is stable: the first-computed entry wins ties
    entries.sort_by(|a, b| b.percentage.cmp(&a.percentage));
}

fn correct_rounding(entries: &mut [PredictionEntry]) {
    let sum: i32 = entries.iter().map(|e| e.percentage).sum();
    if let Some(first) = entries.first_mut() {
        first.percentage += 100 - sum;
    }
}
