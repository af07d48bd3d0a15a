use rand::Rng;
use statrs::distribution::{Binomial, Discrete};

use crate::error::Result;
use crate::fixture::MatchScore;

/// Simulate a match score from the two sides' predicted percentages.
///
/// Each side gets `attempts` independent trials; a trial scores when a
/// uniform draw in [0, 1) is strictly below `percentage / 100`. Home and
/// away draws alternate within each attempt.
///
/// # Arguments
/// * `home_percentage` - Home side's predicted percentage
/// * `away_percentage` - Away side's predicted percentage
/// * `attempts` - Trials per side, which also bounds the goals per side
/// * `rng` - Random source
pub fn simulate_score<R: Rng + ?Sized>(
    home_percentage: i32,
    away_percentage: i32,
    attempts: u16,
    rng: &mut R,
) -> MatchScore {
    let home_chance = f64::from(home_percentage) / 100.0;
    let away_chance = f64::from(away_percentage) / 100.0;

    let mut score = MatchScore::new(0, 0);
    for _ in 0..attempts {
        if rng.gen::<f64>() < home_chance {
            score.home += 1;
        }
        if rng.gen::<f64>() < away_chance {
            score.away += 1;
        }
    }

    score
}

/// Probability of each goal count (index = goals) for one side.
///
/// The simulated process is binomial with `p = percentage / 100`, clamped
/// to [0, 1] since a corrected percentage can fall outside that range.
pub fn goal_distribution(percentage: i32, attempts: u16) -> Result<Vec<f64>> {
    let p = (f64::from(percentage) / 100.0).clamp(0.0, 1.0);
    let binomial = Binomial::new(p, u64::from(attempts))?;

    Ok((0..=u64::from(attempts)).map(|k| binomial.pmf(k)).collect())
}

/// Expected goals for one side.
pub fn expected_goals(percentage: i32, attempts: u16) -> f64 {
    (f64::from(percentage) / 100.0).clamp(0.0, 1.0) * f64::from(attempts)
}

/// Exact (home win, draw, away win) probabilities of a simulated match.
pub fn outcome_probabilities(
    home_percentage: i32,
    away_percentage: i32,
    attempts: u16,
) -> Result<(f64, f64, f64)> {
    let home = goal_distribution(home_percentage, attempts)?;
    let away = goal_distribution(away_percentage, attempts)?;

    let mut home_win = 0.0;
    let mut draw = 0.0;
    let mut away_win = 0.0;

    for (h, p_home) in home.iter().enumerate() {
        for (a, p_away) in away.iter().enumerate() {
            let p = p_home * p_away;
            if h > a {
                home_win += p;
            } else if h < a {
                away_win += p;
            } else {
                draw += p;
            }
        }
    }

    Ok((home_win, draw, away_win))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GOAL_ATTEMPTS;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_zero_draw_always_scores() {
        // Every draw is exactly 0.0
        let mut rng = StepRng::new(0, 0);
        let score = simulate_score(30, 1, GOAL_ATTEMPTS, &mut rng);
        assert_eq!(score, MatchScore::new(5, 5));
    }

    #[test]
    fn test_strict_comparison_at_zero_percent() {
        // 0.0 < 0.0 is false, so a 0% side never scores
        let mut rng = StepRng::new(0, 0);
        let score = simulate_score(0, 50, GOAL_ATTEMPTS, &mut rng);
        assert_eq!(score, MatchScore::new(0, 5));
    }

    #[test]
    fn test_high_draw_never_scores() {
        // Every draw is just below 1.0
        let mut rng = StepRng::new(u64::MAX, 0);
        let score = simulate_score(99, 60, GOAL_ATTEMPTS, &mut rng);
        assert_eq!(score, MatchScore::new(0, 0));
    }

    #[test]
    fn test_hundred_percent_always_scores() {
        let mut rng = StepRng::new(u64::MAX, 0);
        let score = simulate_score(100, -5, GOAL_ATTEMPTS, &mut rng);
        assert_eq!(score, MatchScore::new(5, 0));
    }

    #[test]
    fn test_max_attempts_cannot_overflow() {
        let mut rng = StepRng::new(0, 0);
        let score = simulate_score(100, 100, u16::MAX, &mut rng);
        assert_eq!(score, MatchScore::new(u16::MAX, u16::MAX));
    }

    #[test]
    fn test_simulated_scores_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for pct in [-10, 0, 2, 25, 50, 98, 100, 150] {
            for _ in 0..200 {
                let score = simulate_score(pct, 100 - pct, GOAL_ATTEMPTS, &mut rng);
                assert!(score.home <= 5 && score.away <= 5);
            }
        }
    }

    #[test]
    fn test_seeded_simulation_deterministic() {
        let mut rng1 = ChaCha8Rng::seed_from_u64(42);
        let mut rng2 = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..50 {
            assert_eq!(
                simulate_score(60, 40, GOAL_ATTEMPTS, &mut rng1),
                simulate_score(60, 40, GOAL_ATTEMPTS, &mut rng2)
            );
        }
    }

    #[test]
    fn test_goal_distribution_sums_to_one() {
        for pct in [-18, 0, 2, 50, 98, 120] {
            let dist = goal_distribution(pct, GOAL_ATTEMPTS).unwrap();
            assert_eq!(dist.len(), 6);
            let sum: f64 = dist.iter().sum();
            assert!((sum - 1.0).abs() < 1e-9, "Distribution for {}% sums to {}", pct, sum);
        }
    }

    #[test]
    fn test_expected_goals() {
        assert!((expected_goals(50, 5) - 2.5).abs() < 1e-12);
        assert_eq!(expected_goals(-3, 5), 0.0);
        assert_eq!(expected_goals(140, 5), 5.0);
    }

    #[test]
    fn test_outcome_probabilities() {
        let (home, draw, away) = outcome_probabilities(50, 50, GOAL_ATTEMPTS).unwrap();
        assert!((home + draw + away - 1.0).abs() < 1e-9);
        assert!((home - away).abs() < 1e-12, "Equal sides should be symmetric");

        let (home, _, away) = outcome_probabilities(98, 2, GOAL_ATTEMPTS).unwrap();
        assert!(home > 0.99);
        assert!(away < 0.001);
    }

    #[test]
    fn test_empirical_rate_matches_expectation() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let trials = 20_000;
        let total: u32 = (0..trials)
            .map(|_| u32::from(simulate_score(40, 0, GOAL_ATTEMPTS, &mut rng).home))
            .sum();
        let mean = f64::from(total) / f64::from(trials);
        assert!((mean - expected_goals(40, GOAL_ATTEMPTS)).abs() < 0.05);
    }
}
