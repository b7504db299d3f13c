use crate::error::ModelError;
use crate::poisson;

/// All totals at or above this land in the last bucket ("10+").
pub const OVERFLOW_BUCKET: usize = 10;

/// Default enumeration bound per side. Keeps the truncated mass negligible
/// at football-range rates; raise it via config for unusually high rates.
pub const DEFAULT_MAX_GOALS_PER_SIDE: u32 = 6;

/// Total-goals distribution and the aggregates the recommendation rules read.
#[derive(Debug, Clone)]
pub struct OutcomeProbabilities {
    /// Probability mass per total-goals bucket, index 10 = "10 or more".
    pub total_goals: [f64; OVERFLOW_BUCKET + 1],
    pub prob_over: f64,
    pub prob_under: f64,
    pub prob_both_score: f64,
}

/// Enumerates every scoreline `(h, a)` with both sides below
/// `max_goals_per_side`, treating home and away goal counts as independent
/// Poisson draws. Independence is a modeling choice, not a guaranteed truth;
/// correlated-score corrections (Dixon-Coles style) are out of scope here.
///
/// `goal_line` is the Over/Under line, e.g. 2.5: `prob_over` collects the
/// buckets strictly above it and `prob_under` is its complement, so the
/// truncated tail counts toward Under.
pub fn joint_outcome(
    eg_home: f64,
    eg_away: f64,
    max_goals_per_side: u32,
    goal_line: f64,
) -> Result<OutcomeProbabilities, ModelError> {
    // The contract floor; lower bounds leave too much mass in the tail.
    let max_goals = max_goals_per_side.max(DEFAULT_MAX_GOALS_PER_SIDE);

    let pmf_home = poisson::pmf(eg_home, max_goals - 1)?;
    let pmf_away = poisson::pmf(eg_away, max_goals - 1)?;

    let mut total_goals = [0.0; OVERFLOW_BUCKET + 1];
    for (h, p_h) in pmf_home.iter().enumerate() {
        for (a, p_a) in pmf_away.iter().enumerate() {
            let bucket = (h + a).min(OVERFLOW_BUCKET);
            total_goals[bucket] += p_h * p_a;
        }
    }

    // 2.5 -> totals of 3 and up are Over.
    let first_over = (goal_line.floor() as usize + 1).min(OVERFLOW_BUCKET);
    let prob_over: f64 = total_goals[first_over..].iter().sum();

    let prob_both_score = (1.0 - pmf_home[0]) * (1.0 - pmf_away[0]);

    Ok(OutcomeProbabilities {
        total_goals,
        prob_over,
        prob_under: 1.0 - prob_over,
        prob_both_score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn over_and_under_are_complementary() {
        let out = joint_outcome(1.8, 1.1, 6, 2.5).unwrap();
        assert!((out.prob_over + out.prob_under - 1.0).abs() < 1e-12);
        assert!(out.prob_over > 0.0 && out.prob_over < 1.0);
    }

    #[test]
    fn buckets_are_a_distribution_up_to_truncation() {
        let out = joint_outcome(1.5, 1.2, 6, 2.5).unwrap();
        let sum: f64 = out.total_goals.iter().sum();
        // Six goals per side leaves only the cross-tail out.
        assert!(sum > 0.999 && sum <= 1.0 + 1e-12);
        for p in out.total_goals {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn truncation_error_stays_small_for_typical_rates() {
        // Football-range rates at the default bound.
        let out = joint_outcome(1.5, 1.2, 6, 2.5).unwrap();
        let sum: f64 = out.total_goals.iter().sum();
        assert!(1.0 - sum < 1e-2, "kept mass {sum}");
        // Extreme rates need a wider bound to get the tail under 1e-4.
        let wide = joint_outcome(4.0, 4.0, 16, 2.5).unwrap();
        let wide_sum: f64 = wide.total_goals.iter().sum();
        assert!(1.0 - wide_sum < 1e-4, "kept mass {wide_sum}");
    }

    #[test]
    fn totals_are_symmetric_under_side_swap() {
        let a = joint_outcome(2.3, 0.9, 8, 2.5).unwrap();
        let b = joint_outcome(0.9, 2.3, 8, 2.5).unwrap();
        assert!((a.prob_over - b.prob_over).abs() < 1e-12);
        assert!((a.prob_under - b.prob_under).abs() < 1e-12);
        assert!((a.prob_both_score - b.prob_both_score).abs() < 1e-12);
    }

    #[test]
    fn btts_matches_closed_form() {
        let out = joint_outcome(2.0, 1.0, 6, 2.5).unwrap();
        let expected = (1.0 - (-2.0_f64).exp()) * (1.0 - (-1.0_f64).exp());
        assert!((out.prob_both_score - expected).abs() < 1e-12);
    }

    #[test]
    fn degenerate_rate_is_rejected() {
        assert!(joint_outcome(0.0, 1.0, 6, 2.5).is_err());
        assert!(joint_outcome(1.0, -0.5, 6, 2.5).is_err());
    }
}
