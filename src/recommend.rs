use crate::market::OutcomeProbabilities;

/// Where a quoted price came from. The value rule is only meaningful against
/// a genuine market price, so placeholder odds never trigger it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OddsSource {
    /// Real bookmaker price from the odds feed.
    Quoted,
    /// Neutral stand-in supplied when no odds feed is wired up.
    Placeholder,
}

/// Decimal odds for one Over/Under total-goals line.
#[derive(Debug, Clone)]
pub struct MarketOdds {
    pub over: f64,
    pub under: f64,
    pub source: OddsSource,
}

/// Decision thresholds. All recognized knobs; see `Config::from_env` for the
/// environment surface.
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Rule 1: flag Over/Under outright at or above this model probability.
    pub high_confidence_threshold: f64,
    /// Rule 2: market odds must beat fair odds by this factor.
    pub value_threshold: f64,
    /// Rule 2: minimum model probability before an edge is trusted at all.
    pub min_value_probability: f64,
    /// Floor under the probability before inverting to fair odds.
    pub floor_probability: f64,
    /// Over/Under line the market odds refer to.
    pub total_goals_line: f64,
    /// Scoreline enumeration bound handed to the market model.
    pub max_goals_per_side: u32,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            high_confidence_threshold: 0.75,
            value_threshold: 1.10,
            min_value_probability: 0.55,
            floor_probability: 0.01,
            total_goals_line: 2.5,
            max_goals_per_side: crate::market::DEFAULT_MAX_GOALS_PER_SIDE,
        }
    }
}

/// Breakeven decimal odds implied by a model probability, floored so a
/// vanishing probability cannot blow the quotient up.
pub fn fair_odds(prob: f64, floor_prob: f64) -> f64 {
    1.0 / prob.max(floor_prob)
}

/// Applies the decision rules to one fixture. Rules are evaluated
/// independently: a fixture can collect several suggestions, and an empty
/// result means nothing is worth flagging.
pub fn recommend(
    probs: &OutcomeProbabilities,
    odds: &MarketOdds,
    cfg: &RecommendConfig,
) -> Vec<String> {
    let mut out = Vec::new();
    let line = cfg.total_goals_line;

    // Rule 1, high confidence. Over and Under sum to one, so with any
    // threshold above 0.5 at most one branch fires.
    if probs.prob_over >= cfg.high_confidence_threshold {
        out.push(format!(
            "🎯 High probability: Over {line:.1} goals (prob {:.1}%)",
            probs.prob_over * 100.0
        ));
    } else if probs.prob_under >= cfg.high_confidence_threshold {
        out.push(format!(
            "🎯 High probability: Under {line:.1} goals (prob {:.1}%)",
            probs.prob_under * 100.0
        ));
    }

    // Rule 2, value vs. the quoted market. Placeholder odds are not a market
    // signal, so the edge comparison is skipped entirely for them.
    if odds.source == OddsSource::Quoted {
        let fair_over = fair_odds(probs.prob_over, cfg.floor_probability);
        if odds.over >= fair_over * cfg.value_threshold
            && probs.prob_over >= cfg.min_value_probability
        {
            out.push(format!(
                "⭐ Value: Over {line:.1} goals (market odds {:.2}, fair odds {fair_over:.2})",
                odds.over
            ));
        }

        let fair_under = fair_odds(probs.prob_under, cfg.floor_probability);
        if odds.under >= fair_under * cfg.value_threshold
            && probs.prob_under >= cfg.min_value_probability
        {
            out.push(format!(
                "⭐ Value: Under {line:.1} goals (market odds {:.2}, fair odds {fair_under:.2})",
                odds.under
            ));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::joint_outcome;

    fn quoted(over: f64, under: f64) -> MarketOdds {
        MarketOdds {
            over,
            under,
            source: OddsSource::Quoted,
        }
    }

    fn probs_with_over(prob_over: f64) -> OutcomeProbabilities {
        OutcomeProbabilities {
            total_goals: [0.0; 11],
            prob_over,
            prob_under: 1.0 - prob_over,
            prob_both_score: 0.5,
        }
    }

    #[test]
    fn high_confidence_threshold_is_inclusive() {
        let cfg = RecommendConfig::default();
        let notes = recommend(&probs_with_over(0.75), &quoted(1.0, 1.0), &cfg);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("High probability: Over"));
    }

    #[test]
    fn below_every_threshold_is_silent() {
        let cfg = RecommendConfig::default();
        let notes = recommend(&probs_with_over(0.52), &quoted(1.0, 1.0), &cfg);
        assert!(notes.is_empty());
    }

    #[test]
    fn high_confidence_and_value_can_cofire() {
        let cfg = RecommendConfig::default();
        // prob_over 0.80: fair odds 1.25, so market 2.00 is deep value.
        let notes = recommend(&probs_with_over(0.80), &quoted(2.0, 1.1), &cfg);
        assert_eq!(notes.len(), 2);
        assert!(notes[0].contains("High probability"));
        assert!(notes[1].contains("Value: Over"));
    }

    #[test]
    fn placeholder_odds_never_trigger_the_value_rule() {
        let cfg = RecommendConfig::default();
        let odds = MarketOdds {
            over: 50.0,
            under: 50.0,
            source: OddsSource::Placeholder,
        };
        let notes = recommend(&probs_with_over(0.60), &odds, &cfg);
        assert!(notes.is_empty());
    }

    #[test]
    fn fair_odds_floor_caps_the_quotient() {
        assert_eq!(fair_odds(0.0, 0.01), 100.0);
        assert!((fair_odds(0.5, 0.01) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn worked_example_two_nil_rates() {
        // eg 2.0 / 1.0: total goals ~ Poisson(3) before truncation, so the
        // Over 2.5 probability lands just under 0.577.
        let cfg = RecommendConfig::default();
        let probs = joint_outcome(2.0, 1.0, cfg.max_goals_per_side, cfg.total_goals_line).unwrap();
        assert!(
            probs.prob_over > 0.54 && probs.prob_over < 0.60,
            "{}",
            probs.prob_over
        );

        // Market at 2.50 clears fair odds (~1.78) times 1.10, min probability
        // 0.55 holds, and 0.75 high confidence does not.
        let notes = recommend(&probs, &quoted(2.5, 1.9), &cfg);
        assert_eq!(notes.len(), 1);
        assert!(notes[0].contains("Value: Over"));
    }
}
