use std::collections::HashMap;

use crate::error::ModelError;

/// One fully completed match, as delivered by the results feed. Historical
/// fact; never mutated after ingestion.
#[derive(Debug, Clone)]
pub struct FinishedMatch {
    pub home_id: u32,
    pub home_name: String,
    pub away_id: u32,
    pub away_name: String,
    pub home_goals: u32,
    pub away_goals: u32,
}

/// League-wide scoring rates for one competition + season.
#[derive(Debug, Clone, PartialEq)]
pub struct LeagueAverages {
    /// Mean goals scored by home sides per match.
    pub avg_goals_home: f64,
    /// Mean goals scored by away sides per match.
    pub avg_goals_away: f64,
    pub sample_matches: usize,
}

/// Multiplicative deviation from the league-average scoring/conceding rate,
/// split by venue. 1.0 = league-average team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamStrength {
    pub attack_home: f64,
    pub defense_home: f64,
    pub attack_away: f64,
    pub defense_away: f64,
}

#[derive(Debug, Default)]
struct TeamTally {
    name: String,
    games_home: u32,
    games_away: u32,
    scored_home: u32,
    conceded_home: u32,
    scored_away: u32,
    conceded_away: u32,
}

/// Turns one season of finished matches into league averages and per-team
/// attack/defense coefficients.
///
/// Conceded-at-home is normalized against the league's *away*-scoring average
/// (the opponent was the away side), and vice versa. Any ratio whose
/// denominator is zero (no games at that venue, or a zero league average)
/// falls back to 1.0 as a division guard, not a statistical claim.
pub fn estimate(
    matches: &[FinishedMatch],
) -> Result<(LeagueAverages, HashMap<u32, TeamStrength>), ModelError> {
    if matches.is_empty() {
        return Err(ModelError::InsufficientHistory);
    }

    let mut tallies: HashMap<u32, TeamTally> = HashMap::new();
    let mut total_goals_home = 0u32;
    let mut total_goals_away = 0u32;

    for m in matches {
        total_goals_home += m.home_goals;
        total_goals_away += m.away_goals;

        let home = tallies.entry(m.home_id).or_default();
        if home.name.is_empty() {
            home.name = m.home_name.clone();
        }
        home.games_home += 1;
        home.scored_home += m.home_goals;
        home.conceded_home += m.away_goals;

        let away = tallies.entry(m.away_id).or_default();
        if away.name.is_empty() {
            away.name = m.away_name.clone();
        }
        away.games_away += 1;
        away.scored_away += m.away_goals;
        away.conceded_away += m.home_goals;
    }

    let n = matches.len() as f64;
    let averages = LeagueAverages {
        avg_goals_home: total_goals_home as f64 / n,
        avg_goals_away: total_goals_away as f64 / n,
        sample_matches: matches.len(),
    };

    let mut strengths = HashMap::with_capacity(tallies.len());
    for (team_id, t) in tallies {
        let rate_scored_home = per_game(t.scored_home, t.games_home);
        let rate_conceded_home = per_game(t.conceded_home, t.games_home);
        let rate_scored_away = per_game(t.scored_away, t.games_away);
        let rate_conceded_away = per_game(t.conceded_away, t.games_away);

        strengths.insert(
            team_id,
            TeamStrength {
                attack_home: ratio_or_one(rate_scored_home, averages.avg_goals_home),
                defense_home: ratio_or_one(rate_conceded_home, averages.avg_goals_away),
                attack_away: ratio_or_one(rate_scored_away, averages.avg_goals_away),
                defense_away: ratio_or_one(rate_conceded_away, averages.avg_goals_home),
            },
        );
    }

    Ok((averages, strengths))
}

fn per_game(goals: u32, games: u32) -> Option<f64> {
    if games == 0 {
        None
    } else {
        Some(goals as f64 / games as f64)
    }
}

fn ratio_or_one(rate: Option<f64>, league_avg: f64) -> f64 {
    match rate {
        Some(r) if league_avg > 0.0 => r / league_avg,
        _ => 1.0,
    }
}
