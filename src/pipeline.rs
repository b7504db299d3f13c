use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use tracing::{info, warn};

use crate::api_football::{Fixture, fetch_finished_matches, fetch_upcoming_fixtures};
use crate::config::{Config, LeagueTarget};
use crate::error::ModelError;
use crate::expected_goals::expected_goals;
use crate::market::joint_outcome;
use crate::recommend::{RecommendConfig, recommend};
use crate::report::{BetSuggestion, LeagueSection, build_digest};
use crate::strength::{self, LeagueAverages, TeamStrength};

/// Policy default used only for logging when a competition has no history.
/// Never fed into the model; competitions without history are skipped.
fn default_averages() -> LeagueAverages {
    LeagueAverages {
        avg_goals_home: 1.5,
        avg_goals_away: 1.2,
        sample_matches: 0,
    }
}

/// One full analysis pass: estimate, score and recommend per competition,
/// then fold everything into a digest. Every per-competition failure is
/// recovered here; the pass always returns whatever succeeded (`None` when
/// nothing produced a suggestion).
pub fn run_analysis(cfg: &Config) -> Option<String> {
    let mut sections = Vec::new();

    for league in &cfg.leagues {
        match analyze_league(cfg, league) {
            Ok(Some(section)) => sections.push(section),
            Ok(None) => {}
            Err(err) => {
                warn!(league = %league.label, error = %err, "competition failed, continuing");
            }
        }
    }

    build_digest(&sections, cfg.lookahead_days, Utc::now().date_naive())
}

fn analyze_league(cfg: &Config, league: &LeagueTarget) -> Result<Option<LeagueSection>> {
    info!(league = %league.label, id = league.id, "processing competition");

    let history = fetch_finished_matches(&cfg.api_key, league.id, cfg.season)?;
    let (averages, strengths) = match strength::estimate(&history) {
        Ok(parts) => parts,
        Err(ModelError::InsufficientHistory) => {
            let d = default_averages();
            warn!(
                league = %league.label,
                "no finished matches; policy default averages ({:.1}/{:.1}) are not an estimate, skipping competition",
                d.avg_goals_home,
                d.avg_goals_away
            );
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    info!(
        league = %league.label,
        matches = averages.sample_matches,
        avg_home = format!("{:.2}", averages.avg_goals_home),
        avg_away = format!("{:.2}", averages.avg_goals_away),
        "estimated league averages"
    );

    let fixtures = fetch_upcoming_fixtures(&cfg.api_key, league.id, cfg.season, cfg.lookahead_days)?;
    if fixtures.is_empty() {
        info!(league = %league.label, "no upcoming fixtures in the window");
        return Ok(None);
    }

    let mut suggestions = Vec::new();
    for fixture in &fixtures {
        match analyze_fixture(&averages, &strengths, fixture, &cfg.recommend) {
            Ok(suggestion) => suggestions.push(suggestion),
            Err(err) => {
                info!(
                    league = %league.label,
                    fixture = format!("{} vs {}", fixture.home_name, fixture.away_name),
                    reason = %err,
                    "skipping fixture"
                );
            }
        }
    }

    Ok(Some(LeagueSection {
        league_label: league.label.clone(),
        suggestions,
    }))
}

/// Scores one fixture against the season model. Fails (and is skipped by the
/// caller) when either team is missing from the historical window or the
/// expected-goals product degenerates.
pub fn analyze_fixture(
    averages: &LeagueAverages,
    strengths: &HashMap<u32, TeamStrength>,
    fixture: &Fixture,
    cfg: &RecommendConfig,
) -> Result<BetSuggestion, ModelError> {
    let home = strengths
        .get(&fixture.home_id)
        .ok_or_else(|| ModelError::UnknownTeam {
            id: fixture.home_id,
            name: fixture.home_name.clone(),
        })?;
    let away = strengths
        .get(&fixture.away_id)
        .ok_or_else(|| ModelError::UnknownTeam {
            id: fixture.away_id,
            name: fixture.away_name.clone(),
        })?;

    let (eg_home, eg_away) = expected_goals(averages, home, away)?;
    let probs = joint_outcome(eg_home, eg_away, cfg.max_goals_per_side, cfg.total_goals_line)?;
    let notes = recommend(&probs, &fixture.odds, cfg);

    Ok(BetSuggestion {
        fixture_label: format!("{} vs {}", fixture.home_name, fixture.away_name),
        kickoff: fixture.kickoff.clone(),
        eg_home,
        eg_away,
        notes,
    })
}
