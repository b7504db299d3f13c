use anyhow::{Context, Result};
use chrono::{Duration as ChronoDuration, Utc};
use serde::Deserialize;

use crate::http_client::http_client;
use crate::recommend::{MarketOdds, OddsSource};
use crate::strength::FinishedMatch;

const API_BASE_URL: &str = "https://v3.football.api-sports.io/";

/// Neutral odds used while no odds feed is wired up. Tagged as placeholder so
/// the recommendation engine never reads them as a market signal.
const PLACEHOLDER_ODDS_OVER: f64 = 1.95;
const PLACEHOLDER_ODDS_UNDER: f64 = 1.90;

/// Upcoming match inside the lookahead window, read-only to the core.
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Raw kickoff timestamp as delivered, e.g. `2024-08-17T14:00:00+00:00`.
    pub kickoff: String,
    pub home_id: u32,
    pub home_name: String,
    pub away_id: u32,
    pub away_name: String,
    pub odds: MarketOdds,
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    response: Vec<FixtureItem>,
}

#[derive(Debug, Deserialize)]
struct FixtureItem {
    fixture: FixtureInfo,
    teams: TeamsPair,
    #[serde(default)]
    score: Option<Score>,
}

#[derive(Debug, Deserialize)]
struct FixtureInfo {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    status: Option<Status>,
}

#[derive(Debug, Deserialize)]
struct Status {
    #[serde(default)]
    short: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TeamsPair {
    home: TeamRef,
    away: TeamRef,
}

#[derive(Debug, Deserialize)]
struct TeamRef {
    id: u32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct Score {
    #[serde(default)]
    fulltime: Option<GoalPair>,
}

#[derive(Debug, Deserialize)]
struct GoalPair {
    #[serde(default)]
    home: Option<u32>,
    #[serde(default)]
    away: Option<u32>,
}

/// Full-time results for one competition + season.
pub fn fetch_finished_matches(
    api_key: &str,
    league_id: u32,
    season: u16,
) -> Result<Vec<FinishedMatch>> {
    let body = api_get(
        api_key,
        "fixtures",
        &[
            ("league", league_id.to_string()),
            ("season", season.to_string()),
            ("status", "FT".to_string()),
        ],
    )?;
    parse_finished_matches_json(&body)
}

/// Fixtures from today up to `lookahead_days` ahead, with placeholder odds
/// attached. Wiring a real odds feed means swapping the `MarketOdds` source
/// here; nothing downstream changes.
pub fn fetch_upcoming_fixtures(
    api_key: &str,
    league_id: u32,
    season: u16,
    lookahead_days: u32,
) -> Result<Vec<Fixture>> {
    let today = Utc::now().date_naive();
    let until = today + ChronoDuration::days(lookahead_days as i64);
    let body = api_get(
        api_key,
        "fixtures",
        &[
            ("league", league_id.to_string()),
            ("season", season.to_string()),
            ("from", today.format("%Y-%m-%d").to_string()),
            ("to", until.format("%Y-%m-%d").to_string()),
        ],
    )?;
    parse_upcoming_fixtures_json(&body)
}

fn api_get(api_key: &str, endpoint: &str, params: &[(&str, String)]) -> Result<String> {
    let client = http_client()?;
    let url = format!("{API_BASE_URL}{endpoint}");
    let resp = client
        .get(&url)
        .header("x-apisports-key", api_key)
        .query(params)
        .send()
        .with_context(|| format!("request to {endpoint} failed"))?
        .error_for_status()
        .with_context(|| format!("{endpoint} returned an error status"))?;
    resp.text().context("failed to read response body")
}

/// Keeps only fully completed matches: full-time status and both final goal
/// counts present. The provider occasionally mixes in-progress or abandoned
/// entries into the same payload.
pub fn parse_finished_matches_json(raw: &str) -> Result<Vec<FinishedMatch>> {
    let envelope: ApiEnvelope =
        serde_json::from_str(raw.trim()).context("invalid fixtures json")?;

    let mut out = Vec::new();
    for item in envelope.response {
        let finished = item
            .fixture
            .status
            .as_ref()
            .and_then(|s| s.short.as_deref())
            .map(|s| s == "FT")
            .unwrap_or(false);
        if !finished {
            continue;
        }
        let Some(fulltime) = item.score.and_then(|s| s.fulltime) else {
            continue;
        };
        let (Some(home_goals), Some(away_goals)) = (fulltime.home, fulltime.away) else {
            continue;
        };
        out.push(FinishedMatch {
            home_id: item.teams.home.id,
            home_name: item.teams.home.name,
            away_id: item.teams.away.id,
            away_name: item.teams.away.name,
            home_goals,
            away_goals,
        });
    }
    Ok(out)
}

pub fn parse_upcoming_fixtures_json(raw: &str) -> Result<Vec<Fixture>> {
    let envelope: ApiEnvelope =
        serde_json::from_str(raw.trim()).context("invalid fixtures json")?;

    let mut out = Vec::new();
    for item in envelope.response {
        out.push(Fixture {
            kickoff: item.fixture.date.unwrap_or_default(),
            home_id: item.teams.home.id,
            home_name: item.teams.home.name,
            away_id: item.teams.away.id,
            away_name: item.teams.away.name,
            odds: MarketOdds {
                over: PLACEHOLDER_ODDS_OVER,
                under: PLACEHOLDER_ODDS_UNDER,
                source: OddsSource::Placeholder,
            },
        });
    }
    Ok(out)
}
