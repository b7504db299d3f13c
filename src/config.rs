use std::env;

use anyhow::{Context, Result, anyhow};
use chrono::NaiveTime;

use crate::recommend::RecommendConfig;

/// One competition to analyze: provider id plus the label used in the digest.
#[derive(Debug, Clone)]
pub struct LeagueTarget {
    pub id: u32,
    pub label: String,
}

/// Everything a run needs, resolved once at startup and passed by reference
/// into the pipeline. Nothing below reads the process environment again.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub telegram_bot_token: String,
    pub telegram_chat_id: String,
    pub season: u16,
    pub lookahead_days: u32,
    pub leagues: Vec<LeagueTarget>,
    /// Run one pass and exit instead of scheduling daily runs.
    pub single_run: bool,
    /// Local time of day for the scheduled daily pass.
    pub run_at: NaiveTime,
    pub recommend: RecommendConfig,
}

impl Config {
    /// Builds the run configuration from the environment. Missing credentials
    /// are fatal here, before any network call is attempted.
    pub fn from_env() -> Result<Self> {
        let api_key = required("API_FOOTBALL_KEY")?;
        let telegram_bot_token = required("TELEGRAM_BOT_TOKEN")?;
        let telegram_chat_id = required("TELEGRAM_CHAT_ID")?;

        let season = env_parse("SEASON_YEAR", 2024u16);
        let lookahead_days = env_parse("LOOKAHEAD_DAYS", 15u32).clamp(1, 60);

        let leagues = match env::var("LEAGUES") {
            Ok(raw) => parse_leagues(&raw)?,
            Err(_) => default_leagues(),
        };
        if leagues.is_empty() {
            return Err(anyhow!("LEAGUES resolved to an empty competition list"));
        }

        let single_run = env_bool("SINGLE_RUN", false);
        let run_at_raw = env::var("RUN_AT").unwrap_or_else(|_| "09:00".to_string());
        let run_at = NaiveTime::parse_from_str(run_at_raw.trim(), "%H:%M")
            .with_context(|| format!("RUN_AT must be HH:MM, got {run_at_raw:?}"))?;

        let defaults = RecommendConfig::default();
        let recommend = RecommendConfig {
            high_confidence_threshold: env_parse(
                "HIGH_CONFIDENCE_THRESHOLD",
                defaults.high_confidence_threshold,
            ),
            value_threshold: env_parse("VALUE_THRESHOLD", defaults.value_threshold),
            min_value_probability: env_parse(
                "MIN_VALUE_PROBABILITY",
                defaults.min_value_probability,
            ),
            floor_probability: env_parse("FLOOR_PROBABILITY", defaults.floor_probability),
            total_goals_line: env_parse("TOTAL_GOALS_LINE", defaults.total_goals_line),
            max_goals_per_side: env_parse("MAX_GOALS_PER_SIDE", defaults.max_goals_per_side),
        };

        Ok(Self {
            api_key,
            telegram_bot_token,
            telegram_chat_id,
            season,
            lookahead_days,
            leagues,
            single_run,
            run_at,
            recommend,
        })
    }
}

/// The original target set: high-liquidity leagues by provider id.
pub fn default_leagues() -> Vec<LeagueTarget> {
    [
        (39, "Premier League (England)"),
        (140, "La Liga (Spain)"),
        (78, "Bundesliga (Germany)"),
        (135, "Serie A (Italy)"),
        (71, "Brasileirão Série A (Brazil)"),
    ]
    .into_iter()
    .map(|(id, label)| LeagueTarget {
        id,
        label: label.to_string(),
    })
    .collect()
}

/// Parses `id:label,id:label`, e.g. `39:Premier League,140:La Liga`.
pub fn parse_leagues(raw: &str) -> Result<Vec<LeagueTarget>> {
    let mut out = Vec::new();
    for entry in raw.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (id, label) = entry
            .split_once(':')
            .ok_or_else(|| anyhow!("LEAGUES entry {entry:?} is not id:label"))?;
        let id = id
            .trim()
            .parse::<u32>()
            .with_context(|| format!("LEAGUES entry {entry:?} has a non-numeric id"))?;
        let label = label.trim();
        if label.is_empty() {
            return Err(anyhow!("LEAGUES entry {entry:?} has an empty label"));
        }
        out.push(LeagueTarget {
            id,
            label: label.to_string(),
        });
    }
    Ok(out)
}

fn required(name: &str) -> Result<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("required environment variable {name} is not set"))
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn env_bool(name: &str, default: bool) -> bool {
    match env::var(name) {
        Ok(raw) => matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}
