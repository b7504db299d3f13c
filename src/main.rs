use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::{Local, NaiveTime};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use valuebot::config::Config;
use valuebot::{pipeline, telegram};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fatal before any network activity: running with undefined inputs is
    // worse than not running.
    let cfg = Config::from_env()?;
    info!(
        leagues = cfg.leagues.len(),
        season = cfg.season,
        lookahead_days = cfg.lookahead_days,
        single_run = cfg.single_run,
        "valuebot starting"
    );

    if cfg.single_run {
        run_once(&cfg);
        return Ok(());
    }

    // Scheduled mode: one pass right away, then one per day at the
    // configured time.
    run_once(&cfg);
    loop {
        let wait = seconds_until(cfg.run_at);
        info!(
            next_run_in_secs = wait,
            at = %cfg.run_at,
            "sleeping until the next scheduled pass"
        );
        thread::sleep(Duration::from_secs(wait));
        run_once(&cfg);
    }
}

fn run_once(cfg: &Config) {
    info!("starting analysis pass");
    match pipeline::run_analysis(cfg) {
        Some(digest) => {
            match telegram::send_message(&cfg.telegram_bot_token, &cfg.telegram_chat_id, &digest) {
                Ok(()) => info!("digest delivered"),
                // Delivery trouble never aborts the schedule.
                Err(err) => error!(error = %err, "digest delivery failed"),
            }
        }
        None => info!("no suggestions this pass, nothing delivered"),
    }
}

/// Seconds from now until the next local occurrence of `at` (tomorrow when
/// the time already passed today).
fn seconds_until(at: NaiveTime) -> u64 {
    let now = Local::now();
    let today_target = now.date_naive().and_time(at);
    let target = if today_target > now.naive_local() {
        today_target
    } else {
        today_target + chrono::Duration::days(1)
    };
    (target - now.naive_local()).num_seconds().max(1) as u64
}
