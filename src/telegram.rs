use anyhow::{Context, Result, bail};
use serde_json::json;

use crate::http_client::http_client;

/// Delivers one preformatted digest to the configured chat. The shared client
/// timeout bounds the call; a non-2xx answer comes back as an error for the
/// caller to log, never to abort the run on.
pub fn send_message(bot_token: &str, chat_id: &str, text: &str) -> Result<()> {
    let client = http_client()?;
    let url = format!("https://api.telegram.org/bot{bot_token}/sendMessage");
    let payload = json!({
        "chat_id": chat_id,
        "text": text,
        "parse_mode": "Markdown",
    });

    let resp = client
        .post(&url)
        .json(&payload)
        .send()
        .context("telegram request failed")?;

    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().unwrap_or_default();
        bail!("telegram returned {status}: {body}");
    }
    Ok(())
}
